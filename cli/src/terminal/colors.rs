use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const SUCCESS: Color = Color::Green;
pub const FAILURE: Color = Color::Yellow;
pub const ERROR: Color = Color::Red;
