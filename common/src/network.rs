pub mod address;
pub mod path;
pub mod target;
