use std::fmt::Display;
use std::time::Duration;

use apiscan_common::config::Destination;
use apiscan_core::{RunReport, Tally};
use colored::*;
use tracing::info;

use crate::terminal::colors;
use crate::terminal::logging::PRINT_TARGET;

pub const TOTAL_WIDTH: usize = 64;

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn banner(q_level: u8) {
    if q_level > 0 {
        return;
    }

    let text_content: String = format!("⟦ APISCAN v{} ⟧ ", env!("CARGO_PKG_VERSION"));
    let text_width: usize = text_content.chars().count();
    let text: ColoredString = text_content.bright_green().bold();
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2).bright_black();

    print(&format!("{sep}{text}{sep}"));
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&line.to_string());
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    print(&sep.to_string());
}

pub fn destination(destination: &Destination, q_level: u8) {
    if q_level > 0 {
        return;
    }
    match destination {
        Destination::Stdout => aligned_line("Output", "standard output".normal()),
        Destination::File(path) => aligned_line("Output", path.display().to_string().normal()),
    }
}

pub fn summary(tally: &Tally, report: &RunReport, total_time: Duration, q_level: u8) {
    if q_level > 1 {
        return;
    }

    header("probe summary", q_level);
    aligned_line("Addresses", report.launched.to_string().color(colors::ACCENT));
    aligned_line("APIs found", tally.success.to_string().color(colors::SUCCESS).bold());
    aligned_line("No API", tally.failure.to_string().color(colors::FAILURE));
    aligned_line("Errors", tally.error.to_string().color(colors::ERROR));
    if report.recovered > 0 || report.crashed > 0 {
        aligned_line(
            "Recovered",
            format!("{} recovered, {} lost", report.recovered, report.crashed).color(colors::ERROR),
        );
    }

    let outcomes: ColoredString = format!("{} outcomes", tally.total()).bold().green();
    let elapsed: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let plain_len = format!("Probe Complete: {} outcomes recorded in {:.2}s", tally.total(), total_time.as_secs_f64())
        .chars()
        .count();

    fat_separator();
    centerln(
        &format!("Probe Complete: {outcomes} recorded in {elapsed}"),
        plain_len,
    );
}

fn aligned_line<V: Display>(key: &str, value: V) {
    const KEY_WIDTH: usize = 10;
    let dots: String = ".".repeat((KEY_WIDTH + 1).saturating_sub(key.len()));
    print(&format!(
        "{} {}{}{} {}",
        ">".color(colors::SEPARATOR),
        key.color(colors::PRIMARY),
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR),
        value
    ));
}

/// Centers `msg`, whose visible width (without colour codes) is `width`.
fn centerln(msg: &str, width: usize) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(width) / 2);
    print(&format!("{}{}", space, msg));
}
