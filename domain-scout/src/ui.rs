//! Output formatting for the domain-scout CLI.
//!
//! Check results render as a console list, CSV (`Domain,Available,Status`) or
//! a markdown report; rankings render as CSV (`Domain,Score,Syllables,Length`)
//! or a console table. The `format_*` functions return strings so the file
//! writers and tests share them; the `print_*` functions add color.

use chrono::{DateTime, TimeZone};
use console::{pad_str, style, Alignment};
use domain_scout_lib::{CheckResult, RankedEntry};
use std::fmt::Display;
use std::time::Duration;

/// Width of the domain column in console output.
const DOMAIN_WIDTH: usize = 35;

fn status_label(available: bool) -> &'static str {
    if available {
        "AVAILABLE"
    } else {
        "TAKEN"
    }
}

fn visible(results: &[CheckResult], only_free: bool) -> impl Iterator<Item = &CheckResult> {
    results.iter().filter(move |r| r.available || !only_free)
}

// ── Check results ────────────────────────────────────────────────────────────

/// Plain console lines: `<domain padded> <STATUS>`.
pub fn format_check_console(results: &[CheckResult], only_free: bool) -> String {
    visible(results, only_free)
        .map(|r| format!("{:<width$} {}", r.domain, status_label(r.available), width = DOMAIN_WIDTH))
        .collect::<Vec<_>>()
        .join("\n")
}

/// CSV with a `Domain,Available,Status` header.
pub fn format_check_csv(results: &[CheckResult], only_free: bool) -> String {
    let mut lines = vec!["Domain,Available,Status".to_string()];
    lines.extend(
        visible(results, only_free)
            .map(|r| format!("{},{},{}", r.domain, r.available, status_label(r.available))),
    );
    lines.join("\n") + "\n"
}

/// Markdown report with a summary section and a results table.
///
/// Summary counts always cover every checked domain, even with `only_free`.
pub fn format_check_markdown<Tz>(
    results: &[CheckResult],
    only_free: bool,
    generated: &DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let available = results.iter().filter(|r| r.available).count();
    let mut lines = vec![
        "# Domain Availability Check Results".to_string(),
        format!("Generated: {}", generated.format("%Y-%m-%d %H:%M:%S")),
        String::new(),
        "## Summary".to_string(),
    ];

    if only_free {
        lines.push("- Showing only available domains".to_string());
    }
    lines.push(format!("- Total domains checked: {}", results.len()));
    lines.push(format!("- Available: {}", available));
    lines.push(format!("- Taken: {}", results.len() - available));
    lines.push(String::new());
    lines.push("## Results".to_string());
    lines.push("| Domain | Status | Availability |".to_string());
    lines.push("|--------|--------|--------------|".to_string());

    for r in visible(results, only_free) {
        let code = if r.available { "404" } else { "200" };
        let mark = if r.available { "✅" } else { "❌" };
        lines.push(format!(
            "| {} | {} | {} {} |",
            r.domain,
            code,
            mark,
            status_label(r.available)
        ));
    }

    lines.join("\n") + "\n"
}

/// Colored console list of check results.
pub fn print_check_results(results: &[CheckResult], only_free: bool) {
    for r in visible(results, only_free) {
        let domain = pad_str(&r.domain, DOMAIN_WIDTH, Alignment::Left, None);
        if r.available {
            println!("{} {}", style(domain).bold(), style("AVAILABLE").green());
        } else {
            println!("{} {}", domain, style("TAKEN").red());
        }
    }
}

/// Print the final summary bar with colored counts.
pub fn print_check_summary(results: &[CheckResult], duration: Duration) {
    let total = results.len();
    let available = results.iter().filter(|r| r.available).count();
    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    println!(
        "  {} domain{} in {:.1}s  {}  {}  {}  {}",
        style(total).bold(),
        if total == 1 { "" } else { "s" },
        duration.as_secs_f64(),
        style("|").dim(),
        style(format!("{} available", available)).green(),
        style("|").dim(),
        style(format!("{} taken", total - available)).red(),
    );
}

// ── Rankings ─────────────────────────────────────────────────────────────────

/// CSV with a `Domain,Score,Syllables,Length` header, best first.
pub fn format_ranked_csv(entries: &[RankedEntry]) -> String {
    let mut lines = vec!["Domain,Score,Syllables,Length".to_string()];
    lines.extend(
        entries
            .iter()
            .map(|e| format!("{},{},{},{}", e.domain, e.score, e.syllables, e.length)),
    );
    lines.join("\n") + "\n"
}

/// Console table of the first `top` entries.
pub fn print_ranked_table(entries: &[RankedEntry], top: usize) {
    if entries.is_empty() {
        println!("{}", style("No available domains to rank.").yellow());
        return;
    }

    let shown = top.min(entries.len());
    println!(
        "{} {}",
        style(format!("Top {} domains", shown)).yellow().bold(),
        style(format!("(of {} ranked)", entries.len())).dim()
    );
    println!(
        "  {:>4}  {}  {:>6}  {:>9}  {:>6}",
        style("#").dim(),
        pad_str("Domain", DOMAIN_WIDTH, Alignment::Left, None),
        "Score",
        "Syllables",
        "Length"
    );

    for (rank, e) in entries.iter().take(top).enumerate() {
        let score = if e.score >= 100 {
            style(e.score).green().bold()
        } else if e.score >= 70 {
            style(e.score).green()
        } else {
            style(e.score).yellow()
        };
        println!(
            "  {:>4}  {}  {:>6}  {:>9}  {:>6}",
            rank + 1,
            pad_str(&e.domain, DOMAIN_WIDTH, Alignment::Left, None),
            score,
            e.syllables,
            e.length
        );
    }
}
