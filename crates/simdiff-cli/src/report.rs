use std::io::Write;

use colored::Colorize;
use simdiff_diff::{ComparisonReport, DiffEntry};
use simdiff_types::Amount;

const RULE_WIDTH: usize = 50;

/// Render a comparison as human-readable text.
///
/// Amounts are printed with two decimals; this is display only and has no
/// bearing on which entries were reported.
pub fn print_report(
    report: &ComparisonReport,
    writer: &mut impl Write,
    color: bool,
) -> std::io::Result<()> {
    let paint = Painter { color };

    writeln!(writer, "Master total: {}", report.master_total)?;
    writeln!(writer, "Branch total: {}", report.branch_total)?;

    writeln!(writer, "\n{}", paint.heading("📊 Total difference:"))?;
    writeln!(
        writer,
        "Total master = {}, Total branch = {}, Delta = {}",
        report.master_total,
        report.branch_total,
        paint.delta(report.total_delta())
    )?;

    writeln!(writer, "\n{}", paint.heading("🔍 Differences by agent:"))?;
    let dashes = "-".repeat(RULE_WIDTH);
    for entry in &report.by_agent {
        writeln!(writer, "{dashes}")?;
        writeln!(writer, "🧑 {}", entry_line(entry, &paint))?;
        writeln!(writer, "{dashes}")?;
    }

    let rule = "=".repeat(RULE_WIDTH);
    for _ in 0..3 {
        writeln!(writer, "{rule}")?;
    }

    writeln!(writer, "{}", paint.heading("🔍 Differences by agent and year:"))?;
    for entry in &report.by_agent_year {
        writeln!(writer, "🧑 {}", entry_line(entry, &paint))?;
    }

    writeln!(writer, "\n{}", paint.heading("📅 Differences by year:"))?;
    for entry in &report.by_year {
        writeln!(writer, "📅 {}", entry_line(entry, &paint))?;
    }

    writeln!(writer)?;
    if report.is_empty() {
        writeln!(writer, "{} No differences.", paint.ok("✓"))?;
    } else {
        writeln!(
            writer,
            "{} difference(s): {} agent, {} agent-year, {} year ({} increased, {} decreased)",
            report.len(),
            report.by_agent.len(),
            report.by_agent_year.len(),
            report.by_year.len(),
            report.increases(),
            report.decreases(),
        )?;
    }
    Ok(())
}

/// Render a comparison as pretty-printed JSON.
pub fn json_report(report: &ComparisonReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn entry_line(entry: &DiffEntry, paint: &Painter) -> String {
    format!(
        "{} : master = {}, branch = {}, delta = {}",
        entry.key,
        entry.master,
        entry.branch,
        paint.delta(entry.delta)
    )
}

struct Painter {
    color: bool,
}

impl Painter {
    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn ok(&self, text: &str) -> String {
        if self.color {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn delta(&self, delta: Amount) -> String {
        let text = delta.to_string();
        if !self.color {
            return text;
        }
        if delta.is_positive() {
            text.green().to_string()
        } else if delta.is_negative() {
            text.red().to_string()
        } else {
            text
        }
    }
}
