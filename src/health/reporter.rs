//! Table rendering for health check reports

use std::fmt::Write;

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::runner::HealthCheckReport;

/// Formats a health check report as a table followed by a summary
pub fn format_report(report: &HealthCheckReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["System", "Status", "Duration", "Message"]);

    for (name, result) in &report.results {
        builder.push_record([
            name.clone(),
            result.status.as_colored_str(),
            format!("{:.2?}", result.duration),
            result.message.clone(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    let mut output = table.to_string();
    output.push('\n');
    output.push_str(&format_summary(report));
    output
}

fn format_summary(report: &HealthCheckReport) -> String {
    let mut summary = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(summary, "\n{}", "Summary".bold().underline());
    let _ = writeln!(summary, "  Total checks: {}", report.total);
    let _ = writeln!(summary, "  {} Passed: {}", "✓".green(), report.passed);
    if report.warned > 0 {
        let _ = writeln!(summary, "  {} Warned: {}", "⚠".yellow(), report.warned);
    }
    if report.failed > 0 {
        let _ = writeln!(summary, "  {} Failed: {}", "✗".red(), report.failed);
    }

    let overall = match (report.is_healthy(), report.has_warnings()) {
        (false, _) => "Overall: UNHEALTHY".red().bold(),
        (true, true) => "Overall: HEALTHY (with warnings)".yellow().bold(),
        (true, false) => "Overall: HEALTHY".green().bold(),
    };
    let _ = writeln!(summary, "\n  {}", overall);

    summary
}

/// Prints a report to stdout, followed by each check's findings
pub fn print_report(report: &HealthCheckReport) {
    println!("{}", format_report(report));

    for (name, result) in &report.results {
        if !result.details.is_empty() {
            println!("\n{} Details:", name.bold());
            println!("{}", result.details.join("\n"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::check::{CheckResult, SystemCheck};
    use crate::health::runner::HealthCheckRunner;

    struct Broken;

    impl SystemCheck for Broken {
        fn name(&self) -> &'static str {
            "Broken"
        }

        fn check(&self) -> CheckResult {
            CheckResult::fail("always fails")
        }
    }

    #[test]
    fn test_report_lists_systems_and_summary() {
        colored::control::set_override(false);
        let report = HealthCheckRunner::new().add_check(Broken).run();
        let text = format_report(&report);
        assert!(text.contains("Broken"));
        assert!(text.contains("always fails"));
        assert!(text.contains("FAIL"));
        assert!(text.contains("Overall: UNHEALTHY"));
    }
}
