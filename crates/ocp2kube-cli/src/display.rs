//! Display formatting for conversion warnings
//!
//! Translated YAML goes to stdout, so everything here is written to stderr.

use console::{StyledObject, style};
use ocp2kube_convert::{ConversionWarning, WarningSeverity};
use std::collections::BTreeMap;

fn icon(severity: WarningSeverity) -> StyledObject<&'static str> {
    match severity {
        WarningSeverity::Info => style(severity.icon()).blue(),
        WarningSeverity::Warning => style(severity.icon()).yellow(),
        WarningSeverity::Unsupported => style(severity.icon()).red(),
    }
}

/// Group warnings by severity, most severe first
fn group_by_severity(warnings: &[ConversionWarning]) -> Vec<(WarningSeverity, Vec<&ConversionWarning>)> {
    let mut groups: BTreeMap<WarningSeverity, Vec<&ConversionWarning>> = BTreeMap::new();
    for warning in warnings {
        groups.entry(warning.severity).or_default().push(warning);
    }
    groups.into_iter().rev().collect()
}

fn summary_line(warnings: &[ConversionWarning]) -> String {
    let counts: Vec<String> = group_by_severity(warnings)
        .iter()
        .map(|(severity, items)| format!("{} {}", items.len(), severity.label()))
        .collect();
    format!("Translated with {}", counts.join(", "))
}

/// Print every warning, grouped by severity, followed by a one-line summary
pub fn print_summary(warnings: &[ConversionWarning]) {
    if warnings.is_empty() {
        eprintln!("{} Translated without warnings", style("✓").green().bold());
        return;
    }

    for (severity, items) in group_by_severity(warnings) {
        eprintln!();
        eprintln!("{}", style(severity.label()).bold());

        for warning in items {
            eprintln!(
                "  {} {}/{} {} {}",
                icon(severity),
                warning.kind,
                warning.resource,
                style(&warning.field).dim(),
                warning.message
            );
            if let Some(suggestion) = &warning.suggestion {
                eprintln!("    {} {}", style("hint:").blue(), suggestion);
            }
        }
    }

    eprintln!();
    eprintln!("{} {}", style("⚠").yellow().bold(), summary_line(warnings));
}
