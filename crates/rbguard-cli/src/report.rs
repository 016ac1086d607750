//! Pass/fail banner and violation details.

use std::io::{self, Write};

use colored::Colorize;

use rbguard_core::Violation;

/// Label at the start of the banner.
pub const BANNER_LABEL: &str = "Runbook Validation";

/// Width budget for the dot leader plus status.
pub const BAR_LENGTH: usize = 60;

pub fn status_text(passed: bool) -> &'static str {
    if passed {
        "Passed"
    } else {
        "Failed"
    }
}

/// `Runbook Validation.....Passed`, status on a green or red background.
pub fn banner(passed: bool) -> String {
    let status = status_text(passed);
    let dots = ".".repeat(BAR_LENGTH - status.len() - 1);
    let styled = if passed {
        status.on_green()
    } else {
        status.on_red()
    };
    format!("{BANNER_LABEL}{dots}{styled}")
}

/// Write the banner and, when `show_details` is set, each violation.
pub fn write_report<W: Write>(
    out: &mut W,
    violations: &[Violation],
    show_details: bool,
) -> io::Result<()> {
    let passed = violations.is_empty();
    writeln!(out, "{}", banner(passed))?;

    if show_details {
        for violation in violations {
            writeln!(out, "{}", violation.to_string().white())?;
            writeln!(out)?;
        }
    }
    Ok(())
}
