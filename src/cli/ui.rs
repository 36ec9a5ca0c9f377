use std::io::{stdout, Write};
use std::time::Duration;

use owo_colors::OwoColorize;
use crossterm::{
    execute,
    style::{Color as CtColor, SetForegroundColor, ResetColor, Print},
};
use indicatif::{ProgressBar, ProgressStyle};

use crate::core::{ActivityEntry, Level};
use crate::error::LinkError;

/// Colour is on unless NO_COLOR is set (`--no-color` and `ui.colored = false` set it too).
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn print_line(color: CtColor, prefix: &str, message: &str) {
    if colors_enabled() {
        let _ = execute!(
            stdout(),
            SetForegroundColor(color),
            Print(prefix),
            Print(message),
            Print("\n"),
            ResetColor
        );
    } else {
        println!("{}{}", prefix, message);
    }
}

/// Print success message
pub fn print_success(message: &str) {
    print_line(CtColor::Green, "✅ ", message);
}

/// Print warning message
pub fn print_warning(message: &str) {
    print_line(CtColor::Yellow, "⚠️  ", message);
}

/// Print an error with its cause chain, followed by any remediation hints
pub fn print_error(error: &anyhow::Error) {
    print_line(CtColor::Red, "❌ ", &format!("{:#}", error));
    let guidance = error
        .downcast_ref::<LinkError>()
        .map(LinkError::guidance)
        .unwrap_or_default();
    if !guidance.is_empty() {
        print_line(CtColor::Red, "", "Please make sure that:");
        for (i, hint) in guidance.iter().enumerate() {
            print_line(CtColor::Red, "", &format!("  {}. {}", i + 1, hint));
        }
    }
}

/// Print info message
pub fn print_info(message: &str) {
    print_line(CtColor::Blue, "ℹ️  ", message);
}

/// Print one timestamped activity log line.
///
/// Error entries are skipped; the failing command's error reaches the
/// terminal once, through [`print_error`].
pub fn print_activity(entry: &ActivityEntry) {
    let color = match entry.level {
        Level::Info => CtColor::DarkGrey,
        Level::Success => CtColor::Green,
        Level::Warning => CtColor::Yellow,
        Level::Error => return,
    };
    print_line(color, "", &entry.to_string());
}

/// Create a deletion progress spinner
pub fn create_deletion_progress_bar(item: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(80));
    let style = ProgressStyle::with_template("{spinner:.red} [{elapsed_precise}] {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["🗑️", "🔥", "💥", "⚡"]);
    pb.set_style(style);
    pb.set_message(format!("Removing {}...", item));
    pb
}

/// Get user confirmation for destructive operations
pub fn confirm_destructive_operation(operation: &str, target: &str) -> Result<bool, std::io::Error> {
    if colors_enabled() {
        print!("⚠️  {} '{}'? [y/N]: ", operation, target.red());
    } else {
        print!("{} '{}'? [y/N]: ", operation, target);
    }
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(is_affirmative(&input))
}

/// Only an explicit yes counts; anything else, including EOF, is a no.
pub fn is_affirmative(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("  YES "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("yep"));
    }
}
