// ============================================================================
// camcat-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: Console report styling
//
// Everything the operator reads on stdout goes through here: section headers,
// status lines, per-group progress and the final summary. Diagnostics go to
// stderr through the logger instead.
//
// KEY COMPONENTS:
// - styling: Constants for symbols, indentation and padding
// - Color control: set_color / should_use_color
// - format_* helpers: pure string builders, print_* wrappers around them

use owo_colors::OwoColorize;
use std::sync::atomic::{AtomicBool, Ordering};

// ============================================================================
// STYLING CONSTANTS
// ============================================================================

/// Styling constants for terminal output
pub mod styling {
    pub const SUCCESS_SYMBOL: &str = "✓";
    pub const PROCESSING_SYMBOL: &str = "»";

    pub const SECTION_PREFIX: &str = "===== ";
    pub const SECTION_SUFFIX: &str = " =====";

    pub const STATUS_INDENT: &str = "  ";
    pub const SUB_ITEM_INDENT: &str = "    ";

    /// Width the status labels are padded to
    pub const LABEL_WIDTH: usize = 15;
}

// ============================================================================
// COLOR CONTROL
// ============================================================================

static USE_COLOR: AtomicBool = AtomicBool::new(true);

/// Set whether to use color in terminal output
pub fn set_color(enable: bool) {
    USE_COLOR.store(enable, Ordering::Relaxed);
}

fn should_use_color() -> bool {
    USE_COLOR.load(Ordering::Relaxed)
}

// ============================================================================
// FORMATTING
// ============================================================================

pub fn format_section(title: &str) -> String {
    let title = title.to_uppercase();
    if should_use_color() {
        format!(
            "{}{}{}",
            styling::SECTION_PREFIX,
            title.cyan().bold(),
            styling::SECTION_SUFFIX
        )
    } else {
        format!("{}{}{}", styling::SECTION_PREFIX, title, styling::SECTION_SUFFIX)
    }
}

/// `  Label:         value`, label padded to `styling::LABEL_WIDTH`.
pub fn format_status(label: &str, value: &str, highlight: bool) -> String {
    let padding = styling::LABEL_WIDTH.saturating_sub(label.len()).max(1);
    let label = format!("{}:{}", label, " ".repeat(padding));
    if should_use_color() && highlight {
        format!("{}{}{}", styling::STATUS_INDENT, label, value.bold())
    } else {
        format!("{}{}{}", styling::STATUS_INDENT, label, value)
    }
}

pub fn format_processing(message: &str) -> String {
    if should_use_color() {
        format!("{} {}", styling::PROCESSING_SYMBOL.cyan(), message)
    } else {
        format!("{} {}", styling::PROCESSING_SYMBOL, message)
    }
}

pub fn format_sub_item(text: &str) -> String {
    if should_use_color() {
        format!("{}{}", styling::SUB_ITEM_INDENT, text.dimmed())
    } else {
        format!("{}{}", styling::SUB_ITEM_INDENT, text)
    }
}

pub fn format_success(message: &str) -> String {
    if should_use_color() {
        format!("{}{} {}", styling::STATUS_INDENT, styling::SUCCESS_SYMBOL.green(), message)
    } else {
        format!("{}{} {}", styling::STATUS_INDENT, styling::SUCCESS_SYMBOL, message)
    }
}

// ============================================================================
// PRINTING
// ============================================================================

/// Print a section header, preceded by an empty line
pub fn print_section(title: &str) {
    println!();
    println!("{}", format_section(title));
}

pub fn print_status(label: &str, value: &str, highlight: bool) {
    println!("{}", format_status(label, value, highlight));
}

pub fn print_processing(message: &str) {
    println!("{}", format_processing(message));
}

pub fn print_sub_item(text: &str) {
    println!("{}", format_sub_item(text));
}

pub fn print_success(message: &str) {
    println!("{}", format_success(message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_status_line_is_padded() {
        set_color(false);
        assert_eq!(format_status("Groups", "3", true), "  Groups:         3");
        assert_eq!(
            format_status("A very long label", "x", false),
            "  A very long label: x"
        );
        assert_eq!(format_section("plan"), "===== PLAN =====");
        assert_eq!(format_sub_item("a.mkv"), "    a.mkv");
    }
}
