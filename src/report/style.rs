//! ANSI Styling
//!
//! Pure mappings from concern levels to terminal styles. A `Style` value
//! carries the color switch, so rendering code never consults global state.

use crate::compare::Concern;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Terminal styling for one report rendering.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    color: bool,
}

impl Style {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Wrap `text` in a color code, or pass it through unstyled.
    pub fn paint(&self, code: &'static str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Bold, colored label (concern headers, report title).
    pub fn strong(&self, code: &'static str, text: &str) -> String {
        if self.color {
            format!("{BOLD}{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.color {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Highlight a count only when it is non-zero.
    pub fn non_zero(&self, count: usize, label: &str, code: &'static str) -> String {
        if count == 0 {
            format!("{count} {label}")
        } else {
            self.paint(code, &format!("{count} {label}"))
        }
    }

    /// Color associated with a concern level.
    pub fn concern_color(&self, concern: Concern) -> &'static str {
        match concern {
            Concern::Critical => RED,
            Concern::Warning => YELLOW,
            Concern::Ok => GREEN,
            Concern::Unchanged => DIM,
        }
    }
}
