//! Terminal colors for statuses, edges and progress bars.

use std::io::IsTerminal;

use colored::{Color, ColoredString, Colorize};

use crate::core::edge::EdgeVariant;
use crate::core::status::NodeStatus;

/// Level of color support detected for the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    /// No color support (NO_COLOR set, TERM=dumb, piped output)
    None,
    Basic,
}

impl ColorSupport {
    #[must_use]
    pub fn detect() -> Self {
        // https://no-color.org/
        if std::env::var("NO_COLOR").is_ok() {
            return Self::None;
        }
        if std::env::var("FORCE_COLOR").is_ok() {
            return Self::Basic;
        }
        if !std::io::stdout().is_terminal() {
            return Self::None;
        }
        if std::env::var("TERM").is_ok_and(|term| term == "dumb") {
            return Self::None;
        }
        Self::Basic
    }

    #[must_use]
    pub const fn has_color(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl Default for ColorSupport {
    fn default() -> Self {
        Self::detect()
    }
}

/// Status palette, in the order of the display priority.
#[must_use]
pub const fn status_color(status: NodeStatus) -> Color {
    match status {
        NodeStatus::Locked => Color::BrightBlack,
        NodeStatus::Unlocked => Color::Cyan,
        NodeStatus::InProgress => Color::Yellow,
        NodeStatus::Completed => Color::Green,
        NodeStatus::Mastered => Color::Magenta,
    }
}

#[must_use]
pub const fn edge_color(variant: EdgeVariant) -> Color {
    match variant {
        EdgeVariant::LockedDashed | EdgeVariant::LockedSolid => Color::BrightBlack,
        EdgeVariant::Available => Color::Cyan,
        EdgeVariant::InProgress => Color::Yellow,
        EdgeVariant::Completed => Color::Green,
        EdgeVariant::MasteredToCompleted => Color::BrightMagenta,
        EdgeVariant::Mastered => Color::Magenta,
    }
}

/// Apply `style_fn` only when the terminal takes colors.
pub fn styled<S, F>(text: S, style_fn: F, support: ColorSupport) -> String
where
    S: AsRef<str>,
    F: FnOnce(&str) -> ColoredString,
{
    if support.has_color() {
        style_fn(text.as_ref()).to_string()
    } else {
        text.as_ref().to_string()
    }
}

pub fn format_status(status: NodeStatus, support: ColorSupport) -> String {
    styled(status.as_str(), |s| s.color(status_color(status)), support)
}

pub fn format_edge(variant: EdgeVariant, support: ColorSupport) -> String {
    let text = variant.as_str();
    if variant.is_dashed() {
        styled(text, |s| s.color(edge_color(variant)).italic(), support)
    } else {
        styled(text, |s| s.color(edge_color(variant)), support)
    }
}

/// Ten-cell bar for a fill percentage.
pub fn progress_bar(fill: f64, status: NodeStatus, support: ColorSupport) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = ((fill / 10.0).round().clamp(0.0, 10.0)) as usize;
    let bar = format!("{}{}", "#".repeat(filled), ".".repeat(10 - filled));
    styled(bar, |s| s.color(status_color(status)), support)
}

pub fn muted<S: AsRef<str>>(text: S, support: ColorSupport) -> String {
    styled(text, |s| s.bright_black(), support)
}

pub fn skill_id<S: AsRef<str>>(text: S, support: ColorSupport) -> String {
    styled(text, |s| s.cyan().bold(), support)
}
