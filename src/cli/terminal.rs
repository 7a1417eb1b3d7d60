//! Colour and width helpers for terminal output

use owo_colors::{OwoColorize, Style, colors::css};
use supports_color::Stream;

/// Terminals narrower than this get stacked rather than tabular output.
const NARROW_COLUMNS: u16 = 60;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Info,
    Dim,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Self::Success => Style::new().fg::<css::Green>(),
            Self::Warning => Style::new().fg::<css::Orange>(),
            Self::Info => Style::new().fg::<css::LightBlue>(),
            Self::Dim => Style::new().dimmed(),
        }
    }
}

fn paint(text: &str, tone: Tone) -> String {
    if supports_color::on_cached(Stream::Stdout).is_some() {
        text.style(tone.style()).to_string()
    } else {
        text.to_string()
    }
}

/// Check if the terminal is too narrow for a two-column table
pub fn is_narrow() -> bool {
    terminal_size::terminal_size().is_some_and(|(width, _)| width.0 < NARROW_COLUMNS)
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Color as success (green)
    fn success(&self) -> String;
    /// Color as warning (amber)
    fn warning(&self) -> String;
    /// Color as info (blue)
    fn info(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        paint(self.as_ref(), Tone::Success)
    }

    fn warning(&self) -> String {
        paint(self.as_ref(), Tone::Warning)
    }

    fn info(&self) -> String {
        paint(self.as_ref(), Tone::Info)
    }

    fn dim(&self) -> String {
        paint(self.as_ref(), Tone::Dim)
    }
}
