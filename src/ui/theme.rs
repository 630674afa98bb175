//! Message tones and the styles that render them

use owo_colors::{OwoColorize, Style};
use std::fmt::Display;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// What a piece of output means to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Header,
    Success,
    Failure,
    Warning,
    Detail,
    Selector,
    Muted,
}

#[derive(Debug, Clone)]
pub struct Theme {
    colored: bool,
}

impl Theme {
    /// Color only on a terminal, and never when colors are turned off (NO_COLOR, CLICOLOR=0)
    pub fn detect() -> Self {
        Self::for_terminal(console::Term::stdout().is_term(), console::colors_enabled())
    }

    pub fn for_terminal(is_term: bool, colors_enabled: bool) -> Self {
        Self {
            colored: is_term && colors_enabled,
        }
    }

    pub fn is_colored(&self) -> bool {
        self.colored
    }

    pub fn style(&self, tone: Tone) -> Style {
        if !self.colored {
            return Style::new();
        }
        match tone {
            Tone::Header => Style::new().cyan().bold(),
            Tone::Success => Style::new().green().bold(),
            Tone::Failure => Style::new().red().bold(),
            Tone::Warning => Style::new().yellow().bold(),
            Tone::Detail => Style::new().magenta(),
            Tone::Selector => Style::new().bold(),
            Tone::Muted => Style::new().white().dimmed(),
        }
    }

    pub fn paint(&self, text: impl Display, tone: Tone) -> String {
        text.style(self.style(tone)).to_string()
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

/// Style `text` with the process-wide theme.
pub fn paint(text: impl Display, tone: Tone) -> String {
    theme().paint(text, tone)
}
