//! Toolbar style toggles as pure functions over a document's runs.

use crate::domain::{Run, RichDocument, Style};
use std::fmt;
use std::str::FromStr;

/// A character trait the toolbar can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trait {
    Bold,
    Italic,
    Underline,
}

impl Trait {
    fn get(self, style: &Style) -> bool {
        match self {
            Trait::Bold => style.bold,
            Trait::Italic => style.italic,
            Trait::Underline => style.underline,
        }
    }

    fn set(self, style: &mut Style, value: bool) {
        match self {
            Trait::Bold => style.bold = value,
            Trait::Italic => style.italic = value,
            Trait::Underline => style.underline = value,
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Trait::Bold => "bold",
            Trait::Italic => "italic",
            Trait::Underline => "underline",
        };
        f.write_str(name)
    }
}

impl FromStr for Trait {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bold" | "b" => Ok(Trait::Bold),
            "italic" | "i" => Ok(Trait::Italic),
            "underline" | "u" => Ok(Trait::Underline),
            other => Err(format!("unknown style '{}'", other)),
        }
    }
}

/// Toggles `which` across the whole document.
///
/// Bold and italic flip per run, so a mixed selection stays mixed with each
/// run inverted. Underline is decided by the first text run: underlined
/// means remove everywhere, otherwise apply everywhere.
pub fn toggle(document: &RichDocument, which: Trait) -> RichDocument {
    let runs = document.runs();
    let underline_target = match which {
        Trait::Underline => Some(!first_text_style(runs).is_some_and(|s| s.underline)),
        _ => None,
    };

    let toggled = runs.iter().cloned().map(|run| match run {
        Run::Text { text, mut style } => {
            let value = underline_target.unwrap_or_else(|| !which.get(&style));
            which.set(&mut style, value);
            Run::Text { text, style }
        }
        image => image,
    });

    let mut out = RichDocument::new();
    out.set_runs(toggled.collect());
    out
}

fn first_text_style(runs: &[Run]) -> Option<&Style> {
    runs.iter().find_map(|run| match run {
        Run::Text { style, .. } => Some(style),
        Run::Image(_) => None,
    })
}
