//! Markup to ANSI for plain stdout.

use devfolio_core::markup::{self, Tone};
use owo_colors::OwoColorize;

pub fn colorize(line: &str) -> String {
    markup::parse(line)
        .into_iter()
        .map(|segment| {
            let text = segment.text.as_str();
            match segment.tone {
                Tone::Default => text.to_string(),
                Tone::Red => text.red().to_string(),
                Tone::Green => text.green().to_string(),
                Tone::Yellow => text.yellow().to_string(),
                Tone::Blue => text.blue().to_string(),
                Tone::Magenta => text.magenta().to_string(),
                Tone::Cyan => text.cyan().to_string(),
                Tone::White => text.white().to_string(),
            }
        })
        .collect()
}

pub fn prompt(text: &str) -> String {
    text.green().bold().to_string()
}

pub fn signal(text: &str) -> String {
    text.dimmed().to_string()
}
