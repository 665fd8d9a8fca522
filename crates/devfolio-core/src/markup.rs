//! Inline color markers embedded in terminal and panel lines.
//!
//! Lines carry ANSI SGR markers (`ESC[<n>m`). A marker sets the tone of the text
//! that follows it until the next marker; `ESC[0m` resets to the default tone.

const ESC: char = '\x1b';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Tone {
    #[default]
    Default,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Tone {
    pub fn from_code(code: u8) -> Self {
        match code {
            31 => Self::Red,
            32 => Self::Green,
            33 => Self::Yellow,
            34 => Self::Blue,
            35 => Self::Magenta,
            36 => Self::Cyan,
            37 => Self::White,
            _ => Self::Default,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Default => 0,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub tone: Tone,
}

/// Wraps `text` in a marker for `tone` followed by a reset.
pub fn paint(tone: Tone, text: impl AsRef<str>) -> String {
    if tone == Tone::Default {
        return text.as_ref().to_string();
    }
    format!("{ESC}[{}m{}{ESC}[0m", tone.code(), text.as_ref())
}

/// Splits a marked-up line into toned segments. Empty segments are dropped.
/// A malformed marker is kept as literal text.
pub fn parse(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut tone = Tone::Default;
    let mut current = String::new();
    let mut rest = line;

    while let Some(start) = rest.find(ESC) {
        current.push_str(&rest[..start]);
        let after = &rest[start..];
        match read_marker(after) {
            Some((code, consumed)) => {
                if !current.is_empty() {
                    segments.push(Segment {
                        text: std::mem::take(&mut current),
                        tone,
                    });
                }
                tone = Tone::from_code(code);
                rest = &after[consumed..];
            }
            None => {
                current.push(ESC);
                rest = &after[ESC.len_utf8()..];
            }
        }
    }
    current.push_str(rest);
    if !current.is_empty() {
        segments.push(Segment {
            text: current,
            tone,
        });
    }
    segments
}

/// Removes every well-formed marker from `line`.
pub fn strip(line: &str) -> String {
    parse(line).into_iter().map(|segment| segment.text).collect()
}

fn read_marker(text: &str) -> Option<(u8, usize)> {
    let body = text.strip_prefix(ESC)?.strip_prefix('[')?;
    let end = body.find('m')?;
    let digits = &body[..end];
    if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let code = digits.parse::<u8>().ok()?;
    Some((code, 2 + end + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_markers_and_resets() {
        let line = "\x1b[31mCommand not found: foo\x1b[0m tail";
        let segments = parse(line);
        assert_eq!(
            segments,
            vec![
                Segment {
                    text: "Command not found: foo".to_string(),
                    tone: Tone::Red,
                },
                Segment {
                    text: " tail".to_string(),
                    tone: Tone::Default,
                },
            ]
        );
    }

    #[test]
    fn unknown_codes_fall_back_to_default_tone() {
        let segments = parse("\x1b[90mdim");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].tone, Tone::Default);
        assert_eq!(segments[0].text, "dim");
    }

    #[test]
    fn malformed_markers_stay_literal() {
        assert_eq!(strip("a\x1b[xm b"), "a\x1b[xm b");
        assert_eq!(strip("trailing \x1b["), "trailing \x1b[");
    }

    #[test]
    fn paint_then_strip_recovers_text() {
        let painted = paint(Tone::Cyan, "Opening About.java...");
        assert!(painted.starts_with("\x1b[36m"));
        assert_eq!(strip(&painted), "Opening About.java...");
        assert_eq!(paint(Tone::Default, "plain"), "plain");
    }

    #[test]
    fn empty_line_has_no_segments() {
        assert!(parse("").is_empty());
        assert!(parse("\x1b[33m\x1b[0m").is_empty());
    }
}
