use colored::Colorize;
use std::fmt;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

fn label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Success => "[ok]",
        MessageKind::Warning => "[!]",
        MessageKind::Error => "[x]",
        MessageKind::Hint => "hint:",
        MessageKind::Info | MessageKind::Section => "",
    }
}

/// Builds the text for a message without printing it.
pub fn styled(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    let base = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Info => text,
        _ => format!("{} {}", label(kind), text),
    };

    match kind {
        MessageKind::Success => base.bright_green().to_string(),
        MessageKind::Warning => base.bright_yellow().to_string(),
        MessageKind::Error => base.bright_red().to_string(),
        MessageKind::Hint => base.dimmed().to_string(),
        MessageKind::Section => base.bold().to_string(),
        MessageKind::Info => base,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = styled(kind, message);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Paints `text` with a `#RRGGBB` or `#RGB` color; other values pass through.
pub fn swatch(text: &str, hex: &str) -> String {
    match parse_hex(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b).to_string(),
        None => text.to_string(),
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    match digits.len() {
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            let mut channels = digits
                .chars()
                .map(|c| c.to_digit(16).map(|value| (value * 17) as u8));
            Some((channels.next()??, channels.next()??, channels.next()??))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_accepts_short_and_long_forms() {
        assert_eq!(parse_hex("#3B82F6"), Some((0x3b, 0x82, 0xf6)));
        assert_eq!(parse_hex("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex("3B82F6"), None);
        assert_eq!(parse_hex("#12345"), None);
    }

    #[test]
    fn styled_plain_text_keeps_labels() {
        colored::control::set_override(false);
        assert_eq!(styled(MessageKind::Warning, "careful"), "[!] careful");
        assert_eq!(styled(MessageKind::Section, " Summary "), "=== Summary ===");
        assert_eq!(styled(MessageKind::Info, "plain"), "plain");
    }
}
