//! Colors used for rendering disassembly in the terminal.
use std::borrow::Cow;

pub use egui::Color32 as Color;

/// Currently used global colorscheme
pub type Colors = IBM;

pub trait ColorScheme {
    fn brackets() -> &'static Color;
    fn delimiter() -> &'static Color;
    fn comment() -> &'static Color;

    fn spacing() -> &'static Color {
        &colors::WHITE
    }

    /// Addresses and other location annotations.
    fn annotation() -> &'static Color;

    /// Anything that couldn't be decoded.
    fn special() -> &'static Color;

    fn expr() -> &'static Color;
    fn opcode() -> &'static Color;
    fn register() -> &'static Color;
    fn immediate() -> &'static Color;
    fn attribute() -> &'static Color;
    fn segment() -> &'static Color;
}

pub struct IBM;

impl ColorScheme for IBM {
    fn brackets() -> &'static Color {
        &colors::GRAY40
    }

    fn delimiter() -> &'static Color {
        &colors::GRAY99
    }

    fn comment() -> &'static Color {
        &colors::GRAY40
    }

    fn annotation() -> &'static Color {
        &colors::PURPLE
    }

    fn special() -> &'static Color {
        &colors::RED
    }

    fn expr() -> &'static Color {
        &colors::GRAY99
    }

    fn opcode() -> &'static Color {
        &colors::WHITE
    }

    fn register() -> &'static Color {
        &colors::MAGENTA
    }

    fn immediate() -> &'static Color {
        &colors::BLUE
    }

    fn attribute() -> &'static Color {
        &colors::GRAY99
    }

    fn segment() -> &'static Color {
        &colors::GREEN
    }
}

pub mod colors {
    //! IBM inspired colors.

    use super::Color;

    pub const WHITE: Color = Color::from_rgb(0xff, 0xff, 0xff);
    pub const BLUE: Color = Color::from_rgb(0x0f, 0x62, 0xfe);
    pub const MAGENTA: Color = Color::from_rgb(0xf5, 0x12, 0x81);
    pub const RED: Color = Color::from_rgb(0xff, 0x00, 0x0b);
    pub const PURPLE: Color = Color::from_rgb(0x89, 0x1f, 0xff);
    pub const GREEN: Color = Color::from_rgb(0x02, 0xed, 0x6e);
    pub const GOLD: Color = Color::from_rgb(0xff, 0xd7, 0x00);
    pub const GRAY40: Color = Color::from_rgb(0x40, 0x40, 0x40);
    pub const GRAY99: Color = Color::from_rgb(0x99, 0x99, 0x99);
}

/// Wraps `text` in a 24-bit ANSI foreground colour escape.
pub fn ansi(text: &str, color: &Color) -> String {
    format!(
        "\x1b[38;2;{};{};{}m{text}\x1b[0m",
        color.r(),
        color.g(),
        color.b()
    )
}

#[derive(Debug, Clone)]
pub struct Token<'txt> {
    pub text: Cow<'txt, str>,
    pub color: &'static Color,
}

impl<'txt> Token<'txt> {
    pub fn from_string(text: String, color: &'static Color) -> Self {
        Self {
            text: Cow::Owned(text),
            color,
        }
    }

    pub fn from_str(text: &'static str, color: &'static Color) -> Self {
        Self {
            text: Cow::Borrowed(text),
            color,
        }
    }

    pub fn ansi(&self) -> String {
        ansi(&self.text, self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_escape() {
        let token = Token::from_str("nop", &colors::WHITE);
        assert_eq!(token.ansi(), "\x1b[38;2;255;255;255mnop\x1b[0m");
    }
}
