use serde::{Deserialize, Serialize};

/// RGBA color of a map element.
///
/// In configuration files colors are written as `#RRGGBB` or `#RRGGBBAA` hex strings.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    /// Transparent color: `#00000000`
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    /// Black color: `#000000FF`
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    /// White color: `#FFFFFFFF`
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// Red color: `#FF0000FF`
    pub const RED: Color = Color::rgba(255, 0, 0, 255);
    /// Blue color: `#0000FFFF`
    pub const BLUE: Color = Color::rgba(0, 0, 255, 255);
    /// Gray color: `#AAAAAAFF`
    pub const GRAY: Color = Color::rgba(170, 170, 170, 255);

    /// Constructs color from its RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Constructs an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Converts the color into HEX8 string: `#RRGGBBAA`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    /// Parses a color from `#RRGGBB` or `#RRGGBBAA` string.
    pub fn try_from_hex(hex_string: &str) -> Option<Self> {
        let digits = hex_string.strip_prefix('#')?;
        if (digits.len() != 6 && digits.len() != 8) || !digits.is_ascii() {
            return None;
        }

        let channel = |index: usize| u8::from_str_radix(&digits[index..index + 2], 16).ok();
        let a = if digits.len() == 8 { channel(6)? } else { 255 };

        Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Returns a copy of the color with the given alpha channel.
    pub fn with_alpha(&self, a: u8) -> Self {
        Self { a, ..*self }
    }

    /// Returns true if the color is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Channels as `[r, g, b, a]`.
    pub fn to_u8_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from_hex(&value).ok_or_else(|| format!("invalid color '{value}'"))
    }
}

impl From<Color> for String {
    fn from(val: Color) -> Self {
        val.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let color = Color::try_from_hex("#FF1000AA").unwrap();
        assert_eq!(color, Color::rgba(255, 16, 0, 170));
        assert_eq!(color.to_hex(), "#FF1000AA");
        assert_eq!(Color::try_from_hex("#ff1000"), Some(Color::rgb(255, 16, 0)));
    }

    #[test]
    fn invalid_hex() {
        assert_eq!(Color::try_from_hex("FF1000"), None);
        assert_eq!(Color::try_from_hex("#FF10"), None);
        assert_eq!(Color::try_from_hex("#GG1000"), None);
        assert_eq!(Color::try_from_hex("#ÿÿÿ"), None);
    }

    #[test]
    fn serde_as_string() {
        let color: Color = serde_json::from_str("\"#00FF00\"").unwrap();
        assert_eq!(color, Color::rgb(0, 255, 0));
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#00FF00FF\"");
        assert!(serde_json::from_str::<Color>("\"green\"").is_err());
    }
}
