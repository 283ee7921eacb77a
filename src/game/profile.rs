use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ProfileError;

/// Opaque RGB color, written as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    /// Resting color of a tile that is neither flashing nor cleared.
    pub const IDLE_TILE: Color = Color::rgb(0xcc, 0xcc, 0xcc);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Color { red, green, blue }
    }

    /// Channels scaled to `0.0..=1.0` for cairo.
    pub fn to_unit_rgb(self) -> (f64, f64, f64) {
        (
            self.red as f64 / 255.0,
            self.green as f64 / 255.0,
            self.blue as f64 / 255.0,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl FromStr for Color {
    type Err = ProfileError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ProfileError::InvalidColor(value.to_string());
        let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ProfileError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

/// Who is playing. Fixed once the game starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerProfile {
    name: String,
    age: u32,
    color: Color,
}

impl PlayerProfile {
    pub fn new(name: &str, age: u32, color: Color) -> Result<Self, ProfileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if age == 0 {
            return Err(ProfileError::InvalidAge(age.to_string()));
        }
        Ok(PlayerProfile {
            name: name.to_string(),
            age,
            color,
        })
    }

    /// Parses the raw intro form fields. The start button stays disabled
    /// while this fails.
    pub fn from_form(name: &str, age_text: &str, color_text: &str) -> Result<Self, ProfileError> {
        let age = parse_age(age_text)?;
        let color = color_text.parse()?;
        PlayerProfile::new(name, age, color)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

fn parse_age(raw: &str) -> Result<u32, ProfileError> {
    match raw.trim().parse::<u32>() {
        Ok(age) if age > 0 => Ok(age),
        _ => Err(ProfileError::InvalidAge(raw.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_hex() {
        let color: Color = "#3584E4".parse().unwrap();
        assert_eq!(color, Color::rgb(0x35, 0x84, 0xe4));
        assert_eq!(color.to_string(), "#3584e4");
    }

    #[test]
    fn rejects_malformed_colors() {
        for raw in ["", "#", "3584e4", "#3584e", "#3584e4ff", "#zz84e4"] {
            assert!(
                matches!(raw.parse::<Color>(), Err(ProfileError::InvalidColor(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn color_serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::rgb(1, 2, 255)).unwrap();
        assert_eq!(json, "\"#0102ff\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(1, 2, 255));
    }

    #[test]
    fn form_requires_name_and_positive_age() {
        assert_eq!(
            PlayerProfile::from_form("  ", "12", "#000000"),
            Err(ProfileError::EmptyName)
        );
        assert_eq!(
            PlayerProfile::from_form("Ada", "0", "#000000"),
            Err(ProfileError::InvalidAge("0".into()))
        );
        assert_eq!(
            PlayerProfile::from_form("Ada", "-3", "#000000"),
            Err(ProfileError::InvalidAge("-3".into()))
        );
        assert!(PlayerProfile::from_form("Ada", "abc", "#000000").is_err());

        let profile = PlayerProfile::from_form(" Ada ", " 36 ", "#ff0000").unwrap();
        assert_eq!(profile.name(), "Ada");
        assert_eq!(profile.age(), 36);
        assert_eq!(profile.color(), Color::rgb(255, 0, 0));
    }
}
