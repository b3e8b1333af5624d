//! Color values.

use serde::{Deserialize, Serialize};

/// sRGB color represented as RGBA components.
///
/// Deserializes from a channel map (`{"r": 0, "g": 0, "b": 0, "a": 255}`) or
/// from a string accepted by [`ColorValue::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorInput")]
pub struct ColorValue {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
    /// Alpha channel (0-255, 255 = fully opaque)
    pub a: u8,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorInput {
    Text(String),
    Channels {
        r: u8,
        g: u8,
        b: u8,
        #[serde(default = "opaque")]
        a: u8,
    },
}

const fn opaque() -> u8 {
    255
}

impl TryFrom<ColorInput> for ColorValue {
    type Error = String;

    fn try_from(input: ColorInput) -> Result<Self, Self::Error> {
        match input {
            ColorInput::Text(text) => {
                Self::parse(&text).ok_or_else(|| format!("invalid color '{text}'"))
            }
            ColorInput::Channels { r, g, b, a } => Ok(Self { r, g, b, a }),
        }
    }
}

impl Default for ColorValue {
    fn default() -> Self {
        Self::BLACK
    }
}

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White (#ffffff)
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// An opaque color from its three channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`. The leading `#` is optional.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let short = |i: usize| u8::from_str_radix(&hex[i..=i].repeat(2), 16).ok();
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            // Three-digit form is expanded by replicating digits, not by adding zeros.
            3 => Some(Self::rgb(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self {
                r: short(0)?,
                g: short(1)?,
                b: short(2)?,
                a: short(3)?,
            }),
            6 => Some(Self::rgb(long(0)?, long(2)?, long(4)?)),
            8 => Some(Self {
                r: long(0)?,
                g: long(2)?,
                b: long(4)?,
                a: long(6)?,
            }),
            _ => None,
        }
    }

    /// A handful of named colors used by scenes and tests.
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "black" => Some(Self::BLACK),
            "white" => Some(Self::WHITE),
            "transparent" => Some(Self::TRANSPARENT),
            "red" => Some(Self::rgb(255, 0, 0)),
            "green" => Some(Self::rgb(0, 128, 0)),
            "blue" => Some(Self::rgb(0, 0, 255)),
            "gray" | "grey" => Some(Self::rgb(128, 128, 128)),
            "silver" => Some(Self::rgb(192, 192, 192)),
            "navy" => Some(Self::rgb(0, 0, 128)),
            "orange" => Some(Self::rgb(255, 165, 0)),
            _ => None,
        }
    }

    /// Parse either a hex color or a named color.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.starts_with('#') {
            Self::from_hex(text)
        } else {
            Self::from_named(text).or_else(|| Self::from_hex(text))
        }
    }

    /// True when the color paints nothing.
    #[must_use]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }
}
