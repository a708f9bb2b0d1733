//! Marker colours and the palette automatic themes are drawn from.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::error::RegistryError;

/// An opaque RGB colour, displayed as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid colour `{0}`, expected #rrggbb")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseColorError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Colours used when no palette is configured.
pub const DEFAULT_PALETTE: &[Color] = &[
    Color::rgb(0xe6, 0x19, 0x4b),
    Color::rgb(0x3c, 0xb4, 0x4b),
    Color::rgb(0x43, 0x63, 0xd8),
    Color::rgb(0xf5, 0x82, 0x31),
    Color::rgb(0x91, 0x1e, 0xb4),
    Color::rgb(0x42, 0xd4, 0xf4),
    Color::rgb(0xf0, 0x32, 0xe6),
    Color::rgb(0x46, 0x99, 0x90),
];

/// A fixed, non-empty set of colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self, RegistryError> {
        if colors.is_empty() {
            return Err(RegistryError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Draws one colour uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        // Non-empty by construction.
        self.colors[rng.gen_range(0..self.colors.len())]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.to_vec(),
        }
    }
}
