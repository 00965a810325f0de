//! Color handling for voldiag diagrams
//!
//! [`Color`] wraps `DynamicColor` from the color crate. Colors are parsed from
//! CSS strings (configuration values, kind accents) and emitted either as CSS
//! for SVG output or as `#rrggbb[aa]` for Graphviz, which does not understand
//! CSS functional notation.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};

/// Parsed CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string such as `"#0078d4"`, `"rgb(0, 120, 212)"` or `"white"`.
    ///
    /// # Errors
    ///
    /// Returns a message naming the rejected input when it is not a valid CSS color.
    ///
    /// # Examples
    ///
    /// ```
    /// use voldiag_core::color::Color;
    ///
    /// assert!(Color::new("#7B8894").is_ok());
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// Returns the alpha component between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the color as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    ///
    /// ```
    /// use voldiag_core::color::Color;
    ///
    /// let color = Color::new("rgb(0, 120, 212)").unwrap();
    /// assert_eq!(color.to_hex(), "#0078d4");
    /// ```
    pub fn to_hex(&self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        if rgba.a == u8::MAX {
            format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b, rgba.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
