//! Tinct color primitives
//!
//! Color handling for design token computation:
//!
//! - Parsing of the color notations design tokens are written in (hex, `rgb()`,
//!   `hsl()`, bare shadcn-style HSL triplets like `221 83% 53%`)
//! - HSL lightness adjustment (darken / lighten)
//! - Hex serialization with and without an alpha channel

pub mod color;
mod parse;

pub use color::Color;
pub use parse::ColorParseError;
