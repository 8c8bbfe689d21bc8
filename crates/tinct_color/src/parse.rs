//! Color string parsing
//!
//! Accepted notations:
//! - `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! - `rgb(r, g, b)`, `rgba(r, g, b, a)` (commas, spaces, or `/` before alpha)
//! - `hsl(h, s%, l%)`, `hsla(h, s%, l%, a)`
//! - bare HSL triplets as used by shadcn themes: `221 83% 53%`, `221 83% 53% / 0.5`
//! - `white`, `black`, `transparent`

use std::str::FromStr;

use thiserror::Error;

use crate::Color;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorParseError {
    #[error("empty color value")]
    Empty,

    #[error("invalid hex color `{0}`")]
    Hex(String),

    #[error("invalid color component `{component}` in `{input}`")]
    Component { input: String, component: String },

    #[error("expected {expected} components in `{input}`")]
    Arity { input: String, expected: &'static str },

    #[error("unrecognized color `{0}`")]
    Unrecognized(String),
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(ColorParseError::Empty);
        }
        let lower = input.to_ascii_lowercase();

        match lower.as_str() {
            "white" => return Ok(Color::WHITE),
            "black" => return Ok(Color::BLACK),
            "transparent" => return Ok(Color::TRANSPARENT),
            _ => {}
        }

        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::Hex(input.to_string()));
        }
        if let Some(body) = function_body(&lower, &["rgba", "rgb"]) {
            return parse_rgb(input, body);
        }
        if let Some(body) = function_body(&lower, &["hsla", "hsl"]) {
            return parse_hsl(input, body);
        }
        if looks_like_hsl_triplet(&lower) {
            return parse_hsl(input, &lower);
        }

        Err(ColorParseError::Unrecognized(input.to_string()))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match hex.len() {
        3 | 4 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => hex.to_string(),
        _ => return None,
    };
    let value = u32::from_str_radix(&expanded, 16).ok()?;
    if expanded.len() == 8 {
        let [r, g, b, a] = value.to_be_bytes();
        Some(Color::from_rgba8(r, g, b, a))
    } else {
        Some(Color::from_hex(value))
    }
}

/// Strip `name(` ... `)` for the first matching function name.
fn function_body<'a>(s: &'a str, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| {
        s.strip_prefix(name)
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix('('))
            .and_then(|rest| rest.strip_suffix(')'))
    })
}

fn looks_like_hsl_triplet(s: &str) -> bool {
    let parts = split_components(s);
    (parts.len() == 3 || parts.len() == 4)
        && parts[0].parse::<f32>().is_ok()
        && parts[1].ends_with('%')
        && parts[2].ends_with('%')
}

fn split_components(body: &str) -> Vec<&str> {
    body.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect()
}

fn component_error(input: &str, component: &str) -> ColorParseError {
    ColorParseError::Component {
        input: input.to_string(),
        component: component.to_string(),
    }
}

/// A number, or a percentage mapped onto `0..=scale`.
fn parse_number(input: &str, component: &str, percent_scale: f32) -> Result<f32, ColorParseError> {
    let (digits, is_percent) = match component.strip_suffix('%') {
        Some(digits) => (digits, true),
        None => (component, false),
    };
    let value: f32 = digits
        .parse()
        .map_err(|_| component_error(input, component))?;
    Ok(if is_percent {
        value / 100.0 * percent_scale
    } else {
        value
    })
}

fn parse_alpha(input: &str, component: Option<&&str>) -> Result<f32, ColorParseError> {
    match component {
        Some(component) => Ok(parse_number(input, component, 1.0)?.clamp(0.0, 1.0)),
        None => Ok(1.0),
    }
}

fn parse_rgb(input: &str, body: &str) -> Result<Color, ColorParseError> {
    let parts = split_components(body);
    if parts.len() != 3 && parts.len() != 4 {
        return Err(ColorParseError::Arity {
            input: input.to_string(),
            expected: "3 or 4",
        });
    }
    let mut channels = [0.0f32; 3];
    for (channel, part) in channels.iter_mut().zip(&parts) {
        *channel = parse_number(input, part, 255.0)?.clamp(0.0, 255.0) / 255.0;
    }
    let alpha = parse_alpha(input, parts.get(3))?;
    Ok(Color::new(channels[0], channels[1], channels[2], alpha))
}

fn parse_hsl(input: &str, body: &str) -> Result<Color, ColorParseError> {
    let parts = split_components(body);
    if parts.len() != 3 && parts.len() != 4 {
        return Err(ColorParseError::Arity {
            input: input.to_string(),
            expected: "3 or 4",
        });
    }
    let hue_str = parts[0].strip_suffix("deg").unwrap_or(parts[0]);
    let hue: f32 = hue_str
        .parse()
        .map_err(|_| component_error(input, parts[0]))?;
    let saturation = parse_percentage(input, parts[1])?;
    let lightness = parse_percentage(input, parts[2])?;
    let alpha = parse_alpha(input, parts.get(3))?;
    Ok(Color::from_hsla(hue, saturation, lightness, alpha))
}

fn parse_percentage(input: &str, component: &str) -> Result<f32, ColorParseError> {
    let digits = component.strip_suffix('%').unwrap_or(component);
    let value: f32 = digits
        .parse()
        .map_err(|_| component_error(input, component))?;
    Ok((value / 100.0).clamp(0.0, 1.0))
}
