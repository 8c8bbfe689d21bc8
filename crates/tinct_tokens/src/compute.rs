//! Compute functions for `$compute` tokens
//!
//! A closed set of pure transforms over color and dimension strings. Arguments
//! arrive already resolved (references substituted) and stringified.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Serialize, Serializer};
use tinct_color::Color;

use crate::TokenError;

/// Built-in compute functions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComputeFn {
    /// `darken(color, amount%)`
    Darken,
    /// `lighten(color, amount%)`
    Lighten,
    /// `opacity(color, alpha)` -> `#rrggbbaa`
    Opacity,
    /// `scale(dimension, factor)`
    Scale,
    /// `add(a, b)`
    Add,
    /// `subtract(a, b)`
    Subtract,
    /// `clamp(value, min, max)`
    Clamp,
}

impl ComputeFn {
    pub fn all() -> &'static [ComputeFn] {
        const ALL: [ComputeFn; 7] = [
            ComputeFn::Darken,
            ComputeFn::Lighten,
            ComputeFn::Opacity,
            ComputeFn::Scale,
            ComputeFn::Add,
            ComputeFn::Subtract,
            ComputeFn::Clamp,
        ];
        &ALL
    }

    /// Name as written in token files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::Opacity => "opacity",
            Self::Scale => "scale",
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Clamp => "clamp",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Self::Clamp => 3,
            _ => 2,
        }
    }

    /// Apply the function to resolved, stringified arguments.
    pub fn apply(self, args: &[String]) -> Result<String, TokenError> {
        if args.len() != self.arity() {
            return Err(self.invalid(format!(
                "expected {} arguments, got {}",
                self.arity(),
                args.len()
            )));
        }

        match self {
            Self::Darken => {
                let color = self.color(&args[0])?;
                let amount = self.percent(&args[1])?;
                Ok(color.darken(amount).to_hex_alpha())
            }
            Self::Lighten => {
                let color = self.color(&args[0])?;
                let amount = self.percent(&args[1])?;
                Ok(color.lighten(amount).to_hex_alpha())
            }
            Self::Opacity => {
                let alpha = self.number(&args[1])?.clamp(0.0, 1.0);
                let color = self.color(&args[0])?.with_alpha(alpha as f32);
                Ok(format!("{}{:02x}", color.to_hex(), color.to_rgba8()[3]))
            }
            Self::Scale => {
                let base = self.dimension(&args[0])?;
                let factor = self.number(&args[1])?;
                Ok(base.with_value(base.value * factor).to_string())
            }
            Self::Add | Self::Subtract => {
                let a = self.dimension(&args[0])?;
                let b = self.dimension(&args[1])?;
                let unit = if a.unit.is_empty() { b.unit } else { a.unit };
                let value = if self == Self::Add {
                    a.value + b.value
                } else {
                    a.value - b.value
                };
                Ok(Dimension { value, unit }.to_string())
            }
            Self::Clamp => {
                let value = self.dimension(&args[0])?;
                let min = self.dimension(&args[1])?.value;
                let max = self.dimension(&args[2])?.value;
                Ok(value.with_value(value.value.max(min).min(max)).to_string())
            }
        }
    }

    fn invalid(self, message: String) -> TokenError {
        TokenError::InvalidArgument {
            function: self.as_str(),
            message,
        }
    }

    fn color(self, arg: &str) -> Result<Color, TokenError> {
        arg.parse::<Color>()
            .map_err(|e| self.invalid(e.to_string()))
    }

    fn number(self, arg: &str) -> Result<f64, TokenError> {
        arg.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| self.invalid(format!("`{arg}` is not a number")))
    }

    /// Percentage points (`10` or `10%`) as a 0..1 fraction.
    fn percent(self, arg: &str) -> Result<f32, TokenError> {
        let digits = arg.trim();
        let digits = digits.strip_suffix('%').unwrap_or(digits);
        let value = self.number(digits)?;
        Ok((value / 100.0) as f32)
    }

    fn dimension(self, arg: &str) -> Result<Dimension, TokenError> {
        Dimension::parse(arg).ok_or_else(|| self.invalid(format!("`{arg}` is not a dimension")))
    }
}

impl FromStr for ComputeFn {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| TokenError::UnknownComputeFunction {
                name: s.to_string(),
            })
    }
}

impl Display for ComputeFn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ComputeFn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A number with an optional unit suffix (`4px`, `1.5rem`, `50%`, `2`)
#[derive(Clone, Debug, PartialEq)]
pub struct Dimension {
    pub value: f64,
    pub unit: String,
}

impl Dimension {
    /// Parse a leading number (with optional sign, fraction, and exponent)
    /// followed by an optional unit. Units such as `em` are not mistaken for
    /// an exponent: `e` only belongs to the number when digits follow it.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let bytes = s.as_bytes();
        let digits_from = |mut i: usize| {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            i
        };

        let mut end = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
        end = digits_from(end);
        if bytes.get(end) == Some(&b'.') {
            end = digits_from(end + 1);
        }
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'-' | b'+')) {
                exp += 1;
            }
            let exp_end = digits_from(exp);
            if exp_end > exp {
                end = exp_end;
            }
        }

        let (number, unit) = s.split_at(end);
        let value = number.parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(Self {
            value,
            unit: unit.trim().to_string(),
        })
    }

    fn with_value(&self, value: f64) -> Self {
        Self {
            value,
            unit: self.unit.clone(),
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", format_number(self.value), self.unit)
    }
}

/// Format a number the way token output expects: at most four decimals, no
/// trailing zeros, no `-0`.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    let rounded = (n * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    if rounded.fract() == 0.0 && rounded.abs() < 1e15 {
        return format!("{}", rounded as i64);
    }
    let mut s = format!("{rounded:.4}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}
