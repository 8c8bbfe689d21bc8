//! Color types and utilities

/// RGBA color with f32 components (0.0 to 1.0)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create from u8 components (0-255)
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create from hex value (0xRRGGBB or 0xRRGGBBAA)
    pub fn from_hex(hex: u32) -> Self {
        if hex > 0xFFFFFF {
            // 0xRRGGBBAA format
            Self::from_rgba8(
                ((hex >> 24) & 0xFF) as u8,
                ((hex >> 16) & 0xFF) as u8,
                ((hex >> 8) & 0xFF) as u8,
                (hex & 0xFF) as u8,
            )
        } else {
            // 0xRRGGBB format
            Self::from_rgba8(
                ((hex >> 16) & 0xFF) as u8,
                ((hex >> 8) & 0xFF) as u8,
                (hex & 0xFF) as u8,
                255,
            )
        }
    }

    /// Create from HSL components.
    ///
    /// `hue` is in degrees (any value, wrapped into 0..360), `saturation` and
    /// `lightness` are fractions in 0.0..=1.0.
    pub fn from_hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 360.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::new(l, l, l, alpha);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self {
            r: hue_to_channel(p, q, h + 1.0 / 3.0),
            g: hue_to_channel(p, q, h),
            b: hue_to_channel(p, q, h - 1.0 / 3.0),
            a: alpha,
        }
    }

    /// Convert to HSL: (hue in degrees, saturation 0-1, lightness 0-1)
    pub fn to_hsl(&self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let l = (max + min) / 2.0;

        if (max - min).abs() < f32::EPSILON {
            return (0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == self.r {
            (self.g - self.b) / d + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (self.b - self.r) / d + 2.0
        } else {
            (self.r - self.g) / d + 4.0
        };

        (h * 60.0, s, l)
    }

    /// Set alpha and return new color
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Lighten the color by raising HSL lightness by `amount` (0.0 to 1.0)
    pub fn lighten(self, amount: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::from_hsla(h, s, (l + amount).min(1.0), self.a)
    }

    /// Darken the color by lowering HSL lightness by `amount` (0.0 to 1.0)
    pub fn darken(self, amount: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::from_hsla(h, s, (l - amount).max(0.0), self.a)
    }

    /// Convert to u8 array [r, g, b, a], rounding each channel
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ]
    }

    /// `#rrggbb`, ignoring alpha
    pub fn to_hex(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// `#rrggbb` when opaque, `#rrggbbaa` otherwise
    pub fn to_hex_alpha(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips() {
        assert_eq!(Color::from_hex(0x3B82F6).to_hex(), "#3b82f6");
        assert_eq!(Color::from_hex(0x80808080).to_hex_alpha(), "#80808080");
        assert_eq!(Color::from_hex(0x808080).to_hex_alpha(), "#808080");
    }

    #[test]
    fn hsl_round_trips_through_rgb() {
        let color = Color::from_hex(0x2563EB);
        let (h, s, l) = color.to_hsl();
        assert_eq!(Color::from_hsla(h, s, l, 1.0).to_hex(), "#2563eb");
    }

    #[test]
    fn pure_hues_convert() {
        assert_eq!(Color::from_hsla(0.0, 1.0, 0.5, 1.0).to_hex(), "#ff0000");
        assert_eq!(Color::from_hsla(120.0, 1.0, 0.5, 1.0).to_hex(), "#00ff00");
        assert_eq!(Color::from_hsla(240.0, 1.0, 0.5, 1.0).to_hex(), "#0000ff");
        assert_eq!(Color::from_hsla(360.0, 1.0, 0.5, 1.0).to_hex(), "#ff0000");
    }

    #[test]
    fn darken_and_lighten_adjust_lightness() {
        let gray = Color::from_hsla(0.0, 0.0, 0.5, 1.0);
        assert_eq!(gray.darken(0.1).to_hex(), "#666666");
        assert_eq!(gray.lighten(0.1).to_hex(), "#999999");
        assert_eq!(Color::WHITE.lighten(0.5), Color::WHITE);
        assert_eq!(Color::BLACK.darken(0.5).to_hex(), "#000000");
    }

    #[test]
    fn darken_preserves_alpha() {
        let c = Color::from_hex(0xFF000080).darken(0.2);
        assert_eq!(c.to_rgba8()[3], 0x80);
    }
}
