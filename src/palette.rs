//! Display colors for variant tokens and panel chrome.

use serde::{Deserialize, Serialize};

/// Linear RGB triple with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: f32) -> Self {
        Self::new(level, level, level)
    }

    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        Rgb::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Hue, saturation and lightness, each in `0.0..=1.0`.
    pub fn to_hsl(self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let lightness = (max + min) / 2.0;
        let delta = max - min;

        if delta <= f32::EPSILON {
            return (0.0, 0.0, lightness);
        }

        let saturation = if lightness > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        let hue = if max == self.r {
            (self.g - self.b) / delta + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (self.b - self.r) / delta + 2.0
        } else {
            (self.r - self.g) / delta + 4.0
        };

        (hue / 6.0, saturation, lightness)
    }

    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Rgb {
        if saturation <= f32::EPSILON {
            return Rgb::gray(lightness);
        }

        let q = if lightness < 0.5 {
            lightness * (1.0 + saturation)
        } else {
            lightness + saturation - lightness * saturation
        };
        let p = 2.0 * lightness - q;

        Rgb::new(
            hue_channel(p, q, hue + 1.0 / 3.0),
            hue_channel(p, q, hue),
            hue_channel(p, q, hue - 1.0 / 3.0),
        )
    }
}

fn hue_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
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

impl From<[f32; 3]> for Rgb {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Rgb::new(r, g, b)
    }
}

impl From<Rgb> for [f32; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Neutral grey used for dividers and unchecked variants.
pub const MEDIUM_GREY: Rgb = Rgb::gray(112.0 / 255.0);
/// Edge color of the per-region delete control.
pub const DELETE_RED: Rgb = Rgb::new(0.85, 0.5, 0.55);

const DISABLED_BLEND: f32 = 0.65;
const ENABLED_MIN_LIGHTNESS: f32 = 0.4;

/// Brightened variant color used for checked or queued tokens.
pub fn enabled_color(base: Rgb) -> Rgb {
    let (h, s, l) = base.to_hsl();
    let lightness = ENABLED_MIN_LIGHTNESS + (1.0 - ENABLED_MIN_LIGHTNESS) * l;
    Rgb::from_hsl(h, s, lightness)
}

/// Washed-out variant color used for unchecked tokens.
pub fn disabled_color(base: Rgb) -> Rgb {
    base.lerp(MEDIUM_GREY, DISABLED_BLEND)
}

pub fn display_color(base: Rgb, enabled: bool) -> Rgb {
    if enabled {
        enabled_color(base)
    } else {
        disabled_color(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgb, b: Rgb) -> bool {
        (a.r - b.r).abs() < 1e-4 && (a.g - b.g).abs() < 1e-4 && (a.b - b.b).abs() < 1e-4
    }

    #[test]
    fn hsl_round_trip_preserves_color() {
        let orange = Rgb::new(1.0, 0.6, 0.2);
        let (h, s, l) = orange.to_hsl();
        assert!(close(Rgb::from_hsl(h, s, l), orange));
    }

    #[test]
    fn enabled_color_lifts_dark_colors() {
        let lifted = enabled_color(Rgb::gray(0.0));
        assert!(close(lifted, Rgb::gray(0.4)));
        assert!(close(enabled_color(Rgb::gray(1.0)), Rgb::gray(1.0)));
    }

    #[test]
    fn disabled_color_blends_toward_grey() {
        let faded = disabled_color(Rgb::new(1.0, 0.0, 0.0));
        let grey = MEDIUM_GREY.r;
        assert!((faded.r - (1.0 + (grey - 1.0) * 0.65)).abs() < 1e-5);
        assert!((faded.g - grey * 0.65).abs() < 1e-5);
    }

    #[test]
    fn display_color_switches_on_flag() {
        let base = Rgb::new(0.2, 0.4, 0.9);
        assert_eq!(display_color(base, true), enabled_color(base));
        assert_eq!(display_color(base, false), disabled_color(base));
    }

    #[test]
    fn rgb_deserializes_from_triplet() {
        let color: Rgb = serde_json::from_str("[0.5, 0.25, 1.0]").unwrap();
        assert_eq!(color, Rgb::new(0.5, 0.25, 1.0));
    }
}
