// color.rs - Cell colors sampled in HSV space

use std::fmt;

use palette::{FromColor, Hsv, Srgb};
use rand::Rng;

use crate::config::{SATURATION, VALUE};

/// A contiguous range of hues, in degrees, that may wrap past 360.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueBand {
    pub start: f64,
    pub span: f64,
}

impl HueBand {
    pub const fn new(start: f64, span: f64) -> Self {
        Self { start, span }
    }

    /// Uniform hue in `[start, start + span)`, wrapped into `[0, 360)`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let offset = rng.gen_range(0.0..self.span);
        wrap_degrees(self.start + offset)
    }

    pub fn contains(&self, hue: f64) -> bool {
        (hue - self.start).rem_euclid(360.0) < self.span
    }
}

fn wrap_degrees(hue: f64) -> f64 {
    let wrapped = hue.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// An immutable HSV color. Converted to 8-bit RGB only when painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    hue: f64,
    saturation: f64,
    value: f64,
}

impl Color {
    pub fn hsv(hue: f64, saturation: f64, value: f64) -> Self {
        Self {
            hue: wrap_degrees(hue),
            saturation: saturation.clamp(0.0, 1.0),
            value: value.clamp(0.0, 1.0),
        }
    }

    /// Random color in `band` with the fixed animation saturation and value.
    pub fn random<R: Rng + ?Sized>(band: HueBand, rng: &mut R) -> Self {
        Self::hsv(band.sample(rng), SATURATION, VALUE)
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        let hsv: Hsv<palette::encoding::Srgb, f64> = Hsv::new(self.hue, self.saturation, self.value);
        let rgb: Srgb<u8> = Srgb::<f64>::from_color(hsv).into_format();
        [rgb.red, rgb.green, rgb.blue]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsv({:.1}, {:.2}, {:.2})", self.hue, self.saturation, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FULL_HUE, REVEAL_HUE};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_full_band_samples() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let hue = FULL_HUE.sample(&mut rng);
            assert!((0.0..360.0).contains(&hue), "hue {hue} out of range");
        }
    }

    #[test]
    fn test_reveal_band_samples() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10_000 {
            let hue = REVEAL_HUE.sample(&mut rng);
            assert!((240.0..360.0).contains(&hue), "hue {hue} outside blue-magenta");
            assert!(REVEAL_HUE.contains(hue));
        }
    }

    #[test]
    fn test_wrapping_band() {
        let band = HueBand::new(300.0, 120.0);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1_000 {
            let hue = band.sample(&mut rng);
            assert!(hue >= 300.0 || hue < 60.0, "hue {hue} not in wrapped band");
            assert!(band.contains(hue));
        }
        assert!(!band.contains(180.0));
    }

    #[test]
    fn test_random_color_uses_fixed_saturation_and_value() {
        let mut rng = StdRng::seed_from_u64(1);
        let color = Color::random(FULL_HUE, &mut rng);
        assert_eq!(color.saturation(), 0.5);
        assert_eq!(color.value(), 0.8);
    }

    #[test]
    fn test_to_rgb8() {
        // Pure hues at full saturation and value hit the primaries
        assert_eq!(Color::hsv(0.0, 1.0, 1.0).to_rgb8(), [255, 0, 0]);
        assert_eq!(Color::hsv(120.0, 1.0, 1.0).to_rgb8(), [0, 255, 0]);
        assert_eq!(Color::hsv(240.0, 1.0, 1.0).to_rgb8(), [0, 0, 255]);
        assert_eq!(Color::hsv(0.0, 0.0, 0.0).to_rgb8(), [0, 0, 0]);
    }

    #[test]
    fn test_hue_is_normalized() {
        assert_eq!(Color::hsv(370.0, 0.5, 0.8).hue(), 10.0);
        assert_eq!(Color::hsv(-90.0, 0.5, 0.8).hue(), 270.0);
    }
}
