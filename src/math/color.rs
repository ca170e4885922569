use std::ops;

use crate::approx_eq::ApproxEq;

/// Channels are clamped into [0, 1] at construction, and every operation
/// producing a `Color` goes through construction, so the range holds
/// everywhere without callers validating anything.
#[derive(Copy, Clone, Debug, Default)]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: r.clamp(0., 1.),
            g: g.clamp(0., 1.),
            b: b.clamp(0., 1.),
        }
    }

    pub fn black() -> Self {
        Self::new(0., 0., 0.)
    }

    pub fn white() -> Self {
        Self::new(1., 1., 1.)
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn is_black(&self) -> bool {
        self.approx_eq(&Self::black())
    }

    fn channel_to_u8(v: f64) -> u8 {
        (v * 255.).round() as u8
    }

    pub fn to_rgb(&self) -> [u8; 3] {
        [
            Self::channel_to_u8(self.r),
            Self::channel_to_u8(self.g),
            Self::channel_to_u8(self.b),
        ]
    }
}

impl ApproxEq for Color {
    fn approx_eq(&self, other: &Self) -> bool {
        self.r.approx_eq(&other.r) && self.g.approx_eq(&other.g) && self.b.approx_eq(&other.b)
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl ops::Add for Color {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

/// Component-wise (Schur) product
impl ops::Mul for Color {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl ops::Mul<f64> for Color {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn construction_clamps_channels() {
        assert_approx_eq!(Color::new(1.5, -0.2, 0.5), Color::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn add_saturates_at_one() {
        assert_approx_eq!(
            Color::new(0.9, 0.6, 0.75) + Color::new(0.7, 0.1, 0.25),
            Color::new(1.0, 0.7, 1.0)
        );
    }

    #[test]
    fn mul_f64() {
        assert_approx_eq!(Color::new(0.2, 0.3, 0.4) * 2., Color::new(0.4, 0.6, 0.8));
    }

    #[test]
    fn schur_product() {
        assert_approx_eq!(
            Color::new(1., 0.2, 0.4) * Color::new(0.9, 1., 0.1),
            Color::new(0.9, 0.2, 0.04)
        );
    }

    #[test]
    fn to_rgb_rounds_half_up() {
        assert_eq!(Color::new(1., 0., 0.5).to_rgb(), [255, 0, 128]);
        assert_eq!(Color::black().to_rgb(), [0, 0, 0]);
        assert_eq!(Color::white().to_rgb(), [255, 255, 255]);
    }

    #[test]
    fn black_detection_tolerates_drift() {
        assert!(Color::new(0., 0., 0.).is_black());
        assert!(!Color::new(0.1, 0., 0.).is_black());
    }
}
