use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::Vector2;

/// A compass-style heading in radians, always in [0, 2π).
///
/// `0` points "up" the field (+y) and bearings grow clockwise, so `π/2` points
/// to +x. This is the opposite handedness of the physics engine, whose raw body
/// angles are counter-clockwise and unbounded. Use [`Bearing::from_body_angle`]
/// to cross between the two.
///
/// ```ignore
/// # use cup_core::Bearing;
/// let b = Bearing::from_degrees(350.0) + Bearing::from_degrees(20.0);
/// assert!((b.degrees() - 10.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Bearing(f64);

impl Bearing {
    pub const ZERO: Bearing = Bearing(0.0);
    pub const HALF_TURN: Bearing = Bearing(PI);

    /// Create a bearing from radians, wrapping into [0, 2π).
    pub fn from_radians(radians: f64) -> Self {
        Bearing(wrap_bearing(radians))
    }

    /// Create a bearing from degrees, wrapping into [0, 360).
    pub fn from_degrees(degrees: f64) -> Self {
        Self::from_radians(degrees.to_radians())
    }

    /// Compass bearing of a vector: `(π/2 − atan2(y, x)) mod 2π`.
    pub fn of_vector(v: &Vector2) -> Self {
        Self::from_radians(PI / 2.0 - v.y.atan2(v.x))
    }

    /// Convert a raw counter-clockwise physics angle into a clockwise bearing.
    ///
    /// Non-negative angles map to `2π − (angle mod 2π)`, negative ones to
    /// `−(angle mod 2π)`, where `mod` keeps the sign of the dividend.
    pub fn from_body_angle(raw: f64) -> Self {
        let flipped = if raw >= 0.0 {
            TAU - raw % TAU
        } else {
            -(raw % TAU)
        };
        Self::from_radians(flipped)
    }

    pub fn radians(&self) -> f64 {
        self.0
    }

    pub fn degrees(&self) -> f64 {
        self.0.to_degrees()
    }

    /// The same heading expressed in (-π, π], negative meaning anti-clockwise
    /// of "up".
    pub fn signed(&self) -> f64 {
        if self.0 > PI {
            self.0 - TAU
        } else {
            self.0
        }
    }

    /// Vector of the given magnitude pointing along this bearing.
    pub fn to_vector(&self, magnitude: f64) -> Vector2 {
        Vector2::new(magnitude * self.0.sin(), magnitude * self.0.cos())
    }

    /// Whether this bearing lies within `half_width` radians of dead-ahead.
    pub fn is_within_of_ahead(&self, half_width: f64) -> bool {
        self.0 < half_width || self.0 > TAU - half_width
    }
}

impl std::ops::Add for Bearing {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Bearing::from_radians(self.0 + other.0)
    }
}

impl std::ops::Sub for Bearing {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Bearing::from_radians(self.0 - other.0)
    }
}

impl std::ops::Neg for Bearing {
    type Output = Self;

    fn neg(self) -> Self {
        Bearing::from_radians(-self.0)
    }
}

impl std::ops::AddAssign for Bearing {
    fn add_assign(&mut self, other: Self) {
        self.0 = wrap_bearing(self.0 + other.0);
    }
}

impl std::fmt::Display for Bearing {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:.1}°", self.degrees())
    }
}

/// Wrap an angle in radians into [0, 2π).
pub fn wrap_bearing(radians: f64) -> f64 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid rounds up to TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wrap_bearing() {
        assert_relative_eq!(wrap_bearing(0.0), 0.0);
        assert_relative_eq!(wrap_bearing(TAU), 0.0);
        assert_relative_eq!(wrap_bearing(-PI / 2.0), 3.0 * PI / 2.0);
        assert_relative_eq!(wrap_bearing(5.0 * PI), PI, epsilon = 1e-12);
        assert!(wrap_bearing(-1e-18) < TAU);
    }

    #[test]
    fn test_of_vector_compass_axes() {
        assert_relative_eq!(Bearing::of_vector(&Vector2::new(0.0, 1.0)).radians(), 0.0);
        assert_relative_eq!(
            Bearing::of_vector(&Vector2::new(1.0, 0.0)).radians(),
            PI / 2.0
        );
        assert_relative_eq!(Bearing::of_vector(&Vector2::new(0.0, -1.0)).radians(), PI);
        assert_relative_eq!(
            Bearing::of_vector(&Vector2::new(-1.0, 0.0)).radians(),
            3.0 * PI / 2.0
        );
    }

    #[test]
    fn test_to_vector_up() {
        let v = Bearing::ZERO.to_vector(1.0);
        assert_relative_eq!(v.x, 0.0);
        assert_relative_eq!(v.y, 1.0);
    }

    #[test]
    fn test_polar_inverse() {
        for i in 0..36 {
            let theta = i as f64 * TAU / 36.0;
            for mag in [0.5, 1.0, 600.0] {
                let back = Bearing::of_vector(&Bearing::from_radians(theta).to_vector(mag));
                let diff = (back.radians() - theta).abs();
                assert!(diff < 1e-9 || (TAU - diff) < 1e-9, "{theta} -> {back}");
            }
        }
    }

    #[test]
    fn test_from_body_angle() {
        assert_relative_eq!(Bearing::from_body_angle(0.0).radians(), 0.0);
        assert_relative_eq!(
            Bearing::from_body_angle(PI / 2.0).radians(),
            3.0 * PI / 2.0
        );
        assert_relative_eq!(Bearing::from_body_angle(-PI / 2.0).radians(), PI / 2.0);
        // accumulated spin collapses
        assert_relative_eq!(
            Bearing::from_body_angle(4.0 * PI + PI / 2.0).radians(),
            3.0 * PI / 2.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            Bearing::from_body_angle(-3.0 * PI).radians(),
            PI,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_signed_and_ahead() {
        let b = Bearing::from_degrees(350.0);
        assert_relative_eq!(b.signed(), -10f64.to_radians(), epsilon = 1e-12);
        assert!(b.is_within_of_ahead(0.15 * PI));
        assert!(!Bearing::from_degrees(90.0).is_within_of_ahead(0.15 * PI));
    }

    #[test]
    fn test_add_wraps() {
        let b = Bearing::from_degrees(350.0) + Bearing::from_degrees(20.0);
        assert_relative_eq!(b.degrees(), 10.0, epsilon = 1e-9);
        let c = Bearing::from_degrees(10.0) - Bearing::from_degrees(20.0);
        assert_relative_eq!(c.degrees(), 350.0, epsilon = 1e-9);
    }
}
