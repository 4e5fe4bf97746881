use std::f64::consts::TAU;

use nalgebra::Rotation2;

use crate::{Bearing, Vector2};

/// Position of `target` as seen from an observer, in the observer's body frame.
///
/// The world offset is rotated by the observer's orientation so that the
/// bearing of the result is measured from the observer's facing direction.
pub fn relative_vector(observer: Vector2, orientation: Bearing, target: Vector2) -> Vector2 {
    Rotation2::new(orientation.radians()) * (target - observer)
}

/// Inverse of [`relative_vector`]'s rotation: express a body-frame vector in
/// world axes.
pub fn body_to_world(orientation: Bearing, local: Vector2) -> Vector2 {
    Rotation2::new(-orientation.radians()) * local
}

pub fn bearing_of(v: &Vector2) -> Bearing {
    Bearing::of_vector(v)
}

/// `magnitude · (sin b, cos b)`. Accepts unwrapped bearings.
pub fn vector_from_polar(magnitude: f64, bearing: f64) -> Vector2 {
    Vector2::new(magnitude * bearing.sin(), magnitude * bearing.cos())
}

pub fn normalize_angle_to_orientation(raw_body_angle: f64) -> Bearing {
    Bearing::from_body_angle(raw_body_angle)
}

/// The raw angle closest to `raw_body_angle` that differs from `forward` by a
/// whole number of turns. Used as a heading target this cancels accumulated
/// spin and faces the robot forward.
pub fn snap_heading(raw_body_angle: f64, forward: f64) -> f64 {
    forward + TAU * ((raw_body_angle - forward) / TAU).round()
}

/// z component of the 3d cross product of two planar vectors.
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Clamp `value` to the interval spanned by `a` and `b`, in either order.
pub fn clamp_between(value: f64, a: f64, b: f64) -> f64 {
    value.clamp(a.min(b), a.max(b))
}

/// Whether a circle cuts the segment from `start` to `end` with both crossing
/// points inside the segment.
///
/// Solves `|start + t·d − center|² = r²` for `t`. A degenerate segment has no
/// crossing: both parameters are forced to 2, outside [0, 1].
pub fn segment_crosses_circle(start: Vector2, end: Vector2, center: Vector2, radius: f64) -> bool {
    let d = end - start;
    let f = start - center;
    let a = d.dot(&d);
    let b = 2.0 * f.dot(&d);
    let c = f.dot(&f) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return false;
    }

    let (t1, t2) = if a == 0.0 {
        (2.0, 2.0)
    } else {
        let root = discriminant.sqrt();
        ((-b - root) / (2.0 * a), (-b + root) / (2.0 * a))
    };
    (0.0..=1.0).contains(&t1) && (0.0..=1.0).contains(&t2)
}

/// Closest point to `p` on the segment from `a` to `b`.
pub fn closest_point_on_segment(p: Vector2, a: Vector2, b: Vector2) -> Vector2 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return a;
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}
