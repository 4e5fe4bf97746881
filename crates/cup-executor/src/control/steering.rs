//! Composition of the final travel bearing from a target bearing.
//!
//! All bearings here are in the robot's body frame except the returned
//! travel bearing, which has the robot's orientation added back and is in
//! world axes. Results are left unwrapped.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use cup_core::{cross, Bearing, ChaseState, Vector2};

/// Heading offset factor while chasing a loose ball. Saturates at 1.4 close to
/// the ball and decays towards 0 far from it.
pub fn approach_factor(distance: f64) -> f64 {
    (0.002 * (7.1 * (1.0 - distance / 850.0)).exp()).min(1.4)
}

/// Heading offset factor while carrying the ball on the front dribbler.
pub fn carry_factor(distance: f64) -> f64 {
    (0.007 * (5.6 * (1.0 - distance / 900.0)).exp()).min(1.0)
}

/// Extra turn applied when driving straight at a target, bending the path so
/// the robot swings round the ball rather than hitting it off-centre.
pub fn direct_offset(bearing: Bearing) -> f64 {
    let b = bearing.radians();
    if b < PI {
        (2.0 * ((0.2 * b).exp() - 1.0)).min(FRAC_PI_2)
    } else {
        (2.0 * ((0.2 * (b - TAU)).exp() - 1.0)).max(-FRAC_PI_2)
    }
}

pub fn direct(bearing: Bearing, factor: f64, orientation: Bearing) -> f64 {
    bearing.radians() + direct_offset(bearing) * factor + orientation.radians()
}

/// Drive so that the ball ends up on the back dribbler.
pub fn back_approach(bearing: Bearing, factor: f64, orientation: Bearing) -> f64 {
    let shifted = bearing.radians() - PI;
    let offset = shifted.clamp(-FRAC_PI_2, FRAC_PI_2);
    shifted + PI + offset * factor + orientation.radians()
}

/// Pass the obstacle tangentially, on the side given by the winding of
/// `to_ball` relative to `from_obstacle` (robot minus obstacle).
pub fn around_obstacle(
    bearing: Bearing,
    to_ball: &Vector2,
    from_obstacle: &Vector2,
    orientation: Bearing,
) -> f64 {
    let adjusted = if cross(to_ball, from_obstacle) >= 0.0 {
        bearing.radians() - FRAC_PI_4
    } else {
        bearing.radians() + FRAC_PI_4
    };
    adjusted + orientation.radians()
}

/// Travel bearing for a chase state. `avoid` carries the world-frame
/// robot-to-ball and obstacle-to-robot vectors needed to pass an obstacle; if
/// it is missing an [`ChaseState::AvoidObstacle`] falls back to driving
/// straight without offset.
pub fn travel_bearing(
    chase_state: ChaseState,
    bearing: Bearing,
    factor: f64,
    orientation: Bearing,
    avoid: Option<(Vector2, Vector2)>,
) -> f64 {
    match chase_state {
        ChaseState::Direct => direct(bearing, factor, orientation),
        ChaseState::BackApproach => back_approach(bearing, factor, orientation),
        ChaseState::AvoidObstacle => match avoid {
            Some((to_ball, from_obstacle)) => {
                around_obstacle(bearing, &to_ball, &from_obstacle, orientation)
            }
            None => bearing.radians() + orientation.radians(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_factors_saturate() {
        assert_relative_eq!(approach_factor(0.0), 1.4);
        assert!(approach_factor(850.0) < 0.0021);
        assert_relative_eq!(carry_factor(0.0), 1.0);
        assert_relative_eq!(carry_factor(900.0), 0.007, epsilon = 1e-12);
    }

    #[test]
    fn test_direct_offset_is_odd_and_capped() {
        assert_relative_eq!(direct_offset(Bearing::ZERO), 0.0);
        let left = direct_offset(Bearing::from_radians(-0.3));
        let right = direct_offset(Bearing::from_radians(0.3));
        assert!(right > 0.0 && left < 0.0);
        assert_relative_eq!(direct_offset(Bearing::from_radians(3.0)), FRAC_PI_2);
        let behind_left = direct_offset(Bearing::from_radians(PI + 0.1));
        assert_relative_eq!(
            behind_left,
            2.0 * ((0.2 * (PI + 0.1 - TAU)).exp() - 1.0),
            epsilon = 1e-12
        );
        assert!(behind_left > -FRAC_PI_2);
    }

    #[test]
    fn test_direct_adds_orientation() {
        let travel = direct(Bearing::ZERO, 1.0, Bearing::from_radians(1.0));
        assert_relative_eq!(travel, 1.0);
        let travel = direct(Bearing::from_radians(0.5), 0.0, Bearing::ZERO);
        assert_relative_eq!(travel, 0.5);
    }

    #[test]
    fn test_back_approach_ball_behind() {
        // Ball dead behind: no offset, keep driving backwards onto it.
        let travel = back_approach(Bearing::HALF_TURN, 1.4, Bearing::ZERO);
        assert_relative_eq!(travel, PI);
        // Ball behind and to the right swings further right.
        let travel = back_approach(Bearing::from_radians(PI + 0.2), 1.0, Bearing::ZERO);
        assert_relative_eq!(travel, PI + 0.4, epsilon = 1e-12);
        // Offset is clamped to a quarter turn.
        let travel = back_approach(Bearing::from_radians(0.1), 1.0, Bearing::ZERO);
        assert_relative_eq!(travel, 0.1 - FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_around_obstacle_sides() {
        let to_ball = Vector2::new(100.0, 0.0);
        // Obstacle below the path: cross(d, f) = 100·10 > 0
        let travel = around_obstacle(
            Bearing::from_degrees(90.0),
            &to_ball,
            &Vector2::new(-50.0, 10.0),
            Bearing::ZERO,
        );
        assert_relative_eq!(travel, FRAC_PI_2 - FRAC_PI_4, epsilon = 1e-12);
        // Obstacle above the path
        let travel = around_obstacle(
            Bearing::from_degrees(90.0),
            &to_ball,
            &Vector2::new(-50.0, -10.0),
            Bearing::ZERO,
        );
        assert_relative_eq!(travel, FRAC_PI_2 + FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn test_travel_bearing_dispatch() {
        let b = Bearing::from_radians(0.4);
        let o = Bearing::from_radians(0.2);
        assert_relative_eq!(
            travel_bearing(ChaseState::Direct, b, 0.5, o, None),
            direct(b, 0.5, o)
        );
        assert_relative_eq!(
            travel_bearing(ChaseState::BackApproach, b, 0.5, o, None),
            back_approach(b, 0.5, o)
        );
        assert_relative_eq!(
            travel_bearing(ChaseState::AvoidObstacle, b, 0.5, o, None),
            0.6,
            epsilon = 1e-12
        );
    }
}
