use cup_core::{RobotSlot, Vector2};

/// Which own robot attacks and which defends during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleAssignment {
    pub attacker: RobotSlot,
    pub defender: RobotSlot,
}

impl Default for RoleAssignment {
    fn default() -> Self {
        Self {
            attacker: RobotSlot::OwnA,
            defender: RobotSlot::OwnB,
        }
    }
}

impl RoleAssignment {
    /// Give the attacker role to the own robot nearer to the ball. A tie goes
    /// to [`RobotSlot::OwnA`].
    pub fn from_distances(ball: Vector2, own_a: Vector2, own_b: Vector2) -> Self {
        if (ball - own_a).norm() <= (ball - own_b).norm() {
            Self {
                attacker: RobotSlot::OwnA,
                defender: RobotSlot::OwnB,
            }
        } else {
            Self {
                attacker: RobotSlot::OwnB,
                defender: RobotSlot::OwnA,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearer_robot_attacks() {
        let ball = Vector2::new(0.0, 0.0);
        let far = Vector2::new(100.0, 0.0);
        let near = Vector2::new(0.0, 50.0);

        let assignment = RoleAssignment::from_distances(ball, far, near);
        assert_eq!(assignment.attacker, RobotSlot::OwnB);
        assert_eq!(assignment.defender, RobotSlot::OwnA);

        let assignment = RoleAssignment::from_distances(ball, near, far);
        assert_eq!(assignment.attacker, RobotSlot::OwnA);
        assert_eq!(assignment.defender, RobotSlot::OwnB);
    }

    #[test]
    fn test_tie_goes_to_first_slot() {
        let ball = Vector2::new(10.0, 10.0);
        let assignment = RoleAssignment::from_distances(
            ball,
            Vector2::new(10.0, 40.0),
            Vector2::new(40.0, 10.0),
        );
        assert_eq!(assignment, RoleAssignment::default());
    }
}
