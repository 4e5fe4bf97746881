use serde::{Deserialize, Serialize};

use crate::{Bearing, BodyId, RobotSlot, Vector2};

/// A touching pair of a robot and a painted line or penalty disk.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LineContact {
    /// Name of the touched shape, as in [`crate::FieldGeometry`]
    pub shape: String,
    /// Deepest point on the line's surface
    pub point_on_line: Vector2,
    /// Deepest point on the robot's surface
    pub point_on_robot: Vector2,
    /// Unit normal pointing from the line towards the robot
    pub normal: Vector2,
    pub penalty_disk: bool,
}

impl LineContact {
    pub fn min_x(&self) -> f64 {
        self.point_on_line.x.min(self.point_on_robot.x)
    }

    pub fn max_x(&self) -> f64 {
        self.point_on_line.x.max(self.point_on_robot.x)
    }

    pub fn min_y(&self) -> f64 {
        self.point_on_line.y.min(self.point_on_robot.y)
    }

    pub fn max_y(&self) -> f64 {
        self.point_on_line.y.max(self.point_on_robot.y)
    }
}

/// The physics collaborator as seen by the control core.
///
/// Implementations own the rigid bodies; the core only reads poses and writes
/// targets for the velocity and heading servos, or pokes bodies with impulses
/// and forces. All vectors passed to `apply_*` are in the body's local frame.
pub trait RigidBodyWorld {
    fn position(&self, body: BodyId) -> Vector2;

    /// Raw counter-clockwise angle of a body, unbounded.
    fn raw_angle(&self, body: BodyId) -> f64;

    /// Target velocity for the robot's servo, realised on the next step.
    fn set_commanded_velocity(&mut self, robot: RobotSlot, speed: f64, bearing: Bearing);

    /// Target raw angle for the robot's heading servo.
    fn set_commanded_heading(&mut self, robot: RobotSlot, angle: f64);

    fn apply_impulse(&mut self, body: BodyId, impulse: Vector2, local_point: Vector2);

    /// Force acting on the body during the next step only.
    fn apply_force(&mut self, body: BodyId, force: Vector2, local_point: Vector2);

    /// Every line or penalty disk the robot currently touches.
    fn line_contacts(&self, robot: RobotSlot) -> Vec<LineContact>;

    /// Sum of the contact normals of all touched shapes, negated so it points
    /// from the robot towards the lines. Zero when nothing is touched.
    fn detect_line_contact(&self, robot: RobotSlot) -> Vector2 {
        -self
            .line_contacts(robot)
            .iter()
            .fold(Vector2::zeros(), |acc, c| acc + c.normal)
    }
}
