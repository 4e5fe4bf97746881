use std::collections::HashMap;

use cup_core::{
    BallState, Bearing, BodyId, FieldGeometry, LineContact, RigidBodyWorld, RobotSlot,
    RobotState, Vector2,
};

use crate::WorldSnapshot;

/// Build a snapshot from a ball position and `(position, raw angle)` per slot,
/// in [`RobotSlot::ALL`] order.
pub fn snapshot_with(ball: Vector2, robots: [(Vector2, f64); 4]) -> WorldSnapshot {
    let field = FieldGeometry::default();
    let robots = RobotSlot::ALL.map(|slot| {
        let (position, angle) = robots[slot.index()];
        let mut robot = RobotState::new(slot, position, angle);
        robot.sense(position, angle, &field);
        robot
    });
    WorldSnapshot {
        robots,
        ball: BallState::new(ball),
    }
}

/// A physics world that only records what the core asks of it.
#[derive(Default)]
pub struct MockWorld {
    pub poses: HashMap<BodyId, (Vector2, f64)>,
    pub contacts: HashMap<RobotSlot, Vec<LineContact>>,
    pub velocities: HashMap<RobotSlot, (f64, Bearing)>,
    pub headings: HashMap<RobotSlot, f64>,
    pub impulses: Vec<(BodyId, Vector2, Vector2)>,
    pub forces: Vec<(BodyId, Vector2, Vector2)>,
}

impl MockWorld {
    pub fn with_poses(ball: Vector2, robots: [(Vector2, f64); 4]) -> Self {
        let mut world = Self::default();
        world.poses.insert(BodyId::Ball, (ball, 0.0));
        for slot in RobotSlot::ALL {
            world.poses.insert(BodyId::Robot(slot), robots[slot.index()]);
        }
        world
    }
}

impl RigidBodyWorld for MockWorld {
    fn position(&self, body: BodyId) -> Vector2 {
        self.poses.get(&body).map(|p| p.0).unwrap_or_else(Vector2::zeros)
    }

    fn raw_angle(&self, body: BodyId) -> f64 {
        self.poses.get(&body).map(|p| p.1).unwrap_or_default()
    }

    fn set_commanded_velocity(&mut self, robot: RobotSlot, speed: f64, bearing: Bearing) {
        self.velocities.insert(robot, (speed, bearing));
    }

    fn set_commanded_heading(&mut self, robot: RobotSlot, angle: f64) {
        self.headings.insert(robot, angle);
    }

    fn apply_impulse(&mut self, body: BodyId, impulse: Vector2, local_point: Vector2) {
        self.impulses.push((body, impulse, local_point));
    }

    fn apply_force(&mut self, body: BodyId, force: Vector2, local_point: Vector2) {
        self.forces.push((body, force, local_point));
    }

    fn line_contacts(&self, robot: RobotSlot) -> Vec<LineContact> {
        self.contacts.get(&robot).cloned().unwrap_or_default()
    }
}
