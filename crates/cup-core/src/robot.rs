use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{snap_heading, vector_from_polar, Bearing, FieldGeometry, Vector2};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Own,
    Opponent,
}

impl Side {
    /// Raw body angle at which a robot of this side faces the goal it attacks.
    pub fn forward_body_angle(&self) -> f64 {
        match self {
            Side::Own => 0.0,
            Side::Opponent => PI,
        }
    }
}

/// One of the four robots on the field. Exactly one robot exists per slot.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RobotSlot {
    /// First own robot
    OwnA,
    /// Second own robot
    OwnB,
    OppAttacker,
    OppDefender,
}

impl RobotSlot {
    pub const ALL: [RobotSlot; 4] = [
        RobotSlot::OwnA,
        RobotSlot::OwnB,
        RobotSlot::OppAttacker,
        RobotSlot::OppDefender,
    ];

    pub fn index(&self) -> usize {
        match self {
            RobotSlot::OwnA => 0,
            RobotSlot::OwnB => 1,
            RobotSlot::OppAttacker => 2,
            RobotSlot::OppDefender => 3,
        }
    }

    pub fn side(&self) -> Side {
        match self {
            RobotSlot::OwnA | RobotSlot::OwnB => Side::Own,
            RobotSlot::OppAttacker | RobotSlot::OppDefender => Side::Opponent,
        }
    }
}

impl std::fmt::Display for RobotSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// A rigid body known to the physics collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyId {
    Robot(RobotSlot),
    Ball,
}

/// Which dribbler currently holds the ball.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DribbleState {
    #[default]
    None,
    Front,
    Back,
}

/// Steering mode of a robot chasing the ball.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChaseState {
    #[default]
    Direct,
    BackApproach,
    AvoidObstacle,
}

/// Ideal range readings to the four walls, in world axes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct TofReadings {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl TofReadings {
    pub fn from_position(position: Vector2, field: &FieldGeometry) -> Self {
        Self {
            top: field.height - position.y,
            right: field.width - position.x,
            bottom: position.y,
            left: position.x,
        }
    }
}

/// Everything the control core knows and decides about one robot.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RobotState {
    pub slot: RobotSlot,
    pub position: Vector2,
    /// Raw physics angle, counter-clockwise and unbounded
    pub body_angle: f64,
    /// Facing direction derived from `body_angle` every tick
    pub orientation: Bearing,
    pub commanded_velocity_bearing: Bearing,
    pub commanded_speed: f64,
    /// Raw angle the heading servo drives the body towards
    pub commanded_heading: f64,
    pub dribble_state: DribbleState,
    pub chase_state: ChaseState,
    /// Set by boundary recovery while the robot touches a line it must not cross
    pub out_of_bounds: bool,
    pub tof: TofReadings,
}

impl RobotState {
    pub fn new(slot: RobotSlot, position: Vector2, body_angle: f64) -> Self {
        Self {
            slot,
            position,
            body_angle,
            orientation: Bearing::from_body_angle(body_angle),
            commanded_velocity_bearing: Bearing::ZERO,
            commanded_speed: 0.0,
            commanded_heading: body_angle,
            dribble_state: DribbleState::None,
            chase_state: ChaseState::Direct,
            out_of_bounds: false,
            tof: TofReadings::default(),
        }
    }

    /// Refresh the sensed part of the state from the physics world.
    pub fn sense(&mut self, position: Vector2, body_angle: f64, field: &FieldGeometry) {
        self.position = position;
        self.body_angle = body_angle;
        self.orientation = Bearing::from_body_angle(body_angle);
        self.tof = TofReadings::from_position(position, field);
    }

    /// Set the commanded speed and travel bearing. Negative speeds are clamped
    /// to zero.
    pub fn move_towards(&mut self, speed: f64, bearing: f64) {
        self.commanded_speed = speed.max(0.0);
        self.commanded_velocity_bearing = Bearing::from_radians(bearing);
    }

    pub fn commanded_velocity(&self) -> Vector2 {
        vector_from_polar(self.commanded_speed, self.commanded_velocity_bearing.radians())
    }

    /// Heading target facing this robot's attacking direction, without spin.
    pub fn forward_heading(&self) -> f64 {
        snap_heading(self.body_angle, self.slot.side().forward_body_angle())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct BallState {
    pub position: Vector2,
    pub body_angle: f64,
    pub orientation: Bearing,
}

impl BallState {
    pub fn new(position: Vector2) -> Self {
        Self {
            position,
            body_angle: 0.0,
            orientation: Bearing::ZERO,
        }
    }

    pub fn sense(&mut self, position: Vector2, body_angle: f64) {
        self.position = position;
        self.body_angle = body_angle;
        self.orientation = Bearing::from_body_angle(body_angle);
    }
}
