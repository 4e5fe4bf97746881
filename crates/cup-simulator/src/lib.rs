use std::f64::consts::TAU;

use cup_core::{
    debug_cross, vector_from_polar, Bearing, BodyId, CupSettings, DebugColor, FieldGeometry,
    FieldLineSegment, LineContact, RigidBodyWorld, RobotSlot, Side, Vector2,
};
use rapier3d_f64::prelude::*;
use utils::{unwrap_angle, IntervalTrigger};

mod contacts;
mod utils;

// Simulation constants - these are in field units
const WALL_THICKNESS: f64 = 5.0;
const WALL_HEIGHT: f64 = 50.0;
const ROBOT_HEIGHT: f64 = 20.0;

const WALL_GROUP: Group = Group::GROUP_1;
const CROSSBAR_GROUP: Group = Group::GROUP_2;
const ROBOT_GROUP: Group = Group::GROUP_3;
const BALL_GROUP: Group = Group::GROUP_4;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    // PHYSICAL CONSTANTS
    /// Linear damping (rolling friction) on the ball
    pub ball_damping: f64,
    /// Angular damping on the ball
    pub ball_angular_damping: f64,
    /// Restitution of the walls and goal structures
    pub wall_restitution: f64,
    /// Interval for recording body positions in the debug map, in seconds
    pub debug_interval: f64,

    // ROBOT MODEL PARAMETERS
    pub robot_radius: f64,
    pub robot_mass: f64,
    pub ball_radius: f64,
    pub ball_mass: f64,
    /// Maximum linear acceleration of the velocity servo in units/s^2
    pub max_accel: f64,
    /// Maximum linear speed in units/s
    pub max_vel: f64,
    /// Maximum angular acceleration of the heading servo in rad/s^2
    pub max_ang_accel: f64,
    /// Maximum angular velocity in rad/s
    pub max_ang_vel: f64,

    // FIELD GEOMETRY PARAMETERS
    pub field: FieldGeometry,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            // PHYSICAL CONSTANTS
            ball_damping: 0.6,
            ball_angular_damping: 10.0,
            wall_restitution: 0.6,
            debug_interval: 0.1,

            // ROBOT MODEL PARAMETERS
            robot_radius: 15.0,
            robot_mass: 2.1,
            ball_radius: 7.0,
            ball_mass: 0.07,
            max_accel: 3300.0,
            max_vel: 1000.0,
            max_ang_accel: 40.0 * TAU,
            max_ang_vel: 4.0 * TAU,

            // FIELD GEOMETRY PARAMETERS
            field: FieldGeometry::default(),
        }
    }
}

impl SimulationConfig {
    /// Take the servo limits and field from the run settings.
    pub fn from_settings(settings: &CupSettings) -> Self {
        SimulationConfig {
            ball_damping: settings.servo.ball_damping,
            max_accel: settings.servo.max_acceleration,
            max_vel: settings.servo.max_speed,
            max_ang_vel: settings.servo.max_angular_velocity,
            field: settings.field.clone(),
            ..Default::default()
        }
    }
}

/// Goals scored so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub own: u32,
    pub opponent: u32,
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.own, self.opponent)
    }
}

#[derive(Debug)]
struct Ball {
    rigid_body_handle: RigidBodyHandle,
    _collider_handle: ColliderHandle,
    /// Unbounded yaw, continued across steps
    raw_angle: f64,
}

#[derive(Debug)]
struct Robot {
    slot: RobotSlot,
    rigid_body_handle: RigidBodyHandle,
    _collider_handle: ColliderHandle,
    raw_angle: f64,
    target_velocity: Vector2,
    target_heading: f64,
}

/// The physics side of a match: four robots and a ball on the field, with
/// velocity and heading servos for the robots.
///
/// ## Usage
///
/// ```ignore
/// let mut simulation = SimulationBuilder::default().build();
/// let mut executor = Executor::new(ProgramSettings::default(), FieldGeometry::default());
///
/// loop {
///     executor.tick(&mut simulation);
///     if let Some(side) = simulation.step(1.0 / 60.0) {
///         println!("{:?} scored", side);
///     }
/// }
/// ```
pub struct Simulation {
    config: SimulationConfig,
    current_time: f64,
    paused: bool,
    score: Score,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    ball: Option<Ball>,
    robots: Vec<Robot>,
    debug_interval: IntervalTrigger,
}

impl Simulation {
    /// Create a new instance of [`Simulation`]. After creation, the field only
    /// has its walls and goals and needs to be populated with robots and a
    /// ball. It is better to use [`SimulationBuilder`].
    pub fn new(config: SimulationConfig) -> Simulation {
        let debug_interval = IntervalTrigger::new(config.debug_interval);
        let mut simulation = Simulation {
            config,
            current_time: 0.0,
            paused: false,
            score: Score::default(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            ball: None,
            robots: Vec::new(),
            debug_interval,
        };

        let width = simulation.config.field.width;
        let height = simulation.config.field.height;
        let t = WALL_THICKNESS;
        let groups = InteractionGroups::new(WALL_GROUP, Group::ALL);
        simulation.add_wall(-t, height / 2.0, t, height / 2.0 + 2.0 * t, groups);
        simulation.add_wall(width + t, height / 2.0, t, height / 2.0 + 2.0 * t, groups);
        simulation.add_wall(width / 2.0, -t, width / 2.0 + 2.0 * t, t, groups);
        simulation.add_wall(width / 2.0, height + t, width / 2.0 + 2.0 * t, t, groups);

        for (segment, blocks_ball) in simulation.config.field.goal_segments() {
            let groups = if blocks_ball {
                InteractionGroups::new(WALL_GROUP, Group::ALL)
            } else {
                InteractionGroups::new(CROSSBAR_GROUP, Group::ALL)
            };
            simulation.add_segment(&segment, groups);
        }

        simulation
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulated time in seconds.
    pub fn time(&self) -> f64 {
        self.current_time
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    fn add_wall(
        &mut self,
        x: f64,
        y: f64,
        half_width: f64,
        half_height: f64,
        groups: InteractionGroups,
    ) {
        let wall_body = RigidBodyBuilder::fixed()
            .translation(Vector::new(x, y, 0.0))
            .build();
        let wall_collider = ColliderBuilder::cuboid(half_width, half_height, WALL_HEIGHT)
            .restitution(self.config.wall_restitution)
            .collision_groups(groups)
            .build();
        let wall_body_handle = self.rigid_body_set.insert(wall_body);
        self.collider_set.insert_with_parent(
            wall_collider,
            wall_body_handle,
            &mut self.rigid_body_set,
        );
    }

    /// Add an axis-aligned segment as a solid wall.
    fn add_segment(&mut self, segment: &FieldLineSegment, groups: InteractionGroups) {
        let center = (segment.p1 + segment.p2) / 2.0;
        let extent = (segment.p2 - segment.p1).abs() / 2.0;
        let half_thickness = segment.half_thickness;
        self.add_wall(
            center.x,
            center.y,
            extent.x + half_thickness,
            extent.y + half_thickness,
            groups,
        );
    }

    fn robot(&self, slot: RobotSlot) -> Option<&Robot> {
        self.robots.iter().find(|r| r.slot == slot)
    }

    fn robot_mut(&mut self, slot: RobotSlot) -> Option<&mut Robot> {
        self.robots.iter_mut().find(|r| r.slot == slot)
    }

    fn body_handle(&self, body: BodyId) -> Option<RigidBodyHandle> {
        match body {
            BodyId::Ball => self.ball.as_ref().map(|b| b.rigid_body_handle),
            BodyId::Robot(slot) => self.robot(slot).map(|r| r.rigid_body_handle),
        }
    }

    /// Add a robot, replacing any robot already in the slot.
    pub fn add_robot(&mut self, slot: RobotSlot, position: Vector2, angle: f64) {
        self.remove_robot(slot);

        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(Vector::new(position.x, position.y, 0.0))
            .rotation(Vector::z() * angle)
            .can_sleep(false)
            .locked_axes(
                LockedAxes::TRANSLATION_LOCKED_Z
                    | LockedAxes::ROTATION_LOCKED_X
                    | LockedAxes::ROTATION_LOCKED_Y,
            )
            .build();
        let collider = ColliderBuilder::cylinder(ROBOT_HEIGHT / 2.0, self.config.robot_radius)
            .rotation(Vector::x() * std::f64::consts::FRAC_PI_2)
            .mass(self.config.robot_mass)
            .restitution(0.0)
            .restitution_combine_rule(CoefficientCombineRule::Min)
            .collision_groups(InteractionGroups::new(ROBOT_GROUP, Group::ALL))
            .build();
        let rigid_body_handle = self.rigid_body_set.insert(rigid_body);
        let collider_handle = self.collider_set.insert_with_parent(
            collider,
            rigid_body_handle,
            &mut self.rigid_body_set,
        );
        self.robots.push(Robot {
            slot,
            rigid_body_handle,
            _collider_handle: collider_handle,
            raw_angle: angle,
            target_velocity: Vector2::zeros(),
            target_heading: angle,
        });
    }

    pub fn remove_robot(&mut self, slot: RobotSlot) {
        if let Some(idx) = self.robots.iter().position(|r| r.slot == slot) {
            let robot = self.robots.remove(idx);
            self.rigid_body_set.remove(
                robot.rigid_body_handle,
                &mut self.island_manager,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                true,
            );
        }
    }

    /// Add the ball, replacing the current one.
    pub fn add_ball(&mut self, position: Vector2) {
        if let Some(ball) = self.ball.take() {
            self.rigid_body_set.remove(
                ball.rigid_body_handle,
                &mut self.island_manager,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                true,
            );
        }

        let ball_body = RigidBodyBuilder::dynamic()
            .can_sleep(false)
            .translation(Vector::new(position.x, position.y, 0.0))
            .locked_axes(
                LockedAxes::TRANSLATION_LOCKED_Z
                    | LockedAxes::ROTATION_LOCKED_X
                    | LockedAxes::ROTATION_LOCKED_Y,
            )
            .linear_damping(self.config.ball_damping)
            .angular_damping(self.config.ball_angular_damping)
            .build();
        let ball_collider = ColliderBuilder::ball(self.config.ball_radius)
            .mass(self.config.ball_mass)
            .restitution(0.0)
            .restitution_combine_rule(CoefficientCombineRule::Min)
            .collision_groups(InteractionGroups::new(
                BALL_GROUP,
                Group::ALL.difference(CROSSBAR_GROUP),
            ))
            .build();
        let rigid_body_handle = self.rigid_body_set.insert(ball_body);
        let collider_handle = self.collider_set.insert_with_parent(
            ball_collider,
            rigid_body_handle,
            &mut self.rigid_body_set,
        );
        self.ball = Some(Ball {
            rigid_body_handle,
            _collider_handle: collider_handle,
            raw_angle: 0.0,
        });
    }

    /// Move the ball and stop it.
    pub fn teleport_ball(&mut self, position: Vector2) {
        if let Some(ball) = self.ball.as_mut() {
            if let Some(body) = self.rigid_body_set.get_mut(ball.rigid_body_handle) {
                body.set_position(Isometry::translation(position.x, position.y, 0.0), true);
                body.set_linvel(Vector::zeros(), true);
                body.set_angvel(Vector::zeros(), true);
                ball.raw_angle = 0.0;
            }
        }
    }

    /// Move a robot to a pose and stop it. Its servo targets are reset to
    /// hold the new pose.
    pub fn teleport_robot(&mut self, slot: RobotSlot, position: Vector2, angle: f64) {
        let Some(robot) = self.robots.iter_mut().find(|r| r.slot == slot) else {
            log::warn!("No robot in slot {}", slot);
            return;
        };
        if let Some(body) = self.rigid_body_set.get_mut(robot.rigid_body_handle) {
            body.set_position(
                Isometry::translation(position.x, position.y, 0.0)
                    * Isometry::rotation(Vector::z() * angle),
                true,
            );
            body.set_linvel(Vector::zeros(), true);
            body.set_angvel(Vector::zeros(), true);
            robot.raw_angle = angle;
            robot.target_velocity = Vector2::zeros();
            robot.target_heading = angle;
        }
    }

    /// Take a robot off the field, behind its own end line.
    pub fn reset_robot(&mut self, slot: RobotSlot) {
        let (position, angle) = self.config.field.reset_pose(slot);
        self.teleport_robot(slot, position, angle);
    }

    /// Put the ball in the centre and every robot on its start pose.
    pub fn kickoff(&mut self) {
        self.teleport_ball(self.config.field.center());
        for slot in RobotSlot::ALL {
            let (position, angle) = self.config.field.start_pose(slot);
            self.teleport_robot(slot, position, angle);
        }
    }

    /// Velocity of the ball in field units per second.
    pub fn ball_velocity(&self) -> Vector2 {
        self.body_handle(BodyId::Ball)
            .and_then(|h| self.rigid_body_set.get(h))
            .map(|body| body.linvel().xy())
            .unwrap_or_else(Vector2::zeros)
    }

    /// Velocity of a robot in field units per second.
    pub fn robot_velocity(&self, slot: RobotSlot) -> Vector2 {
        self.body_handle(BodyId::Robot(slot))
            .and_then(|h| self.rigid_body_set.get(h))
            .map(|body| body.linvel().xy())
            .unwrap_or_else(Vector2::zeros)
    }

    /// Advance the simulation by `dt` seconds. Returns the side that scored,
    /// if a goal was scored in this step. Does nothing while paused.
    pub fn step(&mut self, dt: f64) -> Option<Side> {
        if self.is_paused() {
            return None;
        }

        // Velocity and heading servos
        for robot in self.robots.iter() {
            let Some(body) = self.rigid_body_set.get_mut(robot.rigid_body_handle) else {
                continue;
            };

            let velocity = *body.linvel();
            let target = Vector::new(robot.target_velocity.x, robot.target_velocity.y, 0.0);
            let vel_err = target - velocity;
            let new_vel = {
                let acc = (vel_err / dt).cap_magnitude(self.config.max_accel);
                velocity + acc * dt
            };
            body.set_linvel(new_vel.cap_magnitude(self.config.max_vel), true);

            // Fastest turn that can still brake in time
            let ang_vel = body.angvel().z;
            let yaw_err = robot.target_heading - robot.raw_angle;
            let braking = (2.0 * self.config.max_ang_accel * yaw_err.abs()).sqrt();
            let target_ang_vel = yaw_err.signum()
                * (yaw_err.abs() / dt).min(braking).min(self.config.max_ang_vel);
            let max_change = self.config.max_ang_accel * dt;
            let new_ang_vel = ang_vel + (target_ang_vel - ang_vel).clamp(-max_change, max_change);
            body.set_angvel(Vector::z() * new_ang_vel, true);
        }

        // Slopes along the walls roll the ball back in
        if let Some(ball) = self.ball.as_ref() {
            if let Some(body) = self.rigid_body_set.get_mut(ball.rigid_body_handle) {
                let force = slope_force(&self.config.field, body.translation().xy());
                if force != Vector2::zeros() {
                    body.add_force(Vector::new(force.x, force.y, 0.0), true);
                }
            }
        }

        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &Vector::zeros(),
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
        self.current_time += dt;

        // Forces only act for the step they were applied in
        for handle in self.robots.iter().map(|r| r.rigid_body_handle).chain(
            self.ball.as_ref().map(|b| b.rigid_body_handle),
        ) {
            if let Some(body) = self.rigid_body_set.get_mut(handle) {
                body.reset_forces(true);
                body.reset_torques(true);
            }
        }

        for robot in self.robots.iter_mut() {
            if let Some(body) = self.rigid_body_set.get(robot.rigid_body_handle) {
                robot.raw_angle = unwrap_angle(robot.raw_angle, body.rotation().euler_angles().2);
            }
        }
        if let Some(ball) = self.ball.as_mut() {
            if let Some(body) = self.rigid_body_set.get(ball.rigid_body_handle) {
                ball.raw_angle = unwrap_angle(ball.raw_angle, body.rotation().euler_angles().2);
            }
        }

        if self.debug_interval.trigger(self.current_time) {
            self.record_debug();
        }

        let scorer = self.goal();
        if let Some(side) = scorer {
            match side {
                Side::Own => self.score.own += 1,
                Side::Opponent => self.score.opponent += 1,
            }
            log::info!(
                "{:?} side scored at {:.2}s, score {}",
                side,
                self.current_time,
                self.score
            );
            self.kickoff();
        }
        scorer
    }

    /// Which side, if any, has the ball in the other side's goal.
    fn goal(&self) -> Option<Side> {
        let field = &self.config.field;
        if self.ball.is_none() {
            return None;
        }
        let position = self.position(BodyId::Ball);

        if position.x <= field.goal_post_x || position.x >= field.right_post_x() {
            return None;
        }
        if position.y > field.far_goal_y() {
            Some(Side::Own)
        } else if position.y < field.near_goal_y() {
            Some(Side::Opponent)
        } else {
            None
        }
    }

    fn record_debug(&self) {
        for robot in self.robots.iter() {
            let color = match robot.slot.side() {
                Side::Own => DebugColor::Green,
                Side::Opponent => DebugColor::Purple,
            };
            debug_cross(
                format!("p{}.position", robot.slot),
                self.position(BodyId::Robot(robot.slot)),
                color,
            );
        }
        if self.ball.is_some() {
            debug_cross("ball.position", self.position(BodyId::Ball), DebugColor::Orange);
        }
    }
}

impl RigidBodyWorld for Simulation {
    fn position(&self, body: BodyId) -> Vector2 {
        self.body_handle(body)
            .and_then(|h| self.rigid_body_set.get(h))
            .map(|body| body.translation().xy())
            .unwrap_or_else(Vector2::zeros)
    }

    fn raw_angle(&self, body: BodyId) -> f64 {
        match body {
            BodyId::Ball => self.ball.as_ref().map(|b| b.raw_angle),
            BodyId::Robot(slot) => self.robot(slot).map(|r| r.raw_angle),
        }
        .unwrap_or_default()
    }

    fn set_commanded_velocity(&mut self, robot: RobotSlot, speed: f64, bearing: Bearing) {
        if let Some(robot) = self.robot_mut(robot) {
            robot.target_velocity = vector_from_polar(speed, bearing.radians());
        }
    }

    fn set_commanded_heading(&mut self, robot: RobotSlot, angle: f64) {
        if let Some(robot) = self.robot_mut(robot) {
            robot.target_heading = angle;
        }
    }

    fn apply_impulse(&mut self, body: BodyId, impulse: Vector2, local_point: Vector2) {
        let Some(handle) = self.body_handle(body) else {
            return;
        };
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            let impulse = body.position().rotation * Vector::new(impulse.x, impulse.y, 0.0);
            let point = body.position() * Point::new(local_point.x, local_point.y, 0.0);
            body.apply_impulse_at_point(impulse, point, true);
        }
    }

    fn apply_force(&mut self, body: BodyId, force: Vector2, local_point: Vector2) {
        let Some(handle) = self.body_handle(body) else {
            return;
        };
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            let force = body.position().rotation * Vector::new(force.x, force.y, 0.0);
            let point = body.position() * Point::new(local_point.x, local_point.y, 0.0);
            body.add_force_at_point(force, point, true);
        }
    }

    fn line_contacts(&self, robot: RobotSlot) -> Vec<LineContact> {
        if self.robot(robot).is_none() {
            return Vec::new();
        }
        contacts::line_contacts(
            &self.config.field,
            self.position(BodyId::Robot(robot)),
            self.config.robot_radius,
        )
    }
}

/// Force pulling a ball near a wall back towards the playing area: the vector
/// from the ball to the line `slope_margin` away from the wall.
fn slope_force(field: &FieldGeometry, position: Vector2) -> Vector2 {
    let margin = field.slope_margin;
    let mut force = Vector2::zeros();
    if position.x <= margin {
        force.x += margin - position.x;
    }
    if position.x >= field.width - margin {
        force.x += field.width - margin - position.x;
    }
    if position.y <= margin {
        force.y += margin - position.y;
    }
    if position.y >= field.height - margin {
        force.y += field.height - margin - position.y;
    }
    force
}

pub struct SimulationBuilder {
    sim: Simulation,
}

impl SimulationBuilder {
    pub fn new(config: SimulationConfig) -> Self {
        SimulationBuilder {
            sim: Simulation::new(config),
        }
    }

    pub fn add_robot(mut self, slot: RobotSlot, position: Vector2, angle: f64) -> Self {
        self.sim.add_robot(slot, position, angle);
        self
    }

    /// Add every robot on its start pose.
    pub fn add_start_robots(mut self) -> Self {
        for slot in RobotSlot::ALL {
            let (position, angle) = self.sim.config.field.start_pose(slot);
            self.sim.add_robot(slot, position, angle);
        }
        self
    }

    pub fn add_ball(mut self, position: Vector2) -> Self {
        self.sim.add_ball(position);
        self
    }

    pub fn build(self) -> Simulation {
        self.sim
    }
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        let builder = SimulationBuilder::new(SimulationConfig::default());
        let center = builder.sim.config.field.center();
        builder.add_start_robots().add_ball(center)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use approx::assert_relative_eq;

    const DT: f64 = 1.0 / 60.0;

    fn lone_robot_at(position: Vector2) -> Simulation {
        SimulationBuilder::new(SimulationConfig::default())
            .add_robot(RobotSlot::OwnA, position, 0.0)
            .add_ball(Vector2::new(273.0, 364.5))
            .build()
    }

    #[test_log::test]
    fn test_velocity_servo_reaches_target() {
        let mut sim = lone_robot_at(Vector2::new(150.0, 200.0));
        sim.set_commanded_velocity(RobotSlot::OwnA, 300.0, Bearing::ZERO);
        for _ in 0..30 {
            sim.step(DT);
        }
        let velocity = sim.robot_velocity(RobotSlot::OwnA);
        assert_relative_eq!(velocity.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(velocity.y, 300.0, epsilon = 1e-6);
        assert!(sim.position(BodyId::Robot(RobotSlot::OwnA)).y > 200.0);
        assert_relative_eq!(sim.position(BodyId::Robot(RobotSlot::OwnA)).x, 150.0, epsilon = 1e-6);
    }

    #[test_log::test]
    fn test_heading_servo_turns_robot() {
        let mut sim = lone_robot_at(Vector2::new(273.0, 200.0));
        sim.set_commanded_heading(RobotSlot::OwnA, FRAC_PI_2);
        for _ in 0..60 {
            sim.step(DT);
        }
        assert_relative_eq!(
            sim.raw_angle(BodyId::Robot(RobotSlot::OwnA)),
            FRAC_PI_2,
            epsilon = 1e-2
        );
    }

    #[test_log::test]
    fn test_ball_in_far_goal_scores_for_own_side() {
        let mut sim = SimulationBuilder::default().build();
        sim.teleport_ball(Vector2::new(273.0, 658.0));

        assert_eq!(sim.step(DT), Some(Side::Own));
        assert_eq!(sim.score(), Score { own: 1, opponent: 0 });
        // Kickoff puts the ball back in the centre
        let ball = sim.position(BodyId::Ball);
        assert_relative_eq!(ball, sim.config().field.center(), epsilon = 1e-6);
    }

    #[test_log::test]
    fn test_ball_beside_goal_does_not_score() {
        let mut sim = SimulationBuilder::default().build();
        sim.teleport_ball(Vector2::new(100.0, 40.0));
        assert_eq!(sim.step(DT), None);
        assert_eq!(sim.score(), Score::default());
    }

    #[test_log::test]
    fn test_slope_rolls_ball_off_wall() {
        let mut sim = lone_robot_at(Vector2::new(273.0, 200.0));
        sim.teleport_ball(Vector2::new(20.0, 364.5));
        sim.step(DT);
        assert!(sim.ball_velocity().x > 0.0);
        assert_relative_eq!(sim.ball_velocity().y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_slope_force() {
        let field = FieldGeometry::default();
        assert_eq!(slope_force(&field, field.center()), Vector2::zeros());
        assert_relative_eq!(
            slope_force(&field, Vector2::new(10.0, 720.0)),
            Vector2::new(25.0, -26.0)
        );
    }

    #[test_log::test]
    fn test_kick_impulse_moves_ball() {
        let mut sim = lone_robot_at(Vector2::new(273.0, 200.0));
        sim.apply_impulse(BodyId::Ball, Vector2::new(0.0, 7.0), Vector2::zeros());
        sim.step(DT);
        let velocity = sim.ball_velocity();
        assert!(velocity.y > 50.0);
        assert_relative_eq!(velocity.x, 0.0, epsilon = 1e-9);
    }

    #[test_log::test]
    fn test_pause_freezes_time() {
        let mut sim = SimulationBuilder::default().build();
        sim.pause();
        assert!(sim.is_paused());
        assert_eq!(sim.step(DT), None);
        assert_eq!(sim.time(), 0.0);
        sim.resume();
        assert!(!sim.is_paused());
        sim.step(DT);
        assert_relative_eq!(sim.time(), DT);
    }

    #[test_log::test]
    fn test_teleport_and_reset_robot() {
        let mut sim = SimulationBuilder::default().build();
        sim.teleport_robot(RobotSlot::OppAttacker, Vector2::new(100.0, 100.0), TAU + 0.3);
        assert_relative_eq!(sim.raw_angle(BodyId::Robot(RobotSlot::OppAttacker)), TAU + 0.3);
        assert_relative_eq!(
            sim.position(BodyId::Robot(RobotSlot::OppAttacker)),
            Vector2::new(100.0, 100.0),
            epsilon = 1e-9
        );

        sim.reset_robot(RobotSlot::OppAttacker);
        assert_relative_eq!(
            sim.position(BodyId::Robot(RobotSlot::OppAttacker)),
            Vector2::new(273.0, 699.0),
            epsilon = 1e-9
        );
        assert_relative_eq!(sim.raw_angle(BodyId::Robot(RobotSlot::OppAttacker)), FRAC_PI_2);
    }

    #[test_log::test]
    fn test_robot_on_line_reports_contact() {
        let sim = lone_robot_at(Vector2::new(85.0, 300.0));
        let contacts = sim.line_contacts(RobotSlot::OwnA);
        assert_eq!(contacts.len(), 1);
        assert!(sim.line_contacts(RobotSlot::OwnB).is_empty());
        assert_relative_eq!(
            sim.detect_line_contact(RobotSlot::OwnA),
            Vector2::new(-1.0, 0.0)
        );
    }
}
