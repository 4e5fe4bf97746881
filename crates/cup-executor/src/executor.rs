use cup_core::{
    debug_string, BallState, BodyId, DribbleState, FieldGeometry, ProgramSettings,
    RigidBodyWorld, RobotSlot, RobotState,
};

use crate::{
    control::{ActuatorInput, PlayerControlInput, RoleAssignment},
    recovery::recover,
    roles::{RoleCtx, RoleType},
    skills::{flick, kick, resolve_dribble},
    strategy::StrategyTable,
};

/// State of the world as sensed at the start of a tick. Every role program in
/// the tick sees the same snapshot.
#[derive(Debug, Clone)]
pub struct WorldSnapshot {
    /// Robots indexed by [`RobotSlot::index`]
    pub robots: [RobotState; 4],
    pub ball: BallState,
}

impl WorldSnapshot {
    pub fn robot(&self, slot: RobotSlot) -> &RobotState {
        &self.robots[slot.index()]
    }
}

/// Runs the role programs against a physics world, one decision per robot per
/// tick.
///
/// The executor owns the control-side state of every robot. The world owns
/// the bodies; it is only read at the start of [`Executor::tick`] and written
/// at the end.
pub struct Executor {
    settings: ProgramSettings,
    field: FieldGeometry,
    strategy: StrategyTable,
    robots: [RobotState; 4],
    ball: BallState,
    assignment: RoleAssignment,
    tick_count: u64,
}

impl Executor {
    pub fn new(settings: ProgramSettings, field: FieldGeometry) -> Self {
        let robots = RobotSlot::ALL.map(|slot| {
            let (position, angle) = field.start_pose(slot);
            RobotState::new(slot, position, angle)
        });
        let ball = BallState::new(field.center());
        Self {
            settings,
            field,
            strategy: StrategyTable::default(),
            robots,
            ball,
            assignment: RoleAssignment::default(),
            tick_count: 0,
        }
    }

    /// Use a different set of role programs.
    pub fn with_strategy(mut self, strategy: StrategyTable) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn robots(&self) -> &[RobotState; 4] {
        &self.robots
    }

    pub fn robot(&self, slot: RobotSlot) -> &RobotState {
        &self.robots[slot.index()]
    }

    pub fn ball(&self) -> &BallState {
        &self.ball
    }

    pub fn assignment(&self) -> RoleAssignment {
        self.assignment
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Run one control tick: sense, decide, recover and command.
    pub fn tick<W: RigidBodyWorld + ?Sized>(&mut self, world: &mut W) {
        for robot in self.robots.iter_mut() {
            let body = BodyId::Robot(robot.slot);
            robot.sense(world.position(body), world.raw_angle(body), &self.field);
        }
        self.ball
            .sense(world.position(BodyId::Ball), world.raw_angle(BodyId::Ball));

        let assignment = RoleAssignment::from_distances(
            self.ball.position,
            self.robots[RobotSlot::OwnA.index()].position,
            self.robots[RobotSlot::OwnB.index()].position,
        );
        if assignment != self.assignment {
            log::debug!(
                "p{} takes over the attack from p{}",
                assignment.attacker,
                self.assignment.attacker
            );
        }
        self.assignment = assignment;

        let snapshot = WorldSnapshot {
            robots: self.robots.clone(),
            ball: self.ball.clone(),
        };

        for role_type in RoleType::TICK_ORDER {
            let slot = self.slot_for(role_type);
            let auto_dribble = self.auto_dribble(role_type);
            let input = self.strategy.role_mut(role_type).update(RoleCtx::new(
                snapshot.robot(slot),
                &snapshot,
                &self.field,
            ));

            let robot = &mut self.robots[slot.index()];
            apply_input(robot, &input, &self.ball, auto_dribble, world);
            debug_string(format!("p{}.role", slot), role_type.to_string());
            debug_string(
                format!("p{}.dribble_state", slot),
                format!("{:?}", robot.dribble_state),
            );
        }

        for robot in self.robots.iter_mut() {
            robot.out_of_bounds = false;
            let front = robot.slot == self.assignment.attacker;
            recover(self.settings.recovery, robot, front, &*world, &self.field);
        }

        for robot in self.robots.iter() {
            world.set_commanded_velocity(
                robot.slot,
                robot.commanded_speed,
                robot.commanded_velocity_bearing,
            );
            world.set_commanded_heading(robot.slot, robot.commanded_heading);
        }

        self.tick_count += 1;
    }

    fn slot_for(&self, role_type: RoleType) -> RobotSlot {
        match role_type {
            RoleType::OwnAttack => self.assignment.attacker,
            RoleType::OwnDefend => self.assignment.defender,
            RoleType::OppAttack => RobotSlot::OppAttacker,
            RoleType::OppDefend => RobotSlot::OppDefender,
        }
    }

    fn auto_dribble(&self, role_type: RoleType) -> bool {
        match role_type {
            RoleType::OwnAttack => self.settings.own_attack_auto_dribble,
            RoleType::OwnDefend => self.settings.own_defend_auto_dribble,
            RoleType::OppAttack => self.settings.opp_attack_auto_dribble,
            RoleType::OppDefend => self.settings.opp_defend_auto_dribble,
        }
    }
}

/// Write a role's decision into the robot's state and fire its actuators.
///
/// Actuators act on the dribble state of the previous tick; the dribble
/// resolver then decides the state the next tick's programs see.
fn apply_input<W: RigidBodyWorld + ?Sized>(
    robot: &mut RobotState,
    input: &PlayerControlInput,
    ball: &BallState,
    auto_dribble: bool,
    world: &mut W,
) {
    robot.move_towards(input.speed, input.bearing);
    if let Some(heading) = input.heading {
        robot.commanded_heading = heading;
    }
    if let Some(chase_state) = input.chase_state {
        robot.chase_state = chase_state;
    }

    match input.actuator {
        ActuatorInput::Idle => {}
        ActuatorInput::Kick => {
            kick(robot, ball, world);
        }
        ActuatorInput::Flick(direction) => {
            flick(robot, direction, world);
        }
    }

    robot.dribble_state = if auto_dribble || input.dribble {
        resolve_dribble(robot, ball, world)
    } else {
        DribbleState::None
    };
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::{roles::Role, test_utils::MockWorld};
    use approx::assert_relative_eq;
    use cup_core::{LineContact, RecoveryMode, Vector2};

    fn start_poses() -> [(Vector2, f64); 4] {
        let field = FieldGeometry::default();
        RobotSlot::ALL.map(|slot| field.start_pose(slot))
    }

    fn executor() -> Executor {
        Executor::new(ProgramSettings::default(), FieldGeometry::default())
    }

    /// Drives straight up at a fixed speed and always asks for the dribbler.
    struct Forward;

    impl Role for Forward {
        fn update(&mut self, _ctx: RoleCtx<'_>) -> PlayerControlInput {
            let mut input = PlayerControlInput::new();
            input.with_velocity(200.0, 0.0).with_dribbling();
            input
        }
    }

    #[test_log::test]
    fn test_tick_commands_every_robot() {
        let mut world = MockWorld::with_poses(Vector2::new(273.0, 364.5), start_poses());
        let mut executor = executor();
        executor.tick(&mut world);

        assert_eq!(executor.tick_count(), 1);
        for slot in RobotSlot::ALL {
            assert!(world.velocities.contains_key(&slot));
            assert!(world.headings.contains_key(&slot));
        }
        // Own defender speed
        let defender = executor.assignment().defender;
        assert_relative_eq!(world.velocities[&defender].0, 300.0);
    }

    #[test_log::test]
    fn test_nearer_own_robot_attacks() {
        let mut poses = start_poses();
        poses[0].0 = Vector2::new(273.0, 100.0);
        poses[1].0 = Vector2::new(273.0, 300.0);
        let mut world = MockWorld::with_poses(Vector2::new(273.0, 364.5), poses);
        let mut executor = executor();
        executor.tick(&mut world);

        assert_eq!(executor.assignment().attacker, RobotSlot::OwnB);
        assert_relative_eq!(world.velocities[&RobotSlot::OwnB].0, 600.0);
        assert_relative_eq!(world.velocities[&RobotSlot::OwnA].0, 300.0);
    }

    #[test_log::test]
    fn test_dribbler_grabs_ball_ahead() {
        let mut poses = start_poses();
        poses[0].0 = Vector2::new(273.0, 340.0);
        let mut world = MockWorld::with_poses(Vector2::new(273.0, 364.5), poses);
        let mut executor = executor();
        executor.tick(&mut world);

        assert_eq!(executor.robot(RobotSlot::OwnA).dribble_state, DribbleState::Front);
        assert!(world
            .forces
            .iter()
            .any(|(body, _, _)| *body == BodyId::Ball));
    }

    #[test_log::test]
    fn test_disabled_auto_dribble_resets_state() {
        let mut poses = start_poses();
        // Ball right behind the opponent defender, whose dribbler is off
        poses[3].0 = Vector2::new(273.0, 350.0);
        let mut world = MockWorld::with_poses(Vector2::new(273.0, 364.5), poses);
        let mut executor = executor();
        executor.tick(&mut world);
        assert_eq!(
            executor.robot(RobotSlot::OppDefender).dribble_state,
            DribbleState::None
        );

        // Explicitly requested by the program
        let mut executor = executor_with_forward_defender();
        executor.tick(&mut world);
        assert_eq!(
            executor.robot(RobotSlot::OppDefender).dribble_state,
            DribbleState::Back
        );
    }

    fn executor_with_forward_defender() -> Executor {
        let mut strategy = StrategyTable::default();
        strategy.set_role(RoleType::OppDefend, Box::new(Forward));
        executor().with_strategy(strategy)
    }

    #[test_log::test]
    fn test_recovery_overrides_program() {
        let mut poses = start_poses();
        poses[3] = (Vector2::new(85.0, 500.0), PI);
        let mut world = MockWorld::with_poses(Vector2::new(273.0, 364.5), poses);
        world.contacts.insert(
            RobotSlot::OppDefender,
            vec![LineContact {
                shape: "left".to_string(),
                point_on_line: Vector2::new(73.0, 500.0),
                point_on_robot: Vector2::new(70.0, 500.0),
                normal: Vector2::new(1.0, 0.0),
                penalty_disk: false,
            }],
        );
        let mut executor = executor_with_forward_defender();
        executor.tick(&mut world);

        let robot = executor.robot(RobotSlot::OppDefender);
        assert!(robot.out_of_bounds);
        let (speed, bearing) = world.velocities[&RobotSlot::OppDefender];
        assert_relative_eq!(speed, 180.0);
        // Straight towards the centre line, i.e. east
        assert_relative_eq!(bearing.radians(), PI / 2.0, epsilon = 1e-9);
    }

    #[test_log::test]
    fn test_penalty_disk_flags_current_attacker() {
        let mut poses = start_poses();
        poses[0].0 = Vector2::new(273.0, 100.0);
        poses[1].0 = Vector2::new(240.0, 150.0);
        let mut world = MockWorld::with_poses(Vector2::new(273.0, 364.5), poses);
        for slot in [RobotSlot::OwnA, RobotSlot::OwnB] {
            world.contacts.insert(
                slot,
                vec![LineContact {
                    shape: "penalty_disk".to_string(),
                    point_on_line: Vector2::new(230.0, 140.0),
                    point_on_robot: Vector2::new(232.0, 142.0),
                    normal: Vector2::new(1.0, 1.0).normalize(),
                    penalty_disk: true,
                }],
            );
        }
        let mut executor = executor();
        executor.tick(&mut world);

        assert_eq!(executor.assignment().attacker, RobotSlot::OwnB);
        assert!(executor.robot(RobotSlot::OwnB).out_of_bounds);
        assert!(!executor.robot(RobotSlot::OwnA).out_of_bounds);
    }

    #[test_log::test]
    fn test_tof_escape_mode() {
        let mut poses = start_poses();
        poses[3] = (Vector2::new(85.0, 500.0), PI);
        let mut world = MockWorld::with_poses(Vector2::new(273.0, 364.5), poses);
        world.contacts.insert(
            RobotSlot::OppDefender,
            vec![LineContact {
                shape: "left".to_string(),
                point_on_line: Vector2::new(73.0, 500.0),
                point_on_robot: Vector2::new(70.0, 500.0),
                normal: Vector2::new(1.0, 0.0),
                penalty_disk: false,
            }],
        );
        let settings = ProgramSettings {
            recovery: RecoveryMode::TofEscape,
            ..Default::default()
        };
        let mut executor = Executor::new(settings, FieldGeometry::default());
        executor.tick(&mut world);

        let (speed, bearing) = world.velocities[&RobotSlot::OppDefender];
        assert_relative_eq!(speed, 450.0);
        assert_relative_eq!(bearing.radians(), PI / 2.0, epsilon = 1e-9);
    }
}
