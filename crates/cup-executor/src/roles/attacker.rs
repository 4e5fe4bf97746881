use std::f64::consts::PI;

use cup_core::{
    bearing_of, debug_line, debug_string, debug_value, relative_vector, segment_crosses_circle,
    Bearing, ChaseState, DebugColor, DribbleState, RobotSlot, RobotState, Vector2,
};

use super::{GapChoice, GoalGaps, Role, RoleCtx};
use crate::control::{
    steering::{approach_factor, carry_factor, travel_bearing},
    ActuatorInput, FlickDirection, PlayerControlInput,
};

const CHASE_SPEED: f64 = 600.0;
const CARRY_SPEED: f64 = 500.0;
const FLICK_SPEED: f64 = 600.0;
/// Radius of the circle the opponent attacker is treated as
const OBSTACLE_RADIUS: f64 = 30.0;
/// Target bearings within this of dead-ahead are caught with the front dribbler
const FRONT_CATCH_HALF_CONE: f64 = 0.7 * PI;
/// Only turn to face the goal while chasing when it is nearly ahead already
const CHASE_AIM_CONE: f64 = 0.15 * PI;
const CARRY_AIM_CONE: f64 = 0.4 * PI;
/// Kick only from inside this distance band to the aim point
const KICK_RANGE: (f64, f64) = (80.0, 250.0);
/// Never kick closer than this to the far wall
const KICK_WALL_CLEARANCE: f64 = 140.0;
const FLICK_RANGE: (f64, f64) = (50.0, 350.0);

/// The own robot nearer to the ball: chases it, carries it to the far goal and
/// shoots.
///
/// The behaviour depends on which dribbler holds the ball:
/// - none: chase the ball, choosing a chase state from the ball's bearing and
///   the opponent attacker's position
/// - front: drive to the wider opening beside the keeper and kick
/// - back: drive to the narrower opening and flick the ball off the back
#[derive(Debug, Default)]
pub struct Attacker;

impl Attacker {
    pub fn new() -> Self {
        Self
    }
}

/// Intermediate result of one dribble-state branch.
struct Plan {
    speed: f64,
    bearing: Bearing,
    factor: f64,
    chase_state: ChaseState,
    avoid: Option<(Vector2, Vector2)>,
}

impl Role for Attacker {
    fn update(&mut self, ctx: RoleCtx<'_>) -> PlayerControlInput {
        let player = ctx.player;
        let gaps = GoalGaps::new(ctx.field, ctx.world.robot(RobotSlot::OppDefender).position.x);
        let mut input = PlayerControlInput::new();

        let plan = match player.dribble_state {
            DribbleState::None => {
                let ball = ctx.world.ball.position;
                let obstacle = ctx.world.robot(RobotSlot::OppAttacker).position;
                let to_ball = relative_vector(player.position, player.orientation, ball);
                let bearing = bearing_of(&to_ball);
                let distance = to_ball.norm();
                // Sitting on the ball gives no direction to bend around
                let factor = if distance == 0.0 {
                    0.0
                } else {
                    approach_factor(distance)
                };

                let chase_state =
                    if segment_crosses_circle(player.position, ball, obstacle, OBSTACLE_RADIUS) {
                        ChaseState::AvoidObstacle
                    } else if bearing.radians() <= FRONT_CATCH_HALF_CONE
                        || bearing.radians() >= 2.0 * PI - FRONT_CATCH_HALF_CONE
                    {
                        ChaseState::Direct
                    } else {
                        ChaseState::BackApproach
                    };

                let aim = gaps.target(GapChoice::Wider);
                let to_aim = relative_vector(player.position, player.orientation, aim);
                input.with_heading(heading_towards(player, bearing_of(&to_aim), CHASE_AIM_CONE));
                debug_line(
                    format!("p{}.aim", player.slot),
                    player.position,
                    aim,
                    DebugColor::Orange,
                );

                Plan {
                    speed: CHASE_SPEED,
                    bearing,
                    factor,
                    chase_state,
                    avoid: Some((ball - player.position, player.position - obstacle)),
                }
            }
            DribbleState::Front => {
                let aim = gaps.target(GapChoice::Wider);
                let to_aim = relative_vector(player.position, player.orientation, aim);
                let bearing = bearing_of(&to_aim);
                let distance = to_aim.norm();

                debug_line(
                    format!("p{}.aim", player.slot),
                    player.position,
                    aim,
                    DebugColor::Green,
                );
                if bearing.is_within_of_ahead(CARRY_AIM_CONE) {
                    input.with_heading(facing(player, bearing));
                    let in_range = distance > KICK_RANGE.0 && distance < KICK_RANGE.1;
                    if in_range && player.position.y < ctx.field.height - KICK_WALL_CLEARANCE {
                        log::debug!("p{} kicks from {:.0} units", player.slot, distance);
                        input.with_actuator(ActuatorInput::Kick);
                    }
                } else {
                    input.with_heading(player.forward_heading());
                }

                Plan {
                    speed: CARRY_SPEED,
                    bearing,
                    factor: carry_factor(distance),
                    chase_state: ChaseState::Direct,
                    avoid: None,
                }
            }
            DribbleState::Back => {
                let aim = gaps.target(GapChoice::Narrower);
                let to_aim = relative_vector(player.position, player.orientation, aim);
                let distance = to_aim.norm();

                if distance > FLICK_RANGE.0 && distance < FLICK_RANGE.1 {
                    let direction = if player.position.x < ctx.field.width / 2.0 {
                        FlickDirection::CounterClockwise
                    } else {
                        FlickDirection::Clockwise
                    };
                    input.with_actuator(ActuatorInput::Flick(direction));
                }

                Plan {
                    speed: FLICK_SPEED,
                    bearing: bearing_of(&to_aim),
                    factor: 0.0,
                    chase_state: ChaseState::Direct,
                    avoid: None,
                }
            }
        };

        let travel = travel_bearing(
            plan.chase_state,
            plan.bearing,
            plan.factor,
            player.orientation,
            plan.avoid,
        );
        debug_string(format!("p{}.chase_state", player.slot), format!("{:?}", plan.chase_state));
        debug_value(format!("p{}.factor", player.slot), plan.factor);

        input
            .with_velocity(plan.speed, travel)
            .with_chase_state(plan.chase_state);
        input
    }
}

/// Face a target if it is within `cone` of dead-ahead, otherwise just face
/// forward.
fn heading_towards(player: &RobotState, target_bearing: Bearing, cone: f64) -> f64 {
    if target_bearing.is_within_of_ahead(cone) {
        facing(player, target_bearing)
    } else {
        player.forward_heading()
    }
}

/// Raw heading target that turns the robot towards a body-frame bearing.
///
/// The bearing is taken back to world axes first, so the target does not
/// depend on how far the robot has already turned.
fn facing(player: &RobotState, target_bearing: Bearing) -> f64 {
    player.forward_heading() - (target_bearing + player.orientation).signed()
}
