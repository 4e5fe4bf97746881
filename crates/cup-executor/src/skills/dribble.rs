use cup_core::{
    bearing_of, relative_vector, BallState, BodyId, DribbleState, RigidBodyWorld, RobotState,
    Vector2,
};

/// The ball is only held while its centre is closer than this to the robot's
const DRIBBLE_RANGE: f64 = 40.0;
/// Half width, in degrees, of the cone in front of and behind the robot in
/// which a dribbler grips the ball
const DRIBBLE_HALF_CONE_DEG: f64 = 14.0;
const FRONT_PULL_GAIN: f64 = 30.0;
const BACK_PULL_GAIN: f64 = 31.0;

/// Work out which dribbler, if any, holds the ball and pull the ball onto it.
///
/// The pull is a force towards the robot proportional to the distance,
/// applied for the next physics step only.
pub fn resolve_dribble<W: RigidBodyWorld + ?Sized>(
    robot: &RobotState,
    ball: &BallState,
    world: &mut W,
) -> DribbleState {
    let to_ball = relative_vector(robot.position, robot.orientation, ball.position);
    let degrees = bearing_of(&to_ball).degrees();
    let in_range = to_ball.norm() < DRIBBLE_RANGE;

    let (state, gain) = if in_range
        && (degrees > 360.0 - DRIBBLE_HALF_CONE_DEG || degrees < DRIBBLE_HALF_CONE_DEG)
    {
        (DribbleState::Front, FRONT_PULL_GAIN)
    } else if in_range
        && degrees > 180.0 - DRIBBLE_HALF_CONE_DEG
        && degrees < 180.0 + DRIBBLE_HALF_CONE_DEG
    {
        (DribbleState::Back, BACK_PULL_GAIN)
    } else {
        return DribbleState::None;
    };

    let pull = gain * relative_vector(ball.position, ball.orientation, robot.position);
    world.apply_force(BodyId::Ball, pull, Vector2::zeros());
    state
}
