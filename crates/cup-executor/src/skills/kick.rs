use cup_core::{
    body_to_world, relative_vector, BallState, BodyId, DribbleState, RigidBodyWorld, RobotState,
    Vector2,
};

use crate::control::FlickDirection;

/// Kick impulse in the robot's frame, straight ahead
const KICK_IMPULSE: Vector2 = Vector2::new(0.0, 15.0);
/// Point behind the ball's centre, in the robot's frame, the kick acts on
const KICK_POINT: Vector2 = Vector2::new(0.0, -5.0);
const FLICK_IMPULSE: f64 = 40.0;
/// Distance of the flick couple's points from the robot's centre
const FLICK_ARM: f64 = 20.0;

/// Fire the kicker. Only has an effect while the ball sits on the front
/// dribbler.
pub fn kick<W: RigidBodyWorld + ?Sized>(
    robot: &RobotState,
    ball: &BallState,
    world: &mut W,
) -> bool {
    if robot.dribble_state != DribbleState::Front {
        return false;
    }

    let to_ball_frame = |v: Vector2| {
        relative_vector(
            Vector2::zeros(),
            ball.orientation,
            body_to_world(robot.orientation, v),
        )
    };
    world.apply_impulse(
        BodyId::Ball,
        to_ball_frame(KICK_IMPULSE),
        to_ball_frame(KICK_POINT),
    );
    true
}

/// Spin the robot so the ball on the back dribbler is thrown sideways.
/// Counter-clockwise spin throws the ball to the robot's right. Only has an
/// effect while the ball sits on the back dribbler.
pub fn flick<W: RigidBodyWorld + ?Sized>(
    robot: &RobotState,
    direction: FlickDirection,
    world: &mut W,
) -> bool {
    if robot.dribble_state != DribbleState::Back {
        return false;
    }

    let sign = match direction {
        FlickDirection::CounterClockwise => 1.0,
        FlickDirection::Clockwise => -1.0,
    };
    let body = BodyId::Robot(robot.slot);
    world.apply_impulse(
        body,
        Vector2::new(-sign * FLICK_IMPULSE, 0.0),
        Vector2::new(0.0, FLICK_ARM),
    );
    world.apply_impulse(
        body,
        Vector2::new(sign * FLICK_IMPULSE, 0.0),
        Vector2::new(0.0, -FLICK_ARM),
    );
    true
}
