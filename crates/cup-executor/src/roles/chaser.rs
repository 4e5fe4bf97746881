use cup_core::{bearing_of, relative_vector, ChaseState};

use super::{Role, RoleCtx};
use crate::control::{
    steering::{approach_factor, back_approach},
    PlayerControlInput,
};

const CHASE_SPEED: f64 = 500.0;

/// Opponent attacker: always runs at the ball rear-first, no obstacle or
/// goal-gap logic.
#[derive(Debug, Default)]
pub struct Chaser;

impl Chaser {
    pub fn new() -> Self {
        Self
    }
}

impl Role for Chaser {
    fn update(&mut self, ctx: RoleCtx<'_>) -> PlayerControlInput {
        let player = ctx.player;
        let to_ball = relative_vector(player.position, player.orientation, ctx.world.ball.position);
        let bearing = bearing_of(&to_ball);
        let factor = approach_factor(to_ball.norm());

        let mut input = PlayerControlInput::new();
        input
            .with_velocity(
                CHASE_SPEED,
                back_approach(bearing, factor, player.orientation),
            )
            .with_heading(player.forward_heading())
            .with_chase_state(ChaseState::BackApproach);
        input
    }
}
