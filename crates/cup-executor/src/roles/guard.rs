use cup_core::{bearing_of, clamp_between, relative_vector, ChaseState, Side, Vector2};

use super::{Role, RoleCtx};
use crate::control::PlayerControlInput;

const GUARD_SPEED: f64 = 300.0;

/// Goalkeeper: shadows the ball's x on a fixed line in front of its goal,
/// always facing forward.
#[derive(Debug)]
pub struct Guard {
    side: Side,
}

impl Guard {
    /// Guard the near goal.
    pub fn own() -> Self {
        Self { side: Side::Own }
    }

    /// Guard the far goal.
    pub fn opponent() -> Self {
        Self {
            side: Side::Opponent,
        }
    }
}

impl Role for Guard {
    fn update(&mut self, ctx: RoleCtx<'_>) -> PlayerControlInput {
        let player = ctx.player;
        let field = ctx.field;
        let x = clamp_between(
            ctx.world.ball.position.x,
            field.guard_inset_x,
            field.width - field.guard_inset_x,
        );
        let y = match self.side {
            Side::Own => field.own_guard_y,
            Side::Opponent => field.opp_guard_y,
        };

        let to_target = relative_vector(player.position, player.orientation, Vector2::new(x, y));
        let bearing = bearing_of(&to_target);

        let mut input = PlayerControlInput::new();
        input
            .with_velocity(
                GUARD_SPEED,
                bearing.radians() + player.orientation.radians(),
            )
            .with_heading(player.forward_heading())
            .with_chase_state(ChaseState::Direct);
        input
    }
}
