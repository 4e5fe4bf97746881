mod attacker;
mod chaser;
mod goal_gap;
mod guard;

pub use attacker::Attacker;
pub use chaser::Chaser;
pub use goal_gap::{GapChoice, GoalGaps};
pub use guard::Guard;

use cup_core::{FieldGeometry, RobotState};

use crate::{control::PlayerControlInput, WorldSnapshot};

/// The slot of the strategy table a role program fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleType {
    OwnAttack,
    OwnDefend,
    OppAttack,
    OppDefend,
}

impl RoleType {
    /// Order in which the programs run each tick.
    pub const TICK_ORDER: [RoleType; 4] = [
        RoleType::OwnAttack,
        RoleType::OwnDefend,
        RoleType::OppAttack,
        RoleType::OppDefend,
    ];
}

impl std::fmt::Display for RoleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoleType::OwnAttack => "own_attack",
            RoleType::OwnDefend => "own_defend",
            RoleType::OppAttack => "opp_attack",
            RoleType::OppDefend => "opp_defend",
        };
        write!(f, "{name}")
    }
}

pub struct RoleCtx<'a> {
    /// The robot this role drives, as sensed at the start of the tick
    pub player: &'a RobotState,
    /// Snapshot shared by every role in the tick
    pub world: &'a WorldSnapshot,
    pub field: &'a FieldGeometry,
}

impl<'a> RoleCtx<'a> {
    pub fn new(
        player: &'a RobotState,
        world: &'a WorldSnapshot,
        field: &'a FieldGeometry,
    ) -> RoleCtx<'a> {
        RoleCtx {
            player,
            world,
            field,
        }
    }
}

pub trait Role: Send {
    /// Decides the control input of the player for this tick
    fn update(&mut self, ctx: RoleCtx<'_>) -> PlayerControlInput;
}
