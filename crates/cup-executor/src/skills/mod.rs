//! Ball-handling actuators shared by every role: the dribblers, the kicker
//! and the flick.

mod dribble;
mod kick;

pub use dribble::resolve_dribble;
pub use kick::{flick, kick};
