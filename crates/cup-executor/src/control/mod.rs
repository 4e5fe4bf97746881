mod player_input;
mod role_assignment;
pub mod steering;

pub use player_input::*;
pub use role_assignment::*;
