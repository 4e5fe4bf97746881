//! The motion-control core: role programs, the skills they trigger and the
//! per-tick executor that drives a [`cup_core::RigidBodyWorld`].

pub mod control;
mod executor;
pub mod recovery;
pub mod roles;
pub mod skills;
pub mod strategy;

#[cfg(test)]
pub(crate) mod test_utils;

pub use control::{ActuatorInput, FlickDirection, PlayerControlInput};
pub use executor::{Executor, WorldSnapshot};
