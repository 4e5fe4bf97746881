mod bearing;
mod debug_info;
mod field;
mod geom;
mod robot;
mod settings;
mod world;

pub use bearing::*;
pub use debug_info::*;
pub use field::*;
pub use geom::*;
pub use robot::*;
pub use settings::*;
pub use world::*;

pub type Vector2 = nalgebra::Vector2<f64>;
