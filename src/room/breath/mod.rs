//! Breath Module
//!
//! Particle stream from the viewer's mouth to the cake, lit by a small
//! moving light.

mod state;
mod systems;

pub use state::*;
pub use systems::*;
