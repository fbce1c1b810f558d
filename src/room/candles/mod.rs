//! Candles Module
//!
//! The birthday cake and everything that moves on it: flickering flames,
//! smoke, orbiting sparks and floating hearts. A `BlowCandles` message starts
//! the blow-out, which ends with a single `CandlesExtinguished`.

mod spawn;
mod state;
mod systems;

pub use spawn::*;
pub use state::*;
pub use systems::*;
