//! Room systems
//!
//! - `setup`: camera, room lights, night sky
//! - `player`: cursor grab, look, walk, wish framing, proximity
//! - `interaction`: hover ray and pickup
//! - `ambience`: lighting levels and music
//! - `hud`: crosshair, hints, overlays

mod ambience;
mod hud;
mod interaction;
mod player;
mod setup;

pub use ambience::*;
pub use hud::*;
pub use interaction::*;
pub use player::*;
pub use setup::*;
