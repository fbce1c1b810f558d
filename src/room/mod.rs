//! The birthday room
//!
//! - `types`: shared components, resources, messages and configuration
//! - `systems`: camera, player, pickup, lighting, music and HUD systems
//! - `scene`: static room geometry
//! - `candles`: the cake and its candle effects
//! - `breath`: breath particles when blowing out the candles
//! - `wish`: the wish prompt and dialog

pub mod assets;
pub mod breath;
pub mod candles;
pub mod palette;
pub mod scene;
pub mod strings;
pub mod systems;
pub mod types;
pub mod wish;
