//! Birthday Room
//!
//! A first-person 3D birthday room built on Bevy: a cake with flickering
//! candles that can be blown out after making a wish, pickable photo frames
//! and a flower bouquet, and lighting that reacts to the player.

pub mod room;
