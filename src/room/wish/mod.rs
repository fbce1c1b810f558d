//! Wish Module
//!
//! The prompt near the cake, the wish dialog and what happens after a wish.

mod state;
mod systems;
mod ui;

pub use state::*;
pub use systems::*;
pub use ui::*;
