//! Type definitions for the birthday room
//!
//! This module is organized into submodules:
//! - `config` - RON configuration and command-line overrides
//! - `messages` - Messages passed between systems
//! - `camera` - First-person camera components and movement math
//! - `pickable` - Pickable objects and the pickup state machine
//! - `lighting` - Room light levels, celebration progress, music state
//! - `ui` - HUD components and loading progress

pub mod camera;
pub mod config;
pub mod lighting;
pub mod messages;
pub mod pickable;
pub mod ui;

// Re-export all public types for convenient access
pub use camera::*;
pub use config::*;
pub use lighting::*;
pub use messages::*;
pub use pickable::*;
pub use ui::*;
