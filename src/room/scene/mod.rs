//! Scene Module
//!
//! Static room geometry, spawned once at startup:
//! - `shell`: floor, walls, ceiling, trim and the carpet
//! - `chandelier`: the crystal chandelier and its lights
//! - `furniture`: table, chairs and plants
//! - `decor`: balloons, hearts, sconces, columns, candlesticks
//! - `gallery`: photo rows on the walls
//! - `pickables`: frames on the table and the bouquet
//! - `frames`: photo fitting shared by table and wall frames

mod chandelier;
mod decor;
mod frames;
mod furniture;
mod gallery;
mod kit;
mod pickables;
mod shell;

pub use chandelier::*;
pub use decor::*;
pub use frames::*;
pub use furniture::*;
pub use gallery::*;
pub use kit::*;
pub use pickables::*;
pub use shell::*;
