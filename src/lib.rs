//! Core library for Conway's Game of Life on an unbounded, sparse grid.

pub mod enc;
pub mod engine;
pub mod error;
pub mod grid;
pub mod persist;
pub mod pos;
pub mod render;
pub mod seed;
pub mod settings;
pub mod sim;

pub use enc::{PositionEncoder, RunLengthEncoded};
pub use engine::{next_generation, next_generation_parallel};
pub use error::{Error, Result};
pub use grid::{Grid, GridWindow};
pub use pos::Pos2;
pub use settings::Settings;
pub use sim::{RunState, Simulation};
