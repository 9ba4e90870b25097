//! Paratrooper: a single-screen cannon-versus-aircraft arcade game.
//!
//! Library modules:
//! - `config`: immutable game configuration and TOML loading
//! - `geometry`: angle helpers and axis-aligned rectangles
//! - `entities`: game entity types and their per-tick update rules
//! - `collision`: bullet ↔ target hit test
//! - `compute`: the simulation loop (spawning, movement, collisions, game over)
//!
//! The terminal front-end lives in the binary (`src/main.rs`, `src/display.rs`).

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod geometry;

pub use config::{ConfigError, GameConfig};
pub use entities::{GameState, GameStatus, TickInput};
