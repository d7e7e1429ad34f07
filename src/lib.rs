//! Wizard Game - a side-scrolling arcade game
//!
//! Core modules:
//! - `entities`: pure game data
//! - `compute`: per-frame simulation and the session state machine
//! - `scene`, `wizard`, `input`: live entity sets, clamped player position, held keys
//! - `utils`: pixel strings, random ranges, bounding-box collision
//! - `config`: tunable constants with JSON overrides

pub mod compute;
pub mod config;
pub mod entities;
pub mod input;
pub mod scene;
pub mod utils;
pub mod wizard;
