//! Greed - catch falling gems, dodge falling rocks
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actors, cast, collisions, spawning)
//! - `director`: The frame loop tying input, simulation and output together
//! - `platform`: Keyboard/video services (terminal and headless)
//! - `renderer`: Actor-to-character-grid rasterizer
//! - `settings`: Play field and spawn configuration

pub mod director;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use director::{Director, DirectorState, SessionStats};
pub use settings::{Difficulty, Settings};
