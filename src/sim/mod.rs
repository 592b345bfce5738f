//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (cast insertion order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod cast;
pub mod geometry;
pub mod spawn;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorId, Role};
pub use cast::{Cast, Group};
pub use geometry::{Color, Point, scale};
pub use spawn::{ArtifactKind, new_artifact, roll_spawn, spawn_artifact};
pub use state::{RngState, build_cast};
pub use tick::{FrameEvent, apply_input, do_updates};
