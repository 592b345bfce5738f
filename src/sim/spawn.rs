//! Artifact spawning
//!
//! Each frame rolls a uniform integer in `[1, spawn_range]`; a roll equal to
//! `spawn_trigger` drops one new gem or rock at the top of the field.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId};
use super::cast::{Cast, Group};
use super::geometry::{Color, Point, scale};
use crate::settings::Settings;

/// The two things that can fall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactKind {
    Gem,
    Rock,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 2] = [ArtifactKind::Gem, ArtifactKind::Rock];

    pub fn glyph(&self) -> &'static str {
        match self {
            ArtifactKind::Gem => "*",
            ArtifactKind::Rock => "0",
        }
    }

    pub fn points(&self) -> i32 {
        match self {
            ArtifactKind::Gem => 1,
            ArtifactKind::Rock => -1,
        }
    }
}

/// Roll the per-frame spawn die
pub fn roll_spawn<R: Rng + ?Sized>(rng: &mut R, settings: &Settings) -> bool {
    let range = settings.spawn_range.max(1);
    rng.random_range(1..=range) == settings.spawn_trigger
}

/// Build a random artifact in grid row `row`.
///
/// The column excludes 0 and the rightmost column so glyphs never clip the
/// edge. The artifact falls one cell per frame.
pub fn new_artifact<R: Rng + ?Sized>(rng: &mut R, settings: &Settings, row: i32) -> Actor {
    let kind = ArtifactKind::ALL[rng.random_range(0..ArtifactKind::ALL.len())];
    let col = if settings.cols > 1 {
        rng.random_range(1..settings.cols)
    } else {
        0
    };
    let color = Color::new(rng.random(), rng.random(), rng.random());

    let mut artifact = Actor::artifact(kind.points());
    artifact.text = kind.glyph().to_string();
    artifact.font_size = settings.font_size;
    artifact.color = color;
    artifact.position = scale(Point::new(col, row), settings.cell_size);
    artifact.velocity = Point::new(0, settings.cell_size);
    artifact
}

/// Roll for a spawn and, on success, add a new artifact at the top row
pub fn spawn_artifact<R: Rng + ?Sized>(
    cast: &mut Cast,
    rng: &mut R,
    settings: &Settings,
) -> Option<ActorId> {
    if !roll_spawn(rng, settings) {
        return None;
    }
    let artifact = new_artifact(rng, settings, 0);
    Some(cast.add_actor(Group::Artifacts, artifact))
}
