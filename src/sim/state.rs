//! Session setup
//!
//! Builds the starting cast: banner first (so it renders underneath), then
//! the robot on the bottom row, then a scattering of artifacts.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::Actor;
use super::cast::{Cast, Group};
use super::geometry::{Point, scale};
use super::spawn::new_artifact;
use crate::settings::Settings;

/// Seed wrapper so a session can be replayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Build the cast for a new session
pub fn build_cast<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Cast {
    let mut cast = Cast::new();

    let mut banner = Actor::banner();
    banner.font_size = settings.font_size;
    banner.color = settings.banner_color;
    banner.position = Point::new(settings.cell_size, 0);
    cast.add_actor(Group::Banners, banner);

    let mut robot = Actor::robot();
    robot.text = settings.robot_glyph.clone();
    robot.font_size = settings.font_size;
    robot.color = settings.robot_color;
    robot.position = scale(
        Point::new(settings.cols / 2, (settings.rows - 1).max(0)),
        settings.cell_size,
    );
    cast.add_actor(Group::Robots, robot);

    // Initial artifacts start anywhere above the robot's row
    let max_row = (settings.rows - 1).max(1);
    for _ in 0..settings.initial_artifacts {
        let row = rng.random_range(1..=max_row);
        let artifact = new_artifact(rng, settings, row);
        cast.add_actor(Group::Artifacts, artifact);
    }

    log::debug!(
        "Built cast: {} artifacts on a {}x{} grid",
        cast.len(Group::Artifacts),
        settings.cols,
        settings.rows
    );

    cast
}
