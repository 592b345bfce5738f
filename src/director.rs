//! The Director: runs the game loop
//!
//! Each frame, in this order:
//! 1. read the keyboard and set the robot's velocity
//! 2. move the robot, then move artifacts and resolve catches and falls
//! 3. roll for a new artifact
//! 4. clear, draw every actor, flush
//!
//! The loop ends when the video surface reports itself closed.

use anyhow::Result;
use rand_pcg::Pcg32;

use crate::platform::{KeyboardService, VideoService};
use crate::settings::Settings;
use crate::sim::{
    ActorId, Cast, FrameEvent, Group, RngState, apply_input, do_updates, spawn_artifact,
};

/// Director lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorState {
    /// Output surface not open (before start and after the loop ends)
    Closed,
    /// Frame loop active
    Running,
}

/// Running totals for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames: u64,
    pub collected: u64,
    pub fell: u64,
    pub spawned: u64,
}

impl SessionStats {
    fn record(&mut self, event: &FrameEvent) {
        match event {
            FrameEvent::Collected { .. } => self.collected += 1,
            FrameEvent::Fell { .. } => self.fell += 1,
            FrameEvent::Spawned { .. } => self.spawned += 1,
        }
    }
}

pub struct Director<K, V> {
    keyboard: K,
    video: V,
    settings: Settings,
    rng: Pcg32,
    state: DirectorState,
    stats: SessionStats,
}

impl<K: KeyboardService, V: VideoService> Director<K, V> {
    pub fn new(keyboard: K, video: V, settings: Settings, seed: u64) -> Self {
        Self {
            keyboard,
            video,
            settings,
            rng: RngState::new(seed).to_rng(),
            state: DirectorState::Closed,
            stats: SessionStats::default(),
        }
    }

    pub fn state(&self) -> DirectorState {
        self.state
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn video(&self) -> &V {
        &self.video
    }

    pub fn video_mut(&mut self) -> &mut V {
        &mut self.video
    }

    /// Seeded RNG, shared with cast setup so one seed replays a session
    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Run the game loop until the output surface closes.
    ///
    /// # Panics
    /// If the cast lacks a robot or a banner.
    pub fn start_game(&mut self, cast: &mut Cast) -> Result<()> {
        self.video.open_window()?;
        self.state = DirectorState::Running;
        log::info!("Game started");

        let result = self.run_loop(cast);

        self.state = DirectorState::Closed;
        let closed = self.video.close_window();

        let score = cast
            .get_first_actor(Group::Banners)
            .and_then(|b| b.score())
            .unwrap_or_default();
        log::info!(
            "Game over after {} frames: score {}, {} caught, {} fell, {} spawned",
            self.stats.frames,
            score,
            self.stats.collected,
            self.stats.fell,
            self.stats.spawned
        );
        // A loop failure outranks a failure to close
        result.and(closed)
    }

    fn run_loop(&mut self, cast: &mut Cast) -> Result<()> {
        while self.video.is_window_open() {
            self.run_frame(cast)?;
        }
        Ok(())
    }

    /// One full frame: input, updates, spawn, output
    pub fn run_frame(&mut self, cast: &mut Cast) -> Result<Vec<FrameEvent>> {
        self.get_inputs(cast);
        let mut events = self.do_updates(cast);
        if let Some(id) = self.create_artifact(cast) {
            events.push(FrameEvent::Spawned { id });
        }
        self.do_outputs(cast)?;

        self.stats.frames += 1;
        for event in &events {
            log::debug!("frame {}: {:?}", self.stats.frames, event);
            self.stats.record(event);
        }
        Ok(events)
    }

    /// Apply the keyboard direction to the robot
    pub fn get_inputs(&mut self, cast: &mut Cast) {
        let direction = self.keyboard.get_direction();
        apply_input(cast, direction);
    }

    /// Move everything and resolve collisions against the surface extent
    pub fn do_updates(&mut self, cast: &mut Cast) -> Vec<FrameEvent> {
        let max_x = self.video.get_width();
        let max_y = self.video.get_height();
        do_updates(cast, &self.settings, max_x, max_y)
    }

    /// Roll for a new artifact
    pub fn create_artifact(&mut self, cast: &mut Cast) -> Option<ActorId> {
        spawn_artifact(cast, &mut self.rng, &self.settings)
    }

    /// Draw every actor
    pub fn do_outputs(&mut self, cast: &Cast) -> Result<()> {
        self.video.clear_buffer()?;
        self.video.draw_actors(&cast.get_all_actors())?;
        self.video.flush_buffer()
    }
}
