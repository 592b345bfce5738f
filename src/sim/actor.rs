//! Actors: every drawable, movable thing on the field
//!
//! Role-specific data (artifact points, banner score) is carried in a
//! [`Role`] tag rather than a separate type per entity.

use serde::{Deserialize, Serialize};

use super::geometry::{Color, Point};

/// Stable actor identity within a session
pub type ActorId = u32;

/// What an actor is, plus the data that role carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// The player-controlled actor
    Robot,
    /// A falling gem or rock worth `points`
    Artifact { points: i32 },
    /// Score display
    Banner { score: i64 },
}

/// A drawable, movable entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Assigned by the cast on insertion (0 until then)
    pub id: ActorId,
    pub role: Role,
    pub position: Point,
    pub velocity: Point,
    pub text: String,
    pub font_size: i32,
    pub color: Color,
}

impl Actor {
    pub fn new(role: Role) -> Self {
        Self {
            id: 0,
            role,
            position: Point::ZERO,
            velocity: Point::ZERO,
            text: String::new(),
            font_size: 15,
            color: Color::WHITE,
        }
    }

    pub fn robot() -> Self {
        Self::new(Role::Robot)
    }

    pub fn artifact(points: i32) -> Self {
        Self::new(Role::Artifact { points })
    }

    pub fn banner() -> Self {
        let mut banner = Self::new(Role::Banner { score: 0 });
        banner.text = format_score(0);
        banner
    }

    /// Advance one step by the current velocity.
    ///
    /// The horizontal coordinate wraps into `[0, max_x)`. The vertical one
    /// does not: artifacts fall off the bottom and are removed by the caller.
    pub fn move_next(&mut self, max_x: i32, _max_y: i32) {
        let next = self.position + self.velocity;
        let x = if max_x > 0 { next.x.rem_euclid(max_x) } else { next.x };
        self.position = Point::new(x, next.y);
    }

    /// Points carried by an artifact (0 for other roles)
    pub fn points(&self) -> i32 {
        match self.role {
            Role::Artifact { points } => points,
            _ => 0,
        }
    }

    /// Set an artifact's point value. No effect on other roles.
    pub fn set_points(&mut self, points: i32) {
        if let Role::Artifact { points: p } = &mut self.role {
            *p = points;
        }
    }

    /// Add to a banner's running score and re-render its text.
    /// No effect on other roles.
    pub fn add_points(&mut self, points: i32) {
        if let Role::Banner { score } = &mut self.role {
            *score += i64::from(points);
            self.text = format_score(*score);
        }
    }

    /// Banner score, `None` for other roles
    pub fn score(&self) -> Option<i64> {
        match self.role {
            Role::Banner { score } => Some(score),
            _ => None,
        }
    }
}

fn format_score(score: i64) -> String {
    format!("Score: {score}")
}
