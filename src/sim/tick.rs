//! Per-frame simulation step
//!
//! Applies input to the robot, moves everything, resolves collisions and
//! removes artifacts that were caught or fell off the field. Spawning and
//! rendering are driven separately by the Director.

use super::actor::ActorId;
use super::cast::{Cast, Group};
use super::geometry::Point;
use crate::settings::Settings;

/// Something that happened to an artifact during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    /// The robot caught an artifact worth `points`
    Collected { id: ActorId, points: i32 },
    /// An artifact reached the floor uncaught
    Fell { id: ActorId },
    /// A new artifact appeared
    Spawned { id: ActorId },
}

/// Set the robot's velocity from a keyboard direction.
///
/// # Panics
/// If the cast has no robot.
pub fn apply_input(cast: &mut Cast, direction: Point) {
    let Some(robot) = cast.get_first_actor_mut(Group::Robots) else {
        panic!("cast has no actor in group {:?}", Group::Robots.as_str());
    };
    robot.velocity = direction;
}

/// Move the robot and artifacts, then resolve collisions.
///
/// Collisions compare the robot's new position against each artifact's
/// position *before* the artifact moves this frame. Artifacts are visited in
/// insertion order over a snapshot of IDs, so several artifacts caught in the
/// same frame are all consumed, in that order. Caught artifacts are not moved.
///
/// # Panics
/// If the cast has no robot or no banner.
pub fn do_updates(
    cast: &mut Cast,
    settings: &Settings,
    max_x: i32,
    max_y: i32,
) -> Vec<FrameEvent> {
    if cast.get_first_actor(Group::Banners).is_none() {
        panic!("cast has no actor in group {:?}", Group::Banners.as_str());
    }
    let Some(robot) = cast.get_first_actor_mut(Group::Robots) else {
        panic!("cast has no actor in group {:?}", Group::Robots.as_str());
    };
    robot.move_next(max_x, max_y);
    let robot_pos = robot.position;

    let mut events = Vec::new();
    for id in cast.actor_ids(Group::Artifacts) {
        let Some(artifact) = cast.get_actor_mut(Group::Artifacts, id) else {
            continue;
        };

        if artifact.position == robot_pos {
            let points = artifact.points();
            cast.remove_actor(Group::Artifacts, id);
            if let Some(banner) = cast.get_first_actor_mut(Group::Banners) {
                banner.add_points(points);
            }
            events.push(FrameEvent::Collected { id, points });
            continue;
        }

        artifact.move_next(max_x, max_y);
        if artifact.position.y >= settings.artifact_floor {
            cast.remove_actor(Group::Artifacts, id);
            events.push(FrameEvent::Fell { id });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Actor;

    const WIDTH: i32 = 900;
    const HEIGHT: i32 = 600;

    fn cast_with_robot_at(pos: Point) -> Cast {
        let mut cast = Cast::new();
        cast.add_actor(Group::Banners, Actor::banner());
        let mut robot = Actor::robot();
        robot.position = pos;
        cast.add_actor(Group::Robots, robot);
        cast
    }

    fn add_artifact(cast: &mut Cast, pos: Point, points: i32) -> ActorId {
        let mut artifact = Actor::artifact(points);
        artifact.position = pos;
        artifact.velocity = Point::new(0, 15);
        cast.add_actor(Group::Artifacts, artifact)
    }

    fn score(cast: &Cast) -> i64 {
        cast.get_first_actor(Group::Banners)
            .and_then(|b| b.score())
            .unwrap_or_default()
    }

    #[test]
    fn test_single_step_catches_artifact() {
        let mut cast = cast_with_robot_at(Point::ZERO);
        let id = add_artifact(&mut cast, Point::ZERO, 1);

        let events = do_updates(&mut cast, &Settings::default(), WIDTH, HEIGHT);

        assert_eq!(cast.len(Group::Artifacts), 0);
        assert_eq!(score(&cast), 1);
        assert_eq!(events, vec![FrameEvent::Collected { id, points: 1 }]);
        let banner = cast.get_first_actor(Group::Banners).map(|b| b.text.clone());
        assert_eq!(banner.as_deref(), Some("Score: 1"));
    }

    #[test]
    fn test_collision_removes_exactly_one() {
        let mut cast = cast_with_robot_at(Point::new(150, 585));
        add_artifact(&mut cast, Point::new(150, 585), -1);
        let other = add_artifact(&mut cast, Point::new(300, 30), 1);

        do_updates(&mut cast, &Settings::default(), WIDTH, HEIGHT);

        assert_eq!(cast.len(Group::Artifacts), 1);
        assert_eq!(score(&cast), -1);
        // The survivor moved one cell down
        let survivor = cast.get_actor(Group::Artifacts, other).map(|a| a.position);
        assert_eq!(survivor, Some(Point::new(300, 45)));
    }

    #[test]
    fn test_all_simultaneous_collisions_consumed() {
        let mut cast = cast_with_robot_at(Point::new(45, 585));
        let points = [1, 1, -1, 1, 1, -1, 1];
        for p in points {
            add_artifact(&mut cast, Point::new(45, 585), p);
        }

        let events = do_updates(&mut cast, &Settings::default(), WIDTH, HEIGHT);

        assert_eq!(cast.len(Group::Artifacts), 0);
        assert_eq!(score(&cast), points.iter().map(|&p| p as i64).sum::<i64>());
        let collected: Vec<i32> = events
            .iter()
            .filter_map(|e| match e {
                FrameEvent::Collected { points, .. } => Some(*points),
                _ => None,
            })
            .collect();
        assert_eq!(collected, points);
    }

    #[test]
    fn test_collision_uses_robot_position_after_move() {
        let mut cast = cast_with_robot_at(Point::new(0, 585));
        apply_input(&mut cast, Point::new(15, 0));
        add_artifact(&mut cast, Point::new(15, 585), 1);
        add_artifact(&mut cast, Point::new(0, 585), 1);

        do_updates(&mut cast, &Settings::default(), WIDTH, HEIGHT);

        // Only the artifact where the robot ended up was caught
        assert_eq!(score(&cast), 1);
        assert_eq!(cast.len(Group::Artifacts), 0, "uncaught one fell off the floor");
    }

    #[test]
    fn test_artifact_checked_before_it_moves() {
        // Artifact one cell above the robot: it would land on the robot after
        // moving, but the check happens first, so it is not caught this frame.
        let mut cast = cast_with_robot_at(Point::new(60, 300));
        let id = add_artifact(&mut cast, Point::new(60, 285), 1);

        do_updates(&mut cast, &Settings::default(), WIDTH, HEIGHT);
        assert_eq!(score(&cast), 0);
        assert_eq!(
            cast.get_actor(Group::Artifacts, id).map(|a| a.position),
            Some(Point::new(60, 300))
        );

        do_updates(&mut cast, &Settings::default(), WIDTH, HEIGHT);
        assert_eq!(score(&cast), 1);
        assert_eq!(cast.len(Group::Artifacts), 0);
    }

    #[test]
    fn test_artifact_removed_at_floor() {
        let mut cast = cast_with_robot_at(Point::new(0, 0));
        let id = add_artifact(&mut cast, Point::new(450, 585), 1);

        let events = do_updates(&mut cast, &Settings::default(), WIDTH, HEIGHT);

        assert_eq!(cast.len(Group::Artifacts), 0);
        assert_eq!(score(&cast), 0);
        assert_eq!(events, vec![FrameEvent::Fell { id }]);
    }

    #[test]
    fn test_floor_is_fixed_not_viewport_height() {
        let settings = Settings {
            artifact_floor: 600,
            ..Default::default()
        };
        let mut cast = cast_with_robot_at(Point::new(0, 0));
        add_artifact(&mut cast, Point::new(450, 285), 1);

        // A viewport only 300 tall does not remove the artifact at y=300
        do_updates(&mut cast, &settings, WIDTH, 300);
        assert_eq!(cast.len(Group::Artifacts), 1);
    }

    #[test]
    fn test_apply_input_sets_velocity() {
        let mut cast = cast_with_robot_at(Point::ZERO);
        apply_input(&mut cast, Point::new(-15, 0));
        let robot = cast.get_first_actor(Group::Robots).map(|r| r.velocity);
        assert_eq!(robot, Some(Point::new(-15, 0)));
    }

    #[test]
    #[should_panic(expected = "robots")]
    fn test_missing_robot_panics() {
        let mut cast = Cast::new();
        cast.add_actor(Group::Banners, Actor::banner());
        do_updates(&mut cast, &Settings::default(), WIDTH, HEIGHT);
    }

    #[test]
    #[should_panic(expected = "banners")]
    fn test_missing_banner_panics() {
        let mut cast = Cast::new();
        cast.add_actor(Group::Robots, Actor::robot());
        do_updates(&mut cast, &Settings::default(), WIDTH, HEIGHT);
    }
}
