//! The cast: a registry of actors grouped by role
//!
//! Groups keep the order they were first registered in, and actors keep
//! insertion order within a group. Rendering and "first actor" queries both
//! depend on that ordering.

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId};

/// Actor group names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    Robots,
    Banners,
    Artifacts,
}

impl Group {
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Robots => "robots",
            Group::Banners => "banners",
            Group::Artifacts => "artifacts",
        }
    }
}

/// Owns every live actor
#[derive(Debug, Clone)]
pub struct Cast {
    groups: Vec<(Group, Vec<Actor>)>,
    next_id: ActorId,
}

impl Default for Cast {
    fn default() -> Self {
        Self::new()
    }
}

impl Cast {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new actor ID
    fn next_actor_id(&mut self) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn group(&self, group: Group) -> Option<&Vec<Actor>> {
        self.groups
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, actors)| actors)
    }

    fn group_mut(&mut self, group: Group) -> Option<&mut Vec<Actor>> {
        self.groups
            .iter_mut()
            .find(|(g, _)| *g == group)
            .map(|(_, actors)| actors)
    }

    /// Append an actor to a group, registering the group if needed.
    /// Returns the ID assigned to the actor.
    pub fn add_actor(&mut self, group: Group, mut actor: Actor) -> ActorId {
        let id = self.next_actor_id();
        actor.id = id;
        match self.group_mut(group) {
            Some(actors) => actors.push(actor),
            None => self.groups.push((group, vec![actor])),
        }
        id
    }

    /// Remove the first actor with `id` from `group`.
    ///
    /// Removing an actor that is not present is a no-op returning `None`, so
    /// callers iterating a snapshot can remove freely.
    pub fn remove_actor(&mut self, group: Group, id: ActorId) -> Option<Actor> {
        let actors = self.group_mut(group)?;
        let index = actors.iter().position(|a| a.id == id)?;
        Some(actors.remove(index))
    }

    /// Oldest actor still present in the group
    pub fn get_first_actor(&self, group: Group) -> Option<&Actor> {
        self.group(group)?.first()
    }

    pub fn get_first_actor_mut(&mut self, group: Group) -> Option<&mut Actor> {
        self.group_mut(group)?.first_mut()
    }

    pub fn get_actor(&self, group: Group, id: ActorId) -> Option<&Actor> {
        self.group(group)?.iter().find(|a| a.id == id)
    }

    pub fn get_actor_mut(&mut self, group: Group, id: ActorId) -> Option<&mut Actor> {
        self.group_mut(group)?.iter_mut().find(|a| a.id == id)
    }

    /// Owned copy of a group's actors (empty if the group is absent)
    pub fn get_actors(&self, group: Group) -> Vec<Actor> {
        self.group(group).cloned().unwrap_or_default()
    }

    /// Owned snapshot of a group's actor IDs, in insertion order
    pub fn actor_ids(&self, group: Group) -> Vec<ActorId> {
        self.group(group)
            .map(|actors| actors.iter().map(|a| a.id).collect())
            .unwrap_or_default()
    }

    /// Every actor, in group registration order then insertion order
    pub fn get_all_actors(&self) -> Vec<&Actor> {
        self.groups
            .iter()
            .flat_map(|(_, actors)| actors.iter())
            .collect()
    }

    /// Number of actors in a group
    pub fn len(&self, group: Group) -> usize {
        self.group(group).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|(_, actors)| actors.is_empty())
    }
}
