//! Actors that execute tasks: the hero and its echoes
//!
//! The roster is external to the scheduler. The controller only holds
//! `ActorId` handles and goes through the roster to read positions and
//! skills or to hand out assignments.

use crate::core::types::{ActorId, Skill, TaskId, Vec2};
use serde::{Deserialize, Serialize};

/// An actor on the course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub position: Vec2,
    /// Empty means the actor may take any task
    pub capable_skills: Vec<Skill>,
    pub move_speed: f32,
    pub work_rate: f32,
    pub attack_damage: f32,
    pub interact_range: f32,
    current_task: Option<TaskId>,
}

impl Actor {
    pub fn new(id: ActorId, name: &str, position: Vec2) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            capable_skills: Vec::new(),
            move_speed: 4.0,
            work_rate: 1.0,
            attack_damage: 10.0,
            interact_range: 1.0,
            current_task: None,
        }
    }

    pub fn with_skills(mut self, skills: Vec<Skill>) -> Self {
        self.capable_skills = skills;
        self
    }

    pub fn current_task(&self) -> Option<TaskId> {
        self.current_task
    }

    pub fn set_task(&mut self, task: Option<TaskId>) {
        self.current_task = task;
    }

    pub fn is_idle(&self) -> bool {
        self.current_task.is_none()
    }
}

/// Registry of actors, in spawn order
#[derive(Debug, Clone, Default)]
pub struct Roster {
    actors: Vec<Actor>,
    next_id: u32,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an actor with default rates and return its handle
    pub fn spawn(&mut self, name: &str, position: Vec2) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        self.actors.push(Actor::new(id, name, position));
        id
    }

    pub fn despawn(&mut self, id: ActorId) -> Option<Actor> {
        let index = self.actors.iter().position(|a| a.id == id)?;
        Some(self.actors.remove(index))
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    /// First actor in spawn order
    pub fn first(&self) -> Option<ActorId> {
        self.actors.first().map(|a| a.id)
    }

    pub fn ids(&self) -> Vec<ActorId> {
        self.actors.iter().map(|a| a.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_lookup() {
        let mut roster = Roster::new();
        let hero = roster.spawn("Hero", Vec2::new(0.0, 0.0));
        let echo = roster.spawn("Echo", Vec2::new(1.0, 0.0));

        assert_ne!(hero, echo);
        assert_eq!(roster.first(), Some(hero));
        assert_eq!(roster.get(echo).unwrap().name, "Echo");

        roster.get_mut(hero).unwrap().set_task(Some(TaskId(4)));
        assert_eq!(roster.get(hero).unwrap().current_task(), Some(TaskId(4)));
        assert!(roster.get(echo).unwrap().is_idle());
    }

    #[test]
    fn test_despawn_keeps_order() {
        let mut roster = Roster::new();
        let a = roster.spawn("A", Vec2::default());
        let b = roster.spawn("B", Vec2::default());
        let c = roster.spawn("C", Vec2::default());

        assert!(roster.despawn(a).is_some());
        assert!(roster.despawn(a).is_none());
        assert_eq!(roster.ids(), vec![b, c]);
        assert_eq!(roster.first(), Some(b));
    }
}
