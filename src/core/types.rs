//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Handle to an actor in the roster (hero or echo)
///
/// Non-owning: the controller never keeps actors alive through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Handle to a work-producing object on the course (tree, crop, chest, enemy)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceId(pub u32);

/// Identity of a task inside the controller's task set
///
/// Each source yields at most one task, so the identity is derived from it.
/// Re-registering the same source always produces the same task identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u32);

impl TaskId {
    pub fn for_source(source: SourceId) -> Self {
        Self(source.0)
    }
}

/// Skill a task trains and an actor may be restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Woodcutting,
    Farming,
    Combat,
    Looting,
}

impl Skill {
    pub fn name(&self) -> &'static str {
        match self {
            Skill::Woodcutting => "Woodcutting",
            Skill::Farming => "Farming",
            Skill::Combat => "Combat",
            Skill::Looting => "Looting",
        }
    }
}

/// 2D position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0001 {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::default()
        }
    }

    /// Step from `self` toward `target` by at most `max_step`, never overshooting
    pub fn move_towards(&self, target: Vec2, max_step: f32) -> Self {
        let delta = target - *self;
        let dist = delta.length();
        if dist <= max_step || dist <= f32::EPSILON {
            target
        } else {
            *self + delta.normalize() * max_step
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_follows_source() {
        assert_eq!(TaskId::for_source(SourceId(7)), TaskId(7));
        assert_ne!(TaskId::for_source(SourceId(7)), TaskId::for_source(SourceId(8)));
    }

    #[test]
    fn test_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_move_towards_stops_at_target() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(1.0, 0.0);
        assert_eq!(a.move_towards(b, 5.0), b);

        let halfway = a.move_towards(Vec2::new(10.0, 0.0), 2.5);
        assert!((halfway.x - 2.5).abs() < 1e-6);
        assert_eq!(halfway.y, 0.0);
    }
}
