//! Task execution - actors walk to their task and work it
//!
//! This is the actors' side of the contract: they only touch tasks through
//! the controller's execution hooks (`work`, `record_strike`) and never edit
//! the task set itself.

use crate::core::types::{ActorId, TaskId};
use crate::simulation::course::Course;
use crate::simulation::tick::SimulationEvent;
use crate::tasks::task::TaskKind;

/// Move every assigned actor toward its task and work it when in range
pub fn advance_actors(course: &mut Course, dt: f32) -> Vec<SimulationEvent> {
    let mut events = Vec::new();

    for actor_id in course.roster.ids() {
        let Some(task_id) = course.roster.get(actor_id).and_then(|a| a.current_task()) else {
            continue;
        };
        if let Some(event) = advance_actor(course, actor_id, task_id, dt) {
            events.push(event);
        }
    }

    events
}

fn advance_actor(
    course: &mut Course,
    actor_id: ActorId,
    task_id: TaskId,
    dt: f32,
) -> Option<SimulationEvent> {
    let (kind, target) = match course.controller.task(task_id) {
        Some(task) => (task.kind(), task.target(&course.sources)),
        None => {
            // Task left the set behind the actor's back
            if let Some(actor) = course.roster.get_mut(actor_id) {
                actor.set_task(None);
            }
            return None;
        }
    };

    let actor = course.roster.get_mut(actor_id)?;
    if let Some(target) = target {
        if actor.position.distance(&target) > actor.interact_range {
            actor.position = actor.position.move_towards(target, actor.move_speed * dt);
            return None;
        }
    }

    let actor_name = actor.name.clone();
    let work = actor.work_rate * dt;
    let damage = actor.attack_damage * dt;

    match kind {
        TaskKind::KillEnemy => strike(course, task_id, actor_name, damage),
        _ => gather(course, task_id, actor_name, work),
    }
}

fn strike(
    course: &mut Course,
    task_id: TaskId,
    actor_name: String,
    damage: f32,
) -> Option<SimulationEvent> {
    let task = course.controller.task_mut(task_id)?;
    let health = course.sources.damage(task.source(), damage)?;

    if task.record_strike(health) {
        tracing::debug!("{} defeated {}", actor_name, task.name());
        return Some(SimulationEvent::TaskCompleted {
            actor_name,
            task: task.name().to_string(),
            xp: task.last_granted_xp(),
        });
    }
    None
}

fn gather(
    course: &mut Course,
    task_id: TaskId,
    actor_name: String,
    work: f32,
) -> Option<SimulationEvent> {
    let task = course.controller.task_mut(task_id)?;
    if !task.work(work) {
        return None;
    }

    if let Some(data) = task.data() {
        for drop in &data.resource_drops {
            let amount = drop.roll(&mut course.rng);
            course.stats.add_resource(&drop.resource, amount);
        }
    }

    Some(SimulationEvent::TaskCompleted {
        actor_name,
        task: task.name().to_string(),
        xp: task.last_granted_xp(),
    })
}
