//! Tick system - the host loop driving a run
//!
//! Each tick, in order:
//! runtime spawns -> idle actors request work -> actors execute -> controller prunes and reselects
//!
//! Pruning always runs after execution within a tick so a task finished this
//! tick is reported and replaced before the next one.

use crate::core::error::Result;
use crate::core::types::Vec2;
use crate::scheduler::TaskContext;
use crate::simulation::course::Course;
use crate::simulation::execute::advance_actors;
use rand::Rng;

/// Events generated during a tick, for display
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// An idle actor was handed a task
    TaskAssigned { actor_name: String, task: String },
    /// An actor finished its task
    TaskCompleted { actor_name: String, task: String, xp: f32 },
    /// An enemy appeared mid-run and became a kill task
    EnemySpawned { position: Vec2 },
}

/// Advance the course by one tick of `config.tick_seconds`
pub fn run_tick(course: &mut Course) -> Result<Vec<SimulationEvent>> {
    let dt = course.config.tick_seconds;
    let mut events = Vec::new();

    if let Some(event) = spawn_runtime_enemies(course, dt)? {
        events.push(event);
    }

    events.extend(assign_idle_actors(course));
    events.extend(advance_actors(course, dt));

    let mut ctx = TaskContext::new(&mut course.sources, &mut course.roster, &mut course.stats);
    course.controller.tick(dt, &mut ctx);

    course.current_tick += 1;
    Ok(events)
}

/// Run until the course is finished or `max_ticks` have passed.
/// Returns the number of ticks run.
pub fn run_course(course: &mut Course, max_ticks: u32) -> Result<u32> {
    let mut ticks = 0;
    while ticks < max_ticks && !course.is_finished() {
        for event in run_tick(course)? {
            tracing::debug!(tick = course.current_tick, "{:?}", event);
        }
        ticks += 1;
    }

    if course.is_finished() {
        tracing::info!("Course finished after {} ticks ({:.1}s)", ticks, course.controller.now());
    } else {
        tracing::warn!(
            "Tick limit reached with {} tasks left",
            course.controller.len()
        );
    }
    Ok(ticks)
}

fn spawn_runtime_enemies(course: &mut Course, dt: f32) -> Result<Option<SimulationEvent>> {
    let layout = &course.config.course;
    if layout.enemy_spawn_interval <= 0.0 || course.runtime_enemies >= layout.max_runtime_enemies {
        return Ok(None);
    }

    course.spawn_timer += dt;
    if course.spawn_timer < layout.enemy_spawn_interval {
        return Ok(None);
    }
    course.spawn_timer = 0.0;

    // Ahead of the hero, inside the course band
    let half_height = layout.half_height;
    let hero = course.hero_position();
    let position = Vec2::new(
        hero.x + course.rng.gen_range(3.0..=10.0),
        course.rng.gen_range(-half_height..=half_height),
    );
    course.spawn_runtime_enemy(position)?;
    tracing::info!("Enemy spawned at ({:.1}, {:.1})", position.x, position.y);

    Ok(Some(SimulationEvent::EnemySpawned { position }))
}

fn assign_idle_actors(course: &mut Course) -> Vec<SimulationEvent> {
    let mut events = Vec::new();

    for actor_id in course.roster.ids() {
        let idle = course.roster.get(actor_id).map_or(false, |a| a.is_idle());
        if !idle {
            continue;
        }

        let mut ctx = TaskContext::new(&mut course.sources, &mut course.roster, &mut course.stats);
        if let Some(task_id) = course.controller.select_earliest_task(actor_id, &mut ctx) {
            let actor_name = course
                .roster
                .get(actor_id)
                .map(|a| a.name.clone())
                .unwrap_or_default();
            let task = course
                .controller
                .task(task_id)
                .map(|t| t.name().to_string())
                .unwrap_or_default();
            events.push(SimulationEvent::TaskAssigned { actor_name, task });
        }
    }

    events
}
