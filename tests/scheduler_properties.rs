//! Property tests for proximity ordering and task selection

use expedition::actors::Roster;
use expedition::core::config::SchedulerConfig;
use expedition::core::types::{ActorId, Skill, SourceId, TaskId, Vec2};
use expedition::scheduler::{order_by_proximity, BacktrackRule, TaskContext, TaskController};
use expedition::stats::NullStats;
use expedition::tasks::{SourceKind, SourceRegistry, TaskData};
use proptest::prelude::*;

const SKILLS: [Skill; 4] = [Skill::Woodcutting, Skill::Farming, Skill::Combat, Skill::Looting];

fn point() -> impl Strategy<Value = Vec2> {
    (-50.0f32..50.0, -10.0f32..10.0).prop_map(|(x, y)| Vec2::new(x, y))
}

fn skill() -> impl Strategy<Value = Option<Skill>> {
    prop_oneof![Just(None), (0usize..4).prop_map(|i| Some(SKILLS[i]))]
}

struct World {
    sources: SourceRegistry,
    roster: Roster,
    stats: NullStats,
    hero: ActorId,
}

impl World {
    fn new() -> Self {
        let mut roster = Roster::new();
        let hero = roster.spawn("Hero", Vec2::default());
        Self {
            sources: SourceRegistry::new(),
            roster,
            stats: NullStats,
            hero,
        }
    }

    fn ctx(&mut self) -> TaskContext<'_> {
        TaskContext::new(&mut self.sources, &mut self.roster, &mut self.stats)
    }
}

fn gather_data(skill: Option<Skill>) -> TaskData {
    TaskData::new("gather", "Gather", skill).with_xp(1.0)
}

proptest! {
    #[test]
    fn order_is_a_permutation(
        positions in prop::collection::vec(prop::option::weighted(0.9, point()), 0..24),
        max in -1.0f32..20.0,
        weight in -1.0f32..2.0,
    ) {
        let rule = BacktrackRule { max_backtrack_distance: max, weight };
        let mut order = order_by_proximity(Vec2::default(), &positions, &rule);
        order.sort_unstable();
        prop_assert_eq!(order, (0..positions.len()).collect::<Vec<_>>());
    }

    #[test]
    fn plain_order_is_greedy_nearest(positions in prop::collection::vec(point(), 1..20)) {
        let wrapped: Vec<Option<Vec2>> = positions.iter().copied().map(Some).collect();
        let order = order_by_proximity(Vec2::default(), &wrapped, &BacktrackRule::default());

        let mut anchor = Vec2::default();
        let mut remaining: Vec<usize> = (0..positions.len()).collect();
        for picked in order {
            let best = remaining
                .iter()
                .map(|&i| anchor.distance(&positions[i]))
                .fold(f32::INFINITY, f32::min);
            prop_assert!(anchor.distance(&positions[picked]) <= best);
            remaining.retain(|&i| i != picked);
            anchor = positions[picked];
        }
    }

    #[test]
    fn selection_never_hands_out_complete_work(
        tasks in prop::collection::vec((point(), any::<bool>()), 1..16),
    ) {
        let mut world = World::new();
        let mut controller = TaskController::new(SchedulerConfig::default());
        let ids: Vec<SourceId> = tasks
            .iter()
            .map(|(pos, _)| world.sources.spawn(SourceKind::Tree, Some(*pos), Some(gather_data(None))))
            .collect();
        for id in &ids {
            controller.add_task_object(*id);
        }
        controller.activate(&mut world.ctx());

        for (id, (_, done)) in ids.iter().zip(&tasks) {
            if *done {
                controller.task_mut(TaskId::for_source(*id)).unwrap().work(10.0);
            }
        }

        let hero = world.hero;
        let picked = controller.select_earliest_task(hero, &mut world.ctx());
        prop_assert!(controller.tasks().iter().all(|t| !t.is_complete()));
        match picked {
            Some(id) => prop_assert!(!controller.task(id).unwrap().is_complete()),
            None => prop_assert!(tasks.iter().all(|(_, done)| *done)),
        }
    }

    #[test]
    fn filtered_selection_respects_skills(
        tasks in prop::collection::vec((point(), skill()), 1..16),
        allowed in prop::sample::subsequence(SKILLS.to_vec(), 1..=4),
    ) {
        let mut world = World::new();
        let mut controller = TaskController::new(SchedulerConfig::default());
        for (pos, skill) in &tasks {
            let id = world.sources.spawn(SourceKind::Crop, Some(*pos), Some(gather_data(*skill)));
            controller.add_task_object(id);
        }
        controller.activate(&mut world.ctx());

        let hero = world.hero;
        let picked = controller.select_earliest_task_filtered(hero, Some(allowed.as_slice()), &mut world.ctx());
        let any_match = tasks.iter().any(|(_, s)| s.map_or(false, |s| allowed.contains(&s)));

        match picked {
            Some(id) => {
                let skill = controller.task(id).unwrap().skill();
                prop_assert!(skill.map_or(false, |s| allowed.contains(&s)));
            }
            None => prop_assert!(!any_match),
        }
    }

    #[test]
    fn repeated_selection_is_stable(
        positions in prop::collection::vec(point(), 1..12),
        worked in 0.0f32..0.9,
    ) {
        let mut world = World::new();
        let mut controller = TaskController::new(SchedulerConfig::default());
        for pos in &positions {
            let id = world.sources.spawn(SourceKind::Tree, Some(*pos), Some(gather_data(None)));
            controller.add_task_object(id);
        }
        controller.activate(&mut world.ctx());

        let hero = world.hero;
        let first = controller.select_earliest_task(hero, &mut world.ctx()).unwrap();
        controller.task_mut(first).unwrap().work(worked);
        let second = controller.select_earliest_task(hero, &mut world.ctx()).unwrap();

        prop_assert_eq!(first, second);
        let task = controller.task(first).unwrap();
        prop_assert_eq!(task.starts(), 1);
        prop_assert!((task.progress() - worked).abs() < 1e-6);
    }

    #[test]
    fn prune_leaves_no_dead_targets(
        enemies in prop::collection::vec((point(), 0.0f32..20.0, any::<bool>()), 1..12),
    ) {
        let mut world = World::new();
        let mut controller = TaskController::new(SchedulerConfig::default());
        let ids: Vec<SourceId> = enemies
            .iter()
            .map(|(pos, _, _)| world.sources.spawn_enemy(*pos, 10.0, None))
            .collect();
        for id in &ids {
            controller.add_task_object(*id);
        }
        controller.activate(&mut world.ctx());

        for (id, (_, damage, gone)) in ids.iter().zip(&enemies) {
            if *gone {
                world.sources.despawn(*id);
            } else {
                world.sources.damage(*id, *damage);
            }
        }
        controller.tick(0.1, &mut world.ctx());

        for task in controller.tasks() {
            let health = world.sources.health(task.source());
            prop_assert!(health.map_or(false, |h| !h.is_dead()));
            prop_assert!(!task.is_complete());
        }
        let survivors = enemies
            .iter()
            .filter(|(_, damage, gone)| !*gone && *damage < 10.0)
            .count();
        prop_assert_eq!(controller.len(), survivors);
    }
}
