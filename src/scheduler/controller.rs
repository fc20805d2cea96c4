//! Task controller - owns the task set and decides what each actor does next
//!
//! Every tick the controller prunes stale work (despawned sources, dead
//! enemies, completed tasks) and, when anything was removed, reassigns the
//! hero. Selection walks the cached proximity order and hands out the first
//! task that is incomplete, not claimed by someone else and within the
//! actor's skills.
//!
//! The order is recomputed only when membership changes; a plain selection
//! never reorders.

use ahash::AHashMap;
use crate::actors::Roster;
use crate::core::clock::GameClock;
use crate::core::config::SchedulerConfig;
use crate::core::types::{ActorId, Skill, SourceId, TaskId, Vec2};
use crate::scheduler::proximity::{order_by_proximity, BacktrackRule};
use crate::stats::StatsSink;
use crate::tasks::source::{probe, SourceKind, SourceRegistry};
use crate::tasks::task::Task;

/// Name reported once every task is done
pub const ALL_COMPLETE: &str = "Complete";

/// External collaborators borrowed for the duration of one controller call
pub struct TaskContext<'a> {
    pub sources: &'a mut SourceRegistry,
    pub roster: &'a mut Roster,
    pub stats: &'a mut dyn StatsSink,
}

impl<'a> TaskContext<'a> {
    pub fn new(
        sources: &'a mut SourceRegistry,
        roster: &'a mut Roster,
        stats: &'a mut dyn StatsSink,
    ) -> Self {
        Self { sources, roster, stats }
    }
}

/// Selection cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Nothing assigned
    Idle,
    /// Index of the assigned task in the ordered set
    Assigned(usize),
    /// No task qualified on the last selection
    AllComplete,
}

impl Selection {
    /// Keep the cursor consistent after the task at `removed` left the set
    fn shift_for_removal(self, removed: usize) -> Self {
        match self {
            Selection::Assigned(i) if removed <= i => match i.checked_sub(1) {
                Some(prev) => Selection::Assigned(prev),
                None => Selection::Idle,
            },
            other => other,
        }
    }
}

/// Owner of the task set, the start-time map and the selection cursor
#[derive(Debug, Clone)]
pub struct TaskController {
    rule: BacktrackRule,
    hero: Option<ActorId>,
    /// Registered sources, in task order once normalized
    task_objects: Vec<SourceId>,
    /// Ordered working set
    tasks: Vec<Task>,
    task_map: AHashMap<TaskId, SourceId>,
    start_times: AHashMap<TaskId, f32>,
    selection: Selection,
    current_task_name: String,
    current_source: Option<SourceId>,
    clock: GameClock,
}

impl Default for TaskController {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl TaskController {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            rule: BacktrackRule::from(config),
            hero: None,
            task_objects: Vec::new(),
            tasks: Vec::new(),
            task_map: AHashMap::new(),
            start_times: AHashMap::new(),
            selection: Selection::Idle,
            current_task_name: String::new(),
            current_source: None,
            clock: GameClock::new(),
        }
    }

    // === LIFECYCLE ===

    /// Resolve the hero reference
    pub fn initialize(&mut self, roster: &Roster) {
        self.acquire_hero(roster);
    }

    /// (Re)activate: resolve the hero and rebuild the task set
    pub fn activate(&mut self, ctx: &mut TaskContext<'_>) {
        self.acquire_hero(ctx.roster);
        self.reset_tasks(ctx);
    }

    /// Advance time and prune stale tasks
    pub fn tick(&mut self, dt: f32, ctx: &mut TaskContext<'_>) {
        self.clock.advance(dt);
        self.prune_tasks(ctx);
    }

    fn acquire_hero(&mut self, roster: &Roster) {
        let present = self.hero.map_or(false, |id| roster.get(id).is_some());
        if !present {
            self.hero = roster.first();
            if self.hero.is_none() {
                tracing::warn!(target: "task", "TaskController hero reference is null");
            }
        }
    }

    // === REGISTRATION ===

    /// Forget every registered source
    pub fn clear_task_objects(&mut self) {
        self.task_objects.clear();
        self.task_map.clear();
    }

    /// Register a source for the next `reset_tasks`. Returns false for duplicates.
    pub fn add_task_object(&mut self, source: SourceId) -> bool {
        if self.task_objects.contains(&source) {
            return false;
        }
        self.task_objects.push(source);
        true
    }

    /// Register a source during a run and turn it into a task right away
    ///
    /// Does not reselect; the next prune or selection picks the task up.
    pub fn add_runtime_task_object(
        &mut self,
        source: SourceId,
        ctx: &mut TaskContext<'_>,
    ) -> Option<TaskId> {
        if self.task_objects.contains(&source) || !ctx.sources.contains(source) {
            return None;
        }
        self.task_objects.push(source);

        let mut fresh = AHashMap::new();
        let task = self.normalize(source, ctx.sources, &mut fresh);
        let id = match task {
            Some(task) if !self.task_map.contains_key(&task.id()) => {
                let id = task.id();
                tracing::debug!(target: "task", "Registered runtime task: {}", task.name());
                self.task_map.insert(id, source);
                self.tasks.push(task);
                Some(id)
            }
            _ => None,
        };

        self.reorder(ctx.sources, ctx.roster);
        id
    }

    /// Remove a source and the task built from it
    pub fn remove_task_object(&mut self, source: SourceId, ctx: &mut TaskContext<'_>) {
        let owned: Vec<TaskId> = self
            .task_map
            .iter()
            .filter(|(_, s)| **s == source)
            .map(|(id, _)| *id)
            .collect();

        for id in owned {
            self.remove_task(id, ctx);
        }
        self.task_objects.retain(|s| *s != source);
    }

    /// Rebuild the task set from every registered source and reassign the hero
    pub fn reset_tasks(&mut self, ctx: &mut TaskContext<'_>) {
        self.acquire_hero(ctx.roster);
        if self.hero.is_none() {
            tracing::warn!(target: "task", "ResetTasks called but hero is null");
        }

        self.selection = Selection::Idle;
        self.current_source = None;

        let mut previous: AHashMap<TaskId, Task> =
            self.tasks.drain(..).map(|t| (t.id(), t)).collect();
        self.task_map.clear();

        for source in self.task_objects.clone() {
            if self.task_map.contains_key(&TaskId::for_source(source)) {
                continue;
            }
            if let Some(task) = self.normalize(source, ctx.sources, &mut previous) {
                self.task_map.insert(task.id(), source);
                self.tasks.push(task);
            }
        }

        let task_map = &self.task_map;
        self.start_times.retain(|id, _| task_map.contains_key(id));

        self.reorder(ctx.sources, ctx.roster);
        self.release_stale_assignments(ctx.roster);

        if let Some(hero) = self.hero {
            self.unassign(hero, ctx.roster);
            self.select_earliest_task(hero, ctx);
        }
    }

    /// Clear every actor whose assignment no longer holds the claim
    ///
    /// Rebuilt kill tasks come back unclaimed, and tasks whose source did
    /// not survive the reset are gone entirely.
    fn release_stale_assignments(&self, roster: &mut Roster) {
        for actor in roster.iter_mut() {
            let Some(id) = actor.current_task() else {
                continue;
            };
            let held = self
                .tasks
                .iter()
                .find(|t| t.id() == id)
                .map_or(false, |t| t.claimed_by() == Some(actor.id));
            if !held {
                actor.set_task(None);
            }
        }
    }

    /// Turn a registered source into a task, reusing a live instance if one is held
    ///
    /// Enemies come back at full health and start a fresh fight.
    fn normalize(
        &mut self,
        source_id: SourceId,
        sources: &mut SourceRegistry,
        previous: &mut AHashMap<TaskId, Task>,
    ) -> Option<Task> {
        let source = sources.get_mut(source_id)?;
        let kind = probe(source)?;
        let id = TaskId::for_source(source_id);

        if kind.is_combat() {
            if let Some(health) = source.health.as_mut() {
                let max = health.max;
                health.init(max);
            }
            previous.remove(&id);
            self.start_times.remove(&id);
            return Task::from_source(source);
        }

        previous.remove(&id).or_else(|| Task::from_source(source))
    }

    // === ORDERING ===

    /// Recompute the proximity order from the hero's position
    fn reorder(&mut self, sources: &SourceRegistry, roster: &Roster) {
        let origin = self
            .hero
            .and_then(|id| roster.get(id))
            .map(|a| a.position)
            .unwrap_or_else(Vec2::default);

        let positions: Vec<Option<Vec2>> = self.tasks.iter().map(|t| t.target(sources)).collect();
        let order = order_by_proximity(origin, &positions, &self.rule);

        let assigned = match self.selection {
            Selection::Assigned(i) => self.tasks.get(i).map(|t| t.id()),
            _ => None,
        };

        let mut slots: Vec<Option<Task>> = self.tasks.drain(..).map(Some).collect();
        self.tasks = order.into_iter().filter_map(|i| slots[i].take()).collect();

        if let Some(id) = assigned {
            if let Some(i) = self.index_of(id) {
                self.selection = Selection::Assigned(i);
            }
        }

        // Sources still waiting for normalization keep their place at the end
        let mut objects: Vec<SourceId> = self
            .tasks
            .iter()
            .filter_map(|t| self.task_map.get(&t.id()).copied())
            .collect();
        for source in &self.task_objects {
            if !objects.contains(source) {
                objects.push(*source);
            }
        }
        self.task_objects = objects;
    }

    // === PRUNING ===

    /// Remove tasks whose source is gone, dead kill targets and completed tasks
    pub fn prune_tasks(&mut self, ctx: &mut TaskContext<'_>) {
        let mut removed = false;

        for i in (0..self.tasks.len()).rev() {
            let task = &mut self.tasks[i];
            let source = task.source();

            let stale = if !ctx.sources.contains(source) {
                true
            } else if task.kind().is_combat() {
                match ctx.sources.health(source) {
                    Some(health) => {
                        task.record_strike(health);
                        health.is_dead() || task.is_complete()
                    }
                    None => true,
                }
            } else {
                task.is_complete()
            };

            if stale {
                self.detach_at(i, ctx);
                removed = true;
            }
        }

        if removed {
            self.reorder(ctx.sources, ctx.roster);
            if let Some(hero) = self.hero {
                self.unassign(hero, ctx.roster);
                self.select_earliest_task(hero, ctx);
            }
        }
    }

    /// Remove every completed task
    pub fn remove_completed_tasks(&mut self, ctx: &mut TaskContext<'_>) {
        let mut removed = false;
        for i in (0..self.tasks.len()).rev() {
            if self.tasks[i].is_complete() {
                self.detach_at(i, ctx);
                removed = true;
            }
        }
        if removed {
            self.reorder(ctx.sources, ctx.roster);
        }
    }

    // === SELECTION ===

    /// Select for `actor`, filtered by its capable skills (none = any task)
    pub fn select_earliest_task(
        &mut self,
        actor: ActorId,
        ctx: &mut TaskContext<'_>,
    ) -> Option<TaskId> {
        let skills = match ctx.roster.get(actor) {
            Some(a) => a.capable_skills.clone(),
            None => {
                tracing::warn!(target: "task", "SelectEarliestTask called but actor {:?} is missing", actor);
                return None;
            }
        };

        let filter = if skills.is_empty() { None } else { Some(skills.as_slice()) };
        self.select_earliest_task_filtered(actor, filter, ctx)
    }

    /// Assign the first qualifying task in proximity order to `actor`
    ///
    /// A task qualifies when it is incomplete, not claimed by another actor
    /// and (with a non-empty filter) trains one of the allowed skills. The
    /// task is started on its first selection or, when it resets on
    /// interrupt, on every selection; otherwise it resumes.
    pub fn select_earliest_task_filtered(
        &mut self,
        actor: ActorId,
        filter: Option<&[Skill]>,
        ctx: &mut TaskContext<'_>,
    ) -> Option<TaskId> {
        if ctx.roster.get(actor).is_none() {
            tracing::warn!(target: "task", "SelectEarliestTask called but actor {:?} is missing", actor);
            return None;
        }

        self.remove_completed_tasks(ctx);

        let found = self.tasks.iter().position(|t| {
            !t.is_complete() && t.is_claimable_by(actor) && skill_allowed(t.skill(), filter)
        });

        let Some(index) = found else {
            if self.selection != Selection::AllComplete {
                tracing::info!(target: "task", "All tasks complete");
            }
            self.current_task_name = ALL_COMPLETE.to_string();
            self.selection = Selection::AllComplete;
            self.current_source = None;
            return None;
        };

        let id = self.tasks[index].id();
        let previous = ctx.roster.get(actor).and_then(|a| a.current_task());
        if let Some(prev) = previous.filter(|p| *p != id) {
            if let Some(task) = self.task_mut(prev) {
                if task.claimed_by() == Some(actor) {
                    task.clear_claim();
                }
            }
        }

        self.selection = Selection::Assigned(index);
        self.current_source = Some(self.task_map.get(&id).copied().unwrap_or(self.tasks[index].source()));

        let started = self.start_times.contains_key(&id);
        let now = self.clock.now();
        let task = &mut self.tasks[index];
        self.current_task_name = task.name().to_string();
        task.claim(actor);
        if let Some(a) = ctx.roster.get_mut(actor) {
            a.set_task(Some(id));
        }

        if !started || task.resets_on_interrupt() {
            let verb = if started { "Restarting" } else { "Starting" };
            tracing::info!(target: "task", "{} task: {}", verb, self.current_task_name);
            task.start_task();
            self.start_times.insert(id, now);
        } else {
            tracing::info!(target: "task", "Resuming task: {}", self.current_task_name);
        }

        Some(id)
    }

    /// Drop `actor`'s assignment and release its claim
    fn unassign(&mut self, actor: ActorId, roster: &mut Roster) {
        let Some(a) = roster.get_mut(actor) else {
            return;
        };
        if let Some(id) = a.current_task() {
            a.set_task(None);
            if let Some(task) = self.tasks.iter_mut().find(|t| t.id() == id) {
                if task.claimed_by() == Some(actor) {
                    task.clear_claim();
                }
            }
        }
    }

    // === REMOVAL ===

    /// Remove a task by identity. Returns false when it is not in the set.
    pub fn remove_task(&mut self, id: TaskId, ctx: &mut TaskContext<'_>) -> bool {
        match self.index_of(id) {
            Some(index) => self.remove_task_at(index, ctx),
            None => false,
        }
    }

    /// Remove the task at `index` of the ordered set
    pub fn remove_task_at(&mut self, index: usize, ctx: &mut TaskContext<'_>) -> bool {
        if self.detach_at(index, ctx).is_none() {
            return false;
        }
        self.reorder(ctx.sources, ctx.roster);
        true
    }

    /// Take a task out of the set without reordering
    ///
    /// Clears its claim and any actor assignment, unregisters its source and
    /// reports completed tasks with the time since their last (re)start.
    fn detach_at(&mut self, index: usize, ctx: &mut TaskContext<'_>) -> Option<Task> {
        if index >= self.tasks.len() {
            return None;
        }

        let mut task = self.tasks.remove(index);
        let id = task.id();
        task.clear_claim();

        for actor in ctx.roster.iter_mut() {
            if actor.current_task() == Some(id) {
                actor.set_task(None);
            }
        }

        let duration = self
            .start_times
            .remove(&id)
            .map(|start| self.clock.since(start))
            .unwrap_or(0.0);

        if let Some(source) = self.task_map.remove(&id) {
            self.task_objects.retain(|s| *s != source);
        }
        self.consume_source(&task, ctx.sources);

        if task.is_complete() {
            tracing::debug!(
                target: "task",
                "Completed {} in {:.2}s (+{} xp)",
                task.name(),
                duration,
                task.last_granted_xp()
            );
            ctx.stats.report_task_complete(task.data(), duration, task.last_granted_xp());
        }

        if self.selection == Selection::Assigned(index) {
            self.current_source = None;
            self.current_task_name.clear();
        }
        self.selection = self.selection.shift_for_removal(index);
        Some(task)
    }

    /// A removed task takes its capability with it: enemies leave the
    /// course, gathering sources stay behind as scenery.
    fn consume_source(&self, task: &Task, sources: &mut SourceRegistry) {
        if task.kind().is_combat() {
            sources.despawn(task.source());
        } else if let Some(source) = sources.get_mut(task.source()) {
            source.kind = SourceKind::Scenery;
        }
    }

    // === QUERIES ===

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn index_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id() == id)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// Mutable access for task execution (work, strikes)
    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id() == id)
    }

    pub fn source_of(&self, id: TaskId) -> Option<SourceId> {
        self.task_map.get(&id).copied()
    }

    pub fn task_objects(&self) -> &[SourceId] {
        &self.task_objects
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Cursor as an index: the task count when all tasks are complete
    pub fn cursor_index(&self) -> Option<usize> {
        match self.selection {
            Selection::Idle => None,
            Selection::Assigned(i) => Some(i),
            Selection::AllComplete => Some(self.tasks.len()),
        }
    }

    pub fn current_task(&self) -> Option<&Task> {
        match self.selection {
            Selection::Assigned(i) => self.tasks.get(i),
            _ => None,
        }
    }

    pub fn current_task_name(&self) -> &str {
        &self.current_task_name
    }

    pub fn current_source(&self) -> Option<SourceId> {
        self.current_source
    }

    pub fn hero(&self) -> Option<ActorId> {
        self.hero
    }

    pub fn set_hero(&mut self, hero: Option<ActorId>) {
        self.hero = hero;
    }

    pub fn now(&self) -> f32 {
        self.clock.now()
    }

    /// Game time of the task's most recent (re)start
    pub fn started_at(&self, id: TaskId) -> Option<f32> {
        self.start_times.get(&id).copied()
    }

    pub fn rule(&self) -> BacktrackRule {
        self.rule
    }
}

fn skill_allowed(skill: Option<Skill>, filter: Option<&[Skill]>) -> bool {
    match filter {
        Some(allowed) if !allowed.is_empty() => skill.map_or(false, |s| allowed.contains(&s)),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::RunStats;
    use crate::tasks::data::TaskData;

    struct Fixture {
        sources: SourceRegistry,
        roster: Roster,
        stats: RunStats,
        hero: ActorId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut roster = Roster::new();
            let hero = roster.spawn("Hero", Vec2::default());
            Self {
                sources: SourceRegistry::new(),
                roster,
                stats: RunStats::new(),
                hero,
            }
        }

        fn ctx(&mut self) -> TaskContext<'_> {
            TaskContext::new(&mut self.sources, &mut self.roster, &mut self.stats)
        }

        fn tree(&mut self, x: f32) -> SourceId {
            let data = TaskData::new("cut_tree", "Cut Tree", Some(Skill::Woodcutting)).with_xp(5.0);
            self.sources.spawn(SourceKind::Tree, Some(Vec2::new(x, 0.0)), Some(data))
        }
    }

    fn controller_with(fx: &mut Fixture, sources: &[SourceId]) -> TaskController {
        let mut controller = TaskController::default();
        for s in sources {
            controller.add_task_object(*s);
        }
        controller.activate(&mut fx.ctx());
        controller
    }

    #[test]
    fn test_selection_shift() {
        assert_eq!(Selection::Assigned(3).shift_for_removal(1), Selection::Assigned(2));
        assert_eq!(Selection::Assigned(3).shift_for_removal(3), Selection::Assigned(2));
        assert_eq!(Selection::Assigned(3).shift_for_removal(4), Selection::Assigned(3));
        assert_eq!(Selection::Assigned(0).shift_for_removal(0), Selection::Idle);
        assert_eq!(Selection::AllComplete.shift_for_removal(0), Selection::AllComplete);
    }

    #[test]
    fn test_activate_orders_and_selects_nearest() {
        let mut fx = Fixture::new();
        let far = fx.tree(8.0);
        let near = fx.tree(2.0);
        let controller = controller_with(&mut fx, &[far, near]);

        let ids: Vec<TaskId> = controller.tasks().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![TaskId::for_source(near), TaskId::for_source(far)]);
        assert_eq!(controller.task_objects(), &[near, far]);
        assert_eq!(controller.selection(), Selection::Assigned(0));
        assert_eq!(controller.current_source(), Some(near));
        assert_eq!(controller.current_task_name(), "Cut Tree");
        assert_eq!(
            fx.roster.get(fx.hero).unwrap().current_task(),
            Some(TaskId::for_source(near))
        );
    }

    #[test]
    fn test_duplicate_registration_ignored() {
        let mut fx = Fixture::new();
        let tree = fx.tree(1.0);
        let mut controller = TaskController::default();
        assert!(controller.add_task_object(tree));
        assert!(!controller.add_task_object(tree));
        controller.activate(&mut fx.ctx());
        assert_eq!(controller.len(), 1);

        assert_eq!(controller.add_runtime_task_object(tree, &mut fx.ctx()), None);
        assert_eq!(controller.len(), 1);
    }

    #[test]
    fn test_scenery_and_missing_sources_skipped() {
        let mut fx = Fixture::new();
        let rock = fx.sources.spawn(SourceKind::Scenery, Some(Vec2::new(1.0, 0.0)), None);
        let tree = fx.tree(3.0);
        let gone = fx.tree(4.0);
        fx.sources.despawn(gone);

        let controller = controller_with(&mut fx, &[rock, gone, tree]);
        assert_eq!(controller.len(), 1);
        assert_eq!(controller.tasks()[0].source(), tree);
    }

    #[test]
    fn test_runtime_task_does_not_reselect() {
        let mut fx = Fixture::new();
        let far = fx.tree(9.0);
        let mut controller = controller_with(&mut fx, &[far]);

        let near = fx.tree(1.0);
        let id = controller.add_runtime_task_object(near, &mut fx.ctx()).unwrap();

        assert_eq!(controller.tasks()[0].id(), id);
        // Still working the far tree, now at index 1
        assert_eq!(controller.selection(), Selection::Assigned(1));
        assert_eq!(
            fx.roster.get(fx.hero).unwrap().current_task(),
            Some(TaskId::for_source(far))
        );
    }

    #[test]
    fn test_missing_actor_is_a_noop() {
        let mut fx = Fixture::new();
        let tree = fx.tree(1.0);
        let mut controller = controller_with(&mut fx, &[tree]);

        assert_eq!(controller.select_earliest_task(ActorId(42), &mut fx.ctx()), None);
        assert_eq!(controller.selection(), Selection::Assigned(0));
    }

    #[test]
    fn test_no_hero_leaves_tasks_unassigned() {
        let mut sources = SourceRegistry::new();
        let mut roster = Roster::new();
        let mut stats = RunStats::new();
        let tree = sources.spawn(SourceKind::Tree, Some(Vec2::new(1.0, 0.0)), None);

        let mut controller = TaskController::default();
        controller.add_task_object(tree);
        controller.activate(&mut TaskContext::new(&mut sources, &mut roster, &mut stats));

        assert_eq!(controller.hero(), None);
        assert_eq!(controller.len(), 1);
        assert_eq!(controller.selection(), Selection::Idle);
        assert!(controller.tasks()[0].claimed_by().is_none());
    }

    #[test]
    fn test_all_complete_sentinel() {
        let mut fx = Fixture::new();
        let tree = fx.tree(1.0);
        let mut controller = controller_with(&mut fx, &[tree]);

        controller.task_mut(TaskId::for_source(tree)).unwrap().work(10.0);
        controller.tick(0.1, &mut fx.ctx());

        assert!(controller.is_empty());
        assert_eq!(controller.selection(), Selection::AllComplete);
        assert_eq!(controller.cursor_index(), Some(0));
        assert_eq!(controller.current_task_name(), ALL_COMPLETE);
        assert!(fx.roster.get(fx.hero).unwrap().is_idle());
        assert_eq!(fx.stats.record("cut_tree").unwrap().total_times_completed, 1);
    }

    #[test]
    fn test_removed_gathering_source_becomes_scenery() {
        let mut fx = Fixture::new();
        let tree = fx.tree(1.0);
        let mut controller = controller_with(&mut fx, &[tree]);

        assert!(controller.remove_task(TaskId::for_source(tree), &mut fx.ctx()));
        assert_eq!(fx.sources.get(tree).unwrap().kind, SourceKind::Scenery);
        assert!(controller.task_objects().is_empty());
        // Incomplete removal is not a completion
        assert_eq!(fx.stats.tasks_completed, 0);
        assert!(!controller.remove_task(TaskId::for_source(tree), &mut fx.ctx()));
    }

    #[test]
    fn test_reset_keeps_progress_of_live_tasks() {
        let mut fx = Fixture::new();
        let tree = fx.tree(1.0);
        let mut controller = controller_with(&mut fx, &[tree]);
        let id = TaskId::for_source(tree);

        controller.task_mut(id).unwrap().work(0.5);
        controller.reset_tasks(&mut fx.ctx());

        let task = controller.task(id).unwrap();
        assert!((task.progress() - 0.5).abs() < 1e-6);
        // Resumed, not restarted
        assert_eq!(task.starts(), 1);
    }

    #[test]
    fn test_reset_restores_enemy_health() {
        let mut fx = Fixture::new();
        let enemy = fx.sources.spawn_enemy(Vec2::new(2.0, 0.0), 20.0, None);
        let mut controller = controller_with(&mut fx, &[enemy]);

        fx.sources.damage(enemy, 5.0);
        controller.reset_tasks(&mut fx.ctx());
        assert_eq!(fx.sources.health(enemy).unwrap().current, 20.0);
        assert_eq!(controller.task(TaskId::for_source(enemy)).unwrap().progress(), 0.0);
    }

    #[test]
    fn test_remove_task_object() {
        let mut fx = Fixture::new();
        let a = fx.tree(1.0);
        let b = fx.tree(2.0);
        let mut controller = controller_with(&mut fx, &[a, b]);

        controller.remove_task_object(a, &mut fx.ctx());
        assert_eq!(controller.len(), 1);
        assert_eq!(controller.task_objects(), &[b]);
        assert!(fx.roster.get(fx.hero).unwrap().is_idle());
    }

    #[test]
    fn test_pending_registrations_survive_reorder() {
        let mut fx = Fixture::new();
        let a = fx.tree(1.0);
        let pending = fx.tree(5.0);
        let mut controller = controller_with(&mut fx, &[a]);

        controller.add_task_object(pending);
        let c = fx.tree(3.0);
        controller.add_runtime_task_object(c, &mut fx.ctx());
        assert_eq!(controller.task_objects(), &[a, c, pending]);
        assert_eq!(controller.len(), 2);

        controller.reset_tasks(&mut fx.ctx());
        assert_eq!(controller.len(), 3);
    }
}
