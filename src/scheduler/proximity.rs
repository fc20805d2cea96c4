//! Proximity ordering of tasks
//!
//! A greedy nearest-neighbour tour starting at the actor: repeatedly take the
//! closest remaining task (by adjusted distance) and move the anchor to it.
//! This is not a shortest path; it is a cheap left-to-right biased walk that
//! tolerates a little backtracking.

use crate::core::config::SchedulerConfig;
use crate::core::types::Vec2;
use ordered_float::OrderedFloat;

/// Backtracking bias and cutoff along the x axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacktrackRule {
    /// Negative disables the cutoff
    pub max_backtrack_distance: f32,
    /// Only positive weights give a bonus
    pub weight: f32,
}

impl Default for BacktrackRule {
    fn default() -> Self {
        Self::from(SchedulerConfig::default())
    }
}

impl From<SchedulerConfig> for BacktrackRule {
    fn from(config: SchedulerConfig) -> Self {
        Self {
            max_backtrack_distance: config.max_backtrack_distance,
            weight: config.backtrack_weight,
        }
    }
}

impl BacktrackRule {
    /// True when `pos` lies further behind `anchor` than the cutoff allows
    pub fn excludes(&self, anchor: Vec2, pos: Vec2) -> bool {
        self.max_backtrack_distance >= 0.0 && anchor.x - pos.x > self.max_backtrack_distance
    }

    /// Euclidean distance minus the backtracking bonus
    pub fn adjusted_distance(&self, anchor: Vec2, pos: Vec2) -> f32 {
        let behind = anchor.x - pos.x;
        let mut d = anchor.distance(&pos);
        if behind > 0.0 && self.weight > 0.0 {
            d -= behind * self.weight;
        }
        d
    }
}

/// Order `positions` for a greedy walk from `origin`.
///
/// Returns indices into `positions`. A `None` position has no spatial
/// preference: it is scored as sitting on the current anchor and does not
/// move the anchor once chosen. Ties go to the earlier index. When the
/// cutoff excludes every remaining position, the round is retried without
/// the cutoff so every position is eventually ordered.
pub fn order_by_proximity(origin: Vec2, positions: &[Option<Vec2>], rule: &BacktrackRule) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..positions.len()).collect();
    let mut order = Vec::with_capacity(positions.len());
    let mut anchor = origin;

    while !remaining.is_empty() {
        let slot = closest(anchor, &remaining, positions, rule, true)
            .or_else(|| closest(anchor, &remaining, positions, rule, false))
            .unwrap_or(0);

        let index = remaining.remove(slot);
        order.push(index);
        if let Some(pos) = positions[index] {
            anchor = pos;
        }
    }

    order
}

/// Slot in `remaining` of the best candidate for this round
fn closest(
    anchor: Vec2,
    remaining: &[usize],
    positions: &[Option<Vec2>],
    rule: &BacktrackRule,
    apply_cutoff: bool,
) -> Option<usize> {
    remaining
        .iter()
        .enumerate()
        .filter_map(|(slot, &index)| {
            let pos = positions[index].unwrap_or(anchor);
            if apply_cutoff && rule.excludes(anchor, pos) {
                return None;
            }
            Some((slot, OrderedFloat(rule.adjusted_distance(anchor, pos))))
        })
        .min_by_key(|&(_, d)| d)
        .map(|(slot, _)| slot)
}
