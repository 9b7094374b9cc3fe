use std::hash::Hash;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::BinDomain;
use crate::error::{HistogramError, HistogramResult};
use crate::scene::{NodeArena, NodeHandle};

/// Join key used by histogram selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKey {
    Position(usize),
    Domain(OrderedFloat<f64>, OrderedFloat<f64>),
}

impl JoinKey {
    #[must_use]
    pub fn from_domain(domain: BinDomain) -> Self {
        Self::Domain(OrderedFloat(domain.min), OrderedFloat(domain.max))
    }
}

/// Where one datum of a planned join ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinSlot<K> {
    /// No live node matched; one will be created.
    Enter { key: K },
    /// Matched a live node that is kept and updated in place.
    Update { key: K, handle: NodeHandle },
}

impl<K> JoinSlot<K> {
    #[must_use]
    pub fn key(&self) -> &K {
        match self {
            Self::Enter { key } | Self::Update { key, .. } => key,
        }
    }
}

/// Enter/update/exit sets computed against a selection's live nodes.
///
/// `slots` follows the new data order; `exit` lists live nodes with no match.
/// A plan is only valid for the selection state it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPlan<K> {
    slots: Vec<JoinSlot<K>>,
    exit: Vec<NodeHandle>,
    epoch: u64,
}

impl<K> SelectionPlan<K> {
    #[must_use]
    pub fn slots(&self) -> &[JoinSlot<K>] {
        &self.slots
    }

    #[must_use]
    pub fn exit(&self) -> &[NodeHandle] {
        &self.exit
    }

    /// Data indices that need a new node, ascending.
    #[must_use]
    pub fn enter_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| matches!(slot, JoinSlot::Enter { .. }))
            .map(|(index, _)| index)
            .collect()
    }

    /// Data indices matched to an existing node, ascending.
    #[must_use]
    pub fn update_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| matches!(slot, JoinSlot::Update { .. }))
            .map(|(index, _)| index)
            .collect()
    }

    /// `true` when applying the plan creates and destroys nothing.
    #[must_use]
    pub fn is_pure_update(&self) -> bool {
        self.exit.is_empty()
            && self
                .slots
                .iter()
                .all(|slot| matches!(slot, JoinSlot::Update { .. }))
    }
}

/// Counts of one applied join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JoinSummary {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

impl JoinSummary {
    #[must_use]
    pub const fn is_pure_update(self) -> bool {
        self.entered == 0 && self.exited == 0
    }
}

#[derive(Debug, Clone)]
struct LiveNode<K> {
    key: K,
    handle: NodeHandle,
}

/// Keyed data join over a set of live scene nodes.
///
/// The selection owns its nodes in an arena and remembers, in data order, the
/// key each node was last joined under. A join diffs new data against that
/// memory: matched nodes are kept, unmatched data creates nodes, unmatched
/// nodes are destroyed. Positional joins use the data index as key.
#[derive(Debug)]
pub struct Selection<N, K = usize> {
    arena: NodeArena<N>,
    live: Vec<LiveNode<K>>,
    // Bumped by every change to `live`; plans from older epochs are rejected.
    epoch: u64,
}

impl<N, K> Default for Selection<N, K> {
    fn default() -> Self {
        Self {
            arena: NodeArena::new(),
            live: Vec::new(),
            epoch: 0,
        }
    }
}

/// Key function for positional joins.
#[must_use]
pub fn positional_key<D>(index: usize, _datum: &D) -> usize {
    index
}

impl<N, K> Selection<N, K>
where
    K: Eq + Hash + Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Computes the join of `data` against the live nodes without mutating.
    ///
    /// With duplicate keys the n-th datum for a key matches the n-th live node
    /// that had it; surplus data enters and surplus nodes exit.
    pub fn plan<D>(&self, data: &[D], mut key_of: impl FnMut(usize, &D) -> K) -> SelectionPlan<K> {
        let mut previous: IndexMap<K, SmallVec<[NodeHandle; 1]>> =
            IndexMap::with_capacity(self.live.len());
        for live in &self.live {
            previous
                .entry(live.key.clone())
                .or_default()
                .push(live.handle);
        }

        let slots = data
            .iter()
            .enumerate()
            .map(|(index, datum)| {
                let key = key_of(index, datum);
                let matched = previous
                    .get_mut(&key)
                    .filter(|handles| !handles.is_empty())
                    .map(|handles| handles.remove(0));
                match matched {
                    Some(handle) => JoinSlot::Update { key, handle },
                    None => JoinSlot::Enter { key },
                }
            })
            .collect();
        let exit = previous.into_values().flatten().collect();

        SelectionPlan {
            slots,
            exit,
            epoch: self.epoch,
        }
    }

    /// Applies a plan made by [`Selection::plan`] on this selection's current state.
    ///
    /// A plan computed before another `apply` or `clear` is rejected, so every
    /// previously live node is either updated or exited.
    ///
    /// Exiting nodes are detached and handed to `destroy` before anything is
    /// created. Entering nodes are created in data order. Afterwards the live
    /// set is exactly the entered plus updated nodes, in data order.
    pub fn apply<D>(
        &mut self,
        plan: SelectionPlan<K>,
        data: &[D],
        mut create: impl FnMut(&D, usize) -> N,
        mut destroy: impl FnMut(N),
    ) -> HistogramResult<JoinSummary> {
        if plan.slots.len() != data.len() {
            return Err(HistogramError::InvalidData(format!(
                "selection plan covers {} items but {} were supplied",
                plan.slots.len(),
                data.len()
            )));
        }
        if plan.epoch != self.epoch {
            return Err(HistogramError::InvalidData(format!(
                "stale selection plan: computed at epoch {} but the selection is at {}",
                plan.epoch, self.epoch
            )));
        }

        let entering = plan
            .slots
            .iter()
            .filter(|slot| matches!(slot, JoinSlot::Enter { .. }))
            .count();
        if entering > self.arena.remaining_capacity() + plan.exit.len() {
            return Err(HistogramError::InvalidData(format!(
                "selection cannot create {entering} nodes: arena capacity exhausted"
            )));
        }

        let mut summary = JoinSummary::default();
        for handle in plan.exit {
            if let Some(node) = self.arena.remove(handle) {
                destroy(node);
                summary.exited += 1;
            }
        }

        let mut live = Vec::with_capacity(plan.slots.len());
        for (index, (slot, datum)) in plan.slots.into_iter().zip(data).enumerate() {
            match slot {
                JoinSlot::Enter { key } => {
                    let handle = self.arena.insert(create(datum, index))?;
                    summary.entered += 1;
                    live.push(LiveNode { key, handle });
                }
                JoinSlot::Update { key, handle } => {
                    summary.updated += 1;
                    live.push(LiveNode { key, handle });
                }
            }
        }
        self.live = live;
        self.epoch += 1;

        trace!(
            entered = summary.entered,
            updated = summary.updated,
            exited = summary.exited,
            "applied selection join"
        );
        Ok(summary)
    }

    /// Plans and applies a join in one step.
    pub fn join<D>(
        &mut self,
        data: &[D],
        key_of: impl FnMut(usize, &D) -> K,
        create: impl FnMut(&D, usize) -> N,
        destroy: impl FnMut(N),
    ) -> HistogramResult<JoinSummary> {
        let plan = self.plan(data, key_of);
        self.apply(plan, data, create, destroy)
    }

    /// Invokes `update` once per live node with its datum and index.
    ///
    /// Live nodes and `data` are paired by position, which after a join is the
    /// data order the join was made with.
    pub fn each<D>(&mut self, data: &[D], mut update: impl FnMut(&mut N, &D, usize)) {
        for (index, (live, datum)) in self.live.iter().zip(data).enumerate() {
            if let Some(node) = self.arena.get_mut(live.handle) {
                update(node, datum, index);
            }
        }
    }

    /// Live nodes in data order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.live
            .iter()
            .filter_map(|live| self.arena.get(live.handle))
    }

    #[must_use]
    pub fn node(&self, index: usize) -> Option<&N> {
        self.live
            .get(index)
            .and_then(|live| self.arena.get(live.handle))
    }

    /// Keys of the live nodes in data order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.live.iter().map(|live| &live.key)
    }

    #[must_use]
    pub fn handles(&self) -> Vec<NodeHandle> {
        self.live.iter().map(|live| live.handle).collect()
    }

    /// Destroys every live node.
    pub fn clear(&mut self, mut destroy: impl FnMut(N)) -> usize {
        self.epoch += 1;
        let mut removed = 0;
        for live in self.live.drain(..) {
            if let Some(node) = self.arena.remove(live.handle) {
                destroy(node);
                removed += 1;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::{JoinKey, JoinSlot, Selection, positional_key};
    use crate::core::BinDomain;

    #[test]
    fn duplicate_keys_match_in_order_and_surplus_exits() {
        let mut selection: Selection<&str, char> = Selection::new();
        selection
            .join(&['a', 'a', 'b'], |_, d| *d, |d, _| if *d == 'a' { "a" } else { "b" }, drop)
            .expect("join");

        let plan = selection.plan(&['a'], |_, d| *d);
        assert!(matches!(plan.slots()[0], JoinSlot::Update { key: 'a', .. }));
        assert_eq!(plan.exit().len(), 2);
    }

    #[test]
    fn positional_join_reuses_nodes_by_index() {
        let mut selection: Selection<String> = Selection::new();
        selection
            .join(&["x", "y"], positional_key, |d, _| (*d).to_owned(), drop)
            .expect("join");

        let plan = selection.plan(&["p", "q", "r"], positional_key);
        assert_eq!(plan.update_indices(), vec![0, 1]);
        assert_eq!(plan.enter_indices(), vec![2]);
        assert!(plan.exit().is_empty());
    }

    #[test]
    fn applying_a_plan_twice_is_rejected() {
        let mut selection: Selection<u8> = Selection::new();
        selection.join(&[1u8], positional_key, |d, _| *d, drop).expect("join");

        let plan = selection.plan(&[2u8], |_, d| usize::from(*d));
        let stale_copy = plan.clone();
        selection.apply(plan, &[2u8], |d, _| *d, drop).expect("apply");
        let err = selection
            .apply(stale_copy, &[2u8], |d, _| *d, drop)
            .expect_err("stale plan");
        assert!(format!("{err}").contains("stale selection plan"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn enter_only_plan_from_before_a_join_is_rejected() {
        let mut selection: Selection<u8> = Selection::new();
        let early_plan = selection.plan(&[1u8], positional_key);
        selection
            .join(&[1u8, 2u8], positional_key, |d, _| *d, drop)
            .expect("join");

        let mut destroyed = 0;
        let result = selection.apply(early_plan, &[1u8], |d, _| *d, |_| destroyed += 1);

        assert!(result.is_err());
        assert_eq!(selection.len(), 2);
        assert_eq!(destroyed, 0);
        assert_eq!(selection.nodes().copied().collect::<Vec<_>>(), vec![1, 2]);

        let summary = selection
            .join(&[1u8], positional_key, |d, _| *d, |_| destroyed += 1)
            .expect("fresh join");
        assert_eq!(summary.exited, 1);
        assert_eq!(destroyed, 1);
    }

    #[test]
    fn clear_invalidates_outstanding_plans() {
        let mut selection: Selection<u8> = Selection::new();
        selection.join(&[1u8], positional_key, |d, _| *d, drop).expect("join");
        let plan = selection.plan(&[1u8], positional_key);

        assert_eq!(selection.clear(drop), 1);
        assert!(selection.apply(plan, &[1u8], |d, _| *d, drop).is_err());
        assert!(selection.is_empty());
    }

    #[test]
    fn domain_keys_survive_reordering() {
        let domains = [BinDomain::new(0.0, 5.0), BinDomain::new(5.0, 10.0)];
        let mut selection: Selection<f64, JoinKey> = Selection::new();
        selection
            .join(&domains, |_, d| JoinKey::from_domain(*d), |d, _| d.min, drop)
            .expect("join");

        let reordered = [domains[1], domains[0]];
        let plan = selection.plan(&reordered, |_, d| JoinKey::from_domain(*d));
        assert!(plan.is_pure_update());
    }
}
