use crate::error::{HistogramError, HistogramResult};

/// Stable reference to a node stored in a [`NodeArena`].
///
/// A handle outlives its node only as a stale value: once the slot is removed
/// the generation changes and lookups with the old handle return `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    index: u32,
    generation: u32,
}

impl NodeHandle {
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot<N> {
    generation: u32,
    node: Option<N>,
}

/// Generational slot storage for scene nodes.
///
/// Slot indices are `u32`, so an arena holds at most `u32::MAX` slots.
#[derive(Debug)]
pub struct NodeArena<N> {
    slots: Vec<Slot<N>>,
    free: Vec<u32>,
    len: usize,
    slot_limit: usize,
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self::with_slot_limit(u32::MAX as usize)
    }
}

impl<N> NodeArena<N> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arena that refuses to grow past `limit` slots (capped at `u32::MAX`).
    #[must_use]
    pub fn with_slot_limit(limit: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
            slot_limit: limit.min(u32::MAX as usize),
        }
    }

    /// Number of nodes that can still be inserted.
    #[must_use]
    pub fn remaining_capacity(&self) -> usize {
        self.free.len() + self.slot_limit.saturating_sub(self.slots.len())
    }

    pub fn insert(&mut self, node: N) -> HistogramResult<NodeHandle> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            self.len += 1;
            return Ok(NodeHandle {
                index,
                generation: slot.generation,
            });
        }

        let index = u32::try_from(self.slots.len())
            .ok()
            .filter(|index| (*index as usize) < self.slot_limit)
            .ok_or_else(|| {
                HistogramError::InvalidData(format!(
                    "node arena is full ({} slots)",
                    self.slot_limit
                ))
            })?;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        self.len += 1;
        Ok(NodeHandle {
            index,
            generation: 0,
        })
    }

    /// Detaches and returns the node. Stale handles return `None`.
    pub fn remove(&mut self, handle: NodeHandle) -> Option<N> {
        let slot = self.slots.get_mut(handle.index())?;
        if slot.generation != handle.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(node)
    }

    #[must_use]
    pub fn get(&self, handle: NodeHandle) -> Option<&N> {
        self.slots
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut N> {
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    #[must_use]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.get(handle).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
