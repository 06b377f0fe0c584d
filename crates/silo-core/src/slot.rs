//! Fixed-capacity slot pool with stable ids.
//!
//! Mirrors the hardware's entity tables: allocation always takes the
//! lowest free index, ids stay stable for an entity's lifetime and are
//! reused once freed, and iteration is in ascending id order. That
//! ordering is load-bearing: collision sweeps and group-update
//! selection depend on it for determinism.

use std::fmt;

/// Allocation failed because every slot is occupied.
///
/// Expected and non-fatal: callers drop the spawn or fire command, as
/// the original hardware did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotExhausted;

impl fmt::Display for SlotExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "all slots occupied")
    }
}

impl std::error::Error for SlotExhausted {}

/// A fixed-capacity pool of `T` with stable integer slot ids.
#[derive(Debug, Clone)]
pub struct SlotPool<T> {
    slots: Vec<Option<T>>,
}

impl<T> SlotPool<T> {
    /// Create a pool with `capacity` slots, all free.
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Place `value` into the lowest free slot and return its id.
    pub fn insert(&mut self, value: T) -> Result<usize, SlotExhausted> {
        for (id, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(value);
                return Ok(id);
            }
        }
        Err(SlotExhausted)
    }

    /// Free slot `id`, returning its occupant if there was one.
    pub fn release(&mut self, id: usize) -> Option<T> {
        self.slots.get_mut(id).and_then(Option::take)
    }

    pub fn is_occupied(&self, id: usize) -> bool {
        matches!(self.slots.get(id), Some(Some(_)))
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn get(&self, id: usize) -> Option<&T> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut T> {
        self.slots.get_mut(id).and_then(Option::as_mut)
    }

    /// Occupied slots in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|v| (id, v)))
    }

    /// Occupied slots in ascending id order, mutable.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_mut().map(|v| (id, v)))
    }

    /// Free every slot.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }
}
