//! Deterministic map construction from data-parallel loops.
//!
//! Workers never touch the target map. Each worker appends `(key, value)`
//! pairs to its own slot and a single [`MapBuilder::finalize_into`] pass
//! merges the slots in worker order. The result equals a sequential build
//! provided worker `i` handled a contiguous block of the logical index range
//! that precedes worker `i + 1`'s block. Inserts made through
//! [`MapBuilder::insert_indexed`] record each worker's span so that this
//! precondition is checked at finalization.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::ops::Range;
use std::sync::Mutex;

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::error::{Error, Result};

/// Conflict policy for repeated keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertionMode {
    /// Keep the first value seen for a key (emplace).
    FirstWins,
    /// Keep the last value seen for a key (insert or assign).
    #[default]
    LastWins,
}

/// A map that can absorb builder output.
pub trait MergeTarget<K, V> {
    /// Inserts one entry under `mode`.
    fn merge_entry(&mut self, key: K, value: V, mode: InsertionMode);
}

impl<K: Eq + Hash, V, S: BuildHasher> MergeTarget<K, V> for HashMap<K, V, S> {
    fn merge_entry(&mut self, key: K, value: V, mode: InsertionMode) {
        match mode {
            InsertionMode::FirstWins => {
                self.entry(key).or_insert(value);
            }
            InsertionMode::LastWins => {
                self.insert(key, value);
            }
        }
    }
}

impl<K: Ord, V> MergeTarget<K, V> for BTreeMap<K, V> {
    fn merge_entry(&mut self, key: K, value: V, mode: InsertionMode) {
        match mode {
            InsertionMode::FirstWins => {
                self.entry(key).or_insert(value);
            }
            InsertionMode::LastWins => {
                self.insert(key, value);
            }
        }
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> MergeTarget<K, V> for IndexMap<K, V, S> {
    fn merge_entry(&mut self, key: K, value: V, mode: InsertionMode) {
        match mode {
            InsertionMode::FirstWins => {
                self.entry(key).or_insert(value);
            }
            InsertionMode::LastWins => {
                self.insert(key, value);
            }
        }
    }
}

#[derive(Debug)]
struct WorkerSlot<K, V> {
    entries: Vec<(K, V)>,
    span: Option<(usize, usize)>,
}

impl<K, V> Default for WorkerSlot<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            span: None,
        }
    }
}

/// Per-worker accumulation of map entries.
#[derive(Debug)]
pub struct MapBuilder<K, V> {
    slots: Vec<Mutex<WorkerSlot<K, V>>>,
    mode: InsertionMode,
}

impl<K, V> MapBuilder<K, V> {
    /// Creates a builder with `num_workers` slots (at least one).
    #[must_use]
    pub fn new(num_workers: usize, mode: InsertionMode) -> Self {
        let slots = (0..num_workers.max(1))
            .map(|_| Mutex::new(WorkerSlot::default()))
            .collect();
        Self { slots, mode }
    }

    /// Number of worker slots.
    #[must_use]
    pub fn num_workers(&self) -> usize {
        self.slots.len()
    }

    /// Conflict policy.
    #[must_use]
    pub fn mode(&self) -> InsertionMode {
        self.mode
    }

    /// Appends an entry to `worker`'s slot without recording its index.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for an unknown worker.
    pub fn insert(&self, worker: usize, key: K, value: V) -> Result<()> {
        let slot = self.slot(worker)?;
        let mut slot = slot
            .lock()
            .map_err(|_| Error::internal(format!("map builder slot {worker} poisoned")))?;
        slot.entries.push((key, value));
        Ok(())
    }

    /// Appends an entry produced at logical loop index `index`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for an unknown worker and `PartitionViolation`
    /// when `index` precedes an index this worker already reported.
    pub fn insert_indexed(&self, worker: usize, index: usize, key: K, value: V) -> Result<()> {
        let slot = self.slot(worker)?;
        let mut slot = slot
            .lock()
            .map_err(|_| Error::internal(format!("map builder slot {worker} poisoned")))?;
        slot.span = match slot.span {
            None => Some((index, index)),
            Some((first, last)) if index >= last => Some((first, index)),
            Some((_, last)) => {
                return Err(Error::partition_violation(format!(
                    "worker {worker} reported index {index} after {last}"
                )));
            }
        };
        slot.entries.push((key, value));
        Ok(())
    }

    fn slot(&self, worker: usize) -> Result<&Mutex<WorkerSlot<K, V>>> {
        self.slots.get(worker).ok_or_else(|| {
            Error::out_of_range(format!(
                "worker {worker} requested, builder has {} slots",
                self.slots.len()
            ))
        })
    }

    /// Merges every slot into `target`, worker 0 first.
    ///
    /// # Errors
    ///
    /// Returns `PartitionViolation` if recorded spans overlap or are out of
    /// worker order.
    pub fn finalize_into<M: MergeTarget<K, V>>(self, target: &mut M) -> Result<()> {
        let mode = self.mode;
        let mut slots = Vec::with_capacity(self.slots.len());
        for (worker, slot) in self.slots.into_iter().enumerate() {
            let slot = slot
                .into_inner()
                .map_err(|_| Error::internal(format!("map builder slot {worker} poisoned")))?;
            slots.push(slot);
        }

        let mut previous: Option<(usize, usize)> = None;
        for (worker, slot) in slots.iter().enumerate() {
            let Some((first, last)) = slot.span else {
                continue;
            };
            if let Some((prev_worker, prev_last)) = previous {
                if first <= prev_last {
                    return Err(Error::partition_violation(format!(
                        "worker {worker} starts at index {first}, \
                         worker {prev_worker} already reached {prev_last}"
                    )));
                }
            }
            previous = Some((worker, last));
        }

        for slot in slots {
            for (key, value) in slot.entries {
                target.merge_entry(key, value, mode);
            }
        }
        Ok(())
    }

    /// Merges into a fresh map.
    ///
    /// # Errors
    ///
    /// See [`finalize_into`](Self::finalize_into).
    pub fn finalize<M: MergeTarget<K, V> + Default>(self) -> Result<M> {
        let mut target = M::default();
        self.finalize_into(&mut target)?;
        Ok(target)
    }
}

impl<K: Send, V: Send> MapBuilder<K, V> {
    /// Runs `f` over `range` on the rayon pool and builds the map.
    ///
    /// The range is cut into `num_workers` contiguous blocks, block `i` going
    /// to worker `i`, so the result is identical to a sequential loop.
    ///
    /// # Errors
    ///
    /// Propagates builder errors.
    pub fn build_parallel<M, F>(
        range: Range<usize>,
        num_workers: usize,
        mode: InsertionMode,
        f: F,
    ) -> Result<M>
    where
        M: MergeTarget<K, V> + Default,
        F: Fn(usize) -> Option<(K, V)> + Sync,
    {
        let builder = Self::new(num_workers, mode);
        let blocks = partition(range, builder.num_workers());
        blocks
            .into_par_iter()
            .enumerate()
            .try_for_each(|(worker, block)| {
                for index in block {
                    if let Some((key, value)) = f(index) {
                        builder.insert_indexed(worker, index, key, value)?;
                    }
                }
                Ok::<(), Error>(())
            })?;
        builder.finalize()
    }
}

/// Splits `range` into `parts` contiguous, ordered, near-equal blocks.
#[must_use]
pub fn partition(range: Range<usize>, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.max(1);
    let len = range.len();
    let base = len / parts;
    let extra = len % parts;
    let mut start = range.start;
    (0..parts)
        .map(|i| {
            let size = base + usize::from(i < extra);
            let block = start..start + size;
            start += size;
            block
        })
        .collect()
}
