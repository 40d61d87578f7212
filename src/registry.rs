//! Explicit entity registries owned by the simulation.
//!
//! Constructors return plain values; the simulation inserts them here and
//! receives a handle back. Removal is two-phase: systems mark entries while
//! iterating and [`Registry::compact`] drops them afterwards, so no
//! collection is mutated under a live iterator.

use log::debug;

/// Handle types issued by a [`Registry`].
pub trait RegistryId: Copy + Eq + std::fmt::Debug {
    /// Wraps a raw sequence number.
    fn from_raw(raw: u64) -> Self;
}

#[derive(Debug, Clone)]
struct Entry<I, T> {
    id: I,
    value: T,
    doomed: bool,
}

/// Insertion-ordered collection with stable handles and deferred removal.
#[derive(Debug, Clone)]
pub struct Registry<I, T> {
    next: u64,
    entries: Vec<Entry<I, T>>,
}

impl<I, T> Default for Registry<I, T> {
    fn default() -> Self {
        Self {
            next: 0,
            entries: Vec::new(),
        }
    }
}

impl<I: RegistryId, T> Registry<I, T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` and returns its handle.
    pub fn insert(&mut self, value: T) -> I {
        let id = I::from_raw(self.next);
        self.next += 1;
        self.entries.push(Entry {
            id,
            value,
            doomed: false,
        });
        id
    }

    /// Number of entries, including ones marked for removal.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks an entry up by handle.
    #[must_use]
    pub fn get(&self, id: I) -> Option<&T> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.value)
    }

    /// Looks an entry up by handle for mutation.
    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.value)
    }

    /// Entries not marked for removal, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> + '_ {
        self.entries
            .iter()
            .filter(|entry| !entry.doomed)
            .map(|entry| (entry.id, &entry.value))
    }

    /// Mutable view of the entries not marked for removal.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (I, &mut T)> + '_ {
        self.entries
            .iter_mut()
            .filter(|entry| !entry.doomed)
            .map(|entry| (entry.id, &mut entry.value))
    }

    /// Marks `id` for removal at the next [`Registry::compact`].
    ///
    /// Returns `false` when the handle is unknown or already marked.
    pub fn mark(&mut self, id: I) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) if !entry.doomed => {
                entry.doomed = true;
                true
            }
            _ => false,
        }
    }

    /// Marks every live entry matching `predicate`.
    pub fn mark_where(&mut self, mut predicate: impl FnMut(I, &T) -> bool) {
        for entry in self.entries.iter_mut().filter(|entry| !entry.doomed) {
            if predicate(entry.id, &entry.value) {
                entry.doomed = true;
            }
        }
    }

    /// Drops every marked entry and returns their handles.
    pub fn compact(&mut self) -> Vec<I> {
        let removed: Vec<I> = self
            .entries
            .iter()
            .filter(|entry| entry.doomed)
            .map(|entry| entry.id)
            .collect();
        if !removed.is_empty() {
            debug!("compacting registry: removed {removed:?}");
        }
        self.entries.retain(|entry| !entry.doomed);
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Id(u64);

    impl RegistryId for Id {
        fn from_raw(raw: u64) -> Self {
            Self(raw)
        }
    }

    #[rstest]
    fn marked_entries_disappear_from_iteration_before_compaction() {
        let mut registry: Registry<Id, &str> = Registry::new();
        let a = registry.insert("a");
        let b = registry.insert("b");
        assert!(registry.mark(a));
        assert!(!registry.mark(a), "double marks are rejected");
        assert_eq!(registry.len(), 2);
        let live: Vec<Id> = registry.iter().map(|(id, _)| id).collect();
        assert_eq!(live, vec![b]);
        assert_eq!(registry.compact(), vec![a]);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(a).is_none());
    }

    #[rstest]
    fn handles_are_never_reused() {
        let mut registry: Registry<Id, u8> = Registry::new();
        let first = registry.insert(1);
        registry.mark(first);
        registry.compact();
        let second = registry.insert(2);
        assert_ne!(first, second);
    }

    #[rstest]
    fn mark_where_skips_already_marked() {
        let mut registry: Registry<Id, i32> = Registry::new();
        for value in [-1, 2, 0, 5] {
            registry.insert(value);
        }
        registry.mark_where(|_, value| *value <= 0);
        assert_eq!(registry.compact(), vec![Id(0), Id(2)]);
        let remaining: Vec<i32> = registry.iter().map(|(_, v)| *v).collect();
        assert_eq!(remaining, vec![2, 5]);
    }
}
