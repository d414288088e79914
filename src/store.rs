//! Generic in-memory keyed store.
//!
//! Every item added to a store is handed the next sequential identity
//! (starting at 0) and kept under that key.  Items can be looked up by
//! identity or enumerated through a predicate; enumeration yields items in
//! ascending identity order, i.e. the order they were added.
//!
//! The store takes `&mut self` for every write, so a store shared between
//! tasks has to be serialized by its owner.

use std::collections::BTreeMap;
use tracing::debug;

/// Identity handed out by a store.
pub type Id = u64;

/// Capability required of anything kept in a [`DataStore`].
pub trait Identified {
    /// Current identity, `None` until the item has been stored.
    fn id(&self) -> Option<Id>;

    /// Called by the store right before insertion. An identity, once set,
    /// must not change.
    fn assign_id(&mut self, id: Id);
}

/// Storage seam used by the scoreboard.
pub trait DataStore<T: Identified> {
    /// Assign the next identity to `item`, store it and return the identity.
    fn add(&mut self, item: T) -> Id;

    fn get_by_id(&self, id: Id) -> Option<&T>;

    fn get_by_id_mut(&mut self, id: Id) -> Option<&mut T>;

    /// All stored items matching `predicate`, in ascending identity order.
    fn get_all_by<P>(&self, predicate: P) -> Vec<&T>
    where
        P: Fn(&T) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// [`DataStore`] backed by an ordered map and a per-instance counter.
#[derive(Debug)]
pub struct MemoryStore<T> {
    items: BTreeMap<Id, T>,
    next_id: Id,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        MemoryStore {
            items: BTreeMap::new(),
            next_id: 0,
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identified> DataStore<T> for MemoryStore<T> {
    fn add(&mut self, mut item: T) -> Id {
        let id = self.next_id;
        self.next_id += 1;
        item.assign_id(id);
        self.items.insert(id, item);
        debug!("MemoryStore: stored item {} ({} total)", id, self.items.len());
        id
    }

    fn get_by_id(&self, id: Id) -> Option<&T> {
        self.items.get(&id)
    }

    fn get_by_id_mut(&mut self, id: Id) -> Option<&mut T> {
        self.items.get_mut(&id)
    }

    fn get_all_by<P>(&self, predicate: P) -> Vec<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.items.values().filter(|item| predicate(*item)).collect()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
