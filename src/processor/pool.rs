//! Insertion-ordered set handing out 1-based positions.

use std::collections::HashMap;
use std::hash::Hash;

use crate::model::PoolIndex;

/// Keeps the first-insertion order of unique values. The position of a value
/// never changes once assigned.
#[derive(Debug, Clone)]
pub struct OrderedPool<T> {
    items: Vec<T>,
    positions: HashMap<T, PoolIndex>,
}

impl<T> Default for OrderedPool<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> OrderedPool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `item` if absent and returns its position either way.
    pub fn insert(&mut self, item: T) -> PoolIndex {
        if let Some(&index) = self.positions.get(&item) {
            return index;
        }
        let index = PoolIndex::try_from(self.items.len() + 1)
            .expect("constant pool exceeds u32::MAX entries");
        self.positions.insert(item.clone(), index);
        self.items.push(item);
        index
    }

    pub fn index_of(&self, item: &T) -> Option<PoolIndex> {
        self.positions.get(item).copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}
