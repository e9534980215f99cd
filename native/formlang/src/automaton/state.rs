//! Interned state ids and the sets an automaton moves between.

use fixedbitset::FixedBitSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Position of a state label in its automaton's label table.
pub type StateId = u32;

/// A set of interned states.
///
/// Two sets with the same members compare and hash equal no matter how many
/// bits each one has reserved, so a set can key the subset table directly.
#[derive(Clone)]
pub struct StateSet {
    members: FixedBitSet,
}

impl StateSet {
    /// An empty set with room for the ids `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: FixedBitSet::with_capacity(capacity),
        }
    }

    /// A set holding only `state`.
    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(state);
        set
    }

    /// Add `state`, reserving more room when its id is past the end.
    pub fn insert(&mut self, state: StateId) {
        let idx = state as usize;
        if idx >= self.members.len() {
            self.members.grow(idx + 1);
        }
        self.members.insert(idx);
    }

    /// Whether `state` is a member.
    pub fn contains(&self, state: StateId) -> bool {
        let idx = state as usize;
        idx < self.members.len() && self.members.contains(idx)
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_clear()
    }

    /// Number of member states.
    pub fn len(&self) -> usize {
        self.members.count_ones(..)
    }

    /// Member ids, smallest first.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.members.ones().map(|idx| idx as StateId)
    }

    /// Add every member of `other`.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.members.len() > self.members.len() {
            self.members.grow(other.members.len());
        }
        self.members.union_with(&other.members);
    }

    /// Whether the two sets share a member.
    pub fn intersects(&self, other: &StateSet) -> bool {
        !self.members.is_disjoint(&other.members)
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for StateSet {}

impl Hash for StateSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for id in self.iter() {
            id.hash(state);
        }
        self.len().hash(state);
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn set_of(ids: &[StateId], capacity: usize) -> StateSet {
        let mut set = StateSet::with_capacity(capacity);
        for &id in ids {
            set.insert(id);
        }
        set
    }

    #[test]
    fn test_insert_past_capacity() {
        let mut set = StateSet::with_capacity(2);
        set.insert(9);

        assert!(set.contains(9));
        assert!(!set.contains(1));
        assert!(!set.contains(40));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_union_with_larger_set() {
        let mut small = StateSet::singleton(1, 2);
        small.union_with(&set_of(&[3, 7], 8));

        assert_eq!(small.iter().collect::<Vec<_>>(), vec![1, 3, 7]);
    }

    #[test]
    fn test_intersects() {
        let a = set_of(&[0, 4], 5);
        let b = set_of(&[4, 5], 6);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&StateSet::singleton(2, 8)));
        assert!(!a.intersects(&StateSet::with_capacity(0)));
        assert!(StateSet::with_capacity(0).is_empty());
    }

    #[test]
    fn test_equality_ignores_capacity() {
        let narrow = set_of(&[0, 2], 3);
        let wide = set_of(&[2, 0], 64);

        assert_eq!(narrow, wide);
        assert_ne!(narrow, set_of(&[0], 64));
        assert_eq!(StateSet::with_capacity(1), StateSet::with_capacity(32));

        let keys: HashSet<StateSet> = [narrow, wide].into_iter().collect();
        assert_eq!(keys.len(), 1);
    }
}
