use std::{cmp::Ordering, collections::HashMap, hash::Hash};

/// Sequence that absorbs full-collection snapshots without reshuffling
/// entries the viewer can already see.
///
/// `update` keeps surviving entries in their established relative order
/// (payloads refreshed from the snapshot) and appends newcomers in sorted
/// order at the end. Only an explicit `sort` commits to the ranking the
/// comparator would produce from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedList<T> {
    items: Vec<T>,
}

impl<T> Default for SortedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> SortedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list by stable-sorting `items` with the comparator.
    pub fn from<O>(order: O, mut items: Vec<T>) -> Self
    where
        O: FnMut(&T, &T) -> Ordering,
    {
        items.sort_by(order);
        Self { items }
    }

    /// Trusts `items` as an already established display order, without
    /// consulting any comparator.
    pub fn from_presorted(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Whether a fresh `sort` with this comparator would be a no-op.
    pub fn is_sorted_by<O>(&self, mut order: O) -> bool
    where
        O: FnMut(&T, &T) -> Ordering,
    {
        self.items
            .windows(2)
            .all(|pair| order(&pair[0], &pair[1]) != Ordering::Greater)
    }
}

impl<T: Clone> SortedList<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }

    /// Merges a fresh snapshot. Entries whose identity survives keep their
    /// current relative order, with payloads taken from the snapshot;
    /// identities missing from the snapshot drop out; genuinely new entries
    /// are sorted by the comparator and appended at the end.
    ///
    /// An entry visible at some position never jumps merely because a
    /// sibling's sort key moved; reshuffling waits for an explicit `sort`.
    pub fn update<K, O, I>(&self, mut order: O, mut identity: I, new_items: Vec<T>) -> Self
    where
        K: Eq + Hash,
        O: FnMut(&T, &T) -> Ordering,
        I: FnMut(&T) -> K,
    {
        let mut incoming: HashMap<K, T> = HashMap::with_capacity(new_items.len());
        for item in &new_items {
            incoming.insert(identity(item), item.clone());
        }

        let mut merged: Vec<T> = Vec::with_capacity(new_items.len());
        for previous in &self.items {
            if let Some(refreshed) = incoming.remove(&identity(previous)) {
                merged.push(refreshed);
            }
        }

        // Whatever is still in `incoming` was not seen before.
        let mut added: Vec<T> = new_items
            .into_iter()
            .filter(|item| incoming.contains_key(&identity(item)))
            .collect();
        added.sort_by(&mut order);
        merged.extend(added);

        Self { items: merged }
    }

    /// Recomputes positions strictly from the comparator, discarding the
    /// stabilized order. The stabilized order may have gone stale since the
    /// last merge; this is the deliberate commit to a fresh ranking.
    pub fn sort<O>(&self, order: O) -> Self
    where
        O: FnMut(&T, &T) -> Ordering,
    {
        let mut items = self.items.clone();
        items.sort_by(order);
        Self { items }
    }
}

#[cfg(test)]
#[path = "tests/sorted_list_tests.rs"]
mod tests;
