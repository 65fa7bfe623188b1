use std::{cmp::Ordering, collections::HashMap, hash::Hash};

/// Keyed collection with an explicit order sequence, independent of hash
/// iteration order.
///
/// Inserting an existing key replaces its value in place without moving it;
/// a new key appends at the end. The order sequence only changes through
/// `stable_sort_with`, and callers must not assume a sort survives unrelated
/// inserts without re-invoking it.
#[derive(Debug, Clone)]
pub struct SortedDict<K, V> {
    values: HashMap<K, V>,
    order: Vec<K>,
}

impl<K, V> Default for SortedDict<K, V> {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> SortedDict<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: K, value: V) {
        if self.values.insert(key.clone(), value).is_none() {
            self.order.push(key);
        }
    }

    /// Removes both the value and its position. A later insert of the same
    /// key is treated as new and appends at the end.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self.values.remove(key)?;
        self.order.retain(|k| k != key);
        Some(removed)
    }

    /// Entries in the current order sequence. A key present in the order
    /// sequence without a backing value is skipped rather than surfaced.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order
            .iter()
            .filter_map(|key| self.values.get(key).map(|value| (key, value)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Re-derives the order sequence by stable-sorting the current
    /// projection; tied entries keep their existing relative order. The
    /// prior order sequence is discarded.
    pub fn stable_sort_with<F>(&mut self, mut cmp: F)
    where
        F: FnMut((&K, &V), (&K, &V)) -> Ordering,
    {
        let mut keys: Vec<K> = self
            .order
            .iter()
            .filter(|key| self.values.contains_key(*key))
            .cloned()
            .collect();
        keys.sort_by(|a, b| cmp((a, &self.values[a]), (b, &self.values[b])));
        self.order = keys;
    }
}

impl<K: Eq + Hash + Clone, V: Clone> SortedDict<K, V> {
    pub fn to_vec(&self) -> Vec<(K, V)> {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/sorted_dict_tests.rs"]
mod tests;
