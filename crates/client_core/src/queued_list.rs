use shared::domain::Millis;

/// Partition of a snapshot into confirmed entries (`active`, store-assigned
/// timestamp, sorted ascending) and entries still waiting on acknowledgement
/// (`queueing`). An entry moves from `queueing` to `active` exactly once,
/// when a snapshot first shows it with a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedList<T> {
    active: Vec<T>,
    queueing: Vec<T>,
}

impl<T> Default for QueuedList<T> {
    fn default() -> Self {
        Self {
            active: Vec::new(),
            queueing: Vec::new(),
        }
    }
}

impl<T> QueuedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partitions a snapshot by timestamp presence. `active` is sorted
    /// ascending by timestamp (earliest first = head of queue); ties keep
    /// the store's snapshot order.
    pub fn from_snapshot<F>(items: Vec<T>, mut timestamp_of: F) -> Self
    where
        F: FnMut(&T) -> Option<Millis>,
    {
        let mut active = Vec::new();
        let mut queueing = Vec::new();
        for item in items {
            if timestamp_of(&item).is_some() {
                active.push(item);
            } else {
                queueing.push(item);
            }
        }
        active.sort_by_key(|item| timestamp_of(item));
        Self { active, queueing }
    }

    pub fn active(&self) -> &[T] {
        &self.active
    }

    pub fn queueing(&self) -> &[T] {
        &self.queueing
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.queueing.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len() + self.queueing.len()
    }

    pub fn map<U, F>(&self, mut f: F) -> QueuedList<U>
    where
        F: FnMut(&T) -> U,
    {
        QueuedList {
            active: self.active.iter().map(&mut f).collect(),
            queueing: self.queueing.iter().map(f).collect(),
        }
    }

    pub fn filter_map<U, F>(&self, mut f: F) -> QueuedList<U>
    where
        F: FnMut(&T) -> Option<U>,
    {
        QueuedList {
            active: self.active.iter().filter_map(&mut f).collect(),
            queueing: self.queueing.iter().filter_map(f).collect(),
        }
    }
}

impl<T: Clone> QueuedList<T> {
    /// Every known entry: confirmed ones first in queue order, then pending
    /// ones in snapshot order.
    pub fn all_to_vec(&self) -> Vec<T> {
        let mut all = self.active.clone();
        all.extend(self.queueing.iter().cloned());
        all
    }
}

#[cfg(test)]
#[path = "tests/queued_list_tests.rs"]
mod tests;
