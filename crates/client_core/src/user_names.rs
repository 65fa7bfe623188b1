use shared::domain::UserId;

use crate::sorted_dict::SortedDict;

/// Result of resolving a user's display name against the shared directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameLookup {
    Unique(String),
    Collision { name: String, user_ids: Vec<UserId> },
    Missing,
}

/// Display-name directory. The store never rejects a duplicate name, so
/// collisions are surfaced to the caller as a presentation-level warning
/// rather than treated as an error.
#[derive(Debug, Clone, Default)]
pub struct UserNames {
    names: SortedDict<UserId, String>,
}

impl UserNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(entries: Vec<(UserId, String)>) -> Self {
        let mut directory = Self::new();
        directory.apply_snapshot(entries);
        directory
    }

    /// Merges a fresh snapshot: known users keep their position with the
    /// name updated in place, absent users drop out, new users append.
    pub fn apply_snapshot(&mut self, entries: Vec<(UserId, String)>) {
        let incoming: std::collections::HashSet<&UserId> =
            entries.iter().map(|(id, _)| id).collect();
        let stale: Vec<UserId> = self
            .names
            .keys()
            .filter(|id| !incoming.contains(*id))
            .cloned()
            .collect();
        for id in &stale {
            self.names.remove(id);
        }
        for (id, name) in entries {
            self.names.insert(id, name);
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Collision membership is computed on demand by scanning every entry
    /// sharing the queried user's name, in store order.
    pub fn get(&self, user_id: &UserId) -> NameLookup {
        let Some(name) = self.names.get(user_id) else {
            return NameLookup::Missing;
        };
        let sharing: Vec<UserId> = self
            .names
            .iter()
            .filter(|(_, other)| *other == name)
            .map(|(id, _)| id.clone())
            .collect();
        if sharing.len() > 1 {
            NameLookup::Collision {
                name: name.clone(),
                user_ids: sharing,
            }
        } else {
            NameLookup::Unique(name.clone())
        }
    }
}

#[cfg(test)]
#[path = "tests/user_names_tests.rs"]
mod tests;
