//! Speaker-queue reconciliation: the speaking and question lanes, the
//! derived rotation view, and the bulk-clear target set.

use sha2::{Digest, Sha256};
use shared::{
    domain::{Contribution, ContributionId, UserId},
    snapshot::Collection,
};

use crate::{
    queued_list::QueuedList,
    remote::{self, Remote},
    user_names::{NameLookup, UserNames},
};

/// One entry of the rotation, with its display name resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerEntry {
    pub contribution_id: ContributionId,
    pub user_id: UserId,
    pub name: String,
    pub name_collides: bool,
}

/// The derived "who is up" view: the confirmed head of the speaker lane,
/// the confirmed remainder, and the question queue for the current speaker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerRotation {
    pub active: Option<SpeakerEntry>,
    pub following: Vec<SpeakerEntry>,
    pub questions: Vec<SpeakerEntry>,
}

/// The two independent lanes. Each snapshot replaces its lane wholesale;
/// ordering within a lane comes from the QueuedList timestamp partition.
#[derive(Debug, Clone, Default)]
pub struct SpeakerQueues {
    speakers: Remote<QueuedList<Contribution>>,
    questions: Remote<QueuedList<Contribution>>,
}

impl SpeakerQueues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speakers(&self) -> &Remote<QueuedList<Contribution>> {
        &self.speakers
    }

    pub fn questions(&self) -> &Remote<QueuedList<Contribution>> {
        &self.questions
    }

    pub fn apply_speakers(&mut self, snapshot: Vec<Contribution>) {
        self.speakers = Remote::Got(QueuedList::from_snapshot(snapshot, |entry| entry.created_at));
    }

    pub fn apply_questions(&mut self, snapshot: Vec<Contribution>) {
        self.questions = Remote::Got(QueuedList::from_snapshot(snapshot, |entry| entry.created_at));
    }

    /// The rotation, available once speakers, questions and the name
    /// directory have each delivered at least one snapshot.
    ///
    /// The active speaker is the earliest confirmed entry; a
    /// merely-requested (unconfirmed) enqueue is never promoted early, so an
    /// empty `active` lane means no active speaker regardless of what is
    /// still queueing.
    pub fn rotation(&self, names: &Remote<UserNames>) -> Remote<SpeakerRotation> {
        remote::map3(
            self.speakers.as_ref(),
            self.questions.as_ref(),
            names.as_ref(),
            |speakers, questions, names| {
                let resolve = |entry: &Contribution| resolve_entry(names, entry);
                SpeakerRotation {
                    active: speakers.active().first().map(resolve),
                    following: speakers.active().iter().skip(1).map(resolve).collect(),
                    questions: questions.active().iter().map(resolve).collect(),
                }
            },
        )
    }

    /// Every entry to delete for a bulk reset: active and queueing, across
    /// both lanes. `None` while either lane has never received its first
    /// snapshot — a half-known reset is not attempted.
    pub fn clear_all_targets(&self) -> Option<Vec<(Collection, ContributionId)>> {
        let (speakers, questions) = match (self.speakers.got(), self.questions.got()) {
            (Some(speakers), Some(questions)) => (speakers, questions),
            _ => return None,
        };
        let targets = speakers
            .all_to_vec()
            .into_iter()
            .map(|entry| (Collection::Speakers, entry.id))
            .chain(
                questions
                    .all_to_vec()
                    .into_iter()
                    .map(|entry| (Collection::Questions, entry.id)),
            )
            .collect();
        Some(targets)
    }
}

fn resolve_entry(names: &UserNames, entry: &Contribution) -> SpeakerEntry {
    let (name, name_collides) = match names.get(&entry.user_id) {
        NameLookup::Unique(name) => (name, false),
        NameLookup::Collision { name, .. } => (name, true),
        NameLookup::Missing => (fallback_pseudonym(&entry.user_id), false),
    };
    SpeakerEntry {
        contribution_id: entry.id.clone(),
        user_id: entry.user_id.clone(),
        name,
        name_collides,
    }
}

/// Deterministic human-readable stand-in for a user who never picked a name,
/// derived by hashing the user id so it is stable across sessions.
///
/// Two unrelated ids can still land on the same pseudonym; that risk is
/// accepted and not mitigated beyond the hashing itself.
pub fn fallback_pseudonym(user_id: &UserId) -> String {
    let digest = Sha256::digest(user_id.as_str().as_bytes());
    let adjective = ADJECTIVES[digest[0] as usize % ADJECTIVES.len()];
    let animal = ANIMALS[digest[1] as usize % ANIMALS.len()];
    format!("{adjective} {animal}")
}

const ADJECTIVES: &[&str] = &[
    "Amber", "Brisk", "Calm", "Daring", "Eager", "Foggy", "Gentle", "Hidden", "Ivory", "Jolly",
    "Keen", "Lunar", "Mellow", "Nimble", "Opal", "Quiet",
];

const ANIMALS: &[&str] = &[
    "Badger", "Crane", "Dolphin", "Falcon", "Gecko", "Heron", "Ibex", "Jackdaw", "Koala", "Lynx",
    "Marmot", "Newt", "Otter", "Puffin", "Raven", "Stork",
];

#[cfg(test)]
#[path = "tests/speakers_tests.rs"]
mod tests;
