//! Topics-by-votes reconciliation: tally votes, rank descending, and keep
//! the visible order stable until a re-rank is explicitly requested.

use std::{cmp::Ordering, collections::HashSet};

use shared::domain::{Millis, Topic, TopicId, UserId, Vote, VoteId};

use crate::{
    remote::{self, Remote},
    sorted_dict::SortedDict,
    sorted_list::SortedList,
};

/// Topic ranked for display, with its current tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedTopic {
    pub topic: Topic,
    pub votes: usize,
    pub voted_by_me: bool,
}

/// The topic board: topics merged under the anti-jitter policy, votes merged
/// incrementally by document id. A vote arriving never reshuffles the board;
/// the ranking reshuffles only through `resort` (round transition).
#[derive(Debug, Clone, Default)]
pub struct TopicBoard {
    topics: Remote<SortedList<Topic>>,
    votes: Remote<SortedDict<VoteId, Vote>>,
}

impl TopicBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topics(&self) -> &Remote<SortedList<Topic>> {
        &self.topics
    }

    pub fn apply_topics(&mut self, snapshot: Vec<Topic>) {
        let order = |a: &Topic, b: &Topic| compare_topics(&self.votes, a, b);
        let merged = match &self.topics {
            Remote::Loading => SortedList::from(order, snapshot),
            Remote::Got(previous) => previous.update(order, |topic| topic.id.clone(), snapshot),
        };
        self.topics = Remote::Got(merged);
    }

    pub fn apply_votes(&mut self, snapshot: Vec<Vote>) {
        let mut dict = match &self.votes {
            Remote::Loading => SortedDict::new(),
            Remote::Got(previous) => previous.clone(),
        };
        let incoming: HashSet<VoteId> = snapshot.iter().map(|vote| vote.id.clone()).collect();
        let stale: Vec<VoteId> = dict
            .keys()
            .filter(|id| !incoming.contains(*id))
            .cloned()
            .collect();
        for id in &stale {
            dict.remove(id);
        }
        for vote in snapshot {
            dict.insert(vote.id.clone(), vote);
        }
        self.votes = Remote::Got(dict);
    }

    /// Current board, available once both topics and votes have delivered at
    /// least one snapshot.
    pub fn ranked(&self, me: &UserId) -> Remote<Vec<RankedTopic>> {
        remote::map2(self.topics.as_ref(), self.votes.as_ref(), |topics, votes| {
            topics
                .iter()
                .map(|topic| RankedTopic {
                    votes: distinct_voters(votes, &topic.id),
                    voted_by_me: votes
                        .values()
                        .any(|vote| vote.topic_id == topic.id && vote.user_id == *me),
                    topic: topic.clone(),
                })
                .collect()
        })
    }

    /// Whether the visible order already matches a fresh ranking, i.e.
    /// whether `resort` would be a no-op.
    pub fn is_ranked(&self) -> bool {
        match self.topics.got() {
            Some(topics) => topics.is_sorted_by(|a, b| compare_topics(&self.votes, a, b)),
            None => true,
        }
    }

    /// Commits to a fresh ranking, discarding the stabilized order.
    pub fn resort(&mut self) {
        if let Remote::Got(topics) = &self.topics {
            let sorted = topics.sort(|a, b| compare_topics(&self.votes, a, b));
            self.topics = Remote::Got(sorted);
        }
    }

    pub fn has_vote(&self, topic_id: &TopicId, user_id: &UserId) -> bool {
        match self.votes.got() {
            Some(votes) => votes
                .values()
                .any(|vote| vote.topic_id == *topic_id && vote.user_id == *user_id),
            None => false,
        }
    }

    /// Ids of every vote document cast on the topic, in store order.
    pub fn vote_ids_for_topic(&self, topic_id: &TopicId) -> Vec<VoteId> {
        match self.votes.got() {
            Some(votes) => votes
                .iter()
                .filter(|(_, vote)| vote.topic_id == *topic_id)
                .map(|(id, _)| id.clone())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Ids of the user's vote documents on the topic (more than one only if
    /// the store ever accepted a duplicate).
    pub fn vote_ids_by(&self, topic_id: &TopicId, user_id: &UserId) -> Vec<VoteId> {
        match self.votes.got() {
            Some(votes) => votes
                .iter()
                .filter(|(_, vote)| vote.topic_id == *topic_id && vote.user_id == *user_id)
                .map(|(id, _)| id.clone())
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Vote count per topic, collapsing duplicate (topic, user) pairs so that
/// re-voting stays idempotent.
fn distinct_voters(votes: &SortedDict<VoteId, Vote>, topic_id: &TopicId) -> usize {
    votes
        .values()
        .filter(|vote| vote.topic_id == *topic_id)
        .map(|vote| &vote.user_id)
        .collect::<HashSet<_>>()
        .len()
}

/// Tally descending (the ascending comparison, inverted), then creation time
/// ascending with pending (timestamp-absent) topics last.
fn compare_topics(votes: &Remote<SortedDict<VoteId, Vote>>, a: &Topic, b: &Topic) -> Ordering {
    let count = |topic: &Topic| match votes.got() {
        Some(votes) => distinct_voters(votes, &topic.id),
        None => 0,
    };
    count(b)
        .cmp(&count(a))
        .then_with(|| compare_created(a.created_at, b.created_at))
}

fn compare_created(a: Option<Millis>, b: Option<Millis>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
#[path = "tests/topics_tests.rs"]
mod tests;
