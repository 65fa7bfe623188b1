//! Outbound mutation payload builders. Every command is addressed by a
//! workspace-prefixed path; none of them touches local state.

use serde_json::json;
use shared::{
    domain::{ContributionId, TopicId, UserId, VoteId, WorkspaceId},
    snapshot::{Collection, CollectionPath, StoreCommand},
};

pub fn submit_topic(workspace: &WorkspaceId, author: &UserId, topic: &str) -> StoreCommand {
    StoreCommand::Insert {
        path: CollectionPath::new(workspace.clone(), Collection::Topics),
        fields: json!({ "topic": topic, "user_id": author.as_str() }),
    }
}

/// Deletes the topic document together with every vote cast on it, in one
/// batch, so the next snapshots drop both.
pub fn delete_topic(
    workspace: &WorkspaceId,
    topic_id: &TopicId,
    vote_ids: &[VoteId],
) -> StoreCommand {
    let topics = CollectionPath::new(workspace.clone(), Collection::Topics);
    let votes = CollectionPath::new(workspace.clone(), Collection::Votes);
    let mut paths = vec![topics.document(topic_id.as_str())];
    paths.extend(vote_ids.iter().map(|id| votes.document(id.as_str())));
    StoreCommand::Delete { paths }
}

pub fn cast_vote(workspace: &WorkspaceId, topic_id: &TopicId, voter: &UserId) -> StoreCommand {
    StoreCommand::Insert {
        path: CollectionPath::new(workspace.clone(), Collection::Votes),
        fields: json!({ "topic_id": topic_id.as_str(), "user_id": voter.as_str() }),
    }
}

/// `None` when the user has no vote documents to retract.
pub fn retract_vote(workspace: &WorkspaceId, vote_ids: &[VoteId]) -> Option<StoreCommand> {
    if vote_ids.is_empty() {
        return None;
    }
    let votes = CollectionPath::new(workspace.clone(), Collection::Votes);
    Some(StoreCommand::Delete {
        paths: vote_ids.iter().map(|id| votes.document(id.as_str())).collect(),
    })
}

pub fn enqueue_speaker(workspace: &WorkspaceId, user: &UserId) -> StoreCommand {
    StoreCommand::Insert {
        path: CollectionPath::new(workspace.clone(), Collection::Speakers),
        fields: json!({ "user_id": user.as_str() }),
    }
}

pub fn enqueue_question(workspace: &WorkspaceId, user: &UserId) -> StoreCommand {
    StoreCommand::Insert {
        path: CollectionPath::new(workspace.clone(), Collection::Questions),
        fields: json!({ "user_id": user.as_str() }),
    }
}

pub fn leave_queue(
    workspace: &WorkspaceId,
    lane: Collection,
    contribution_id: &ContributionId,
) -> StoreCommand {
    StoreCommand::Delete {
        paths: vec![
            CollectionPath::new(workspace.clone(), lane).document(contribution_id.as_str()),
        ],
    }
}

/// One batch delete covering every target across both lanes. `None` when
/// there is nothing to clear.
pub fn clear_queues(
    workspace: &WorkspaceId,
    targets: &[(Collection, ContributionId)],
) -> Option<StoreCommand> {
    if targets.is_empty() {
        return None;
    }
    Some(StoreCommand::Delete {
        paths: targets
            .iter()
            .map(|(lane, id)| CollectionPath::new(workspace.clone(), *lane).document(id.as_str()))
            .collect(),
    })
}

pub fn set_display_name(workspace: &WorkspaceId, user: &UserId, name: &str) -> StoreCommand {
    StoreCommand::Set {
        path: CollectionPath::new(workspace.clone(), Collection::Users).document(user.as_str()),
        fields: json!({ "name": name }),
    }
}
