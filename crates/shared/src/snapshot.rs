//! Wire-level payloads exchanged with the external store collaborator:
//! inbound full-collection snapshots and outbound mutation commands.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{Millis, WorkspaceId},
    error::StoreError,
};

/// Server-assigned creation time as delivered on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTimestamp {
    pub seconds: i64,
    pub nanoseconds: i64,
}

impl WireTimestamp {
    pub fn to_millis(self) -> Millis {
        self.seconds * 1000 + (self.nanoseconds as f64 / 1e6).round() as Millis
    }

    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.to_millis()).single()
    }
}

/// One document of a full-collection snapshot, exactly as pushed by the
/// store. `data` is decoded per collection; a document that fails to decode
/// rejects the whole snapshot without touching reconciled state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    pub id: String,
    pub data: Value,
}

impl RawDocument {
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Topics,
    Votes,
    Speakers,
    Questions,
    Users,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Topics => "topics",
            Collection::Votes => "votes",
            Collection::Speakers => "speakers",
            Collection::Questions => "questions",
            Collection::Users => "users",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicFields {
    pub topic: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<WireTimestamp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteFields {
    pub topic_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionFields {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<WireTimestamp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFields {
    pub name: String,
}

/// Inbound events produced by the store collaborator. Each snapshot variant
/// carries the full current listing of its collection, replacing the prior
/// listing rather than diffing against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum StoreEvent {
    TopicsSnapshot { docs: Vec<RawDocument> },
    VotesSnapshot { docs: Vec<RawDocument> },
    SpeakersSnapshot { docs: Vec<RawDocument> },
    QuestionsSnapshot { docs: Vec<RawDocument> },
    UsersSnapshot { docs: Vec<RawDocument> },
    Error(StoreError),
}

/// `workspace/collection` prefix addressing a whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionPath {
    pub workspace: WorkspaceId,
    pub collection: Collection,
}

impl CollectionPath {
    pub fn new(workspace: WorkspaceId, collection: Collection) -> Self {
        Self {
            workspace,
            collection,
        }
    }

    pub fn document(&self, document_id: impl Into<String>) -> DocumentPath {
        DocumentPath {
            workspace: self.workspace.clone(),
            collection: self.collection,
            document_id: document_id.into(),
        }
    }
}

impl std::fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.workspace, self.collection.name())
    }
}

/// `workspace/collection/document` path addressing a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPath {
    pub workspace: WorkspaceId,
    pub collection: Collection,
    pub document_id: String,
}

impl std::fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.workspace,
            self.collection.name(),
            self.document_id
        )
    }
}

/// Outbound mutation commands addressed to the store collaborator. A command
/// never mutates local state; it only requests a future snapshot update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum StoreCommand {
    Insert { path: CollectionPath, fields: Value },
    Delete { paths: Vec<DocumentPath> },
    Set { path: DocumentPath, fields: Value },
}
