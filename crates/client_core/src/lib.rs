//! Client-side reconciliation engine for a group-facilitation session.
//!
//! The engine consumes full-collection snapshots pushed by an external store
//! (topics, votes, speakers, questions, users), merges each into a stable,
//! deterministically ordered local view, and derives the render-ready state
//! (ranked topic board, speaker rotation, name lookups) once every
//! dependency has delivered at least one snapshot. Outbound mutations go
//! through an injected [`StoreGateway`]; their effects come back later as
//! snapshots, never as direct local writes.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::{
    domain::{Contribution, ContributionId, Topic, TopicId, UserId, Vote, VoteId},
    error::EngineError,
    snapshot::{
        Collection, ContributionFields, RawDocument, StoreCommand, StoreEvent, TopicFields,
        UserFields, VoteFields, WireTimestamp,
    },
};
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

pub mod commands;
pub mod config;
pub mod queued_list;
pub mod remote;
pub mod sorted_dict;
pub mod sorted_list;
pub mod speakers;
pub mod topics;
pub mod user_names;

pub use config::SessionConfig;
pub use queued_list::QueuedList;
pub use remote::Remote;
pub use sorted_dict::SortedDict;
pub use sorted_list::SortedList;
pub use speakers::{SpeakerEntry, SpeakerQueues, SpeakerRotation};
pub use topics::{RankedTopic, TopicBoard};
pub use user_names::{NameLookup, UserNames};

/// Sink for outbound mutation commands. The store collaborator applies each
/// command asynchronously; success or failure arrives later as its own
/// inbound event, so dispatch is fire-and-forget from the engine's side.
#[async_trait]
pub trait StoreGateway: Send + Sync {
    async fn apply(&self, command: StoreCommand) -> Result<()>;
}

/// Placeholder gateway for contexts with no store wired in.
pub struct MissingStoreGateway;

#[async_trait]
impl StoreGateway for MissingStoreGateway {
    async fn apply(&self, command: StoreCommand) -> Result<()> {
        Err(anyhow::anyhow!("store gateway unavailable for {command:?}"))
    }
}

#[derive(Debug, Clone)]
pub enum ClientEvent {
    CollectionChanged(Collection),
    Error(String),
}

struct SessionState {
    board: TopicBoard,
    queues: SpeakerQueues,
    names: Remote<UserNames>,
}

/// The reconciliation engine. One inbound event is applied to completion at
/// a time; per-collection state has no other writer.
pub struct SessionClient {
    config: SessionConfig,
    store: Arc<dyn StoreGateway>,
    inner: Mutex<SessionState>,
    events: broadcast::Sender<ClientEvent>,
}

impl SessionClient {
    pub fn new(config: SessionConfig) -> Arc<Self> {
        Self::with_gateway(config, Arc::new(MissingStoreGateway))
    }

    pub fn with_gateway(config: SessionConfig, store: Arc<dyn StoreGateway>) -> Arc<Self> {
        let (events, _) = broadcast::channel(config.event_buffer.max(1));
        Arc::new(Self {
            config,
            store,
            inner: Mutex::new(SessionState {
                board: TopicBoard::new(),
                queues: SpeakerQueues::new(),
                names: Remote::Loading,
            }),
            events,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    /// Applies one inbound event to completion. A bad snapshot or a store
    /// error is reduced to a single `Error` event; the last valid reconciled
    /// state of every collection stays untouched.
    pub async fn handle_store_event(&self, event: StoreEvent) {
        match self.apply_store_event(event).await {
            Ok(collection) => {
                let _ = self.events.send(ClientEvent::CollectionChanged(collection));
            }
            Err(err) => {
                warn!(error = %err, "inbound store event rejected");
                let _ = self.events.send(ClientEvent::Error(err.to_string()));
            }
        }
    }

    async fn apply_store_event(&self, event: StoreEvent) -> Result<Collection, EngineError> {
        match event {
            StoreEvent::TopicsSnapshot { docs } => {
                let topics =
                    decode_snapshot::<TopicFields, _>(Collection::Topics, docs, |id, fields| {
                        Topic {
                            id: TopicId::new(id),
                            topic: fields.topic,
                            user_id: UserId::new(fields.user_id),
                            created_at: fields.created_at.map(WireTimestamp::to_millis),
                        }
                    })?;
                let mut state = self.inner.lock().await;
                state.board.apply_topics(topics);
                info!(collection = "topics", "snapshot applied");
                Ok(Collection::Topics)
            }
            StoreEvent::VotesSnapshot { docs } => {
                let votes =
                    decode_snapshot::<VoteFields, _>(Collection::Votes, docs, |id, fields| Vote {
                        id: VoteId::new(id),
                        topic_id: TopicId::new(fields.topic_id),
                        user_id: UserId::new(fields.user_id),
                    })?;
                let mut state = self.inner.lock().await;
                state.board.apply_votes(votes);
                info!(collection = "votes", "snapshot applied");
                Ok(Collection::Votes)
            }
            StoreEvent::SpeakersSnapshot { docs } => {
                let entries = decode_contributions(Collection::Speakers, docs)?;
                let mut state = self.inner.lock().await;
                state.queues.apply_speakers(entries);
                info!(collection = "speakers", "snapshot applied");
                Ok(Collection::Speakers)
            }
            StoreEvent::QuestionsSnapshot { docs } => {
                let entries = decode_contributions(Collection::Questions, docs)?;
                let mut state = self.inner.lock().await;
                state.queues.apply_questions(entries);
                info!(collection = "questions", "snapshot applied");
                Ok(Collection::Questions)
            }
            StoreEvent::UsersSnapshot { docs } => {
                let users =
                    decode_snapshot::<UserFields, _>(Collection::Users, docs, |id, fields| {
                        (UserId::new(id), fields.name)
                    })?;
                let mut state = self.inner.lock().await;
                match &mut state.names {
                    Remote::Got(names) => names.apply_snapshot(users),
                    loading => *loading = Remote::Got(UserNames::from_snapshot(users)),
                }
                info!(collection = "users", "snapshot applied");
                Ok(Collection::Users)
            }
            StoreEvent::Error(store_error) => Err(EngineError::from(store_error)),
        }
    }

    /// Topic board ranked by votes, `Loading` until both the topic and vote
    /// collections have arrived.
    pub async fn ranked_topics(&self) -> Remote<Vec<RankedTopic>> {
        self.inner.lock().await.board.ranked(&self.config.user)
    }

    /// Whether the visible topic order already matches a fresh ranking.
    pub async fn topics_ranked(&self) -> bool {
        self.inner.lock().await.board.is_ranked()
    }

    /// Commits the topic board to a fresh ranking (round transition); the
    /// only path that reshuffles already-visible topics.
    pub async fn commit_ranking(&self) {
        {
            let mut state = self.inner.lock().await;
            state.board.resort();
        }
        let _ = self
            .events
            .send(ClientEvent::CollectionChanged(Collection::Topics));
    }

    /// Active speaker plus the confirmed remainder and question queue;
    /// `Loading` until speakers, questions and user names have all arrived.
    pub async fn speaker_rotation(&self) -> Remote<SpeakerRotation> {
        let state = self.inner.lock().await;
        state.queues.rotation(&state.names)
    }

    pub async fn lookup_name(&self, user_id: &UserId) -> Remote<NameLookup> {
        self.inner
            .lock()
            .await
            .names
            .as_ref()
            .map(|names| names.get(user_id))
    }

    pub async fn submit_topic(&self, topic: &str) -> Result<()> {
        self.dispatch(commands::submit_topic(
            &self.config.workspace,
            &self.config.user,
            topic,
        ))
        .await
    }

    /// Deletes the topic and every vote cast on it.
    pub async fn delete_topic(&self, topic_id: &TopicId) -> Result<()> {
        let vote_ids = {
            let state = self.inner.lock().await;
            state.board.vote_ids_for_topic(topic_id)
        };
        self.dispatch(commands::delete_topic(
            &self.config.workspace,
            topic_id,
            &vote_ids,
        ))
        .await
    }

    /// Casts the local user's vote. Skipped when a matching vote is already
    /// known — re-voting is idempotent via the (topic, user) pair.
    pub async fn cast_vote(&self, topic_id: &TopicId) -> Result<()> {
        let already_voted = {
            let state = self.inner.lock().await;
            state.board.has_vote(topic_id, &self.config.user)
        };
        if already_voted {
            info!(topic = %topic_id, "vote already cast, skipping");
            return Ok(());
        }
        self.dispatch(commands::cast_vote(
            &self.config.workspace,
            topic_id,
            &self.config.user,
        ))
        .await
    }

    /// Compensates for an earlier vote by deleting the matching vote
    /// documents. A no-op when none are known.
    pub async fn retract_vote(&self, topic_id: &TopicId) -> Result<()> {
        let vote_ids = {
            let state = self.inner.lock().await;
            state.board.vote_ids_by(topic_id, &self.config.user)
        };
        match commands::retract_vote(&self.config.workspace, &vote_ids) {
            Some(command) => self.dispatch(command).await,
            None => Ok(()),
        }
    }

    pub async fn enqueue_speaker(&self) -> Result<()> {
        self.dispatch(commands::enqueue_speaker(
            &self.config.workspace,
            &self.config.user,
        ))
        .await
    }

    pub async fn enqueue_question(&self) -> Result<()> {
        self.dispatch(commands::enqueue_question(
            &self.config.workspace,
            &self.config.user,
        ))
        .await
    }

    pub async fn withdraw_speaker(&self, contribution_id: &ContributionId) -> Result<()> {
        self.dispatch(commands::leave_queue(
            &self.config.workspace,
            Collection::Speakers,
            contribution_id,
        ))
        .await
    }

    pub async fn withdraw_question(&self, contribution_id: &ContributionId) -> Result<()> {
        self.dispatch(commands::leave_queue(
            &self.config.workspace,
            Collection::Questions,
            contribution_id,
        ))
        .await
    }

    /// Bulk reset: deletes every known speaker and question entry across
    /// both lanes. Skipped entirely while either lane is still `Loading`.
    pub async fn clear_speaker_queues(&self) -> Result<()> {
        let targets = {
            let state = self.inner.lock().await;
            state.queues.clear_all_targets()
        };
        let Some(targets) = targets else {
            info!("speaker queues still loading, clear skipped");
            return Ok(());
        };
        match commands::clear_queues(&self.config.workspace, &targets) {
            Some(command) => self.dispatch(command).await,
            None => Ok(()),
        }
    }

    pub async fn set_display_name(&self, name: &str) -> Result<()> {
        self.dispatch(commands::set_display_name(
            &self.config.workspace,
            &self.config.user,
            name,
        ))
        .await
    }

    async fn dispatch(&self, command: StoreCommand) -> Result<()> {
        self.store
            .apply(command)
            .await
            .context("failed to dispatch store command")
    }
}

fn decode_contributions(
    collection: Collection,
    docs: Vec<RawDocument>,
) -> Result<Vec<Contribution>, EngineError> {
    decode_snapshot::<ContributionFields, _>(collection, docs, |id, fields| Contribution {
        id: ContributionId::new(id),
        user_id: UserId::new(fields.user_id),
        created_at: fields.created_at.map(WireTimestamp::to_millis),
    })
}

/// Decodes a whole snapshot before any state is touched, so a malformed
/// document rejects the snapshot without corrupting the last-known-good
/// reconciled state of its collection.
fn decode_snapshot<F, T>(
    collection: Collection,
    docs: Vec<RawDocument>,
    mut build: impl FnMut(String, F) -> T,
) -> Result<Vec<T>, EngineError>
where
    F: serde::de::DeserializeOwned,
{
    docs.into_iter()
        .map(|doc| {
            let fields: F = serde_json::from_value(doc.data).map_err(|err| EngineError::Decode {
                collection: collection.name(),
                message: err.to_string(),
            })?;
            Ok(build(doc.id, fields))
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
