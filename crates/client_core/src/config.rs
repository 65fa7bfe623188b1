use shared::domain::{UserId, WorkspaceId};

/// Session-level settings: which workspace's collections to reconcile and
/// who the local participant is.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub workspace: WorkspaceId,
    pub user: UserId,
    /// Capacity of the client event broadcast channel.
    pub event_buffer: usize,
}

impl SessionConfig {
    pub fn new(workspace: WorkspaceId, user: UserId) -> Self {
        Self {
            workspace,
            user,
            event_buffer: 256,
        }
    }

    /// Reads `FACILITATOR_WORKSPACE` and `FACILITATOR_USER`, with an
    /// optional `FACILITATOR_EVENT_BUFFER` override. `None` when the
    /// required variables are absent.
    pub fn from_env() -> Option<Self> {
        let workspace = std::env::var("FACILITATOR_WORKSPACE").ok()?;
        let user = std::env::var("FACILITATOR_USER").ok()?;
        let mut config = Self::new(WorkspaceId::new(workspace), UserId::new(user));
        if let Ok(raw) = std::env::var("FACILITATOR_EVENT_BUFFER") {
            if let Ok(buffer) = raw.parse::<usize>() {
                config.event_buffer = buffer;
            }
        }
        Some(config)
    }
}
