mod candidate;
mod lifecycle;
mod vote;

use crate::config::PollConfig;
use crate::protocol::ServerMessage;
use crate::similarity::{RatioSimilarity, Similarity};
use crate::types::*;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Everything that changes while a poll runs.
///
/// Kept behind a single lock so that compound updates (removing a candidate
/// and reindexing every vote-set) are never observed half-done.
#[derive(Debug, Clone)]
pub struct PollData {
    pub candidates: Vec<String>,
    pub locked: bool,
    pub vote_cap: u32,
    pub votes: HashMap<UserId, BTreeSet<CandidateIndex>>,
    /// Minted on the Open -> Locked transition, cleared on reset
    pub surface_id: Option<SurfaceId>,
    /// Bumped on every mutation
    pub revision: u64,
}

impl PollData {
    fn new(vote_cap: u32) -> Self {
        Self {
            candidates: Vec::new(),
            locked: false,
            vote_cap,
            votes: HashMap::new(),
            surface_id: None,
            revision: 0,
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn phase(&self) -> PollPhase {
        if self.locked {
            PollPhase::Locked
        } else {
            PollPhase::Open
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct PollState {
    pub poll: Arc<RwLock<PollData>>,
    pub config: PollConfig,
    similarity: Arc<dyn Similarity>,
    /// Channel-wide messages, delivered to every connected client
    pub broadcast: broadcast::Sender<ServerMessage>,
}

impl PollState {
    pub fn new() -> Self {
        Self::with_config(&PollConfig::default())
    }

    pub fn with_config(config: &PollConfig) -> Self {
        Self::with_similarity(config, Arc::new(RatioSimilarity))
    }

    pub fn with_similarity(config: &PollConfig, similarity: Arc<dyn Similarity>) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self {
            poll: Arc::new(RwLock::new(PollData::new(config.default_vote_cap))),
            config: config.clone(),
            similarity,
            broadcast: tx,
        }
    }

    /// Send a message to all connected clients
    pub fn broadcast_to_all(&self, msg: ServerMessage) {
        // No receivers connected is fine
        let _ = self.broadcast.send(msg);
    }

    pub async fn is_locked(&self) -> bool {
        self.poll.read().await.locked
    }

    pub async fn vote_cap(&self) -> u32 {
        self.poll.read().await.vote_cap
    }

    pub async fn revision(&self) -> u64 {
        self.poll.read().await.revision
    }

    pub async fn snapshot(&self) -> PollSnapshot {
        let poll = self.poll.read().await;
        PollSnapshot {
            phase: poll.phase(),
            candidates: poll.candidates.clone(),
            vote_cap: poll.vote_cap,
            voters: poll.votes.values().filter(|v| !v.is_empty()).count(),
            surface_id: poll.surface_id.clone(),
            revision: poll.revision,
        }
    }
}

impl Default for PollState {
    fn default() -> Self {
        Self::new()
    }
}
