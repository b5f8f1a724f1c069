//! Candidate list handlers
//!
//! Handlers for commands that build the movie list while voting is closed.

use super::handlers::Reply;
use crate::protocol::ServerMessage;
use crate::render;
use crate::state::PollState;
use std::sync::Arc;

pub async fn handle_add(state: &Arc<PollState>, user_id: &str, raw: String) -> Reply {
    tracing::info!("{} adding: {}", user_id, raw);
    match state.add_candidates(&raw).await {
        Ok(outcome) if outcome.is_empty() => Reply::Private(ServerMessage::Reply {
            text: render::added(&outcome),
        }),
        Ok(outcome) => {
            tracing::debug!(
                "Added {} movies, skipped {}",
                outcome.added.len(),
                outcome.skipped.len()
            );
            Reply::Channel(ServerMessage::Reply {
                text: render::added(&outcome),
            })
        }
        Err(e) => {
            tracing::info!("Add rejected: {}", e);
            Reply::Channel(ServerMessage::from(&e))
        }
    }
}

pub async fn handle_current(state: &Arc<PollState>) -> Reply {
    let list = state.candidates().await;
    Reply::Channel(ServerMessage::Reply {
        text: render::candidates(&list),
    })
}

pub async fn handle_remove(state: &Arc<PollState>, user_id: &str, name: String) -> Reply {
    tracing::info!("{} removing: {}", user_id, name);
    match state.remove_candidate(&name).await {
        Ok(removed) => Reply::Channel(ServerMessage::Reply {
            text: format!("Removed: {}", removed),
        }),
        Err(e) => {
            tracing::info!("Remove rejected: {}", e);
            Reply::Channel(ServerMessage::from(&e))
        }
    }
}

pub async fn handle_max_vote_count(state: &Arc<PollState>, user_id: &str, raw: String) -> Reply {
    tracing::info!("{} setting vote cap to {}", user_id, raw);
    match state.set_vote_cap(&raw).await {
        Ok(cap) => Reply::Channel(ServerMessage::Reply {
            text: format!("Each person can now vote for up to {} movies.", cap),
        }),
        Err(e) => {
            tracing::info!("Vote cap change rejected: {}", e);
            Reply::Channel(ServerMessage::from(&e))
        }
    }
}
