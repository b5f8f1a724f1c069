//! Voting handlers
//!
//! Lock, vote-control activation, results and reset.

use super::handlers::Reply;
use crate::error::PollError;
use crate::protocol::ServerMessage;
use crate::render;
use crate::state::PollState;
use std::sync::Arc;

pub async fn handle_lock(state: &Arc<PollState>, user_id: &str) -> Reply {
    tracing::info!("{} locking the list", user_id);
    match state.lock().await {
        Ok(surface) => {
            tracing::info!(
                "Voting opened on surface {} with {} options",
                surface.surface_id,
                surface.controls.len()
            );
            let cap = state.vote_cap().await;
            Reply::Channel(ServerMessage::VotingOpened {
                surface,
                text: render::voting_opened(cap),
            })
        }
        Err(e) => {
            tracing::info!("Lock produced no ballot: {}", e);
            Reply::Channel(ServerMessage::from(&e))
        }
    }
}

pub async fn handle_activate(state: &Arc<PollState>, user_id: &str, control_id: String) -> Reply {
    tracing::debug!("{} activated {}", user_id, control_id);
    match state.activate_control(user_id, &control_id).await {
        Ok(ack) => {
            tracing::info!("Vote recorded: {} -> {}", user_id, ack.candidate);
            let text = render::vote_ack(&ack);
            Reply::Private(ServerMessage::VoteAck { ack, text })
        }
        Err(e) => {
            match &e {
                PollError::InvalidIndex | PollError::NotLocked => {
                    tracing::warn!("Stale or invalid control {} from {}", control_id, user_id)
                }
                _ => tracing::debug!("Vote rejected for {}: {}", user_id, e),
            }
            Reply::Private(ServerMessage::from(&e))
        }
    }
}

pub async fn handle_results(state: &Arc<PollState>) -> Reply {
    let entries = state.tally().await;
    let text = render::results(&entries);
    Reply::Channel(ServerMessage::Results { entries, text })
}

pub async fn handle_reset(state: &Arc<PollState>, user_id: &str) -> Reply {
    tracing::info!("{} resetting the poll", user_id);
    match state.reset().await {
        Ok(()) => Reply::Channel(ServerMessage::Reply {
            text: "The voting poll has been reset. You can now add new movies.".to_string(),
        }),
        Err(e) => {
            tracing::info!("Reset rejected: {}", e);
            Reply::Channel(ServerMessage::from(&e))
        }
    }
}
