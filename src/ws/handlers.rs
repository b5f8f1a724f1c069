//! WebSocket message dispatch
//!
//! This module provides the main entry point for handling client messages.
//! Chat lines are parsed into commands here, then dispatched to the list and
//! voting handler modules.

use crate::command::{self, Command};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::PollState;
use std::sync::Arc;

use super::{list, voting};

/// Where a handler's response goes
#[derive(Debug, Clone)]
pub enum Reply {
    /// Everyone connected sees it
    Channel(ServerMessage),
    /// Only the sender sees it
    Private(ServerMessage),
}

impl Reply {
    pub fn message(&self) -> &ServerMessage {
        match self {
            Reply::Channel(msg) | Reply::Private(msg) => msg,
        }
    }
}

/// Handle client messages and return optional response
pub async fn handle_message(
    msg: ClientMessage,
    user_id: &str,
    state: &Arc<PollState>,
) -> Option<Reply> {
    match msg {
        ClientMessage::Command { text } => {
            let command = match command::parse(&text, &state.config.prefix)? {
                Ok(command) => command,
                Err(e) => {
                    tracing::debug!("Rejected command from {}: {}", user_id, e);
                    return Some(Reply::Private(ServerMessage::error(
                        e.code(),
                        e.to_string(),
                    )));
                }
            };
            Some(handle_command(command, user_id, state).await)
        }

        ClientMessage::Activate { control_id } => {
            Some(voting::handle_activate(state, user_id, control_id).await)
        }
    }
}

async fn handle_command(command: Command, user_id: &str, state: &Arc<PollState>) -> Reply {
    match command {
        Command::Add(raw) => list::handle_add(state, user_id, raw).await,
        Command::Current => list::handle_current(state).await,
        Command::Remove(name) => list::handle_remove(state, user_id, name).await,
        Command::MaxVoteCount(raw) => list::handle_max_vote_count(state, user_id, raw).await,
        Command::Lock => voting::handle_lock(state, user_id).await,
        Command::Results => voting::handle_results(state).await,
        Command::Reset => voting::handle_reset(state, user_id).await,
        Command::Help => Reply::Channel(ServerMessage::Reply {
            text: crate::render::help(&state.config.prefix),
        }),
    }
}
