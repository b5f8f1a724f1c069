use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A chat line as typed by the user
    Command { text: String },
    /// A vote control on the voting surface was pressed
    Activate { control_id: ControlId },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        user_id: UserId,
        poll: PollSnapshot,
        server_now: String,
    },
    /// Plain channel reply
    Reply {
        text: String,
    },
    VotingOpened {
        surface: VoteSurface,
        text: String,
    },
    Results {
        entries: Vec<TallyEntry>,
        text: String,
    },
    /// Sent only to the voter
    VoteAck {
        #[serde(flatten)]
        ack: VoteAck,
        text: String,
    },
    /// Periodic tally push while voting is open
    LiveTally {
        entries: Vec<TallyEntry>,
        revision: u64,
    },
    Error {
        code: String,
        msg: String,
    },
}

impl ServerMessage {
    pub fn error(code: &str, msg: impl Into<String>) -> Self {
        ServerMessage::Error {
            code: code.to_string(),
            msg: msg.into(),
        }
    }
}

impl From<&crate::error::PollError> for ServerMessage {
    fn from(err: &crate::error::PollError) -> Self {
        ServerMessage::error(err.code(), err.to_string())
    }
}
