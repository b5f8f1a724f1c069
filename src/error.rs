use thiserror::Error;

/// Expected, user-facing failures of poll operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("Movie addition is locked!")]
    Locked,
    #[error("Voting is not currently locked.")]
    NotLocked,
    #[error("Nothing to vote on!")]
    NothingToVote,
    #[error("You already voted for this!")]
    AlreadyVoted,
    #[error("You can only vote {cap} times!")]
    VoteCapExceeded { cap: u32 },
    #[error("That vote option does not exist.")]
    InvalidIndex,
    #[error("'{0}' is not in the list.")]
    NotFound(String),
    #[error("'{0}' is not a valid non-negative integer.")]
    InvalidValue(String),
}

impl PollError {
    /// Stable code sent over the wire
    pub fn code(&self) -> &'static str {
        match self {
            PollError::Locked => "LOCKED",
            PollError::NotLocked => "NOT_LOCKED",
            PollError::NothingToVote => "NOTHING_TO_VOTE",
            PollError::AlreadyVoted => "ALREADY_VOTED",
            PollError::VoteCapExceeded { .. } => "VOTE_CAP_EXCEEDED",
            PollError::InvalidIndex => "INVALID_INDEX",
            PollError::NotFound(_) => "NOT_FOUND",
            PollError::InvalidValue(_) => "INVALID_VALUE",
        }
    }
}
