use serde::{Deserialize, Serialize};

/// Opaque ID types for readability
pub type UserId = String;
pub type SurfaceId = String;
pub type ControlId = String;
pub type CandidateIndex = usize;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PollPhase {
    /// Accepting candidates
    Open,
    /// Accepting votes
    Locked,
}

/// A fragment that was not added because it collides with an existing title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedCandidate {
    pub title: String,
    pub similar_to: String,
}

/// Partition of an `add` call into added and skipped titles
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddOutcome {
    pub added: Vec<String>,
    pub skipped: Vec<SkippedCandidate>,
}

impl AddOutcome {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.skipped.is_empty()
    }
}

/// One selectable control of the voting surface
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteControl {
    pub control_id: ControlId,
    pub index: CandidateIndex,
    pub label: String,
}

/// Controls generated at lock time, one per candidate.
///
/// Stays valid until the poll is reset; activations are resolved against the
/// current state, not against this value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteSurface {
    pub surface_id: SurfaceId,
    pub controls: Vec<VoteControl>,
}

impl VoteSurface {
    pub fn control_id(surface_id: &str, index: CandidateIndex) -> ControlId {
        format!("{}:{}", surface_id, index)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteAck {
    pub candidate: String,
    pub index: CandidateIndex,
    /// Votes the user may still cast under the current cap
    pub remaining: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TallyEntry {
    pub candidate: String,
    pub count: u32,
}

/// Serializable view of the whole poll
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PollSnapshot {
    pub phase: PollPhase,
    pub candidates: Vec<String>,
    pub vote_cap: u32,
    pub voters: usize,
    pub surface_id: Option<SurfaceId>,
    pub revision: u64,
}
