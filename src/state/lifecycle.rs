use super::PollState;
use crate::error::PollError;
use crate::types::*;

impl PollState {
    /// Freeze the list and produce the voting surface.
    ///
    /// The lock flag flips even when there is nothing to vote on. Locking an
    /// already locked poll rebuilds the surface under the same id and keeps
    /// every cast vote.
    pub async fn lock(&self) -> Result<VoteSurface, PollError> {
        let mut poll = self.poll.write().await;
        if !poll.locked {
            poll.locked = true;
            poll.touch();
        }

        if poll.candidates.is_empty() {
            return Err(PollError::NothingToVote);
        }

        let surface_id = poll
            .surface_id
            .get_or_insert_with(|| ulid::Ulid::new().to_string())
            .clone();
        let controls = poll
            .candidates
            .iter()
            .enumerate()
            .map(|(index, title)| VoteControl {
                control_id: VoteSurface::control_id(&surface_id, index),
                index,
                label: title.clone(),
            })
            .collect();

        Ok(VoteSurface {
            surface_id,
            controls,
        })
    }

    /// Clear candidates and votes and reopen the list
    pub async fn reset(&self) -> Result<(), PollError> {
        let mut poll = self.poll.write().await;
        if !poll.locked {
            return Err(PollError::NotLocked);
        }

        poll.candidates.clear();
        poll.votes.clear();
        poll.surface_id = None;
        poll.locked = false;
        poll.touch();
        Ok(())
    }

    /// Replace the per-user vote cap. Existing vote-sets are left as they are.
    pub async fn set_vote_cap(&self, raw: &str) -> Result<u32, PollError> {
        let mut poll = self.poll.write().await;
        if poll.locked {
            return Err(PollError::Locked);
        }

        let raw = raw.trim();
        let cap = raw
            .parse::<u32>()
            .map_err(|_| PollError::InvalidValue(raw.to_string()))?;

        poll.vote_cap = cap;
        poll.touch();
        Ok(cap)
    }
}
