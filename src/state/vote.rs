use super::{PollData, PollState};
use crate::error::PollError;
use crate::types::*;

/// Resolve a control id against the surface it must belong to
fn resolve_control(surface_id: Option<&str>, control_id: &str) -> Option<CandidateIndex> {
    let (surface, index) = control_id.rsplit_once(':')?;
    if Some(surface) != surface_id {
        return None;
    }
    index.parse().ok()
}

fn record_vote(
    poll: &mut PollData,
    user_id: &str,
    index: CandidateIndex,
) -> Result<VoteAck, PollError> {
    let candidate = poll
        .candidates
        .get(index)
        .cloned()
        .ok_or(PollError::InvalidIndex)?;

    let current = poll.votes.get(user_id);
    if current.is_some_and(|votes| votes.contains(&index)) {
        return Err(PollError::AlreadyVoted);
    }

    let cap = poll.vote_cap;
    let used = current.map_or(0, |votes| votes.len());
    if used >= cap as usize {
        return Err(PollError::VoteCapExceeded { cap });
    }

    poll.votes
        .entry(user_id.to_string())
        .or_default()
        .insert(index);
    poll.touch();

    Ok(VoteAck {
        candidate,
        index,
        remaining: cap.saturating_sub(used as u32 + 1),
    })
}

impl PollState {
    /// Record a vote for the candidate at `index`
    pub async fn cast_vote(
        &self,
        user_id: &str,
        index: CandidateIndex,
    ) -> Result<VoteAck, PollError> {
        let mut poll = self.poll.write().await;
        if !poll.locked {
            return Err(PollError::NotLocked);
        }
        record_vote(&mut poll, user_id, index)
    }

    /// Record a vote from a voting-surface control activation
    pub async fn activate_control(
        &self,
        user_id: &str,
        control_id: &str,
    ) -> Result<VoteAck, PollError> {
        let mut poll = self.poll.write().await;
        if !poll.locked {
            return Err(PollError::NotLocked);
        }
        let index = resolve_control(poll.surface_id.as_deref(), control_id)
            .ok_or(PollError::InvalidIndex)?;
        record_vote(&mut poll, user_id, index)
    }

    /// Vote counts per candidate, highest first; ties keep list order
    pub async fn tally(&self) -> Vec<TallyEntry> {
        let poll = self.poll.read().await;

        let mut counts = vec![0u32; poll.candidates.len()];
        for &index in poll.votes.values().flatten() {
            if let Some(count) = counts.get_mut(index) {
                *count += 1;
            }
        }

        let mut entries: Vec<TallyEntry> = poll
            .candidates
            .iter()
            .zip(counts)
            .map(|(candidate, count)| TallyEntry {
                candidate: candidate.clone(),
                count,
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }

    /// Indices the user has voted for, ascending
    pub async fn votes_of(&self, user_id: &str) -> Vec<CandidateIndex> {
        self.poll
            .read()
            .await
            .votes
            .get(user_id)
            .map(|votes| votes.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn locked_poll(titles: &str) -> (PollState, VoteSurface) {
        let state = PollState::new();
        state.add_candidates(titles).await.unwrap();
        let surface = state.lock().await.unwrap();
        (state, surface)
    }

    #[test]
    fn test_resolve_control() {
        assert_eq!(resolve_control(Some("S1"), "S1:2"), Some(2));
        assert_eq!(resolve_control(Some("S1"), "S0:2"), None);
        assert_eq!(resolve_control(Some("S1"), "S1:x"), None);
        assert_eq!(resolve_control(Some("S1"), "2"), None);
        assert_eq!(resolve_control(None, "S1:2"), None);
    }

    #[tokio::test]
    async fn test_vote_before_lock_fails() {
        let state = PollState::new();
        state.add_candidates("Heat").await.unwrap();

        assert_eq!(state.cast_vote("u1", 0).await, Err(PollError::NotLocked));
        assert!(state.poll.read().await.votes.is_empty());
    }

    #[tokio::test]
    async fn test_vote_ack_names_candidate() {
        let (state, _) = locked_poll("Heat, Alien").await;

        let ack = state.cast_vote("u1", 1).await.unwrap();

        assert_eq!(ack.candidate, "Alien");
        assert_eq!(ack.index, 1);
        assert_eq!(ack.remaining, 2);
    }

    #[tokio::test]
    async fn test_vote_cap_enforcement() {
        let (state, _) = locked_poll("A, B, C, D").await;

        for index in 0..3 {
            assert!(state.cast_vote("u1", index).await.is_ok());
        }

        assert_eq!(
            state.cast_vote("u1", 3).await,
            Err(PollError::VoteCapExceeded { cap: 3 })
        );
        assert_eq!(state.cast_vote("u1", 0).await, Err(PollError::AlreadyVoted));
        assert_eq!(state.votes_of("u1").await, vec![0, 1, 2]);
        // Other users have their own budget
        assert!(state.cast_vote("u2", 3).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_index() {
        let (state, _) = locked_poll("Heat").await;

        assert_eq!(state.cast_vote("u1", 1).await, Err(PollError::InvalidIndex));
        assert!(state.votes_of("u1").await.is_empty());
        assert!(state.poll.read().await.votes.is_empty());
    }

    #[tokio::test]
    async fn test_cap_lowered_later_keeps_cast_votes() {
        let state = PollState::new();
        state.add_candidates("A, B, C").await.unwrap();
        state.lock().await.unwrap();
        state.cast_vote("u1", 0).await.unwrap();
        state.cast_vote("u1", 1).await.unwrap();
        {
            // Cap lowered directly; the public setter is gated on the lock
            state.poll.write().await.vote_cap = 1;
        }

        assert_eq!(
            state.cast_vote("u1", 2).await,
            Err(PollError::VoteCapExceeded { cap: 1 })
        );
        assert_eq!(state.votes_of("u1").await, vec![0, 1]);
    }

    #[tokio::test]
    async fn test_activate_control() {
        let (state, surface) = locked_poll("Heat, Alien").await;

        let ack = state
            .activate_control("u1", &surface.controls[1].control_id)
            .await
            .unwrap();

        assert_eq!(ack.candidate, "Alien");
        assert_eq!(state.votes_of("u1").await, vec![1]);
    }

    #[tokio::test]
    async fn test_control_from_previous_poll_is_rejected() {
        let (state, old_surface) = locked_poll("Heat, Alien").await;
        state.reset().await.unwrap();
        state.add_candidates("Jaws, Tron").await.unwrap();
        state.lock().await.unwrap();

        let result = state
            .activate_control("u1", &old_surface.controls[0].control_id)
            .await;

        assert_eq!(result, Err(PollError::InvalidIndex));
    }

    #[tokio::test]
    async fn test_tally_before_voting_is_zero() {
        let state = PollState::new();
        state.add_candidates("Heat, Alien").await.unwrap();

        let tally = state.tally().await;

        assert_eq!(tally.len(), 2);
        assert!(tally.iter().all(|e| e.count == 0));
        assert_eq!(tally[0].candidate, "Heat");
        assert!(!state.is_locked().await);
    }

    #[tokio::test]
    async fn test_tally_ranks_by_count() {
        let (state, _) = locked_poll("A, B, C").await;
        state.cast_vote("u1", 2).await.unwrap();
        state.cast_vote("u2", 2).await.unwrap();
        state.cast_vote("u2", 1).await.unwrap();

        let tally = state.tally().await;

        let ranked: Vec<_> = tally
            .iter()
            .map(|e| (e.candidate.as_str(), e.count))
            .collect();
        assert_eq!(ranked, vec![("C", 2), ("B", 1), ("A", 0)]);
    }

    #[tokio::test]
    async fn test_tally_ties_keep_list_order() {
        let (state, _) = locked_poll("X, Y").await;
        state.cast_vote("u1", 0).await.unwrap();
        state.cast_vote("u2", 0).await.unwrap();
        state.cast_vote("u2", 1).await.unwrap();
        state.cast_vote("u3", 1).await.unwrap();

        let tally = state.tally().await;

        assert_eq!(tally[0].candidate, "X");
        assert_eq!(tally[0].count, 2);
        assert_eq!(tally[1].candidate, "Y");
        assert_eq!(tally[1].count, 2);
    }
}
