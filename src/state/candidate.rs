use super::PollState;
use crate::error::PollError;
use crate::types::*;

/// Leading articles ignored when comparing titles
const ARTICLES: [&str; 3] = ["the ", "a ", "an "];

/// Lowercase and drop a leading article so "The Inception" compares like "Inception"
fn comparison_key(title: &str) -> String {
    let lower = title.trim().to_lowercase();
    for article in ARTICLES {
        if let Some(rest) = lower.strip_prefix(article) {
            let rest = rest.trim_start();
            if !rest.is_empty() {
                return rest.to_string();
            }
        }
    }
    lower
}

impl PollState {
    /// Add comma-separated titles, skipping fuzzy duplicates.
    ///
    /// Fragments are processed left to right; a fragment added earlier in the
    /// same call is compared against later ones, a skipped one is not.
    pub async fn add_candidates(&self, raw: &str) -> Result<AddOutcome, PollError> {
        let mut poll = self.poll.write().await;
        if poll.locked {
            return Err(PollError::Locked);
        }

        let mut outcome = AddOutcome::default();
        for fragment in raw.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            let key = comparison_key(fragment);
            let collision = poll
                .candidates
                .iter()
                .find(|existing| {
                    self.similarity.score(&key, &comparison_key(existing))
                        > self.config.duplicate_threshold
                })
                .cloned();

            match collision {
                Some(existing) => outcome.skipped.push(SkippedCandidate {
                    title: fragment.to_string(),
                    similar_to: existing,
                }),
                None => {
                    poll.candidates.push(fragment.to_string());
                    outcome.added.push(fragment.to_string());
                }
            }
        }

        if !outcome.added.is_empty() {
            poll.touch();
        }
        Ok(outcome)
    }

    /// Current candidate list in insertion order
    pub async fn candidates(&self) -> Vec<String> {
        self.poll.read().await.candidates.clone()
    }

    /// Remove a title (case-insensitive exact match) and reindex every vote-set
    pub async fn remove_candidate(&self, name: &str) -> Result<String, PollError> {
        let mut poll = self.poll.write().await;
        if poll.locked {
            return Err(PollError::Locked);
        }

        let wanted = name.trim().to_lowercase();
        let index = poll
            .candidates
            .iter()
            .position(|c| c.to_lowercase() == wanted)
            .ok_or_else(|| PollError::NotFound(name.trim().to_string()))?;

        let removed = poll.candidates.remove(index);
        for user_votes in poll.votes.values_mut() {
            *user_votes = user_votes
                .iter()
                .filter(|&&i| i != index)
                .map(|&i| if i > index { i - 1 } else { i })
                .collect();
        }
        poll.votes.retain(|_, v| !v.is_empty());
        poll.touch();

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PollConfig;
    use crate::similarity::Similarity;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    /// Treats strings as duplicates only when they share a first letter
    struct FirstLetter;

    impl Similarity for FirstLetter {
        fn score(&self, a: &str, b: &str) -> u8 {
            if a.chars().next() == b.chars().next() {
                100
            } else {
                0
            }
        }
    }

    #[test]
    fn test_comparison_key() {
        assert_eq!(comparison_key("  The Inception "), "inception");
        assert_eq!(comparison_key("An American Tail"), "american tail");
        assert_eq!(comparison_key("Alien"), "alien");
        assert_eq!(comparison_key("The"), "the");
    }

    #[tokio::test]
    async fn test_add_splits_and_trims() {
        let state = PollState::new();
        let outcome = state
            .add_candidates(" Heat ,, Alien,  ,Jaws ")
            .await
            .unwrap();

        assert_eq!(outcome.added, vec!["Heat", "Alien", "Jaws"]);
        assert!(outcome.skipped.is_empty());
        assert_eq!(state.candidates().await, vec!["Heat", "Alien", "Jaws"]);
    }

    #[tokio::test]
    async fn test_add_skips_near_duplicates() {
        let state = PollState::new();
        let outcome = state
            .add_candidates("Inception, The Inception")
            .await
            .unwrap();

        assert_eq!(outcome.added, vec!["Inception"]);
        assert_eq!(
            outcome.skipped,
            vec![SkippedCandidate {
                title: "The Inception".to_string(),
                similar_to: "Inception".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_add_duplicate_check_is_case_insensitive() {
        let state = PollState::new();
        state.add_candidates("The Matrix").await.unwrap();
        let outcome = state.add_candidates("the matrix").await.unwrap();

        assert!(outcome.added.is_empty());
        assert_eq!(outcome.skipped[0].similar_to, "The Matrix");
    }

    #[tokio::test]
    async fn test_add_keeps_distinct_sequels() {
        let state = PollState::new();
        let outcome = state
            .add_candidates("Alien, Aliens, Alien 3")
            .await
            .unwrap();

        assert_eq!(outcome.added, vec!["Alien", "Aliens", "Alien 3"]);
    }

    #[tokio::test]
    async fn test_skipped_fragments_are_not_comparison_targets() {
        let config = PollConfig::default();
        let state = PollState::with_similarity(&config, Arc::new(FirstLetter));
        state.add_candidates("Heat").await.unwrap();

        // "Hook" collides with "Heat"; "Alien" is added and then blocks "Aliens"
        let outcome = state.add_candidates("Hook, Alien, Aliens").await.unwrap();

        assert_eq!(outcome.added, vec!["Alien"]);
        assert_eq!(outcome.skipped.len(), 2);
        assert_eq!(outcome.skipped[0].similar_to, "Heat");
        assert_eq!(outcome.skipped[1].similar_to, "Alien");
    }

    #[tokio::test]
    async fn test_add_rejected_while_locked() {
        let state = PollState::new();
        state.add_candidates("Heat").await.unwrap();
        state.lock().await.unwrap();

        let result = state.add_candidates("Alien").await;

        assert_eq!(result, Err(PollError::Locked));
        assert_eq!(state.candidates().await, vec!["Heat"]);
    }

    #[tokio::test]
    async fn test_remove_is_case_insensitive() {
        let state = PollState::new();
        state.add_candidates("Heat, Alien").await.unwrap();

        let removed = state.remove_candidate("  aLiEn ").await.unwrap();

        assert_eq!(removed, "Alien");
        assert_eq!(state.candidates().await, vec!["Heat"]);
    }

    #[tokio::test]
    async fn test_remove_unknown_title() {
        let state = PollState::new();
        state.add_candidates("Heat").await.unwrap();
        let before = state.revision().await;

        let result = state.remove_candidate("Alien").await;

        assert_eq!(result, Err(PollError::NotFound("Alien".to_string())));
        assert_eq!(state.candidates().await, vec!["Heat"]);
        assert_eq!(state.revision().await, before);
    }

    #[tokio::test]
    async fn test_remove_rejected_while_locked() {
        let state = PollState::new();
        state.add_candidates("Heat").await.unwrap();
        state.lock().await.unwrap();

        assert_eq!(state.remove_candidate("Heat").await, Err(PollError::Locked));
    }

    #[tokio::test]
    async fn test_remove_reindexes_votes() {
        let state = PollState::new();
        state.add_candidates("A, B, C").await.unwrap();
        {
            // Votes left over from an earlier locked phase
            let mut poll = state.poll.write().await;
            poll.votes.insert("u1".to_string(), BTreeSet::from([0, 2]));
            poll.votes.insert("u2".to_string(), BTreeSet::from([1]));
        }

        state.remove_candidate("B").await.unwrap();

        assert_eq!(state.candidates().await, vec!["A", "C"]);
        assert_eq!(state.votes_of("u1").await, vec![0, 1]);
        assert!(state.votes_of("u2").await.is_empty());

        let poll = state.poll.read().await;
        assert!(poll
            .votes
            .values()
            .flatten()
            .all(|&i| i < poll.candidates.len()));
    }
}
