use crate::protocol::ServerMessage;
use crate::state::PollState;
use std::sync::Arc;
use std::time::Duration;

/// Build a live tally if voting is open and something changed since `last_revision`
pub async fn next_live_tally(
    state: &PollState,
    last_revision: &mut Option<u64>,
) -> Option<ServerMessage> {
    if !state.is_locked().await {
        return None;
    }

    let revision = state.revision().await;
    if *last_revision == Some(revision) {
        return None;
    }
    *last_revision = Some(revision);

    Some(ServerMessage::LiveTally {
        entries: state.tally().await,
        revision,
    })
}

/// Spawn a background task that broadcasts vote counts to all clients while voting is open
pub fn spawn_tally_broadcaster(state: Arc<PollState>, interval: Duration) {
    tokio::spawn(async move {
        let mut last_revision = None;

        loop {
            tokio::time::sleep(interval).await;

            if let Some(msg) = next_live_tally(&state, &mut last_revision).await {
                // Ignore send errors (no receivers connected is fine)
                state.broadcast_to_all(msg);
            }
        }
    });
}
