//! User-facing reply text

use crate::command::CATALOGUE;
use crate::types::{AddOutcome, TallyEntry, VoteAck};

fn plural(count: u32, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

pub fn added(outcome: &AddOutcome) -> String {
    let mut lines = Vec::new();
    if !outcome.added.is_empty() {
        lines.push(format!("Added: {}", outcome.added.join(", ")));
    }
    for skipped in &outcome.skipped {
        lines.push(format!(
            "'{}' is too similar to '{}' already in the list!",
            skipped.title, skipped.similar_to
        ));
    }
    if lines.is_empty() {
        lines.push("Nothing to add.".to_string());
    }
    lines.join("\n")
}

pub fn candidates(list: &[String]) -> String {
    if list.is_empty() {
        return "The list is empty.".to_string();
    }
    let mut out = String::from("Current movies:");
    for (i, title) in list.iter().enumerate() {
        out.push_str(&format!("\n{}. {}", i + 1, title));
    }
    out
}

/// Ranked tally as a column-aligned table in a code block
pub fn results(entries: &[TallyEntry]) -> String {
    if entries.is_empty() {
        return "There is nothing to tally yet.".to_string();
    }

    let title_width = entries
        .iter()
        .map(|e| e.candidate.chars().count())
        .max()
        .unwrap_or(0);
    let count_width = entries
        .iter()
        .map(|e| e.count.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::from("Current vote tally:\n```");
    for entry in entries {
        let word = if entry.count == 1 { "vote" } else { "votes" };
        out.push_str(&format!(
            "\n{:<tw$} : {:>cw$} {}",
            entry.candidate,
            entry.count,
            word,
            tw = title_width,
            cw = count_width
        ));
    }
    out.push_str("\n```");
    out
}

pub fn vote_ack(ack: &VoteAck) -> String {
    format!(
        "Your vote for **{}** has been counted! ({} left)",
        ack.candidate,
        plural(ack.remaining, "vote")
    )
}

pub fn voting_opened(cap: u32) -> String {
    format!(
        "Voting is now open! Everyone can vote for up to {}.",
        plural(cap, "movie")
    )
}

pub fn help(prefix: &str) -> String {
    let mut out = String::from("MoviePoll commands:");
    for info in CATALOGUE {
        out.push_str(&format!("\n{}{} - {}", prefix, info.usage, info.description));
    }
    out
}
