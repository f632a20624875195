//! Round progression: which round is being played and what unlocks next.

use crate::models::{MatchId, MatchStatus, Round};

/// First round that still has unfinished matches.
pub fn current_round(rounds: &[Round]) -> Option<&Round> {
    rounds.iter().find(|r| !r.is_complete())
}

/// Rounds after the current one that still hold scheduled matches.
pub fn upcoming_rounds(rounds: &[Round]) -> Vec<&Round> {
    let current = current_round(rounds).map(|r| r.round_number).unwrap_or(0);
    rounds
        .iter()
        .filter(|r| r.round_number > current && r.has_scheduled_matches())
        .collect()
}

/// Scheduled matches of the round after `current`, to be started once `current` is complete.
///
/// Empty while `current` still has unfinished matches or when it is the last round.
pub fn advance_round(current: &Round, rounds: &[Round]) -> Vec<MatchId> {
    if !current.is_complete() {
        return Vec::new();
    }
    rounds
        .iter()
        .find(|r| r.round_number == current.round_number + 1)
        .map(|next| {
            next.matches
                .iter()
                .filter(|m| m.status == MatchStatus::Scheduled)
                .map(|m| m.id)
                .collect()
        })
        .unwrap_or_default()
}
