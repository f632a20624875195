//! Round and MatchPlan: views over the generated matches.

use crate::models::game::{GameMatch, MatchId, MatchPhase, MatchStatus};
use serde::{Deserialize, Serialize};

/// Matches sharing a round number.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round_number: u32,
    pub matches: Vec<GameMatch>,
}

impl Round {
    pub fn new(round_number: u32, matches: Vec<GameMatch>) -> Self {
        Self {
            round_number,
            matches,
        }
    }

    /// All member matches are completed.
    pub fn is_complete(&self) -> bool {
        self.matches
            .iter()
            .all(|m| m.status == MatchStatus::Completed)
    }

    /// A round can be ended once something is running and every running match has a result.
    pub fn can_end(&self) -> bool {
        let mut running = self
            .matches
            .iter()
            .filter(|m| m.status == MatchStatus::InProgress)
            .peekable();
        running.peek().is_some() && running.all(|m| m.has_scores())
    }

    pub fn has_scheduled_matches(&self) -> bool {
        self.matches
            .iter()
            .any(|m| m.status == MatchStatus::Scheduled)
    }
}

/// The complete set of rounds for a tournament.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchPlan {
    pub rounds: Vec<Round>,
}

impl MatchPlan {
    /// An empty plan signals an ineligible team list.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_rounds(rounds: Vec<Round>) -> Self {
        Self { rounds }
    }

    /// Group loose matches into rounds by round number, ordered by round then position.
    pub fn from_matches(mut matches: Vec<GameMatch>) -> Self {
        matches.sort_by_key(|m| (m.round_number, m.match_in_round));
        let mut rounds: Vec<Round> = Vec::new();
        for m in matches {
            match rounds.last_mut() {
                Some(round) if round.round_number == m.round_number => round.matches.push(m),
                _ => rounds.push(Round::new(m.round_number, vec![m])),
            }
        }
        Self { rounds }
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.iter().all(|r| r.matches.is_empty())
    }

    pub fn total_matches(&self) -> usize {
        self.rounds.iter().map(|r| r.matches.len()).sum()
    }

    pub fn total_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn matches(&self) -> impl Iterator<Item = &GameMatch> {
        self.rounds.iter().flat_map(|r| r.matches.iter())
    }

    pub fn matches_in_phase(&self, phase: MatchPhase) -> impl Iterator<Item = &GameMatch> {
        self.matches().filter(move |m| m.phase == phase)
    }

    pub fn get_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches().find(|m| m.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.rounds
            .iter_mut()
            .flat_map(|r| r.matches.iter_mut())
            .find(|m| m.id == id)
    }

    pub fn round(&self, round_number: u32) -> Option<&Round> {
        self.rounds.iter().find(|r| r.round_number == round_number)
    }

    pub fn max_round_number(&self) -> u32 {
        self.rounds.iter().map(|r| r.round_number).max().unwrap_or(0)
    }

    pub fn max_match_number(&self) -> u32 {
        self.matches().map(|m| m.match_number).max().unwrap_or(0)
    }

    /// Append playoff rounds generated on top of this plan.
    pub fn extend(&mut self, other: MatchPlan) {
        self.rounds.extend(other.rounds);
    }

    /// Compact counts for API responses.
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            total_matches: self.total_matches(),
            total_rounds: self.total_rounds(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total_matches: usize,
    pub total_rounds: usize,
}
