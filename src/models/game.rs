//! Match (game), its phase and status.

use crate::models::team::{GroupLabel, TeamId};
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Stage of the tournament this match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    Group,
    Semifinal,
    Final,
}

impl MatchPhase {
    /// Playoff matches must produce a winner.
    pub fn is_playoff(self) -> bool {
        !matches!(self, MatchPhase::Group)
    }
}

impl std::fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchPhase::Group => write!(f, "group"),
            MatchPhase::Semifinal => write!(f, "semifinal"),
            MatchPhase::Final => write!(f, "final"),
        }
    }
}

/// Lifecycle of a single match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
}

/// A single match between a home and an away team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    /// None if not yet played.
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub phase: MatchPhase,
    pub status: MatchStatus,
    /// None for the cross-group final.
    pub group: Option<GroupLabel>,
    pub round_number: u32,
    /// Tournament-wide sequence, stable once generated.
    pub match_number: u32,
    /// 1-based position within the round.
    pub match_in_round: u32,
}

impl GameMatch {
    /// Create an unplayed, scheduled group-phase match. Numbering is stamped by the scheduler.
    pub fn new(id: MatchId, home_team_id: TeamId, away_team_id: TeamId) -> Self {
        Self {
            id,
            home_team_id,
            away_team_id,
            home_score: None,
            away_score: None,
            phase: MatchPhase::Group,
            status: MatchStatus::Scheduled,
            group: None,
            round_number: 0,
            match_number: 0,
            match_in_round: 0,
        }
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    pub fn has_scores(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }

    /// Completed with both scores present.
    pub fn is_resolved(&self) -> bool {
        self.status == MatchStatus::Completed && self.has_scores()
    }

    /// Both scores, if entered.
    pub fn score(&self) -> Option<(u32, u32)> {
        Some((self.home_score?, self.away_score?))
    }

    /// Team with the higher score of a resolved match; None for draws and unplayed matches.
    pub fn winner(&self) -> Option<TeamId> {
        if !self.is_resolved() {
            return None;
        }
        let (home, away) = self.score()?;
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => Some(self.home_team_id),
            std::cmp::Ordering::Less => Some(self.away_team_id),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Move a scheduled match to in progress. Starting a running match is a no-op.
    pub fn start(&mut self) -> Result<(), TournamentError> {
        match self.status {
            MatchStatus::Scheduled => {
                self.status = MatchStatus::InProgress;
                Ok(())
            }
            MatchStatus::InProgress => Ok(()),
            MatchStatus::Completed => Err(TournamentError::MatchAlreadyCompleted(self.id)),
        }
    }

    /// Enter the result of a running match.
    ///
    /// Scheduled matches have not started yet and completed ones are frozen. Playoff
    /// matches reject draws.
    pub fn set_score(&mut self, home: u32, away: u32) -> Result<(), TournamentError> {
        match self.status {
            MatchStatus::Scheduled => return Err(TournamentError::MatchNotStarted(self.id)),
            MatchStatus::Completed => return Err(TournamentError::MatchAlreadyCompleted(self.id)),
            MatchStatus::InProgress => {}
        }
        if self.phase.is_playoff() && home == away {
            return Err(TournamentError::DrawNotAllowed(self.phase));
        }
        self.home_score = Some(home);
        self.away_score = Some(away);
        Ok(())
    }

    /// Mark the match completed; both scores must be set.
    pub fn complete(&mut self) -> Result<(), TournamentError> {
        if self.status == MatchStatus::Completed {
            return Err(TournamentError::MatchAlreadyCompleted(self.id));
        }
        if !self.has_scores() {
            return Err(TournamentError::MissingScores(self.id));
        }
        self.status = MatchStatus::Completed;
        Ok(())
    }
}
