//! Phase state machine: which stage a tournament is in and what may happen next.

use crate::models::{MatchPhase, MatchPlan, TournamentError, TournamentType};
use serde::{Deserialize, Serialize};

/// Completion flags of the three phases.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PhaseStatus {
    pub group_done: bool,
    pub semifinal_done: bool,
    pub final_done: bool,
}

/// Stage of a tournament, derived from its plan.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentPhase {
    /// No match plan generated yet.
    #[default]
    NoPlan,
    /// Group matches still being played.
    GroupPhase,
    /// Groups finished; semifinals pending or running.
    SemifinalPhase,
    /// Semifinals finished; final pending or running.
    FinalPhase,
    /// Nothing left to play.
    Complete,
}

/// A phase is completed when it has at least one match and all of them are completed
/// with both scores. A phase without matches is never completed.
pub fn is_phase_completed(plan: &MatchPlan, phase: MatchPhase) -> bool {
    let mut matches = plan.matches_in_phase(phase).peekable();
    matches.peek().is_some() && matches.all(|m| m.is_resolved())
}

pub fn evaluate_phase_status(plan: &MatchPlan) -> PhaseStatus {
    PhaseStatus {
        group_done: is_phase_completed(plan, MatchPhase::Group),
        semifinal_done: is_phase_completed(plan, MatchPhase::Semifinal),
        final_done: is_phase_completed(plan, MatchPhase::Final),
    }
}

impl TournamentPhase {
    /// Table tournaments end with the group phase; bracket tournaments with the final.
    pub fn evaluate(kind: TournamentType, plan: Option<&MatchPlan>) -> Self {
        let plan = match plan {
            Some(plan) if !plan.is_empty() => plan,
            _ => return TournamentPhase::NoPlan,
        };
        let status = evaluate_phase_status(plan);
        match kind {
            TournamentType::Table if status.group_done => TournamentPhase::Complete,
            TournamentType::Table => TournamentPhase::GroupPhase,
            TournamentType::Bracket if status.final_done => TournamentPhase::Complete,
            TournamentType::Bracket if status.semifinal_done => TournamentPhase::FinalPhase,
            TournamentType::Bracket if status.group_done => TournamentPhase::SemifinalPhase,
            TournamentType::Bracket => TournamentPhase::GroupPhase,
        }
    }
}

/// Check that the playoff `phase` may be created on top of `plan`.
///
/// Semifinals need a finished group phase, the final needs finished semifinals, and each
/// playoff phase is created once.
pub fn ensure_can_open(
    phase: MatchPhase,
    kind: TournamentType,
    plan: &MatchPlan,
) -> Result<(), TournamentError> {
    if kind != TournamentType::Bracket {
        return Err(TournamentError::NotABracketTournament);
    }
    let previous = match phase {
        MatchPhase::Group => return Err(TournamentError::MatchPlanExists),
        MatchPhase::Semifinal => MatchPhase::Group,
        MatchPhase::Final => MatchPhase::Semifinal,
    };
    if plan.matches_in_phase(phase).next().is_some() {
        return Err(TournamentError::PhaseAlreadyExists(phase));
    }
    if !is_phase_completed(plan, previous) {
        return Err(TournamentError::PhaseNotCompleted(previous));
    }
    Ok(())
}
