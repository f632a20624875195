//! Data structures for a tournament: teams, matches, rounds and the match plan.

mod game;
mod plan;
mod team;
mod tournament;

pub use game::{GameMatch, MatchId, MatchPhase, MatchStatus};
pub use plan::{MatchPlan, PlanSummary, Round};
pub use team::{GroupLabel, Team, TeamId, TeamStats};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentType};
