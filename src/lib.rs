//! Amateur sports tournament organizer: library with models and business logic.
//!
//! Teams play a round-robin group phase; bracket tournaments split into two groups and
//! continue with semifinals and a final.

pub mod config;
pub mod ids;
pub mod logic;
pub mod models;

pub use config::{EngineConfig, ServerConfig};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use logic::{
    advance_round, apply_match_result, compute_standings, current_round, evaluate_phase_status,
    generate_bracket_plan, generate_final_pairing, generate_group_plan,
    generate_semifinal_pairing, qualified_teams, round_robin_pairs, split_into_groups,
    standings_table, tournament_winner, upcoming_rounds, PhaseStatus, StandingsRow,
    TournamentPhase, DEFAULT_MAX_PARALLEL_GAMES,
};
pub use models::{
    GameMatch, GroupLabel, MatchId, MatchPhase, MatchPlan, MatchStatus, PlanSummary, Round,
    Team, TeamId, TeamStats, Tournament, TournamentError, TournamentId, TournamentType,
};
