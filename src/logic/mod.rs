//! Tournament business logic: scheduling, standings, rounds, phases and playoffs.

mod groups;
mod pairing;
mod phase;
mod playoffs;
mod rounds;
mod scheduler;
mod standings;

pub use groups::{
    generate_bracket_plan, schedule_groups, split_into_groups, GroupSplit, MIN_BRACKET_TEAMS,
    MIN_GROUP_SIZE,
};
pub use pairing::round_robin_pairs;
pub use phase::{
    ensure_can_open, evaluate_phase_status, is_phase_completed, PhaseStatus, TournamentPhase,
};
pub use playoffs::{generate_final_pairing, generate_semifinal_pairing, tournament_winner};
pub use rounds::{advance_round, current_round, upcoming_rounds};
pub use scheduler::{generate_group_plan, schedule_round_robin, DEFAULT_MAX_PARALLEL_GAMES};
pub use standings::{
    apply_match_result, compare_standings, compute_standings, qualified_teams, standings_table,
    StandingsRow, POINTS_FOR_DRAW, POINTS_FOR_WIN, QUALIFIERS_PER_GROUP,
};
