//! Round scheduler: distributes round-robin pairings over rounds.
//!
//! Each round holds at most `max_parallel` matches and no team twice. Before a round is
//! filled the remaining pairings are ordered so that teams with the longest rest play
//! first:
//!
//! 1. Rest of a pairing = the smaller of its two teams' `round - last round played`,
//!    descending.
//! 2. Matches already scheduled for either team, ascending.
//! 3. Original pairing order.
//!
//! The round is then filled greedily in that order.

use crate::ids::IdGenerator;
use crate::logic::pairing::round_robin_pairs;
use crate::models::{GameMatch, GroupLabel, MatchPlan, Round, Team, TeamId};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

/// Matches per round when nothing else is configured.
pub const DEFAULT_MAX_PARALLEL_GAMES: usize = 2;

/// Round-robin plan for a table tournament. Fewer than two teams give an empty plan.
pub fn generate_group_plan(
    teams: &[Team],
    max_parallel: usize,
    ids: &mut dyn IdGenerator,
) -> MatchPlan {
    let team_ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    schedule_round_robin(&team_ids, max_parallel, None, ids)
}

/// Schedule every pairing of `team_ids` into rounds, tagging matches with `group`.
///
/// A limit of zero is treated as one.
pub fn schedule_round_robin(
    team_ids: &[TeamId],
    max_parallel: usize,
    group: Option<GroupLabel>,
    ids: &mut dyn IdGenerator,
) -> MatchPlan {
    let mut remaining = round_robin_pairs(team_ids);
    if remaining.is_empty() {
        return MatchPlan::empty();
    }
    let max_parallel = max_parallel.max(1);

    // Scoped to this call: 0 means "has not played yet".
    let mut last_round: HashMap<TeamId, u32> = team_ids.iter().map(|&id| (id, 0)).collect();
    let mut scheduled: HashMap<TeamId, u32> = HashMap::new();
    let mut rounds: Vec<Round> = Vec::new();
    let mut match_number = 1;

    while !remaining.is_empty() {
        let round_number = rounds.len() as u32 + 1;
        let order = priority_order(&remaining, round_number, &last_round, &scheduled);

        let mut used: HashSet<TeamId> = HashSet::new();
        let mut accepted: Vec<usize> = Vec::new();
        for i in order {
            if accepted.len() >= max_parallel {
                break;
            }
            let (home, away) = remaining[i];
            if used.contains(&home) || used.contains(&away) {
                continue;
            }
            used.insert(home);
            used.insert(away);
            accepted.push(i);
        }

        if accepted.is_empty() {
            log::warn!(
                "Round {} could not be filled, forcing the next pairing into its own round",
                round_number
            );
            accepted.push(0);
        }

        let mut matches = Vec::with_capacity(accepted.len());
        for (position, &i) in accepted.iter().enumerate() {
            let (home, away) = remaining[i];
            let mut game = GameMatch::new(ids.next_id(), home, away);
            game.group = group;
            game.round_number = round_number;
            game.match_number = match_number;
            game.match_in_round = position as u32 + 1;
            match_number += 1;

            for team in [home, away] {
                last_round.insert(team, round_number);
                *scheduled.entry(team).or_insert(0) += 1;
            }
            matches.push(game);
        }

        let taken: HashSet<usize> = accepted.into_iter().collect();
        remaining = remaining
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !taken.contains(i))
            .map(|(_, pair)| pair)
            .collect();

        log::debug!(
            "Round {}{}: {} match(es)",
            round_number,
            group.map(|g| format!(" (group {g})")).unwrap_or_default(),
            matches.len()
        );
        rounds.push(Round::new(round_number, matches));
    }

    MatchPlan::from_rounds(rounds)
}

/// Indices of `remaining` in the order the round should try them.
fn priority_order(
    remaining: &[(TeamId, TeamId)],
    round_number: u32,
    last_round: &HashMap<TeamId, u32>,
    scheduled: &HashMap<TeamId, u32>,
) -> Vec<usize> {
    let rest = |team: TeamId| round_number - last_round.get(&team).copied().unwrap_or(0);
    let games = |team: TeamId| scheduled.get(&team).copied().unwrap_or(0);

    let mut order: Vec<usize> = (0..remaining.len()).collect();
    // Stable: equal keys keep pairing order.
    order.sort_by_key(|&i| {
        let (home, away) = remaining[i];
        (Reverse(rest(home).min(rest(away))), games(home) + games(away))
    });
    order
}
