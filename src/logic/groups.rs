//! Group splitter for bracket tournaments: two round-robin groups played side by side.

use crate::ids::IdGenerator;
use crate::logic::scheduler::schedule_round_robin;
use crate::models::{GroupLabel, MatchPlan, Round, Team, TeamId};

/// Fewest teams a bracket tournament can start with.
pub const MIN_BRACKET_TEAMS: usize = 8;
/// Fewest teams per group.
pub const MIN_GROUP_SIZE: usize = 4;

/// Team ids of the two groups.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroupSplit {
    pub group_a: Vec<TeamId>,
    pub group_b: Vec<TeamId>,
}

impl GroupSplit {
    pub fn group_of(&self, team_id: TeamId) -> Option<GroupLabel> {
        if self.group_a.contains(&team_id) {
            Some(GroupLabel::A)
        } else if self.group_b.contains(&team_id) {
            Some(GroupLabel::B)
        } else {
            None
        }
    }
}

/// First half (rounded up) goes to group A, the rest to group B.
///
/// None when there are fewer than 8 teams, an odd count, or a group under 4 teams.
pub fn split_into_groups(teams: &[Team]) -> Option<GroupSplit> {
    let n = teams.len();
    if n < MIN_BRACKET_TEAMS || n % 2 != 0 {
        return None;
    }
    let half = n.div_ceil(2);
    let group_a: Vec<TeamId> = teams[..half].iter().map(|t| t.id).collect();
    let group_b: Vec<TeamId> = teams[half..].iter().map(|t| t.id).collect();
    if group_a.len() < MIN_GROUP_SIZE || group_b.len() < MIN_GROUP_SIZE {
        return None;
    }
    Some(GroupSplit { group_a, group_b })
}

/// Group-phase plan for a bracket tournament; empty when the team list is not eligible.
pub fn generate_bracket_plan(
    teams: &[Team],
    max_parallel: usize,
    ids: &mut dyn IdGenerator,
) -> MatchPlan {
    match split_into_groups(teams) {
        Some(split) => schedule_groups(&split, max_parallel, ids),
        None => MatchPlan::empty(),
    }
}

/// Schedule both groups and merge round i of A with round i of B.
///
/// Rounds are renumbered from 1 and match numbers reassigned in combined order.
pub fn schedule_groups(
    split: &GroupSplit,
    max_parallel: usize,
    ids: &mut dyn IdGenerator,
) -> MatchPlan {
    let plan_a = schedule_round_robin(&split.group_a, max_parallel, Some(GroupLabel::A), ids);
    let plan_b = schedule_round_robin(&split.group_b, max_parallel, Some(GroupLabel::B), ids);

    let round_count = plan_a.total_rounds().max(plan_b.total_rounds());
    let mut rounds_a = plan_a.rounds.into_iter();
    let mut rounds_b = plan_b.rounds.into_iter();
    let mut rounds = Vec::with_capacity(round_count);
    let mut match_number = 1;

    for index in 0..round_count {
        let round_number = index as u32 + 1;
        let mut matches = Vec::new();
        for round in [rounds_a.next(), rounds_b.next()].into_iter().flatten() {
            matches.extend(round.matches);
        }
        for (position, game) in matches.iter_mut().enumerate() {
            game.round_number = round_number;
            game.match_number = match_number;
            game.match_in_round = position as u32 + 1;
            match_number += 1;
        }
        rounds.push(Round::new(round_number, matches));
    }

    MatchPlan::from_rounds(rounds)
}
