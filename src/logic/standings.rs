//! Standings: folding match results into team stats, and ranking teams.

use crate::models::{GameMatch, GroupLabel, MatchStatus, Team, TeamId, TeamStats, TournamentError};
use serde::Serialize;
use std::cmp::Ordering;

/// Points for a win.
pub const POINTS_FOR_WIN: u32 = 3;
/// Points for a draw.
pub const POINTS_FOR_DRAW: u32 = 1;
/// Teams per group that reach the semifinals.
pub const QUALIFIERS_PER_GROUP: usize = 2;

/// Stats of `team` after adding one completed match.
///
/// Purely additive: applying the same match twice counts it twice, so callers apply each
/// match exactly once, when it is completed.
pub fn apply_match_result(team: &Team, game: &GameMatch) -> Result<TeamStats, TournamentError> {
    if game.status != MatchStatus::Completed {
        return Err(TournamentError::MatchNotCompleted(game.id));
    }
    let (home_score, away_score) = game
        .score()
        .ok_or(TournamentError::MissingScores(game.id))?;
    let (goals_for, goals_against) = if game.home_team_id == team.id {
        (home_score, away_score)
    } else if game.away_team_id == team.id {
        (away_score, home_score)
    } else {
        return Err(TournamentError::TeamNotInMatch {
            team: team.id,
            game: game.id,
        });
    };

    let mut stats = team.stats.clone();
    match goals_for.cmp(&goals_against) {
        Ordering::Greater => {
            stats.points += POINTS_FOR_WIN;
            stats.wins += 1;
        }
        Ordering::Equal => {
            stats.points += POINTS_FOR_DRAW;
            stats.draws += 1;
        }
        Ordering::Less => stats.losses += 1,
    }
    stats.goals_for += goals_for;
    stats.goals_against += goals_against;
    stats.matches_played += 1;
    Ok(stats)
}

/// Points, then goal difference, then goals scored; all descending.
pub fn compare_standings(a: &TeamStats, b: &TeamStats) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
}

/// Teams of `group` (all teams for None) from best to worst. Exact ties keep input order.
pub fn compute_standings(teams: &[Team], group: Option<GroupLabel>) -> Vec<&Team> {
    let mut ranked: Vec<&Team> = teams
        .iter()
        .filter(|t| group.is_none() || t.group == group)
        .collect();
    ranked.sort_by(|a, b| compare_standings(&a.stats, &b.stats));
    ranked
}

/// The top two of a group.
pub fn qualified_teams(teams: &[Team], group: GroupLabel) -> Vec<&Team> {
    let mut ranked = compute_standings(teams, Some(group));
    ranked.truncate(QUALIFIERS_PER_GROUP);
    ranked
}

/// One line of a league table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StandingsRow {
    pub position: usize,
    pub team_id: TeamId,
    pub name: String,
    pub group: Option<GroupLabel>,
    pub stats: TeamStats,
    pub goal_difference: i64,
}

/// League table for display.
pub fn standings_table(teams: &[Team], group: Option<GroupLabel>) -> Vec<StandingsRow> {
    compute_standings(teams, group)
        .into_iter()
        .enumerate()
        .map(|(i, team)| StandingsRow {
            position: i + 1,
            team_id: team.id,
            name: team.name.clone(),
            group: team.group,
            stats: team.stats.clone(),
            goal_difference: team.stats.goal_difference(),
        })
        .collect()
}
