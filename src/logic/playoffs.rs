//! Playoffs: semifinals from the group tables, the final from the semifinal winners.

use crate::ids::IdGenerator;
use crate::logic::standings::{qualified_teams, QUALIFIERS_PER_GROUP};
use crate::models::{
    GameMatch, GroupLabel, MatchPhase, MatchPlan, MatchStatus, Round, Team, TeamId,
    TournamentError,
};

/// Build a playoff match; playoff matches start as soon as they exist.
fn playoff_match(
    ids: &mut dyn IdGenerator,
    home: TeamId,
    away: TeamId,
    phase: MatchPhase,
    group: Option<GroupLabel>,
) -> GameMatch {
    let mut game = GameMatch::new(ids.next_id(), home, away);
    game.phase = phase;
    game.status = MatchStatus::InProgress;
    game.group = group;
    game
}

/// Put `matches` into one new round after everything in `existing`.
fn next_round(existing: &[GameMatch], mut matches: Vec<GameMatch>) -> MatchPlan {
    let round_number = existing.iter().map(|m| m.round_number).max().unwrap_or(0) + 1;
    let first_number = existing.iter().map(|m| m.match_number).max().unwrap_or(0) + 1;
    for (i, game) in matches.iter_mut().enumerate() {
        game.round_number = round_number;
        game.match_number = first_number + i as u32;
        game.match_in_round = i as u32 + 1;
    }
    MatchPlan::from_rounds(vec![Round::new(round_number, matches)])
}

/// One semifinal per group: the group winner at home against the runner-up.
pub fn generate_semifinal_pairing(
    teams: &[Team],
    existing: &[GameMatch],
    ids: &mut dyn IdGenerator,
) -> Result<MatchPlan, TournamentError> {
    let group_a = qualified_teams(teams, GroupLabel::A);
    let group_b = qualified_teams(teams, GroupLabel::B);
    if group_a.len() < QUALIFIERS_PER_GROUP || group_b.len() < QUALIFIERS_PER_GROUP {
        return Err(TournamentError::NotEnoughQualifiedTeams);
    }

    let matches = vec![
        playoff_match(
            ids,
            group_a[0].id,
            group_a[1].id,
            MatchPhase::Semifinal,
            Some(GroupLabel::A),
        ),
        playoff_match(
            ids,
            group_b[0].id,
            group_b[1].id,
            MatchPhase::Semifinal,
            Some(GroupLabel::B),
        ),
    ];
    Ok(next_round(existing, matches))
}

/// Winner of the resolved semifinal of `group`.
fn semifinal_winner(existing: &[GameMatch], group: GroupLabel) -> Option<TeamId> {
    existing
        .iter()
        .filter(|m| m.phase == MatchPhase::Semifinal && m.group == Some(group))
        .find_map(|m| m.winner())
}

/// The final: winner of semifinal A at home against the winner of semifinal B.
pub fn generate_final_pairing(
    existing: &[GameMatch],
    teams: &[Team],
    ids: &mut dyn IdGenerator,
) -> Result<MatchPlan, TournamentError> {
    let home = semifinal_winner(existing, GroupLabel::A)
        .ok_or(TournamentError::SemifinalUndecided(GroupLabel::A))?;
    let away = semifinal_winner(existing, GroupLabel::B)
        .ok_or(TournamentError::SemifinalUndecided(GroupLabel::B))?;
    for id in [home, away] {
        if !teams.iter().any(|t| t.id == id) {
            return Err(TournamentError::TeamNotFound(id));
        }
    }

    let matches = vec![playoff_match(ids, home, away, MatchPhase::Final, None)];
    Ok(next_round(existing, matches))
}

/// Winner of the completed final.
pub fn tournament_winner(plan: &MatchPlan) -> Option<TeamId> {
    plan.matches_in_phase(MatchPhase::Final).find_map(|m| m.winner())
}
