//! Integration tests for the tournament lifecycle: teams, plan generation, rounds, playoffs.

use chrono::NaiveDate;
use tournament_engine::{
    EngineConfig, GroupLabel, MatchId, MatchPhase, MatchStatus, SequentialIds, Tournament,
    TournamentError, TournamentPhase, TournamentType,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 13).unwrap()
}

fn tournament_with_teams(kind: TournamentType, n: usize) -> Tournament {
    let mut t = Tournament::new("Summer Cup", date(), kind);
    for i in 0..n {
        t.add_team(format!("Team {i}"), None, Vec::new()).unwrap();
    }
    t
}

fn running_matches(t: &Tournament) -> Vec<MatchId> {
    t.current_round()
        .map(|r| {
            r.matches
                .iter()
                .filter(|m| m.status == MatchStatus::InProgress)
                .map(|m| m.id)
                .collect()
        })
        .unwrap_or_default()
}

/// Score every running match of the current round and end it.
fn play_round(t: &mut Tournament, home: u32, away: u32) -> Vec<MatchId> {
    for id in running_matches(t) {
        t.record_score(id, home, away).unwrap();
    }
    t.end_round().unwrap()
}

#[test]
fn team_names_are_trimmed_and_unique() {
    let mut t = Tournament::new("Cup", date(), TournamentType::Table);
    let id = t
        .add_team(
            "  Lions ",
            Some(" Alex ".to_string()),
            vec!["Sam".to_string(), " ".to_string()],
        )
        .unwrap();
    let team = t.team(id).unwrap();
    assert_eq!(team.name, "Lions");
    assert_eq!(team.captain.as_deref(), Some("Alex"));
    assert_eq!(team.members, vec!["Sam".to_string()]);

    assert_eq!(
        t.add_team("LIONS", None, Vec::new()),
        Err(TournamentError::DuplicateTeamName)
    );
    assert_eq!(
        t.add_team("   ", None, Vec::new()),
        Err(TournamentError::InvalidTeamName)
    );
}

#[test]
fn teams_are_frozen_once_matches_exist() {
    let mut t = tournament_with_teams(TournamentType::Table, 3);
    t.generate_match_plan(&EngineConfig::default(), &mut SequentialIds::new())
        .unwrap();
    let first = t.teams[0].id;
    assert_eq!(
        t.add_team("Late", None, Vec::new()),
        Err(TournamentError::MatchPlanExists)
    );
    assert_eq!(t.remove_team(first), Err(TournamentError::MatchPlanExists));
    assert_eq!(
        t.generate_match_plan(&EngineConfig::default(), &mut SequentialIds::new()),
        Err(TournamentError::MatchPlanExists)
    );
}

#[test]
fn ineligible_team_lists_store_nothing() {
    let mut table = tournament_with_teams(TournamentType::Table, 1);
    assert_eq!(
        table.generate_match_plan(&EngineConfig::default(), &mut SequentialIds::new()),
        Err(TournamentError::NotEnoughTeams {
            required: 2,
            found: 1
        })
    );
    assert!(table.match_plan.is_none());

    let mut bracket = tournament_with_teams(TournamentType::Bracket, 6);
    assert_eq!(
        bracket.generate_match_plan(&EngineConfig::default(), &mut SequentialIds::new()),
        Err(TournamentError::NotEligibleForBracket { teams: 6 })
    );
    assert!(bracket.match_plan.is_none());
    assert_eq!(bracket.phase(), TournamentPhase::NoPlan);
}

#[test]
fn scores_need_a_running_match() {
    let mut t = tournament_with_teams(TournamentType::Table, 4);
    t.generate_match_plan(&EngineConfig::default(), &mut SequentialIds::new())
        .unwrap();
    let first = t.match_plan.as_ref().unwrap().rounds[0].matches[0].id;
    assert_eq!(
        t.record_score(first, 1, 0),
        Err(TournamentError::MatchNotStarted(first))
    );

    let started = t.kick_off().unwrap();
    assert_eq!(started.len(), 2);
    assert!(t.kick_off().unwrap().is_empty());
    t.record_score(first, 1, 0).unwrap();
    assert_eq!(t.get_match(first).unwrap().score(), Some((1, 0)));
}

#[test]
fn rounds_cannot_end_with_missing_scores() {
    let mut t = tournament_with_teams(TournamentType::Table, 4);
    t.generate_match_plan(&EngineConfig::default(), &mut SequentialIds::new())
        .unwrap();
    assert_eq!(t.end_round(), Err(TournamentError::IncompleteResults));

    t.kick_off().unwrap();
    let running = running_matches(&t);
    t.record_score(running[0], 2, 2).unwrap();
    assert_eq!(t.end_round(), Err(TournamentError::IncompleteResults));
    assert!(t.teams.iter().all(|team| team.stats.matches_played == 0));
}

#[test]
fn four_team_table_runs_to_completion() {
    let mut t = tournament_with_teams(TournamentType::Table, 4);
    let summary = t
        .generate_match_plan(
            &EngineConfig::with_max_parallel_games(2),
            &mut SequentialIds::new(),
        )
        .unwrap();
    assert_eq!(summary.total_matches, 6);
    assert_eq!(summary.total_rounds, 3);
    assert_eq!(t.phase(), TournamentPhase::GroupPhase);

    t.kick_off().unwrap();
    assert_eq!(t.current_round().unwrap().round_number, 1);
    assert_eq!(t.upcoming_rounds().len(), 2);

    let started = play_round(&mut t, 3, 1);
    assert_eq!(started.len(), 2);
    assert_eq!(t.current_round().unwrap().round_number, 2);
    assert!(t.teams.iter().all(|team| team.stats.matches_played == 1));

    play_round(&mut t, 0, 0);
    let started = play_round(&mut t, 1, 2);
    assert!(started.is_empty());

    let status = t.phase_status();
    assert!(status.group_done);
    assert!(!status.semifinal_done);
    assert_eq!(t.phase(), TournamentPhase::Complete);
    assert!(t.current_round().is_none());
    assert_eq!(t.end_round(), Err(TournamentError::NoActiveRound));

    let total_points: u32 = t.teams.iter().map(|team| team.stats.points).sum();
    // Two wins (3 each) per decided round, two draws (1 each per team) in round 2.
    assert_eq!(total_points, 6 + 4 + 6);
    assert!(t.teams.iter().all(|team| team.stats.matches_played == 3));
    assert!(t.winner().is_some());
}

#[test]
fn table_tournaments_have_no_playoffs() {
    let mut t = tournament_with_teams(TournamentType::Table, 4);
    t.generate_match_plan(&EngineConfig::default(), &mut SequentialIds::new())
        .unwrap();
    assert_eq!(
        t.create_playoffs(MatchPhase::Semifinal, &mut SequentialIds::new()),
        Err(TournamentError::NotABracketTournament)
    );
}

#[test]
fn bracket_tournament_plays_groups_semifinals_and_final() {
    let mut t = tournament_with_teams(TournamentType::Bracket, 8);
    let mut ids = SequentialIds::new();
    t.generate_match_plan(&EngineConfig::default(), &mut ids)
        .unwrap();

    let groups: Vec<_> = t.teams.iter().map(|team| team.group).collect();
    assert_eq!(&groups[..4], &[Some(GroupLabel::A); 4]);
    assert_eq!(&groups[4..], &[Some(GroupLabel::B); 4]);

    assert_eq!(
        t.create_playoffs(MatchPhase::Semifinal, &mut ids),
        Err(TournamentError::PhaseNotCompleted(MatchPhase::Group))
    );

    assert_eq!(t.kick_off().unwrap().len(), 4);
    for _ in 0..3 {
        play_round(&mut t, 2, 1);
    }
    assert_eq!(t.phase(), TournamentPhase::SemifinalPhase);
    assert!(t.winner().is_none());

    assert_eq!(
        t.create_playoffs(MatchPhase::Final, &mut ids),
        Err(TournamentError::PhaseNotCompleted(MatchPhase::Semifinal))
    );
    let summary = t.create_playoffs(MatchPhase::Semifinal, &mut ids).unwrap();
    assert_eq!(summary.total_matches, 2);
    assert_eq!(
        t.create_playoffs(MatchPhase::Semifinal, &mut ids),
        Err(TournamentError::PhaseAlreadyExists(MatchPhase::Semifinal))
    );

    let semifinals = running_matches(&t);
    assert_eq!(semifinals.len(), 2);
    assert_eq!(
        t.record_score(semifinals[0], 1, 1),
        Err(TournamentError::DrawNotAllowed(MatchPhase::Semifinal))
    );
    let stats_before: Vec<_> = t.teams.iter().map(|team| team.stats.clone()).collect();
    play_round(&mut t, 3, 0);
    let stats_after: Vec<_> = t.teams.iter().map(|team| team.stats.clone()).collect();
    assert_eq!(stats_before, stats_after);
    assert_eq!(t.phase(), TournamentPhase::FinalPhase);

    t.create_playoffs(MatchPhase::Final, &mut ids).unwrap();
    let plan = t.match_plan.as_ref().unwrap();
    assert_eq!(plan.total_rounds(), 5);
    assert_eq!(plan.max_match_number(), 15);
    let semifinal_winners: Vec<_> = plan
        .matches_in_phase(MatchPhase::Semifinal)
        .map(|m| m.home_team_id)
        .collect();
    let final_match = plan.matches_in_phase(MatchPhase::Final).next().unwrap().clone();
    assert_eq!(final_match.home_team_id, semifinal_winners[0]);
    assert_eq!(final_match.away_team_id, semifinal_winners[1]);
    assert_eq!(final_match.group, None);

    play_round(&mut t, 0, 1);
    assert_eq!(t.phase(), TournamentPhase::Complete);
    assert!(t.phase_status().final_done);
    assert_eq!(t.winner().map(|team| team.id), Some(final_match.away_team_id));
}

#[test]
fn reset_discards_matches_stats_and_groups() {
    let mut t = tournament_with_teams(TournamentType::Bracket, 8);
    t.generate_match_plan(&EngineConfig::default(), &mut SequentialIds::new())
        .unwrap();
    t.kick_off().unwrap();
    play_round(&mut t, 1, 0);
    assert!(t.teams.iter().any(|team| team.stats.points > 0));

    t.reset_match_plan();
    assert!(t.match_plan.is_none());
    assert_eq!(t.phase(), TournamentPhase::NoPlan);
    assert!(t.teams.iter().all(|team| team.group.is_none()));
    assert!(t.teams.iter().all(|team| team.stats.points == 0));

    t.add_team("Latecomer", None, Vec::new()).unwrap();
    assert_eq!(
        t.generate_match_plan(&EngineConfig::default(), &mut SequentialIds::new()),
        Err(TournamentError::NotEligibleForBracket { teams: 9 })
    );
}

#[test]
fn regenerating_starts_from_zeroed_stats() {
    let mut t = tournament_with_teams(TournamentType::Table, 3);
    t.teams[0].stats.points = 12;
    t.teams[0].group = Some(GroupLabel::B);
    t.generate_match_plan(&EngineConfig::default(), &mut SequentialIds::new())
        .unwrap();
    assert_eq!(t.teams[0].stats.points, 0);
    assert_eq!(t.teams[0].group, None);
}
