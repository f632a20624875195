//! Integration tests for splitting bracket tournaments into two groups.

use std::collections::HashSet;
use tournament_engine::{
    generate_bracket_plan, split_into_groups, GroupLabel, SequentialIds, Team,
};

fn teams(n: usize) -> Vec<Team> {
    (0..n).map(|i| Team::new(format!("T{i}"))).collect()
}

#[test]
fn fewer_than_eight_teams_are_not_eligible() {
    for n in [0, 2, 4, 6, 7] {
        let plan = generate_bracket_plan(&teams(n), 2, &mut SequentialIds::new());
        assert!(plan.is_empty(), "{n} teams should not be eligible");
    }
}

#[test]
fn odd_team_counts_are_not_eligible() {
    assert!(split_into_groups(&teams(9)).is_none());
    let plan = generate_bracket_plan(&teams(11), 2, &mut SequentialIds::new());
    assert!(plan.is_empty());
    assert_eq!(plan.total_matches(), 0);
}

#[test]
fn eight_teams_split_into_two_groups_of_four() {
    let teams = teams(8);
    let split = split_into_groups(&teams).unwrap();
    let first_half: Vec<_> = teams[..4].iter().map(|t| t.id).collect();
    let second_half: Vec<_> = teams[4..].iter().map(|t| t.id).collect();
    assert_eq!(split.group_a, first_half);
    assert_eq!(split.group_b, second_half);
    assert_eq!(split.group_of(teams[0].id), Some(GroupLabel::A));
    assert_eq!(split.group_of(teams[7].id), Some(GroupLabel::B));
}

#[test]
fn group_matches_stay_inside_their_group() {
    let teams = teams(8);
    let split = split_into_groups(&teams).unwrap();
    let plan = generate_bracket_plan(&teams, 2, &mut SequentialIds::new());

    assert_eq!(plan.total_matches(), 12);
    let mut per_group = [0, 0];
    for m in plan.matches() {
        let group = m.group.expect("group matches carry a group label");
        assert_eq!(split.group_of(m.home_team_id), Some(group));
        assert_eq!(split.group_of(m.away_team_id), Some(group));
        per_group[if group == GroupLabel::A { 0 } else { 1 }] += 1;
    }
    assert_eq!(per_group, [6, 6]);
}

#[test]
fn group_rounds_are_interleaved_and_renumbered() {
    let plan = generate_bracket_plan(&teams(8), 2, &mut SequentialIds::new());

    // Each group needs 3 rounds of 2; round i of A is merged with round i of B.
    assert_eq!(plan.total_rounds(), 3);
    for (i, round) in plan.rounds.iter().enumerate() {
        assert_eq!(round.round_number, i as u32 + 1);
        let labels: Vec<_> = round.matches.iter().map(|m| m.group).collect();
        assert_eq!(
            labels,
            vec![
                Some(GroupLabel::A),
                Some(GroupLabel::A),
                Some(GroupLabel::B),
                Some(GroupLabel::B)
            ]
        );
        let mut seen = HashSet::new();
        for (position, m) in round.matches.iter().enumerate() {
            assert_eq!(m.round_number, round.round_number);
            assert_eq!(m.match_in_round, position as u32 + 1);
            assert!(seen.insert(m.home_team_id));
            assert!(seen.insert(m.away_team_id));
        }
    }

    let numbers: Vec<u32> = plan.matches().map(|m| m.match_number).collect();
    assert_eq!(numbers, (1..=12).collect::<Vec<u32>>());
}

#[test]
fn larger_brackets_sum_both_groups() {
    // 10 teams: two groups of 5, 10 matches each.
    let plan = generate_bracket_plan(&teams(10), 2, &mut SequentialIds::new());
    assert_eq!(plan.total_matches(), 20);

    // 12 teams: two groups of 6, 15 matches each.
    let plan = generate_bracket_plan(&teams(12), 3, &mut SequentialIds::new());
    assert_eq!(plan.total_matches(), 30);
    let ids: HashSet<_> = plan.matches().map(|m| m.id).collect();
    assert_eq!(ids.len(), 30);
}
