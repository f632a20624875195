//! Tournament, TournamentType and TournamentError.

use crate::config::EngineConfig;
use crate::ids::IdGenerator;
use crate::logic::{
    advance_round, apply_match_result, compute_standings, current_round, ensure_can_open,
    evaluate_phase_status, generate_final_pairing, generate_group_plan,
    generate_semifinal_pairing, schedule_groups, split_into_groups, tournament_winner,
    upcoming_rounds, PhaseStatus, TournamentPhase,
};
use crate::models::game::{GameMatch, MatchId, MatchPhase, MatchStatus};
use crate::models::plan::{MatchPlan, PlanSummary, Round};
use crate::models::team::{GroupLabel, Team, TeamId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A table tournament needs at least two teams.
    NotEnoughTeams { required: usize, found: usize },
    /// Bracket tournaments need an even number of at least 8 teams.
    NotEligibleForBracket { teams: usize },
    /// A match plan already exists; reset it first.
    MatchPlanExists,
    /// No match plan generated yet.
    NoMatchPlan,
    /// Every round is already complete.
    NoActiveRound,
    /// Not all running matches of the round have a result.
    IncompleteResults,
    TeamNotFound(TeamId),
    MatchNotFound(MatchId),
    /// Team names are unique (case-insensitive).
    DuplicateTeamName,
    /// Team names must not be blank.
    InvalidTeamName,
    /// Scores can only be entered once a match has started.
    MatchNotStarted(MatchId),
    /// Completed matches are frozen.
    MatchAlreadyCompleted(MatchId),
    /// A match cannot be completed without both scores.
    MissingScores(MatchId),
    /// Only completed matches count towards the standings.
    MatchNotCompleted(MatchId),
    /// Playoff matches need a winner.
    DrawNotAllowed(MatchPhase),
    /// The team did not play in the match.
    TeamNotInMatch { team: TeamId, game: MatchId },
    /// Semifinals and final only exist in bracket tournaments.
    NotABracketTournament,
    /// The previous phase has not finished yet.
    PhaseNotCompleted(MatchPhase),
    /// Matches for this phase were already created.
    PhaseAlreadyExists(MatchPhase),
    /// A group has fewer than two teams to send to the semifinals.
    NotEnoughQualifiedTeams,
    /// The semifinal of this group has no winner.
    SemifinalUndecided(GroupLabel),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughTeams { required, found } => write!(
                f,
                "Need at least {} teams to generate matches (have {})",
                required, found
            ),
            TournamentError::NotEligibleForBracket { teams } => write!(
                f,
                "A bracket tournament needs an even number of at least 8 teams (have {})",
                teams
            ),
            TournamentError::MatchPlanExists => write!(f, "Tournament already has matches"),
            TournamentError::NoMatchPlan => write!(f, "Tournament has no matches yet"),
            TournamentError::NoActiveRound => write!(f, "All rounds are complete"),
            TournamentError::IncompleteResults => {
                write!(f, "Not all running matches of the round have a result")
            }
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::DuplicateTeamName => write!(f, "A team with this name already exists"),
            TournamentError::InvalidTeamName => write!(f, "Team name must not be empty"),
            TournamentError::MatchNotStarted(_) => write!(f, "Game has not started yet"),
            TournamentError::MatchAlreadyCompleted(_) => write!(f, "Game is already completed"),
            TournamentError::MissingScores(_) => write!(f, "No goals set"),
            TournamentError::MatchNotCompleted(_) => write!(f, "Game is not completed yet"),
            TournamentError::DrawNotAllowed(phase) => {
                write!(f, "A {} match cannot end in a draw", phase)
            }
            TournamentError::TeamNotInMatch { .. } => write!(f, "Team did not play in this match"),
            TournamentError::NotABracketTournament => {
                write!(f, "Playoffs are only played in bracket tournaments")
            }
            TournamentError::PhaseNotCompleted(phase) => {
                write!(f, "The {} phase is not completed yet", phase)
            }
            TournamentError::PhaseAlreadyExists(phase) => {
                write!(f, "{} matches already exist", phase)
            }
            TournamentError::NotEnoughQualifiedTeams => {
                write!(f, "Not enough qualified teams for the semifinals")
            }
            TournamentError::SemifinalUndecided(group) => {
                write!(f, "The semifinal of group {} has no winner yet", group)
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Format of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentType {
    /// One league table, everybody plays everybody.
    #[default]
    Table,
    /// Two groups, then semifinals and a final.
    Bracket,
}

/// A tournament: its teams and, once generated, its match plan.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub date: NaiveDate,
    pub location: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TournamentType,
    pub teams: Vec<Team>,
    pub match_plan: Option<MatchPlan>,
}

impl Tournament {
    /// Create a tournament without teams or matches.
    pub fn new(name: impl Into<String>, date: NaiveDate, kind: TournamentType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            date,
            location: String::new(),
            description: String::new(),
            kind,
            teams: Vec::new(),
            match_plan: None,
        }
    }

    /// Create a tournament with teams already registered.
    pub fn with_teams(
        name: impl Into<String>,
        date: NaiveDate,
        kind: TournamentType,
        teams: Vec<Team>,
    ) -> Self {
        Self {
            teams,
            ..Self::new(name, date, kind)
        }
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    pub fn get_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.match_plan.as_ref()?.get_match(id)
    }

    fn match_mut(&mut self, id: MatchId) -> Result<&mut GameMatch, TournamentError> {
        self.match_plan
            .as_mut()
            .ok_or(TournamentError::NoMatchPlan)?
            .get_match_mut(id)
            .ok_or(TournamentError::MatchNotFound(id))
    }

    /// Register a team (only before matches exist). Names must be unique (case-insensitive).
    pub fn add_team(
        &mut self,
        name: impl Into<String>,
        captain: Option<String>,
        members: Vec<String>,
    ) -> Result<TeamId, TournamentError> {
        if self.match_plan.is_some() {
            return Err(TournamentError::MatchPlanExists);
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::InvalidTeamName);
        }
        let is_duplicate = self
            .teams
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicateTeamName);
        }
        let mut team = Team::new(name_trimmed);
        team.captain = captain
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        team.members = members
            .into_iter()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();
        let id = team.id;
        self.teams.push(team);
        Ok(id)
    }

    /// Remove a team by id (only before matches exist).
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), TournamentError> {
        if self.match_plan.is_some() {
            return Err(TournamentError::MatchPlanExists);
        }
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        self.teams.remove(idx);
        Ok(())
    }

    /// Generate the group-phase plan for this tournament's format and reset all team stats.
    ///
    /// Bracket tournaments also assign every team to group A or B.
    pub fn generate_match_plan(
        &mut self,
        config: &EngineConfig,
        ids: &mut dyn IdGenerator,
    ) -> Result<PlanSummary, TournamentError> {
        if self.match_plan.is_some() {
            return Err(TournamentError::MatchPlanExists);
        }
        let max_parallel = config.max_parallel_games;
        let plan = match self.kind {
            TournamentType::Table => {
                let plan = generate_group_plan(&self.teams, max_parallel, ids);
                if plan.is_empty() {
                    return Err(TournamentError::NotEnoughTeams {
                        required: 2,
                        found: self.teams.len(),
                    });
                }
                for team in &mut self.teams {
                    team.group = None;
                }
                plan
            }
            TournamentType::Bracket => {
                let split = split_into_groups(&self.teams).ok_or(
                    TournamentError::NotEligibleForBracket {
                        teams: self.teams.len(),
                    },
                )?;
                let plan = schedule_groups(&split, max_parallel, ids);
                for team in &mut self.teams {
                    team.group = split.group_of(team.id);
                }
                plan
            }
        };
        for team in &mut self.teams {
            team.reset_stats();
        }

        let summary = plan.summary();
        log::info!(
            "Generated {} matches in {} rounds for tournament {}",
            summary.total_matches,
            summary.total_rounds,
            self.id
        );
        self.match_plan = Some(plan);
        Ok(summary)
    }

    /// Drop all matches and everything they accumulated (stats, group assignment).
    pub fn reset_match_plan(&mut self) {
        self.match_plan = None;
        for team in &mut self.teams {
            team.reset_stats();
            team.group = None;
        }
        log::info!("Reset match plan of tournament {}", self.id);
    }

    /// Start the current round if nothing is running yet. Returns the started matches.
    pub fn kick_off(&mut self) -> Result<Vec<MatchId>, TournamentError> {
        let plan = self
            .match_plan
            .as_mut()
            .ok_or(TournamentError::NoMatchPlan)?;
        if plan.matches().any(|m| m.status == MatchStatus::InProgress) {
            return Ok(Vec::new());
        }
        let round = plan
            .rounds
            .iter_mut()
            .find(|r| !r.is_complete())
            .ok_or(TournamentError::NoActiveRound)?;
        let mut started = Vec::new();
        for game in round
            .matches
            .iter_mut()
            .filter(|m| m.status == MatchStatus::Scheduled)
        {
            game.start()?;
            started.push(game.id);
        }
        Ok(started)
    }

    /// Start a single scheduled match.
    pub fn start_match(&mut self, match_id: MatchId) -> Result<(), TournamentError> {
        self.match_mut(match_id)?.start()
    }

    /// Enter the score of a running match.
    pub fn record_score(
        &mut self,
        match_id: MatchId,
        home_score: u32,
        away_score: u32,
    ) -> Result<(), TournamentError> {
        self.match_mut(match_id)?.set_score(home_score, away_score)
    }

    /// Finish the current round.
    ///
    /// Every running match of the round must have both scores. Those matches are completed,
    /// group-phase results are added to the team stats, and once the round is complete the
    /// scheduled matches of the next round are started. Returns the started matches.
    pub fn end_round(&mut self) -> Result<Vec<MatchId>, TournamentError> {
        let plan = self
            .match_plan
            .as_mut()
            .ok_or(TournamentError::NoMatchPlan)?;
        let index = plan
            .rounds
            .iter()
            .position(|r| !r.is_complete())
            .ok_or(TournamentError::NoActiveRound)?;
        if !plan.rounds[index].can_end() {
            return Err(TournamentError::IncompleteResults);
        }
        for game in plan.rounds[index]
            .matches
            .iter()
            .filter(|m| m.status == MatchStatus::InProgress)
        {
            for team_id in [game.home_team_id, game.away_team_id] {
                if !self.teams.iter().any(|t| t.id == team_id) {
                    return Err(TournamentError::TeamNotFound(team_id));
                }
            }
        }

        let mut finished = Vec::new();
        for game in plan.rounds[index]
            .matches
            .iter_mut()
            .filter(|m| m.status == MatchStatus::InProgress)
        {
            game.complete()?;
            finished.push(game.clone());
        }

        for game in finished.iter().filter(|m| m.phase == MatchPhase::Group) {
            for team_id in [game.home_team_id, game.away_team_id] {
                let team = self
                    .teams
                    .iter_mut()
                    .find(|t| t.id == team_id)
                    .ok_or(TournamentError::TeamNotFound(team_id))?;
                team.stats = apply_match_result(team, game)?;
            }
        }

        let round = &plan.rounds[index];
        let to_start = advance_round(round, &plan.rounds);
        log::info!(
            "Ended round {} of tournament {} ({} match(es) completed, {} started)",
            round.round_number,
            self.id,
            finished.len(),
            to_start.len()
        );
        for &id in &to_start {
            plan.get_match_mut(id)
                .ok_or(TournamentError::MatchNotFound(id))?
                .start()?;
        }
        Ok(to_start)
    }

    pub fn phase_status(&self) -> PhaseStatus {
        self.match_plan
            .as_ref()
            .map(evaluate_phase_status)
            .unwrap_or_default()
    }

    pub fn phase(&self) -> TournamentPhase {
        TournamentPhase::evaluate(self.kind, self.match_plan.as_ref())
    }

    /// Create the semifinals or the final and append them to the plan.
    pub fn create_playoffs(
        &mut self,
        phase: MatchPhase,
        ids: &mut dyn IdGenerator,
    ) -> Result<PlanSummary, TournamentError> {
        let plan = self
            .match_plan
            .as_ref()
            .ok_or(TournamentError::NoMatchPlan)?;
        ensure_can_open(phase, self.kind, plan)?;
        let existing: Vec<GameMatch> = plan.matches().cloned().collect();
        let playoffs = match phase {
            MatchPhase::Semifinal => generate_semifinal_pairing(&self.teams, &existing, ids)?,
            MatchPhase::Final => generate_final_pairing(&existing, &self.teams, ids)?,
            MatchPhase::Group => return Err(TournamentError::MatchPlanExists),
        };

        let summary = playoffs.summary();
        log::info!(
            "Created {} {} match(es) for tournament {}",
            summary.total_matches,
            phase,
            self.id
        );
        if let Some(plan) = self.match_plan.as_mut() {
            plan.extend(playoffs);
        }
        Ok(summary)
    }

    /// Champion once the tournament is complete: the table leader, or the final's winner.
    pub fn winner(&self) -> Option<&Team> {
        if self.phase() != TournamentPhase::Complete {
            return None;
        }
        match self.kind {
            TournamentType::Table => compute_standings(&self.teams, None).first().copied(),
            TournamentType::Bracket => {
                let id = tournament_winner(self.match_plan.as_ref()?)?;
                self.team(id)
            }
        }
    }

    /// The round being played; None without a plan or when all rounds are complete.
    pub fn current_round(&self) -> Option<&Round> {
        current_round(&self.match_plan.as_ref()?.rounds)
    }

    pub fn upcoming_rounds(&self) -> Vec<&Round> {
        self.match_plan
            .as_ref()
            .map(|plan| upcoming_rounds(&plan.rounds))
            .unwrap_or_default()
    }
}
