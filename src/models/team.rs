//! Team, TeamStats and group labels.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in matches and lookups).
pub type TeamId = Uuid;

/// Group a team plays its group phase in (bracket tournaments only).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum GroupLabel {
    A,
    B,
}

impl std::fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupLabel::A => write!(f, "A"),
            GroupLabel::B => write!(f, "B"),
        }
    }
}

/// Cumulative group-phase statistics of a team.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub points: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub matches_played: u32,
}

impl TeamStats {
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}

/// A team registered for a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub captain: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
    /// Set when a bracket plan splits the teams into two groups.
    pub group: Option<GroupLabel>,
    #[serde(default)]
    pub stats: TeamStats,
}

impl Team {
    /// Create a new team with the given name, no captain, no group and zeroed stats.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            captain: None,
            members: Vec::new(),
            group: None,
            stats: TeamStats::default(),
        }
    }

    pub fn with_captain(mut self, captain: impl Into<String>) -> Self {
        self.captain = Some(captain.into());
        self
    }

    pub fn in_group(mut self, group: GroupLabel) -> Self {
        self.group = Some(group);
        self
    }

    /// Forget everything a previous match plan accumulated.
    pub fn reset_stats(&mut self) {
        self.stats = TeamStats::default();
    }
}
