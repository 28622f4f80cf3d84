//! Team and StreamLink data structures.

use serde::{Deserialize, Serialize};

/// Unique identifier for a team.
pub type TeamId = String;

/// A roster of players competing together. Copied as-is into groups.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Team {
    pub team_id: TeamId,
    pub team_name: String,
    pub game_id: String,
    /// Member user ids.
    pub users_in_team: Vec<String>,
}

impl Team {
    pub fn new(team_id: impl Into<TeamId>, team_name: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            team_name: team_name.into(),
            ..Self::default()
        }
    }

    /// Builder-style: set the member user ids.
    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.users_in_team = members.into_iter().map(Into::into).collect();
        self
    }
}

/// Where a tournament is broadcast (e.g. a Twitch or YouTube channel).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreamLink {
    pub platform: String,
    pub url: String,
}
