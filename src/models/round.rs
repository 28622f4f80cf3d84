//! Round (qualifier) data structure.

use crate::models::group::Group;
use serde::{Deserialize, Serialize};

/// A named phase of a tournament. Groups are added lazily as teams ask for slots.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Round {
    /// Unique within the owning tournament.
    pub qualifier_name: String,
    /// Max teams per group.
    pub number_of_teams_per_group: u32,
    pub groups: Vec<Group>,
}

impl Round {
    /// A round with no groups yet.
    pub fn new(qualifier_name: impl Into<String>, number_of_teams_per_group: u32) -> Self {
        Self {
            qualifier_name: qualifier_name.into(),
            number_of_teams_per_group,
            groups: Vec::new(),
        }
    }

    /// Total teams currently placed across all groups.
    pub fn placed_teams(&self) -> usize {
        self.groups.iter().map(|g| g.teams.len()).sum()
    }
}
