//! Group (a scheduled bucket of teams) and its Slot key.

use crate::models::team::Team;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a group.
pub type GroupId = String;

/// Default match duration in minutes, stored as text alongside the other room details.
const DEFAULT_DURATION: &str = "45";

/// Starting date and time of a group. Compared verbatim: "18:00" and "18:00:00" are different slots.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub starting_at_date: String,
    pub starting_at_time: String,
}

impl Slot {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            starting_at_date: date.into(),
            starting_at_time: time.into(),
        }
    }
}

/// Teams playing together at one slot. Room details are filled in by admins later.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Group {
    pub group_id: GroupId,
    pub match_id: String,
    pub starting_at_date: String,
    pub starting_at_time: String,
    /// Display name, e.g. "Group 3".
    pub name: String,
    pub teams: Vec<Team>,
    pub results: Vec<String>,
    pub room_id: String,
    pub password: String,
    pub duration: String,
}

impl Group {
    /// A fresh group at `slot` holding only `team`. `position` is the 1-based index within the round.
    pub fn new(slot: &Slot, team: Team, game_id: &str, position: usize) -> Self {
        let match_number: u32 = rand::thread_rng().gen_range(1000..10000);
        Self {
            group_id: Uuid::new_v4().to_string(),
            match_id: format!("{game_id} #{match_number}"),
            starting_at_date: slot.starting_at_date.clone(),
            starting_at_time: slot.starting_at_time.clone(),
            name: format!("Group {position}"),
            teams: vec![team],
            results: Vec::new(),
            room_id: String::new(),
            password: String::new(),
            duration: DEFAULT_DURATION.to_string(),
        }
    }

    pub fn slot(&self) -> Slot {
        Slot::new(&self.starting_at_date, &self.starting_at_time)
    }

    /// Exact equality on both date and time.
    pub fn is_at(&self, slot: &Slot) -> bool {
        self.starting_at_date == slot.starting_at_date && self.starting_at_time == slot.starting_at_time
    }
}
