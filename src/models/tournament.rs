//! Tournament and TournamentError.

use crate::models::round::Round;
use crate::models::team::{StreamLink, Team};
use crate::store::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Errors from tournament administration (creating tournaments, adding rounds, ...).
#[derive(Debug, thiserror::Error)]
pub enum TournamentError {
    /// Title is empty after trimming.
    #[error("Tournament title must not be empty")]
    InvalidTitle,
    /// Round definition rejected before touching the store.
    #[error("Invalid round: {0}")]
    InvalidRound(&'static str),
    #[error("A tournament titled {0:?} already exists")]
    DuplicateTournament(String),
    /// Qualifier names are unique within one tournament.
    #[error("Qualifier {0:?} already exists in this tournament")]
    DuplicateQualifier(String),
    #[error("No tournament titled {0:?}")]
    TournamentNotFound(String),
    /// The tournament changed between read and write; the caller may retry.
    #[error("Tournament {0:?} was modified concurrently, retry")]
    ConcurrentModification(String),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for TournamentError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TournamentNotFound(title) => TournamentError::TournamentNotFound(title),
            StoreError::DuplicateTournament(title) => TournamentError::DuplicateTournament(title),
            StoreError::VersionConflict { title, .. } => TournamentError::ConcurrentModification(title),
            other => TournamentError::Store(other),
        }
    }
}

/// Full tournament document, keyed by `title` in the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub title: String,
    pub game_id: String,
    /// Declared team capacity of the whole tournament.
    pub total_teams: u32,
    #[serde(default)]
    pub rounds: Vec<Round>,
    #[serde(default)]
    pub stream_links: Vec<StreamLink>,
    /// Teams registered for the tournament (independent of group placement).
    #[serde(default)]
    pub teams: Vec<Team>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a tournament with no rounds, links or teams.
    pub fn new(title: impl Into<String>, game_id: impl Into<String>, total_teams: u32) -> Self {
        Self {
            title: title.into(),
            game_id: game_id.into(),
            total_teams,
            rounds: Vec::new(),
            stream_links: Vec::new(),
            teams: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Round with the given qualifier name, if any.
    pub fn round(&self, qualifier: &str) -> Option<&Round> {
        self.rounds.iter().find(|r| r.qualifier_name == qualifier)
    }

    pub fn round_mut(&mut self, qualifier: &str) -> Option<&mut Round> {
        self.rounds.iter_mut().find(|r| r.qualifier_name == qualifier)
    }

    /// Validate a round before it is appended: non-empty name, at least one team per group,
    /// and no other round with the same qualifier name.
    pub fn check_new_round(&self, round: &Round) -> Result<(), TournamentError> {
        if round.qualifier_name.trim().is_empty() {
            return Err(TournamentError::InvalidRound("qualifier name must not be empty"));
        }
        if round.number_of_teams_per_group == 0 {
            return Err(TournamentError::InvalidRound("number of teams per group must be at least 1"));
        }
        if self.round(&round.qualifier_name).is_some() {
            return Err(TournamentError::DuplicateQualifier(round.qualifier_name.clone()));
        }
        Ok(())
    }
}
