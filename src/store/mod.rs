//! Persistence boundary: a document store of tournaments keyed by title.
//!
//! Reads return a [`Snapshot`] carrying the document version. Writes that depend on a
//! previous read take that version as a precondition and fail with
//! [`StoreError::VersionConflict`] if the document moved on in between.

mod memory;

pub use memory::MemoryStore;

use crate::models::{Group, Round, StreamLink, Team, Tournament};
use async_trait::async_trait;

/// Monotonic per-document version. Every successful write bumps it by one.
pub type Version = u64;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A tournament as read from the store, with the version it was read at.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub version: Version,
    pub tournament: Tournament,
}

/// Failures reported by a [`TournamentStore`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// Backend could not serve the request (connection lost, lock poisoned, ...).
    #[error("tournament store unavailable: {0}")]
    Unavailable(String),

    /// Conditional write rejected because the document changed since it was read.
    #[error("tournament {title:?} is at version {found}, expected {expected}")]
    VersionConflict {
        title: String,
        expected: Version,
        found: Version,
    },

    #[error("no tournament titled {0:?}")]
    TournamentNotFound(String),

    #[error("tournament {title:?} has no qualifier {qualifier:?}")]
    RoundNotFound { title: String, qualifier: String },

    #[error("a tournament titled {0:?} already exists")]
    DuplicateTournament(String),
}

/// Narrow document-store interface used by the engine and the admin operations.
#[async_trait]
pub trait TournamentStore: Send + Sync {
    /// Insert a new document at version 1. Titles are unique.
    async fn insert_tournament(&self, tournament: Tournament) -> StoreResult<()>;

    async fn get_tournament(&self, title: &str) -> StoreResult<Option<Snapshot>>;

    async fn list_tournaments(&self) -> StoreResult<Vec<Tournament>>;

    async fn tournaments_by_game(&self, game_id: &str) -> StoreResult<Vec<Tournament>>;

    /// The tournament titled `title`, but only if it has a round named `qualifier`.
    async fn get_tournament_by_title_and_qualifier(
        &self,
        title: &str,
        qualifier: &str,
    ) -> StoreResult<Option<Snapshot>>;

    /// Overwrite the groups of one round.
    async fn replace_groups_of_round(
        &self,
        title: &str,
        qualifier: &str,
        groups: Vec<Group>,
        expected: Version,
    ) -> StoreResult<()>;

    /// Push one group onto the end of a round's groups.
    async fn append_group_to_round(
        &self,
        title: &str,
        qualifier: &str,
        group: Group,
        expected: Version,
    ) -> StoreResult<()>;

    async fn push_round(&self, title: &str, round: Round, expected: Version) -> StoreResult<()>;

    async fn push_stream_link(&self, title: &str, link: StreamLink) -> StoreResult<()>;

    async fn push_team(&self, title: &str, team: Team) -> StoreResult<()>;
}
