//! Esports tournament backend: tournament documents, time-slot groups, and team placement.

pub mod api;
pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    can_create_group, decide, has_capacity, max_groups, resolve_slot, AssignError, AssignmentEngine,
    Decision, Outcome, Placement, Rejection,
};
pub use models::{Group, GroupId, Round, Slot, StreamLink, Team, TeamId, Tournament, TournamentError};
pub use store::{MemoryStore, Snapshot, StoreError, TournamentStore, Version};
