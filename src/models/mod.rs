//! Data structures for the tournament documents: tournaments, rounds, groups, teams.

mod group;
mod round;
mod team;
mod tournament;

pub use group::{Group, GroupId, Slot};
pub use round::Round;
pub use team::{StreamLink, Team, TeamId};
pub use tournament::{Tournament, TournamentError};
