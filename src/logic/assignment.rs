//! Group assignment: place a team into the group of a round that matches its requested slot.
//!
//! For one request the engine:
//! 1. Reads the tournament filtered to the requested qualifier (missing -> `RoundNotFound`).
//! 2. Looks up the group at the exact requested slot.
//! 3. If that group has room, appends the team and rewrites the round's groups.
//! 4. Otherwise (no group, or the matched group is full) creates a new group at the slot if the
//!    round may still grow, else rejects with `RoundFull`.
//!
//! Only the first group at a slot is considered; a full slot never spills into another
//! existing group. Writes are conditioned on the version read in step 1, and a version conflict
//! restarts the whole attempt from step 1.

use crate::logic::capacity::{can_create_group, has_capacity};
use crate::logic::slots::resolve_slot;
use crate::models::{Group, GroupId, Slot, Team, Tournament};
use crate::store::{Snapshot, StoreError, StoreResult, TournamentStore};
use std::fmt;
use std::sync::Arc;

/// Attempts per `assign` call before giving up on version conflicts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Why a placement was refused. These are ordinary outcomes, not failures.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rejection {
    /// The tournament has no round with the requested qualifier name (or does not exist).
    RoundNotFound,
    /// The slot's group is full and the round may not create more groups.
    RoundFull,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::RoundNotFound => write!(f, "Round not found in tournament"),
            Rejection::RoundFull => write!(f, "No capacity left in this round"),
        }
    }
}

/// A successful placement.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub group_id: GroupId,
    /// True if the team opened a new group, false if it joined an existing one.
    pub created: bool,
    /// Tournament state after the write.
    pub tournament: Tournament,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Placed(Placement),
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, Outcome::Placed(_))
    }
}

/// Failures of an `assign` call. The caller may retry both.
#[derive(Debug, thiserror::Error)]
pub enum AssignError {
    /// Read or write failed; nothing may be assumed about whether the write landed.
    #[error("could not place team: {0}")]
    StoreUnavailable(#[source] StoreError),
    /// Every attempt lost a race against another writer of the same tournament.
    #[error("tournament was modified concurrently ({attempts} attempts)")]
    ConcurrentModification { attempts: u32 },
}

/// What to do with a placement request, decided on a snapshot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decision {
    /// Append to the group at this index.
    Join(usize),
    /// Open a new group at the requested slot.
    Create,
    Reject(Rejection),
}

/// Decide where a team requesting `slot` in round `qualifier` goes. Pure.
pub fn decide(tournament: &Tournament, qualifier: &str, slot: &Slot) -> Decision {
    let Some(round) = tournament.round(qualifier) else {
        return Decision::Reject(Rejection::RoundNotFound);
    };
    if let Some(idx) = resolve_slot(round, slot) {
        if has_capacity(&round.groups[idx], round) {
            return Decision::Join(idx);
        }
    }
    if can_create_group(round, tournament) {
        Decision::Create
    } else {
        Decision::Reject(Rejection::RoundFull)
    }
}

/// Places teams into groups, persisting through an injected store.
#[derive(Clone)]
pub struct AssignmentEngine {
    store: Arc<dyn TournamentStore>,
    max_attempts: u32,
}

impl AssignmentEngine {
    pub fn new(store: Arc<dyn TournamentStore>) -> Self {
        Self {
            store,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Set the number of attempts per call (at least 1).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Place `team` into round `qualifier` of tournament `title` at `slot`.
    pub async fn assign(
        &self,
        title: &str,
        qualifier: &str,
        slot: &Slot,
        team: Team,
    ) -> Result<Outcome, AssignError> {
        for attempt in 1..=self.max_attempts {
            match self.try_assign(title, qualifier, slot, team.clone()).await {
                Ok(outcome) => {
                    match &outcome {
                        Outcome::Placed(p) => log::info!(
                            "Placed team {} in {} group {} of {}/{} at {} {}",
                            team.team_id,
                            if p.created { "new" } else { "existing" },
                            p.group_id,
                            title,
                            qualifier,
                            slot.starting_at_date,
                            slot.starting_at_time
                        ),
                        Outcome::Rejected(r) => log::warn!(
                            "Rejected team {} for {}/{}: {}",
                            team.team_id,
                            title,
                            qualifier,
                            r
                        ),
                    }
                    return Ok(outcome);
                }
                Err(StoreError::VersionConflict { expected, found, .. }) => {
                    log::warn!(
                        "Version conflict placing team {} in {}/{} (read {}, now {}), attempt {}/{}",
                        team.team_id,
                        title,
                        qualifier,
                        expected,
                        found,
                        attempt,
                        self.max_attempts
                    );
                }
                // The round or tournament vanished between read and write.
                Err(StoreError::TournamentNotFound(_) | StoreError::RoundNotFound { .. }) => {
                    return Ok(Outcome::Rejected(Rejection::RoundNotFound));
                }
                Err(e) => {
                    log::error!("Store failure placing team {} in {}/{}: {}", team.team_id, title, qualifier, e);
                    return Err(AssignError::StoreUnavailable(e));
                }
            }
        }
        Err(AssignError::ConcurrentModification {
            attempts: self.max_attempts,
        })
    }

    /// One read-decide-write pass. Version conflicts surface as `StoreError::VersionConflict`.
    async fn try_assign(
        &self,
        title: &str,
        qualifier: &str,
        slot: &Slot,
        team: Team,
    ) -> StoreResult<Outcome> {
        let Some(Snapshot {
            version,
            mut tournament,
        }) = self
            .store
            .get_tournament_by_title_and_qualifier(title, qualifier)
            .await?
        else {
            return Ok(Outcome::Rejected(Rejection::RoundNotFound));
        };

        let decision = decide(&tournament, qualifier, slot);
        let game_id = tournament.game_id.clone();
        let Some(round) = tournament.round_mut(qualifier) else {
            return Ok(Outcome::Rejected(Rejection::RoundNotFound));
        };

        let (group_id, created) = match decision {
            Decision::Reject(rejection) => return Ok(Outcome::Rejected(rejection)),
            Decision::Join(idx) => {
                let group = &mut round.groups[idx];
                group.teams.push(team);
                let group_id = group.group_id.clone();
                self.store
                    .replace_groups_of_round(title, qualifier, round.groups.clone(), version)
                    .await?;
                (group_id, false)
            }
            Decision::Create => {
                let group = Group::new(slot, team, &game_id, round.groups.len() + 1);
                let group_id = group.group_id.clone();
                self.store
                    .append_group_to_round(title, qualifier, group.clone(), version)
                    .await?;
                round.groups.push(group);
                (group_id, true)
            }
        };

        Ok(Outcome::Placed(Placement {
            group_id,
            created,
            tournament,
        }))
    }
}
