//! Capacity predicates for groups and rounds. Pure functions over a snapshot.

use crate::models::{Group, Round, Tournament};

/// True iff one more team fits into `group` under the round's per-group limit.
pub fn has_capacity(group: &Group, round: &Round) -> bool {
    group.teams.len() < round.number_of_teams_per_group as usize
}

/// Max number of groups a round may hold: `total_teams / number_of_teams_per_group`.
///
/// Derived from the tournament's declared capacity, not from the teams actually registered.
/// A round with a per-group size of 0 allows no groups.
pub fn max_groups(round: &Round, tournament: &Tournament) -> usize {
    tournament
        .total_teams
        .checked_div(round.number_of_teams_per_group)
        .unwrap_or(0) as usize
}

/// True iff the round may grow by one more group.
pub fn can_create_group(round: &Round, tournament: &Tournament) -> bool {
    round.groups.len() < max_groups(round, tournament)
}
