//! Slot lookup: which group of a round sits at a given (date, time).

use crate::models::{Round, Slot};

/// Index of the first group in `round` whose date and time equal `slot` exactly.
///
/// `None` is not an error: it means no group exists yet for that kickoff and one may be created.
/// Several groups can share a slot: the engine opens another one whenever the group at that slot
/// is full. Groups are scanned in stored order, so the earliest group at the slot always wins.
pub fn resolve_slot(round: &Round, slot: &Slot) -> Option<usize> {
    round.groups.iter().position(|g| g.is_at(slot))
}
