//! Tournament business logic: slot lookup, capacity, group assignment, administration.

pub mod admin;
mod assignment;
mod capacity;
mod slots;

pub use assignment::{
    decide, AssignError, AssignmentEngine, Decision, Outcome, Placement, Rejection,
    DEFAULT_MAX_ATTEMPTS,
};
pub use capacity::{can_create_group, has_capacity, max_groups};
pub use slots::resolve_slot;
