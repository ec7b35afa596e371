//! Exam seat allocation.
//!
//! Given a roster of students, a list of halls and an [`AllocationRule`],
//! [`allocate`] seats every student it can at a unique
//! `(hall, row, column, bench position)` slot using one of eight policies.
//! The engine never fails: it stops when students or slots run out.
//! Callers check capacity first with [`validate_request`].
//!
//! [`AllocationRule`]: data::AllocationRule
//! [`allocate`]: allocator::allocate
//! [`validate_request`]: allocator::validate_request

pub mod allocator;
pub mod config;
pub mod cursor;
pub mod data;
pub mod eligibility;
pub mod error;
pub mod grouping;
pub mod plan;
pub mod seat;
pub mod seat_map;
pub mod server;
pub mod strategy;

#[cfg(test)]
mod fixtures;

pub use allocator::{allocate, allocate_with_rng, check_capacity, total_capacity, validate_request};
pub use data::{
    AllocationMethod, AllocationOutput, AllocationRequest, AllocationRule, Assignment, Exam, Hall,
    Student,
};
pub use error::AllocationError;
pub use seat::{Slot, seat_label};
