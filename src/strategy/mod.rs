//! The placement policies.
//!
//! Each policy is a unit type implementing [`Strategy`]. A policy orders or
//! partitions the roster, walks the halls, and hands every chosen
//! `(student, slot)` pair to [`Placement::seat`]. Policies never check
//! capacity; they stop when either students or slots run out.

mod alternate_bench;
mod left_right;
mod optimized;
mod random;
mod segregated;
mod standard;
mod zigzag;

pub use alternate_bench::AlternateBench;
pub use left_right::LeftRightSplit;
pub use optimized::Optimized;
pub use random::RandomShuffle;
pub use segregated::{BranchSegregated, YearSegregated};
pub use standard::{StandardGap, keeps_column};
pub use zigzag::Zigzag;

use crate::data::{AllocationMethod, AllocationRule, Assignment, ExamId, Hall, Student};
use crate::seat::Slot;
use log::trace;
use rand::RngCore;

/// Working state of one run: the inputs plus the assignments emitted so far.
pub struct Placement<'a> {
    pub exam_id: ExamId,
    pub students: &'a [Student],
    pub halls: &'a [Hall],
    pub rules: &'a AllocationRule,
    pub rng: &'a mut dyn RngCore,
    assignments: Vec<Assignment>,
}

impl<'a> Placement<'a> {
    pub fn new(
        exam_id: ExamId,
        students: &'a [Student],
        halls: &'a [Hall],
        rules: &'a AllocationRule,
        rng: &'a mut dyn RngCore,
    ) -> Self {
        Self {
            exam_id,
            students,
            halls,
            rules,
            rng,
            assignments: Vec::with_capacity(students.len()),
        }
    }

    /// Record `student` at `slot`.
    pub fn seat(&mut self, student: &Student, slot: Slot) {
        trace!("{} -> {}", student.roll_number, slot);
        self.assignments.push(Assignment {
            exam_id: self.exam_id,
            student_id: student.student_id,
            hall_id: slot.hall_id,
            seat_number: slot.label(),
            row_number: slot.row,
            column_number: slot.column,
            bench_position: slot.bench_position,
        });
    }

    pub fn seated(&self) -> usize {
        self.assignments.len()
    }

    pub fn into_assignments(self) -> Vec<Assignment> {
        self.assignments
    }
}

/// A placement policy.
pub trait Strategy: Sync {
    fn method(&self) -> AllocationMethod;

    fn place(&self, ctx: &mut Placement<'_>);
}

/// The policy implementing `method`.
pub fn strategy_for(method: AllocationMethod) -> &'static dyn Strategy {
    match method {
        AllocationMethod::Standard => &StandardGap,
        AllocationMethod::BranchSegregated => &BranchSegregated,
        AllocationMethod::Zigzag => &Zigzag,
        AllocationMethod::YearSegregated => &YearSegregated,
        AllocationMethod::Optimized => &Optimized,
        AllocationMethod::Random => &RandomShuffle,
        AllocationMethod::LeftRight => &LeftRightSplit,
        AllocationMethod::AlternateBench => &AlternateBench,
    }
}
