use crate::data::{HallId, StudentId};
use crate::seat::Slot;
use thiserror::Error;

/// Caller-side failures: request validation and edits to a stored plan.
///
/// The placement engine itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("no eligible students found")]
    NoStudents,
    #[error("no available halls found")]
    NoHalls,
    #[error("insufficient capacity. Students: {students}, Capacity: {capacity}")]
    InsufficientCapacity { students: usize, capacity: usize },
    #[error("hall {0} has an empty seating grid")]
    EmptyGrid(HallId),
    #[error("hall {0} has a bench capacity of zero")]
    ZeroBenchCapacity(HallId),
    #[error("student {0} appears more than once in the roster")]
    DuplicateStudent(StudentId),
    #[error("hall {0} not found")]
    UnknownHall(HallId),
    #[error("student {0} has no seat in this allocation")]
    NotAllocated(StudentId),
    #[error("{slot} is outside the hall grid")]
    OutOfGrid { slot: Slot },
    #[error("{slot} is already taken by student {occupant}")]
    SlotTaken { slot: Slot, occupant: StudentId },
}
