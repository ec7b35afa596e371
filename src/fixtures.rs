//! Builders and checks shared by the unit tests.

use crate::data::{Assignment, Hall, HallId, Student, StudentId};
use std::collections::HashSet;

pub fn student(id: StudentId, roll: &str, branch: &str, year: u32) -> Student {
    Student {
        student_id: id,
        roll_number: roll.to_string(),
        branch: branch.to_string(),
        year,
        semester: year * 2 - 1,
    }
}

/// `count` students of one branch and year, ids and roll numbers starting at `first`.
pub fn cohort(first: StudentId, count: u32, branch: &str, year: u32) -> Vec<Student> {
    (first..first + count)
        .map(|id| student(id, &format!("{branch}{year}-{id:04}"), branch, year))
        .collect()
}

pub fn hall(id: HallId, rows: u32, columns: u32) -> Hall {
    Hall {
        hall_id: id,
        name: format!("Hall {id}"),
        total_rows: rows,
        total_columns: columns,
        capacity: rows * columns,
        bench_capacity: 1,
        is_available: true,
    }
}

pub fn slots(assignments: &[Assignment]) -> Vec<(HallId, u32, u32, u32)> {
    assignments
        .iter()
        .map(|a| (a.hall_id, a.row_number, a.column_number, a.bench_position))
        .collect()
}

/// Panics if two assignments share a slot or a student is seated twice.
pub fn assert_well_formed(assignments: &[Assignment]) {
    let mut seen_slots = HashSet::new();
    let mut seen_students = HashSet::new();
    for a in assignments {
        assert!(
            seen_slots.insert((a.hall_id, a.row_number, a.column_number, a.bench_position)),
            "slot reused: {a:?}"
        );
        assert!(seen_students.insert(a.student_id), "student seated twice: {a:?}");
    }
}
