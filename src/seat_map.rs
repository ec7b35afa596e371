//! Grid views of an allocation for one hall.

use crate::data::{Assignment, Hall, StudentId};
use crate::seat::seat_label;
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashMap;

/// One bench in the grid with everyone seated on it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatCell {
    pub row: u32,
    pub column: u32,
    pub seat_number: String,
    /// Occupants in bench-position order.
    pub students: Vec<Assignment>,
    pub occupied: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatMap {
    pub hall: Hall,
    /// `seats[row - 1][column - 1]`
    pub seats: Vec<Vec<SeatCell>>,
}

fn benches(hall: &Hall, assignments: &[Assignment]) -> HashMap<(u32, u32), Vec<Assignment>> {
    assignments
        .iter()
        .filter(|a| a.hall_id == hall.hall_id)
        .cloned()
        .into_group_map_by(|a| (a.row_number, a.column_number))
        .into_iter()
        .map(|(cell, mut occupants)| {
            occupants.sort_by_key(|a| a.bench_position);
            (cell, occupants)
        })
        .collect()
}

fn cell_label(occupants: &[Assignment], row: u32, column: u32) -> String {
    occupants
        .first()
        .map(|a| a.seat_number.clone())
        .unwrap_or_else(|| seat_label(row, column, 1))
}

impl SeatMap {
    /// Lays `assignments` out on `hall`'s grid. Assignments for other halls
    /// are ignored.
    pub fn build(hall: &Hall, assignments: &[Assignment]) -> Self {
        let mut by_cell = benches(hall, assignments);
        let seats = (1..=hall.total_rows)
            .map(|row| {
                (1..=hall.total_columns)
                    .map(|column| {
                        let students = by_cell.remove(&(row, column)).unwrap_or_default();
                        SeatCell {
                            row,
                            column,
                            seat_number: cell_label(&students, row, column),
                            occupied: !students.is_empty(),
                            students,
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            hall: hall.clone(),
            seats,
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.seats
            .iter()
            .flatten()
            .map(|cell| cell.students.len())
            .sum()
    }
}

/// An anonymized bench as shown to a student.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSeatCell {
    pub row: u32,
    pub column: u32,
    pub seat_number: String,
    pub occupied: bool,
    pub is_my_seat: bool,
    pub count: usize,
}

/// A student's own seat plus an anonymized view of the rest of the hall.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSeatMap {
    pub my_allocation: Assignment,
    pub hall: Hall,
    pub seats: Vec<Vec<StudentSeatCell>>,
}

impl StudentSeatMap {
    /// `None` when the student has no seat or the seat's hall is not in `halls`.
    pub fn build(
        halls: &[Hall],
        assignments: &[Assignment],
        student_id: StudentId,
    ) -> Option<Self> {
        let mine = assignments.iter().find(|a| a.student_id == student_id)?;
        let hall = halls.iter().find(|h| h.hall_id == mine.hall_id)?;

        let by_cell = benches(hall, assignments);
        let seats = (1..=hall.total_rows)
            .map(|row| {
                (1..=hall.total_columns)
                    .map(|column| {
                        let occupants = by_cell
                            .get(&(row, column))
                            .map(Vec::as_slice)
                            .unwrap_or(&[]);
                        StudentSeatCell {
                            row,
                            column,
                            seat_number: cell_label(occupants, row, column),
                            occupied: !occupants.is_empty(),
                            is_my_seat: mine.row_number == row && mine.column_number == column,
                            count: occupants.len(),
                        }
                    })
                    .collect()
            })
            .collect();

        Some(Self {
            my_allocation: mine.clone(),
            hall: hall.clone(),
            seats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::allocate;
    use crate::data::{AllocationMethod, AllocationRequest, AllocationRule};
    use crate::fixtures::{cohort, hall};

    fn seated(bench: u32) -> (Vec<Hall>, Vec<Assignment>) {
        let halls = vec![hall(1, 2, 3), hall(2, 2, 3)];
        let request = AllocationRequest {
            exam_id: 1,
            students: cohort(1, 9, "CSE", 1),
            halls: halls.clone(),
            rules: AllocationRule::new(AllocationMethod::Optimized).with_bench_capacity(bench),
            seed: None,
        };
        (halls, allocate(&request).assignments)
    }

    #[test]
    fn grid_matches_hall_shape_and_occupancy() {
        let (halls, assignments) = seated(1);
        let map = SeatMap::build(&halls[0], &assignments);

        assert_eq!(map.seats.len(), 2);
        assert!(map.seats.iter().all(|row| row.len() == 3));
        assert_eq!(map.occupied_count(), 6);
        assert_eq!(map.seats[1][2].seat_number, "B3");
        assert_eq!(map.seats[1][2].students[0].student_id, 6);

        let second = SeatMap::build(&halls[1], &assignments);
        assert_eq!(second.occupied_count(), 3);
        assert!(!second.seats[1][0].occupied);
        assert_eq!(second.seats[1][0].seat_number, "B1");
    }

    #[test]
    fn bench_occupants_listed_in_position_order() {
        let (halls, mut assignments) = seated(2);
        assignments.reverse();
        let map = SeatMap::build(&halls[0], &assignments);

        let first = &map.seats[0][0];
        let positions: Vec<u32> = first.students.iter().map(|a| a.bench_position).collect();
        assert_eq!(positions, [1, 2]);
        assert_eq!(first.seat_number, "A1");
        assert_eq!(map.seats[0][2].students.len(), 2);
        assert_eq!(map.seats[1][1].students.len(), 1);
    }

    #[test]
    fn student_view_marks_own_seat() {
        let (halls, assignments) = seated(1);
        let view = StudentSeatMap::build(&halls, &assignments, 8).unwrap();

        assert_eq!(view.hall.hall_id, 2);
        assert_eq!(view.my_allocation.seat_number, "A2");
        let mine: Vec<(u32, u32)> = view
            .seats
            .iter()
            .flatten()
            .filter(|c| c.is_my_seat)
            .map(|c| (c.row, c.column))
            .collect();
        assert_eq!(mine, [(1, 2)]);
        assert_eq!(view.seats.iter().flatten().map(|c| c.count).sum::<usize>(), 3);
    }

    #[test]
    fn student_without_seat_has_no_view() {
        let (halls, assignments) = seated(1);
        assert!(StudentSeatMap::build(&halls, &assignments, 404).is_none());
    }
}
