use super::{Placement, Strategy};
use crate::data::{AllocationMethod, Student};
use crate::grouping::cmp_roll;
use crate::seat::Slot;
use itertools::Itertools;
use log::debug;
use std::vec::IntoIter;

/// Lowest year on the left half of each hall and highest year on the right.
///
/// With benches of two or more, the split moves onto the bench instead:
/// position 1 takes the lowest year and position 2 the highest
/// ("auditorium" mode). Students of any other year back-fill a seat whose
/// own queue has run dry. Queues carry over from hall to hall.
pub struct LeftRightSplit;

struct Queues<'a> {
    lower: IntoIter<&'a Student>,
    upper: IntoIter<&'a Student>,
    mixed: IntoIter<&'a Student>,
}

impl<'a> Queues<'a> {
    fn new(students: &'a [Student]) -> Self {
        let years: Vec<u32> = students.iter().map(|s| s.year).unique().sorted().collect();
        let (Some(&lowest), Some(&highest)) = (years.first(), years.last()) else {
            return Self::from_parts(Vec::new(), Vec::new(), Vec::new());
        };
        debug!("left/right split: lower year {}, upper year {}", lowest, highest);

        let pick = |keep: &dyn Fn(u32) -> bool| -> Vec<&'a Student> {
            students
                .iter()
                .filter(|s| keep(s.year))
                .sorted_by(|a, b| cmp_roll(a, b))
                .collect()
        };
        let lower = pick(&|year: u32| year == lowest);
        // a single year has no upper half
        let upper = pick(&|year: u32| year == highest && highest != lowest);
        let mixed = pick(&|year: u32| year != lowest && year != highest);
        Self::from_parts(lower, upper, mixed)
    }

    fn from_parts(
        lower: Vec<&'a Student>,
        upper: Vec<&'a Student>,
        mixed: Vec<&'a Student>,
    ) -> Self {
        Self {
            lower: lower.into_iter(),
            upper: upper.into_iter(),
            mixed: mixed.into_iter(),
        }
    }

    fn is_empty(&self) -> bool {
        self.lower.as_slice().is_empty()
            && self.upper.as_slice().is_empty()
            && self.mixed.as_slice().is_empty()
    }

    fn next_lower(&mut self) -> Option<&'a Student> {
        self.lower.next().or_else(|| self.mixed.next())
    }

    fn next_upper(&mut self) -> Option<&'a Student> {
        self.upper.next().or_else(|| self.mixed.next())
    }
}

impl Strategy for LeftRightSplit {
    fn method(&self) -> AllocationMethod {
        AllocationMethod::LeftRight
    }

    fn place(&self, ctx: &mut Placement<'_>) {
        let (halls, rules) = (ctx.halls, ctx.rules);
        let mut queues = Queues::new(ctx.students);

        for hall in halls {
            let auditorium = rules.bench_for(hall) >= 2;
            let mid_column = hall.total_columns.div_ceil(2);

            for row in 1..=hall.total_rows {
                for column in 1..=hall.total_columns {
                    if queues.is_empty() {
                        return;
                    }
                    if auditorium {
                        if let Some(student) = queues.next_lower() {
                            ctx.seat(student, Slot::new(hall.hall_id, row, column, 1));
                        }
                        if let Some(student) = queues.next_upper() {
                            ctx.seat(student, Slot::new(hall.hall_id, row, column, 2));
                        }
                    } else {
                        let next = if column <= mid_column {
                            queues.next_lower()
                        } else {
                            queues.next_upper()
                        };
                        if let Some(student) = next {
                            ctx.seat(student, Slot::new(hall.hall_id, row, column, 1));
                        }
                    }
                }
            }
        }
    }
}
