//! Hall traversal.
//!
//! Stateless row-major slot iterators for the policies that walk each hall
//! independently, and [`SeatCursor`] for the policies that share halls
//! between consecutive student groups.

use crate::data::{AllocationRule, Hall};
use crate::seat::Slot;

/// Every slot of `hall`, row by row, left to right, bench positions innermost.
pub fn row_major(hall: &Hall, bench: u32) -> impl Iterator<Item = Slot> {
    row_major_where(hall, bench, |_| true)
}

/// Row-major slots restricted to the columns `keep_column` accepts.
pub fn row_major_where<F>(hall: &Hall, bench: u32, keep_column: F) -> impl Iterator<Item = Slot>
where
    F: Fn(u32) -> bool + Copy,
{
    let hall_id = hall.hall_id;
    let columns = hall.total_columns;
    (1..=hall.total_rows).flat_map(move |row| {
        (1..=columns)
            .filter(move |&column| keep_column(column))
            .flat_map(move |column| {
                (1..=bench).map(move |position| Slot::new(hall_id, row, column, position))
            })
    })
}

/// A position in an ordered hall list that only ever moves forward.
///
/// Consecutive groups drawing from the same cursor continue from the first
/// free slot, so a hall can end up split between two groups.
#[derive(Debug, Clone)]
pub struct SeatCursor<'h> {
    halls: &'h [Hall],
    benches: Vec<u32>,
    hall_index: usize,
    row: u32,
    column: u32,
    bench_position: u32,
}

impl<'h> SeatCursor<'h> {
    pub fn new(halls: &'h [Hall], rules: &AllocationRule) -> Self {
        Self {
            halls,
            benches: halls.iter().map(|h| rules.bench_for(h)).collect(),
            hall_index: 0,
            row: 1,
            column: 1,
            bench_position: 1,
        }
    }

    pub fn hall_index(&self) -> usize {
        self.hall_index
    }

    /// The slot [`next_slot`](Self::next_slot) would hand out, without taking it.
    pub fn peek(&self) -> Option<Slot> {
        self.clone().next_slot()
    }

    pub fn is_exhausted(&self) -> bool {
        self.peek().is_none()
    }

    /// Take the next free slot, moving on to the next hall once the current
    /// grid is used up. `None` once every hall is full.
    pub fn next_slot(&mut self) -> Option<Slot> {
        loop {
            let hall = self.halls.get(self.hall_index)?;
            let bench = self.benches[self.hall_index];
            if self.row > hall.total_rows || hall.total_columns == 0 || bench == 0 {
                self.next_hall();
                continue;
            }

            let slot = Slot::new(hall.hall_id, self.row, self.column, self.bench_position);
            self.step(hall.total_columns, bench);
            return Some(slot);
        }
    }

    fn step(&mut self, columns: u32, bench: u32) {
        self.bench_position += 1;
        if self.bench_position > bench {
            self.bench_position = 1;
            self.column += 1;
            if self.column > columns {
                self.column = 1;
                self.row += 1;
            }
        }
    }

    fn next_hall(&mut self) {
        self.hall_index += 1;
        self.row = 1;
        self.column = 1;
        self.bench_position = 1;
    }
}

impl Iterator for SeatCursor<'_> {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        self.next_slot()
    }
}
