use crate::data::HallId;
use std::fmt;

/// A unique physical seat address; the atomic unit of seating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub hall_id: HallId,
    pub row: u32,
    pub column: u32,
    /// 1-based position on the bench.
    pub bench_position: u32,
}

impl Slot {
    pub fn new(hall_id: HallId, row: u32, column: u32, bench_position: u32) -> Self {
        Self {
            hall_id,
            row,
            column,
            bench_position,
        }
    }

    pub fn label(&self) -> String {
        seat_label(self.row, self.column, self.bench_position)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hall {} seat {}", self.hall_id, self.label())
    }
}

/// Letters for a 1-based row: 1 → `A`, 26 → `Z`, 27 → `AA`.
pub fn row_letters(row: u32) -> String {
    let mut letters = Vec::new();
    let mut n = row;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Human-readable seat code, e.g. `B3` or `B3-2` for the second bench position.
pub fn seat_label(row: u32, column: u32, bench_position: u32) -> String {
    if bench_position > 1 {
        format!("{}{}-{}", row_letters(row), column, bench_position)
    } else {
        format!("{}{}", row_letters(row), column)
    }
}
