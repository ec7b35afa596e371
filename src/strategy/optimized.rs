use super::{Placement, Strategy};
use crate::cursor::row_major;
use crate::data::AllocationMethod;
use crate::grouping::by_roll_number;
use itertools::Itertools;

/// Roll-number order, largest halls first.
pub struct Optimized;

impl Strategy for Optimized {
    fn method(&self) -> AllocationMethod {
        AllocationMethod::Optimized
    }

    fn place(&self, ctx: &mut Placement<'_>) {
        let (halls, rules) = (ctx.halls, ctx.rules);
        let roster = by_roll_number(ctx.students);

        // stable: equal capacities keep the caller's order
        let slots = halls
            .iter()
            .sorted_by(|a, b| b.capacity.cmp(&a.capacity))
            .flat_map(|hall| row_major(hall, rules.bench_for(hall)));
        for (student, slot) in roster.into_iter().zip(slots) {
            ctx.seat(student, slot);
        }
    }
}
