use super::{Placement, Strategy};
use crate::cursor::row_major_where;
use crate::data::AllocationMethod;
use crate::grouping::order_roster;

/// Default policy: roster in grouping order, leaving `gap` empty columns
/// between occupied ones.
pub struct StandardGap;

/// Whether `column` (1-based) is seatable under a horizontal gap of `gap`.
pub fn keeps_column(column: u32, gap: u32) -> bool {
    match gap.checked_add(1) {
        Some(step) => (column - 1) % step == 0,
        // wider than any grid: only the first column
        None => column == 1,
    }
}

impl Strategy for StandardGap {
    fn method(&self) -> AllocationMethod {
        AllocationMethod::Standard
    }

    fn place(&self, ctx: &mut Placement<'_>) {
        let (halls, rules) = (ctx.halls, ctx.rules);
        let gap = rules.gap_between_students;
        let roster = order_roster(ctx.students, rules.mix_branches, rules.mix_years, &mut *ctx.rng);

        let slots = halls.iter().flat_map(|hall| {
            row_major_where(hall, rules.bench_for(hall), move |c| keeps_column(c, gap))
        });
        for (student, slot) in roster.into_iter().zip(slots) {
            ctx.seat(student, slot);
        }
    }
}
