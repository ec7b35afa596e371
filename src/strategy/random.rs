use super::{Placement, Strategy};
use crate::cursor::row_major;
use crate::data::AllocationMethod;
use crate::grouping::shuffled;

/// The whole roster shuffled, halls filled row-major in the given order.
///
/// Reproducible only when the caller seeds the generator.
pub struct RandomShuffle;

impl Strategy for RandomShuffle {
    fn method(&self) -> AllocationMethod {
        AllocationMethod::Random
    }

    fn place(&self, ctx: &mut Placement<'_>) {
        let (halls, rules) = (ctx.halls, ctx.rules);
        let roster = shuffled(ctx.students, &mut *ctx.rng);

        let slots = halls
            .iter()
            .flat_map(|hall| row_major(hall, rules.bench_for(hall)));
        for (student, slot) in roster.into_iter().zip(slots) {
            ctx.seat(student, slot);
        }
    }
}
