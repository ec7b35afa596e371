use super::{Placement, Strategy};
use crate::data::AllocationMethod;
use crate::grouping::partition_by_branch_roll;
use crate::seat::Slot;
use itertools::Either;

/// Branches interleaved round-robin, one branch per bench, with the column
/// direction flipping on every row.
pub struct Zigzag;

impl Strategy for Zigzag {
    fn method(&self) -> AllocationMethod {
        AllocationMethod::Zigzag
    }

    fn place(&self, ctx: &mut Placement<'_>) {
        let (halls, rules) = (ctx.halls, ctx.rules);
        let groups: Vec<_> = partition_by_branch_roll(ctx.students).into_values().collect();
        if groups.is_empty() {
            return;
        }

        let mut next = vec![0usize; groups.len()];
        let mut remaining: usize = groups.iter().map(Vec::len).sum();
        let mut turn = 0usize;

        for hall in halls {
            let bench = rules.bench_for(hall);
            for row in 1..=hall.total_rows {
                // even rows run right to left
                let columns = if row % 2 == 0 {
                    Either::Left((1..=hall.total_columns).rev())
                } else {
                    Either::Right(1..=hall.total_columns)
                };

                for column in columns {
                    if remaining == 0 {
                        return;
                    }
                    for _ in 0..groups.len() {
                        let branch = turn % groups.len();
                        turn += 1;
                        let group = &groups[branch];
                        if next[branch] >= group.len() {
                            continue;
                        }
                        for position in 1..=bench {
                            let Some(student) = group.get(next[branch]) else {
                                break;
                            };
                            ctx.seat(student, Slot::new(hall.hall_id, row, column, position));
                            next[branch] += 1;
                            remaining -= 1;
                        }
                        break;
                    }
                }
            }
        }
    }
}
