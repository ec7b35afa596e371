use super::{Placement, Strategy};
use crate::cursor::SeatCursor;
use crate::data::{AllocationMethod, Student};
use crate::grouping::{partition_by_branch, partition_by_year};
use log::{debug, warn};
use std::fmt::Display;

/// One branch after another, each sorted by year then roll number.
pub struct BranchSegregated;

/// One year after another (ascending), each sorted by branch then roll number.
pub struct YearSegregated;

impl Strategy for BranchSegregated {
    fn method(&self) -> AllocationMethod {
        AllocationMethod::BranchSegregated
    }

    fn place(&self, ctx: &mut Placement<'_>) {
        let groups = partition_by_branch(ctx.students);
        fill_groups(ctx, "branch", groups);
    }
}

impl Strategy for YearSegregated {
    fn method(&self) -> AllocationMethod {
        AllocationMethod::YearSegregated
    }

    fn place(&self, ctx: &mut Placement<'_>) {
        let groups = partition_by_year(ctx.students);
        fill_groups(ctx, "year", groups);
    }
}

/// Seat each group in turn from one shared cursor. A group picks up at the
/// first slot the previous group left free, so halls are shared in sequence.
fn fill_groups<'s, K, I>(ctx: &mut Placement<'_>, kind: &str, groups: I)
where
    K: Display,
    I: IntoIterator<Item = (K, Vec<&'s Student>)>,
{
    let mut cursor = SeatCursor::new(ctx.halls, ctx.rules);

    for (key, group) in groups {
        let start_hall = cursor.hall_index();
        let mut seated = 0;
        for student in &group {
            let Some(slot) = cursor.next_slot() else {
                break;
            };
            ctx.seat(student, slot);
            seated += 1;
        }

        debug!(
            "{} {}: seated {} of {} from hall #{} to hall #{}",
            kind,
            key,
            seated,
            group.len(),
            start_hall,
            cursor.hall_index()
        );
        if seated < group.len() {
            warn!(
                "{} {}: halls exhausted, {} students left without a seat",
                kind,
                key,
                group.len() - seated
            );
        }
    }
}
