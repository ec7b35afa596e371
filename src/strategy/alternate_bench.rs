use super::{Placement, Strategy};
use crate::cursor::row_major_where;
use crate::data::AllocationMethod;
use crate::grouping::order_roster;

/// Two passes per hall: odd columns in every row first, then even columns.
pub struct AlternateBench;

impl Strategy for AlternateBench {
    fn method(&self) -> AllocationMethod {
        AllocationMethod::AlternateBench
    }

    fn place(&self, ctx: &mut Placement<'_>) {
        let (halls, rules) = (ctx.halls, ctx.rules);
        let roster = order_roster(ctx.students, rules.mix_branches, rules.mix_years, &mut *ctx.rng);

        let slots = halls.iter().flat_map(|hall| {
            let bench = rules.bench_for(hall);
            row_major_where(hall, bench, |c| c % 2 == 1)
                .chain(row_major_where(hall, bench, |c| c % 2 == 0))
        });
        for (student, slot) in roster.into_iter().zip(slots) {
            ctx.seat(student, slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AllocationRule;
    use crate::fixtures::{assert_well_formed, cohort, hall};
    use crate::strategy::tests::run;

    #[test]
    fn odd_columns_of_every_row_come_first() {
        let students = cohort(1, 7, "CSE", 1);
        let halls = vec![hall(1, 2, 6)];
        let out = run(
            AllocationMethod::AlternateBench,
            &students,
            &halls,
            AllocationRule::default(),
        );

        let cells: Vec<(u32, u32)> = out.iter().map(|a| (a.row_number, a.column_number)).collect();
        assert_eq!(
            cells,
            [(1, 1), (1, 3), (1, 5), (2, 1), (2, 3), (2, 5), (1, 2)]
        );
    }

    #[test]
    fn second_pass_fills_the_hall_before_the_next() {
        let students = cohort(1, 10, "CSE", 1);
        let halls = vec![hall(1, 2, 3), hall(2, 2, 3)];
        let out = run(
            AllocationMethod::AlternateBench,
            &students,
            &halls,
            AllocationRule::default(),
        );
        assert_well_formed(&out);
        assert_eq!(out.iter().filter(|a| a.hall_id == 1).count(), 6);
        let second: Vec<(u32, u32)> = out[6..]
            .iter()
            .map(|a| (a.row_number, a.column_number))
            .collect();
        assert_eq!(second, [(1, 1), (1, 3), (2, 1), (2, 3)]);
    }
}
