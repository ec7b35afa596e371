use crate::data::{AllocationOutput, AllocationRequest, AllocationRule, Hall, Student, StudentId};
use crate::error::AllocationError;
use crate::strategy::{Placement, strategy_for};
use log::{info, trace, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::HashSet;
use std::time::Instant;

/// Seats the roster of `request` using the policy its rules select.
///
/// The random paths draw from `request.seed` when present and from OS
/// entropy otherwise.
pub fn allocate(request: &AllocationRequest) -> AllocationOutput {
    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    allocate_with_rng(request, &mut rng)
}

/// [`allocate`] with a caller-supplied source of randomness.
pub fn allocate_with_rng(request: &AllocationRequest, rng: &mut dyn RngCore) -> AllocationOutput {
    let start_time = Instant::now();
    let rules = &request.rules;
    let method = rules.allocation_method;

    info!(
        "Allocating exam {} with '{}': {} students, {} halls, {} slots",
        request.exam_id,
        method,
        request.students.len(),
        request.halls.len(),
        total_capacity(&request.halls, rules)
    );
    if method.is_random(rules) && request.seed.is_none() {
        trace!("unseeded run; the result will not be reproducible");
    }

    let mut ctx = Placement::new(request.exam_id, &request.students, &request.halls, rules, rng);
    strategy_for(method).place(&mut ctx);
    let assignments = ctx.into_assignments();

    let seated: HashSet<StudentId> = assignments.iter().map(|a| a.student_id).collect();
    let unassigned: Vec<StudentId> = request
        .students
        .iter()
        .map(|s| s.student_id)
        .filter(|id| !seated.contains(id))
        .collect();

    let duration = start_time.elapsed();
    info!(
        "Seated {} of {} students in {:.2?}",
        assignments.len(),
        request.students.len(),
        duration
    );
    if !unassigned.is_empty() {
        warn!("{} students left without a seat", unassigned.len());
    }

    AllocationOutput {
        exam_id: request.exam_id,
        method,
        allocated_count: assignments.len(),
        assignments,
        unassigned,
    }
}

/// Slots across `halls` under the bench capacity `rules` put in effect,
/// saturating at `usize::MAX`.
pub fn total_capacity(halls: &[Hall], rules: &AllocationRule) -> usize {
    halls
        .iter()
        .map(|h| h.slot_count(rules.bench_for(h)))
        .fold(0, usize::saturating_add)
}

/// The guard callers run before [`allocate`]: enough slots for everyone.
pub fn check_capacity(
    students: &[Student],
    halls: &[Hall],
    rules: &AllocationRule,
) -> Result<(), AllocationError> {
    let capacity = total_capacity(halls, rules);
    if capacity < students.len() {
        return Err(AllocationError::InsufficientCapacity {
            students: students.len(),
            capacity,
        });
    }
    Ok(())
}

/// Rejects requests the engine is not defined for, then checks capacity.
pub fn validate_request(request: &AllocationRequest) -> Result<(), AllocationError> {
    if request.students.is_empty() {
        return Err(AllocationError::NoStudents);
    }
    if request.halls.is_empty() {
        return Err(AllocationError::NoHalls);
    }

    for hall in &request.halls {
        if hall.total_rows == 0 || hall.total_columns == 0 {
            return Err(AllocationError::EmptyGrid(hall.hall_id));
        }
        if request.rules.bench_for(hall) == 0 {
            return Err(AllocationError::ZeroBenchCapacity(hall.hall_id));
        }
    }

    let mut seen = HashSet::new();
    if let Some(dup) = request.students.iter().find(|s| !seen.insert(s.student_id)) {
        return Err(AllocationError::DuplicateStudent(dup.student_id));
    }

    check_capacity(&request.students, &request.halls, &request.rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AllocationMethod, Assignment};
    use crate::fixtures::{assert_well_formed, cohort, hall};

    fn request(
        method: AllocationMethod,
        students: Vec<Student>,
        halls: Vec<Hall>,
    ) -> AllocationRequest {
        AllocationRequest {
            exam_id: 5,
            students,
            halls,
            rules: AllocationRule::new(method),
            seed: Some(99),
        }
    }

    fn mixed_roster() -> Vec<Student> {
        let mut students = cohort(1, 9, "CSE", 1);
        students.extend(cohort(100, 7, "ECE", 2));
        students.extend(cohort(200, 5, "ME", 4));
        students
    }

    #[test]
    fn every_policy_keeps_slots_unique_and_within_bounds() {
        let halls = vec![hall(1, 3, 4), hall(2, 2, 3)];
        for method in AllocationMethod::ALL {
            for bench in [1, 2, 3] {
                let mut req = request(method, mixed_roster(), halls.clone());
                req.rules.bench_capacity = Some(bench);
                let out = allocate(&req);

                assert_well_formed(&out.assignments);
                let slots = total_capacity(&req.halls, &req.rules);
                assert!(out.allocated_count <= req.students.len().min(slots), "{method}");
                assert_eq!(out.allocated_count + out.unassigned.len(), req.students.len());
                assert!(out.assignments.iter().all(|a| a.exam_id == 5));
            }
        }
    }

    #[test]
    fn deterministic_policies_repeat_without_a_seed() {
        let halls = vec![hall(1, 3, 4), hall(2, 4, 4)];
        for method in AllocationMethod::ALL {
            let mut req = request(method, mixed_roster(), halls.clone());
            req.seed = None;
            if method.is_random(&req.rules) {
                continue;
            }
            assert_eq!(allocate(&req), allocate(&req), "{method}");
        }
    }

    #[test]
    fn seeded_random_policies_repeat() {
        let halls = vec![hall(1, 5, 5)];
        let req = request(AllocationMethod::Random, mixed_roster(), halls.clone());
        assert_eq!(allocate(&req), allocate(&req));

        let mut req = request(AllocationMethod::Standard, mixed_roster(), halls);
        req.rules = req.rules.with_mixing(true, true);
        assert!(req.rules.allocation_method.is_random(&req.rules));
        assert_eq!(allocate(&req), allocate(&req));
    }

    #[test]
    fn short_capacity_degrades_without_error() {
        let req = request(AllocationMethod::Optimized, mixed_roster(), vec![hall(1, 2, 5)]);
        assert!(matches!(
            validate_request(&req),
            Err(AllocationError::InsufficientCapacity { students: 21, capacity: 10 })
        ));

        let out = allocate(&req);
        assert_eq!(out.allocated_count, 10);
        assert_eq!(out.unassigned.len(), 11);
    }

    #[test]
    fn unassigned_lists_roster_order() {
        let students = cohort(1, 4, "CSE", 1);
        let req = request(AllocationMethod::Optimized, students, vec![hall(1, 1, 2)]);
        let out = allocate(&req);
        assert_eq!(out.unassigned, [3, 4]);
    }

    #[test]
    fn output_mirrors_assignments() {
        let req = request(AllocationMethod::Standard, cohort(1, 3, "CSE", 1), vec![hall(1, 1, 6)]);
        let out = allocate(&req);
        assert_eq!(out.method, AllocationMethod::Standard);
        assert_eq!(out.allocated_count, out.assignments.len());
        let labels: Vec<&str> = out
            .assignments
            .iter()
            .map(|a: &Assignment| a.seat_number.as_str())
            .collect();
        assert_eq!(labels, ["A1", "A3", "A5"]);
    }

    #[test]
    fn validation_rejects_malformed_requests() {
        let empty = request(AllocationMethod::Standard, Vec::new(), vec![hall(1, 1, 1)]);
        assert_eq!(validate_request(&empty), Err(AllocationError::NoStudents));

        let no_halls = request(AllocationMethod::Standard, cohort(1, 1, "CSE", 1), Vec::new());
        assert_eq!(validate_request(&no_halls), Err(AllocationError::NoHalls));

        let flat = request(AllocationMethod::Standard, cohort(1, 1, "CSE", 1), vec![hall(4, 0, 3)]);
        assert_eq!(validate_request(&flat), Err(AllocationError::EmptyGrid(4)));

        let mut benchless =
            request(AllocationMethod::Standard, cohort(1, 1, "CSE", 1), vec![hall(2, 1, 1)]);
        benchless.rules.bench_capacity = Some(0);
        assert_eq!(validate_request(&benchless), Err(AllocationError::ZeroBenchCapacity(2)));

        let mut twice = cohort(1, 2, "CSE", 1);
        twice[1].student_id = 1;
        let dup = request(AllocationMethod::Standard, twice, vec![hall(1, 2, 2)]);
        assert_eq!(validate_request(&dup), Err(AllocationError::DuplicateStudent(1)));

        let ok = request(AllocationMethod::Standard, cohort(1, 4, "CSE", 1), vec![hall(1, 2, 2)]);
        assert_eq!(validate_request(&ok), Ok(()));
    }

    #[test]
    fn capacity_counts_benches() {
        let halls = vec![hall(1, 2, 3), hall(2, 1, 4)];
        assert_eq!(total_capacity(&halls, &AllocationRule::default()), 10);
        assert_eq!(total_capacity(&halls, &AllocationRule::default().with_bench_capacity(3)), 30);
    }

    #[test]
    fn oversized_halls_saturate_capacity() {
        let mut huge = hall(1, 1, 1);
        huge.total_rows = 5_000_000;
        huge.total_columns = 5_000_000;
        huge.bench_capacity = 5_000_000;
        let halls = vec![huge, hall(2, 2, 2)];
        assert_eq!(total_capacity(&halls, &AllocationRule::default()), usize::MAX);

        let req = request(AllocationMethod::Standard, cohort(1, 3, "CSE", 1), halls);
        assert_eq!(validate_request(&req), Ok(()));
    }

    #[test]
    fn widest_gap_seats_first_column_and_reports_the_rest() {
        let mut req =
            request(AllocationMethod::Standard, cohort(1, 3, "CSE", 1), vec![hall(1, 2, 3)]);
        req.rules = req.rules.with_gap(u32::MAX);
        assert_eq!(validate_request(&req), Ok(()));

        let out = allocate(&req);
        let labels: Vec<&str> = out.assignments.iter().map(|a| a.seat_number.as_str()).collect();
        assert_eq!(labels, ["A1", "B1"]);
        assert_eq!(out.unassigned, [3]);
    }
}
