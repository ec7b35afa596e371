//! Roster ordering and partitioning.
//!
//! Every helper borrows the caller's roster and returns a new ordering of
//! references; the input slice is never reordered.

use crate::data::Student;
use itertools::Itertools;
use rand::RngCore;
use rand::seq::SliceRandom;
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub fn cmp_roll(a: &Student, b: &Student) -> Ordering {
    a.roll_number.cmp(&b.roll_number)
}

pub fn cmp_year_roll(a: &Student, b: &Student) -> Ordering {
    a.year.cmp(&b.year).then_with(|| cmp_roll(a, b))
}

pub fn cmp_branch_roll(a: &Student, b: &Student) -> Ordering {
    a.branch.cmp(&b.branch).then_with(|| cmp_roll(a, b))
}

pub fn cmp_branch_year_roll(a: &Student, b: &Student) -> Ordering {
    a.branch.cmp(&b.branch).then_with(|| cmp_year_roll(a, b))
}

/// The default roster order shared by the standard and alternate-bench policies.
///
/// - branches kept apart: branch, then year, then roll number
/// - branches mixed, years kept apart: year, then roll number
/// - both mixed: uniformly shuffled
pub fn order_roster<'a>(
    students: &'a [Student],
    mix_branches: bool,
    mix_years: bool,
    rng: &mut dyn RngCore,
) -> Vec<&'a Student> {
    if !mix_branches {
        students.iter().sorted_by(|a, b| cmp_branch_year_roll(a, b)).collect()
    } else if !mix_years {
        students.iter().sorted_by(|a, b| cmp_year_roll(a, b)).collect()
    } else {
        shuffled(students, rng)
    }
}

pub fn by_roll_number(students: &[Student]) -> Vec<&Student> {
    students.iter().sorted_by(|a, b| cmp_roll(a, b)).collect()
}

/// Fisher-Yates shuffle of the whole roster.
pub fn shuffled<'a>(students: &'a [Student], rng: &mut dyn RngCore) -> Vec<&'a Student> {
    let mut roster: Vec<&Student> = students.iter().collect();
    roster.shuffle(rng);
    roster
}

fn partition<'a, K, F, C>(
    students: &'a [Student],
    key: F,
    order: C,
) -> BTreeMap<K, Vec<&'a Student>>
where
    K: Ord + std::hash::Hash,
    F: Fn(&'a Student) -> K,
    C: Fn(&Student, &Student) -> Ordering,
{
    students
        .iter()
        .into_group_map_by(|s| key(*s))
        .into_iter()
        .map(|(k, mut group)| {
            group.sort_by(|a, b| order(a, b));
            (k, group)
        })
        .collect()
}

/// Branches in alphabetical order, each ordered by year then roll number.
pub fn partition_by_branch(students: &[Student]) -> BTreeMap<&str, Vec<&Student>> {
    partition(students, |s| s.branch.as_str(), cmp_year_roll)
}

/// Branches in alphabetical order, each ordered by roll number only.
pub fn partition_by_branch_roll(students: &[Student]) -> BTreeMap<&str, Vec<&Student>> {
    partition(students, |s| s.branch.as_str(), cmp_roll)
}

/// Years ascending, each ordered by branch then roll number.
pub fn partition_by_year(students: &[Student]) -> BTreeMap<u32, Vec<&Student>> {
    partition(students, |s| s.year, cmp_branch_roll)
}
