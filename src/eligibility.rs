//! Roster and hall selection done by the caller before allocating.

use crate::data::{Exam, Hall, Student};
use crate::grouping::cmp_roll;
use itertools::Itertools;

impl Exam {
    /// Whether `student` satisfies every criterion this exam sets.
    pub fn admits(&self, student: &Student) -> bool {
        self.branch.as_ref().is_none_or(|b| *b == student.branch)
            && self.year.is_none_or(|y| y == student.year)
            && self.semester.is_none_or(|s| s == student.semester)
    }
}

/// Students eligible for `exam`, by roll number.
pub fn eligible_students(exam: &Exam, students: &[Student]) -> Vec<Student> {
    students
        .iter()
        .filter(|s| exam.admits(s))
        .sorted_by(|a, b| cmp_roll(a, b))
        .cloned()
        .collect()
}

/// Halls open for seating, by name.
pub fn available_halls(halls: &[Hall]) -> Vec<Hall> {
    halls
        .iter()
        .filter(|h| h.is_available)
        .sorted_by(|a, b| a.name.cmp(&b.name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{hall, student};

    #[test]
    fn unset_criteria_admit_everyone() {
        let exam = Exam::default();
        let students = vec![student(2, "R2", "ECE", 3), student(1, "R1", "CSE", 1)];
        let roster = eligible_students(&exam, &students);
        assert_eq!(roster.iter().map(|s| s.student_id).collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn every_set_criterion_must_match() {
        let exam = Exam {
            exam_id: 1,
            branch: Some("CSE".to_string()),
            year: Some(2),
            semester: Some(3),
        };
        let students = vec![
            student(1, "R1", "CSE", 2),
            student(2, "R2", "ECE", 2),
            student(3, "R3", "CSE", 1),
            Student {
                semester: 4,
                ..student(4, "R4", "CSE", 2)
            },
        ];
        let roster = eligible_students(&exam, &students);
        assert_eq!(roster.iter().map(|s| s.student_id).collect::<Vec<_>>(), [1]);
    }

    #[test]
    fn unavailable_halls_are_dropped_and_rest_sorted_by_name() {
        let mut closed = hall(1, 2, 2);
        closed.is_available = false;
        let mut b = hall(2, 2, 2);
        b.name = "B Block".to_string();
        let mut a = hall(3, 2, 2);
        a.name = "A Block".to_string();

        let open = available_halls(&[closed, b, a]);
        assert_eq!(open.iter().map(|h| h.hall_id).collect::<Vec<_>>(), [3, 2]);
    }
}
