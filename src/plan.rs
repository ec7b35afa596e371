use crate::data::{AllocationOutput, AllocationRule, Assignment, ExamId, Hall, HallId, StudentId};
use crate::error::AllocationError;
use crate::seat::Slot;
use log::info;
use serde::Serialize;

/// The stored result of an allocation run, open to manual edits.
///
/// A fresh run replaces the whole plan for its exam.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationPlan {
    pub exam_id: ExamId,
    pub halls: Vec<Hall>,
    /// The rules of the run, for the bench capacity each hall seats.
    pub rules: AllocationRule,
    pub assignments: Vec<Assignment>,
}

fn slot_of(a: &Assignment) -> Slot {
    Slot::new(a.hall_id, a.row_number, a.column_number, a.bench_position)
}

impl AllocationPlan {
    pub fn new(output: &AllocationOutput, halls: Vec<Hall>, rules: AllocationRule) -> Self {
        Self {
            exam_id: output.exam_id,
            halls,
            rules,
            assignments: output.assignments.clone(),
        }
    }

    pub fn hall(&self, hall_id: HallId) -> Option<&Hall> {
        self.halls.iter().find(|h| h.hall_id == hall_id)
    }

    pub fn for_student(&self, student_id: StudentId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.student_id == student_id)
    }

    pub fn for_hall(&self, hall_id: HallId) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter().filter(move |a| a.hall_id == hall_id)
    }

    fn position(&self, student_id: StudentId) -> Result<usize, AllocationError> {
        self.assignments
            .iter()
            .position(|a| a.student_id == student_id)
            .ok_or(AllocationError::NotAllocated(student_id))
    }

    /// Exchange the seats of two allocated students.
    pub fn swap_seats(
        &mut self,
        first: StudentId,
        second: StudentId,
    ) -> Result<(), AllocationError> {
        let i = self.position(first)?;
        let j = self.position(second)?;
        if i == j {
            return Ok(());
        }

        let a = slot_of(&self.assignments[i]);
        let b = slot_of(&self.assignments[j]);
        self.place(i, b);
        self.place(j, a);
        info!("exam {}: swapped students {} and {}", self.exam_id, first, second);
        Ok(())
    }

    /// Seat `student_id` at `slot`, moving them if they already have a seat.
    pub fn assign_manually(
        &mut self,
        student_id: StudentId,
        slot: Slot,
    ) -> Result<&Assignment, AllocationError> {
        let hall = self
            .hall(slot.hall_id)
            .ok_or(AllocationError::UnknownHall(slot.hall_id))?;
        let in_grid = (1..=hall.total_rows).contains(&slot.row)
            && (1..=hall.total_columns).contains(&slot.column)
            && (1..=self.rules.bench_for(hall)).contains(&slot.bench_position);
        if !in_grid {
            return Err(AllocationError::OutOfGrid { slot });
        }
        if let Some(holder) = self
            .assignments
            .iter()
            .find(|a| slot_of(a) == slot && a.student_id != student_id)
        {
            return Err(AllocationError::SlotTaken {
                slot,
                occupant: holder.student_id,
            });
        }

        let index = match self.position(student_id) {
            Ok(index) => index,
            Err(_) => {
                self.assignments.push(Assignment {
                    exam_id: self.exam_id,
                    student_id,
                    hall_id: slot.hall_id,
                    seat_number: String::new(),
                    row_number: 0,
                    column_number: 0,
                    bench_position: 0,
                });
                self.assignments.len() - 1
            }
        };
        self.place(index, slot);
        info!("exam {}: student {} manually seated at {}", self.exam_id, student_id, slot);
        Ok(&self.assignments[index])
    }

    /// Drop a student's seat, returning it.
    pub fn remove_student(&mut self, student_id: StudentId) -> Option<Assignment> {
        let index = self.position(student_id).ok()?;
        Some(self.assignments.remove(index))
    }

    fn place(&mut self, index: usize, slot: Slot) {
        let a = &mut self.assignments[index];
        a.hall_id = slot.hall_id;
        a.row_number = slot.row;
        a.column_number = slot.column;
        a.bench_position = slot.bench_position;
        a.seat_number = slot.label();
    }
}
