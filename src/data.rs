use serde::{Deserialize, Serialize};
use std::fmt;

// Type aliases for clarity
pub type StudentId = u32;
pub type HallId = u32;
pub type ExamId = u32;

/// An examinee to be seated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub student_id: StudentId,
    pub roll_number: String,
    pub branch: String,
    pub year: u32,
    pub semester: u32,
}

/// A physical exam hall laid out as a grid of benches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hall {
    pub hall_id: HallId,
    #[serde(default)]
    pub name: String,
    pub total_rows: u32,
    pub total_columns: u32,
    /// Nominal seat count. Only used to rank halls for the optimized policy.
    pub capacity: u32,
    #[serde(default = "default_bench_capacity")]
    pub bench_capacity: u32,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

impl Hall {
    /// Number of seatable slots when every bench holds `bench` students.
    ///
    /// Saturates at `usize::MAX` for grids too large to count.
    pub fn slot_count(&self, bench: u32) -> usize {
        [self.total_columns, bench]
            .into_iter()
            .try_fold(self.total_rows as usize, |acc, n| acc.checked_mul(n as usize))
            .unwrap_or(usize::MAX)
    }
}

fn default_bench_capacity() -> u32 {
    1
}

fn default_available() -> bool {
    true
}

fn default_gap() -> u32 {
    1
}

/// The eight placement policies.
///
/// Names are matched exactly; anything else (including a missing value)
/// falls back to [`AllocationMethod::Standard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum AllocationMethod {
    #[default]
    Standard,
    BranchSegregated,
    Zigzag,
    YearSegregated,
    Optimized,
    Random,
    LeftRight,
    AlternateBench,
}

impl AllocationMethod {
    pub const ALL: [AllocationMethod; 8] = [
        AllocationMethod::Standard,
        AllocationMethod::BranchSegregated,
        AllocationMethod::Zigzag,
        AllocationMethod::YearSegregated,
        AllocationMethod::Optimized,
        AllocationMethod::Random,
        AllocationMethod::LeftRight,
        AllocationMethod::AlternateBench,
    ];

    pub fn from_name(name: &str) -> Self {
        match name {
            "standard" => AllocationMethod::Standard,
            "branch_segregated" => AllocationMethod::BranchSegregated,
            "zigzag" => AllocationMethod::Zigzag,
            "year_segregated" => AllocationMethod::YearSegregated,
            "optimized" => AllocationMethod::Optimized,
            "random" => AllocationMethod::Random,
            "left_right" => AllocationMethod::LeftRight,
            "alternate_bench" => AllocationMethod::AlternateBench,
            _ => AllocationMethod::Standard,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AllocationMethod::Standard => "standard",
            AllocationMethod::BranchSegregated => "branch_segregated",
            AllocationMethod::Zigzag => "zigzag",
            AllocationMethod::YearSegregated => "year_segregated",
            AllocationMethod::Optimized => "optimized",
            AllocationMethod::Random => "random",
            AllocationMethod::LeftRight => "left_right",
            AllocationMethod::AlternateBench => "alternate_bench",
        }
    }

    /// Whether two runs over the same input may differ.
    pub fn is_random(&self, rules: &AllocationRule) -> bool {
        match self {
            AllocationMethod::Random => true,
            AllocationMethod::Standard | AllocationMethod::AlternateBench => {
                rules.mix_branches && rules.mix_years
            }
            _ => false,
        }
    }
}

impl From<Option<String>> for AllocationMethod {
    fn from(name: Option<String>) -> Self {
        name.as_deref()
            .map(AllocationMethod::from_name)
            .unwrap_or_default()
    }
}

impl From<AllocationMethod> for String {
    fn from(method: AllocationMethod) -> Self {
        method.name().to_string()
    }
}

impl fmt::Display for AllocationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Policy configuration for one allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRule {
    #[serde(default)]
    pub allocation_method: AllocationMethod,
    /// Overrides every hall's own bench capacity when set.
    #[serde(default)]
    pub bench_capacity: Option<u32>,
    /// Columns skipped between occupied columns (standard policy only).
    #[serde(default = "default_gap")]
    pub gap_between_students: u32,
    #[serde(default)]
    pub mix_branches: bool,
    #[serde(default)]
    pub mix_years: bool,
}

impl AllocationRule {
    pub fn new(allocation_method: AllocationMethod) -> Self {
        Self {
            allocation_method,
            ..Self::default()
        }
    }

    pub fn with_bench_capacity(mut self, bench_capacity: u32) -> Self {
        self.bench_capacity = Some(bench_capacity);
        self
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap_between_students = gap;
        self
    }

    pub fn with_mixing(mut self, mix_branches: bool, mix_years: bool) -> Self {
        self.mix_branches = mix_branches;
        self.mix_years = mix_years;
        self
    }

    /// Bench capacity in effect for `hall` under these rules.
    pub fn bench_for(&self, hall: &Hall) -> u32 {
        self.bench_capacity.unwrap_or(hall.bench_capacity)
    }
}

impl Default for AllocationRule {
    fn default() -> Self {
        Self {
            allocation_method: AllocationMethod::Standard,
            bench_capacity: None,
            gap_between_students: default_gap(),
            mix_branches: false,
            mix_years: false,
        }
    }
}

/// One student seated at one slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub exam_id: ExamId,
    pub student_id: StudentId,
    pub hall_id: HallId,
    pub seat_number: String,
    pub row_number: u32,
    pub column_number: u32,
    pub bench_position: u32,
}

/// The complete input for one allocation run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    pub exam_id: ExamId,
    pub students: Vec<Student>,
    pub halls: Vec<Hall>,
    #[serde(default)]
    pub rules: AllocationRule,
    /// Seed for the randomized paths; fresh entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// The result of one allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationOutput {
    pub exam_id: ExamId,
    pub method: AllocationMethod,
    pub assignments: Vec<Assignment>,
    pub allocated_count: usize,
    /// Students left without a seat, in roster order.
    pub unassigned: Vec<StudentId>,
}

/// Eligibility criteria of an exam. Unset criteria match everyone.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub exam_id: ExamId,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub semester: Option<u32>,
}
