pub mod cell;
pub mod grades;

use cell::Cell;
use grades::GradeTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub name: String,
    pub max_score: i64,
    pub category: String,
    pub column: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    pub name: String,
    pub index: usize,
    pub crediting: bool,
    pub grader: String,
    /// Index into the bucket list; `None` for non-crediting categories or unknown graders.
    pub bucket: Option<usize>,
    pub problem_count: usize,
    pub start_column: usize,
    pub max_score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradingBucket {
    pub name: String,
    pub mode: i64,
    pub table: GradeTable,
    pub max_score: i64,
    pub problem_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub groups: Vec<String>,
    pub cells: Vec<Cell>,
    pub score_by_category: Vec<i64>,
    pub problems_by_category: Vec<u32>,
    pub score_by_bucket: Vec<i64>,
    pub problems_by_bucket: Vec<u32>,
    pub percent_by_bucket: Vec<u8>,
    pub mark_by_bucket: Vec<i32>,
    pub accumulated: Option<i32>,
    pub total_score: i64,
    pub total_problems: u32,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        groups: Vec<String>,
        columns: usize,
        categories: usize,
        buckets: usize,
    ) -> Self {
        Self {
            name: name.into(),
            groups,
            cells: vec![Cell::default(); columns],
            score_by_category: vec![0; categories],
            problems_by_category: vec![0; categories],
            score_by_bucket: vec![0; buckets],
            problems_by_bucket: vec![0; buckets],
            percent_by_bucket: vec![0; buckets],
            mark_by_bucket: vec![0; buckets],
            accumulated: None,
            total_score: 0,
            total_problems: 0,
        }
    }

    /// Group names joined by a single space; used as a sort key and for display.
    pub fn membership(&self) -> String {
        self.groups.join(" ")
    }

    /// Widened to `i64` so configured marks near `i32::MAX` cannot overflow.
    pub fn mark_sum(&self) -> i64 {
        self.mark_by_bucket.iter().map(|&m| i64::from(m)).sum()
    }
}
