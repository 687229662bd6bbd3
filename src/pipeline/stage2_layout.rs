use std::collections::BTreeMap;

use crate::config::CourseConfig;
use crate::model::grades::GradeTable;
use crate::model::{CategoryInfo, GradingBucket, Problem};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Problems in declaration order.
    pub problems: Vec<Problem>,
    pub problem_index: BTreeMap<String, usize>,
    pub categories: Vec<CategoryInfo>,
    pub category_index: BTreeMap<String, usize>,
    pub buckets: Vec<GradingBucket>,
    pub bucket_index: BTreeMap<String, usize>,
    /// Problem index for each assigned column.
    pub columns: Vec<usize>,
    /// Sum of every declared problem score.
    pub max_score: i64,
    pub warnings: Vec<String>,
}

impl Layout {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn problem(&self, name: &str) -> Option<&Problem> {
        self.problem_index.get(name).map(|&i| &self.problems[i])
    }

    pub fn category(&self, name: &str) -> Option<&CategoryInfo> {
        self.category_index.get(name).map(|&i| &self.categories[i])
    }
}

/// Lays categories out in declaration order and gives each problem a column
/// inside its category's contiguous block. Grade tables are materialized here.
pub fn run_stage2(config: &CourseConfig) -> Layout {
    let mut layout = Layout::default();

    for spec in &config.buckets {
        layout
            .bucket_index
            .insert(spec.name.clone(), layout.buckets.len());
        layout.buckets.push(GradingBucket {
            name: spec.name.clone(),
            mode: spec.mode,
            table: GradeTable::from_rules(&spec.rules),
            max_score: 0,
            problem_count: 0,
        });
    }

    for (index, spec) in config.categories.iter().enumerate() {
        layout.category_index.insert(spec.name.clone(), index);
        layout.categories.push(CategoryInfo {
            name: spec.name.clone(),
            index,
            crediting: spec.crediting,
            grader: spec.grader.clone(),
            bucket: None,
            problem_count: 0,
            start_column: 0,
            max_score: 0,
        });
    }

    for def in &config.problems {
        layout
            .problem_index
            .insert(def.name.clone(), layout.problems.len());
        layout.problems.push(Problem {
            name: def.name.clone(),
            max_score: def.max_score,
            category: def.category.clone(),
            column: None,
        });
        layout.max_score += def.max_score;
    }

    // Within a category, problems take columns in name order.
    let by_name: Vec<usize> = layout.problem_index.values().copied().collect();

    for &p in &by_name {
        let problem = &layout.problems[p];
        match layout.category_index.get(&problem.category) {
            Some(&c) => {
                let cat = &mut layout.categories[c];
                cat.problem_count += 1;
                if problem.max_score > 0 {
                    cat.max_score += problem.max_score;
                }
            }
            None => {
                let msg = format!(
                    "problem '{}' refers to undeclared category '{}'",
                    problem.name, problem.category
                );
                tracing::warn!("{msg}");
                layout.warnings.push(msg);
            }
        }
    }

    let mut start = 0usize;
    for cat in &mut layout.categories {
        cat.start_column = start;
        start += cat.problem_count;
        if !cat.crediting {
            continue;
        }
        match layout.bucket_index.get(&cat.grader) {
            Some(&b) => {
                cat.bucket = Some(b);
                let bucket = &mut layout.buckets[b];
                bucket.problem_count += cat.problem_count;
                bucket.max_score += cat.max_score;
            }
            None => {
                let msg = format!(
                    "category '{}' credits unknown grading bucket '{}'",
                    cat.name, cat.grader
                );
                tracing::warn!("{msg}");
                layout.warnings.push(msg);
            }
        }
    }

    let mut cursor: Vec<usize> = layout.categories.iter().map(|c| c.start_column).collect();
    layout.columns = vec![0; start];
    for &p in &by_name {
        let Some(&c) = layout.category_index.get(&layout.problems[p].category) else {
            continue;
        };
        let column = cursor[c];
        cursor[c] += 1;
        layout.problems[p].column = Some(column);
        layout.columns[column] = p;
    }

    tracing::debug!(
        columns = start,
        categories = layout.categories.len(),
        buckets = layout.buckets.len(),
        "columns assigned"
    );
    layout
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_layout.rs"]
mod tests;
