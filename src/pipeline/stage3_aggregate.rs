use std::collections::BTreeMap;

use thiserror::Error;

use crate::input::standings::Extraction;
use crate::model::User;
use crate::model::grades::{GradingError, accumulated_mark, percentage};
use crate::pipeline::stage2_layout::Layout;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("internal inconsistency: cell '{label}' belongs to user '{user}' who was never extracted")]
    UnknownUser { user: String, label: String },
    #[error(transparent)]
    Grading(#[from] GradingError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnknownProblem,
    UnknownCategory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCell {
    pub user: String,
    pub label: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default)]
pub struct Stage3Output {
    /// Users in name order.
    pub users: Vec<User>,
    pub skipped: Vec<SkippedCell>,
}

pub fn run_stage3(
    layout: &Layout,
    extraction: &Extraction,
    accumulate: bool,
) -> Result<Stage3Output, AggregateError> {
    let n_cols = layout.column_count();
    let n_cats = layout.categories.len();
    let n_buckets = layout.buckets.len();

    let mut users = Vec::with_capacity(extraction.memberships.len());
    let mut user_index = BTreeMap::new();
    for (name, groups) in &extraction.memberships {
        user_index.insert(name.as_str(), users.len());
        users.push(User::new(name, groups.clone(), n_cols, n_cats, n_buckets));
    }

    let mut skipped = Vec::new();
    for (key, cell) in &extraction.cells {
        if !cell.is_scored() {
            continue;
        }
        let Some(&u) = user_index.get(key.user.as_str()) else {
            return Err(AggregateError::UnknownUser {
                user: key.user.clone(),
                label: key.label.clone(),
            });
        };
        let Some(problem) = layout.problem(&key.label) else {
            tracing::warn!("problem '{}' not found (user '{}')", key.label, key.user);
            skipped.push(SkippedCell {
                user: key.user.clone(),
                label: key.label.clone(),
                reason: SkipReason::UnknownProblem,
            });
            continue;
        };
        let (Some(cat), Some(column)) = (layout.category(&problem.category), problem.column)
        else {
            tracing::warn!(
                "category '{}' not found (problem '{}')",
                problem.category,
                problem.name
            );
            skipped.push(SkippedCell {
                user: key.user.clone(),
                label: key.label.clone(),
                reason: SkipReason::UnknownCategory,
            });
            continue;
        };

        let user = &mut users[u];
        user.cells[column] = *cell;
        user.score_by_category[cat.index] =
            user.score_by_category[cat.index].saturating_add(cell.score);
        user.total_score = user.total_score.saturating_add(cell.score);
        if cell.is_full() {
            user.problems_by_category[cat.index] += 1;
            user.total_problems += 1;
        }
        if let Some(b) = cat.bucket {
            user.score_by_bucket[b] = user.score_by_bucket[b].saturating_add(cell.score);
            if cell.is_full() {
                user.problems_by_bucket[b] += 1;
            }
        }
    }

    for user in &mut users {
        for (b, bucket) in layout.buckets.iter().enumerate() {
            let pct = percentage(user.score_by_bucket[b], bucket.max_score);
            user.percent_by_bucket[b] = pct;
            user.mark_by_bucket[b] = bucket.table.mark_at(pct);
        }
        if accumulate && user.total_problems > 0 {
            user.accumulated = Some(accumulated_mark(&user.name, user.mark_sum())?);
        }
    }

    tracing::info!(
        users = users.len(),
        cells = extraction.cells.len(),
        skipped = skipped.len(),
        "users aggregated"
    );
    Ok(Stage3Output { users, skipped })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_aggregate.rs"]
mod tests;
