use std::cmp::Ordering;

use crate::config::SortMode;
use crate::model::User;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedUser {
    /// Index into the aggregated user list.
    pub user: usize,
    /// 1-based position in the ranking.
    pub serial: usize,
    /// Shared label for tied runs, e.g. `3` or `4-6`.
    pub label: String,
}

/// (primary, secondary) sort keys for the active mode.
pub fn rank_keys(user: &User, mode: SortMode) -> (i64, i64) {
    let problems = user.total_problems as i64;
    match mode {
        SortMode::Score => (user.total_score, problems),
        SortMode::Problems => (problems, user.total_score),
    }
}

pub fn compare_users(a: &User, b: &User, mode: SortMode) -> Ordering {
    let (ka, kb) = (rank_keys(a, mode), rank_keys(b, mode));
    kb.0.cmp(&ka.0)
        .then(kb.1.cmp(&ka.1))
        .then_with(|| a.membership().cmp(&b.membership()))
        .then_with(|| a.name.cmp(&b.name))
}

/// Orders users with at least one solved problem and labels tied runs.
pub fn run_stage4(users: &[User], mode: SortMode) -> Vec<RankedUser> {
    let mut order: Vec<usize> = (0..users.len())
        .filter(|&i| users[i].total_problems > 0)
        .collect();
    order.sort_by(|&a, &b| compare_users(&users[a], &users[b], mode));

    let keys: Vec<(i64, i64)> = order.iter().map(|&i| rank_keys(&users[i], mode)).collect();
    let labels = tie_labels(&keys);

    let ranked: Vec<RankedUser> = order
        .into_iter()
        .zip(labels)
        .enumerate()
        .map(|(pos, (user, label))| RankedUser {
            user,
            serial: pos + 1,
            label,
        })
        .collect();
    tracing::debug!(
        ranked = ranked.len(),
        excluded = users.len() - ranked.len(),
        "ranking built"
    );
    ranked
}

/// One label per position; consecutive equal keys share `"first-last"`.
pub fn tie_labels<K: PartialEq>(keys: &[K]) -> Vec<String> {
    let mut labels = Vec::with_capacity(keys.len());
    let mut start = 0usize;
    while start < keys.len() {
        let mut end = start + 1;
        while end < keys.len() && keys[end] == keys[start] {
            end += 1;
        }
        let label = if end == start + 1 {
            (start + 1).to_string()
        } else {
            format!("{}-{}", start + 1, end)
        };
        labels.extend(std::iter::repeat_n(label, end - start));
        start = end;
    }
    labels
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_rank.rs"]
mod tests;
