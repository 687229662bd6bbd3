use serde::Serialize;

use crate::config::CourseConfig;
use crate::model::User;
use crate::pipeline::stage4_rank::RankedUser;
use crate::report::{mean, positional_median, sample_std_dev};

pub const OVERALL_NAME: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSummary {
    pub mean: Option<f64>,
    pub median: f64,
    pub std_dev: Option<f64>,
}

impl MetricSummary {
    pub fn of(values: &[i64]) -> Self {
        Self {
            mean: mean(values),
            median: positional_median(values),
            std_dev: (values.len() > 1).then(|| sample_std_dev(values)),
        }
    }
}

/// Samples of one group, appended in ranking order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupStats {
    pub name: String,
    pub ranks: Vec<i64>,
    pub scores: Vec<i64>,
    pub problems: Vec<i64>,
}

impl GroupStats {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add_sample(&mut self, rank: usize, score: i64, problems: u32) {
        self.ranks.push(rank as i64);
        self.scores.push(score);
        self.problems.push(problems as i64);
    }

    pub fn users(&self) -> usize {
        self.ranks.len()
    }

    pub fn rank(&self) -> MetricSummary {
        MetricSummary::of(&self.ranks)
    }

    pub fn score(&self) -> MetricSummary {
        MetricSummary::of(&self.scores)
    }

    pub fn problem(&self) -> MetricSummary {
        MetricSummary::of(&self.problems)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stage5Output {
    /// One entry per declared group, in declaration order.
    pub groups: Vec<GroupStats>,
    pub overall: GroupStats,
}

pub fn run_stage5(config: &CourseConfig, users: &[User], ranking: &[RankedUser]) -> Stage5Output {
    let mut groups: Vec<GroupStats> = config
        .groups
        .iter()
        .map(|g| GroupStats::new(g.name.as_str()))
        .collect();
    let mut overall = GroupStats::new(OVERALL_NAME);

    for ranked in ranking {
        let user = &users[ranked.user];
        for group in &user.groups {
            if let Some(stats) = groups.iter_mut().find(|s| &s.name == group) {
                stats.add_sample(ranked.serial, user.total_score, user.total_problems);
            }
        }
        overall.add_sample(ranked.serial, user.total_score, user.total_problems);
    }

    Stage5Output { groups, overall }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_stats.rs"]
mod tests;
