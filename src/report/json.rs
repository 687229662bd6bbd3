use std::collections::BTreeMap;

use serde::Serialize;

use crate::pipeline::stage5_stats::{GroupStats, MetricSummary};
use crate::report::ReportContext;

#[derive(Debug, Clone, Serialize)]
pub struct SummaryJson<'a> {
    pub tool: &'static str,
    pub version: &'static str,
    pub generated: &'a str,
    pub sort_mode: u8,
    pub users: Vec<UserJson<'a>>,
    pub statistics: Vec<GroupJson<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserJson<'a> {
    pub rank: &'a str,
    pub serial: usize,
    pub name: &'a str,
    pub groups: &'a [String],
    pub total_score: i64,
    pub total_problems: u32,
    pub marks: BTreeMap<&'a str, i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accumulated: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupJson<'a> {
    pub group: &'a str,
    pub users: usize,
    pub rank: MetricSummary,
    pub score: MetricSummary,
    pub problems: MetricSummary,
}

impl<'a> GroupJson<'a> {
    fn from_stats(stats: &'a GroupStats) -> Self {
        Self {
            group: &stats.name,
            users: stats.users(),
            rank: stats.rank(),
            score: stats.score(),
            problems: stats.problem(),
        }
    }
}

pub fn build_summary<'a>(ctx: &ReportContext<'a>) -> SummaryJson<'a> {
    let users = ctx
        .ranking
        .iter()
        .map(|ranked| {
            let user = &ctx.users[ranked.user];
            let marks = ctx
                .layout
                .buckets
                .iter()
                .zip(user.mark_by_bucket.iter())
                .map(|(b, &m)| (b.name.as_str(), m))
                .collect();
            UserJson {
                rank: &ranked.label,
                serial: ranked.serial,
                name: &user.name,
                groups: &user.groups,
                total_score: user.total_score,
                total_problems: user.total_problems,
                marks,
                accumulated: user.accumulated,
            }
        })
        .collect();

    let mut statistics: Vec<GroupJson<'a>> =
        ctx.stats.groups.iter().map(GroupJson::from_stats).collect();
    statistics.push(GroupJson::from_stats(&ctx.stats.overall));

    SummaryJson {
        tool: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        generated: ctx.generated_at,
        sort_mode: ctx.config.sort_mode.code(),
        users,
        statistics,
    }
}

pub fn render_summary_json(ctx: &ReportContext<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&build_summary(ctx))
}
