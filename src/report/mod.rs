pub mod html;
pub mod json;

use std::path::PathBuf;

use thiserror::Error;

use crate::config::CourseConfig;
use crate::model::User;
use crate::pipeline::stage2_layout::Layout;
use crate::pipeline::stage4_rank::RankedUser;
use crate::pipeline::stage5_stats::Stage5Output;

/// Everything the renderers read; built once after statistics.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub config: &'a CourseConfig,
    pub layout: &'a Layout,
    pub users: &'a [User],
    pub ranking: &'a [RankedUser],
    pub stats: &'a Stage5Output,
    pub generated_at: &'a str,
}

/// Literal include files, already read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Includes {
    pub header: Option<String>,
    pub notes: Option<String>,
    pub footer: Option<String>,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot read include file '{path}': {source}")]
    Include {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write report: {0}")]
    Write(#[from] std::io::Error),
    #[error("cannot encode summary: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn mean(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().map(|&v| v as f64).sum();
    Some(sum / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator); 0 for fewer than two values.
pub fn sample_std_dev(values: &[i64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let avg = mean(values).unwrap_or(0.0);
    let sq: f64 = values
        .iter()
        .map(|&v| {
            let d = v as f64 - avg;
            d * d
        })
        .sum();
    (sq / (values.len() - 1) as f64).sqrt()
}

/// Median taken by position over the values as given, without sorting them.
pub fn positional_median(values: &[i64]) -> f64 {
    let n = values.len();
    if n == 0 {
        0.0
    } else if n % 2 == 0 {
        (values[n / 2 - 1] as f64 + values[n / 2] as f64) / 2.0
    } else {
        values[n / 2] as f64
    }
}

pub fn format_f64_2(v: f64) -> String {
    format!("{:.2}", v)
}

pub fn format_stat(v: Option<f64>) -> String {
    v.map(format_f64_2).unwrap_or_else(|| "N/A".to_string())
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
