use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod directives;

use directives::{Directive, Flag, Include, parse_line};

use crate::model::grades::GradeRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Score first, solved problems second.
    #[default]
    Score,
    /// Solved problems first, score second.
    Problems,
}

impl SortMode {
    pub fn code(self) -> u8 {
        match self {
            SortMode::Score => 0,
            SortMode::Problems => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayFlags {
    pub hide_summary: bool,
    pub hide_marks: bool,
    pub hide_grades: bool,
    pub show_percent: bool,
    pub show_problems: bool,
    pub show_accumulated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDef {
    pub name: String,
    pub source: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemDef {
    pub name: String,
    pub max_score: i64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpec {
    pub name: String,
    pub crediting: bool,
    pub grader: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSpec {
    pub name: String,
    pub mode: i64,
    /// Threshold rules in directive order.
    pub rules: Vec<GradeRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseConfig {
    pub flags: DisplayFlags,
    pub header: Option<PathBuf>,
    pub notes: Option<PathBuf>,
    pub footer: Option<PathBuf>,
    pub groups: Vec<GroupDef>,
    pub problems: Vec<ProblemDef>,
    pub categories: Vec<CategorySpec>,
    pub buckets: Vec<BucketSpec>,
    pub sort_mode: SortMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub path: PathBuf,
    pub line_no: usize,
    pub line: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot open config file '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads every config file in order into one configuration. Malformed lines are
/// logged and returned as warnings; an unreadable file aborts the load.
pub fn load_configs(paths: &[PathBuf]) -> Result<(CourseConfig, Vec<ConfigWarning>), ConfigError> {
    let mut config = CourseConfig::default();
    let mut warnings = Vec::new();
    for path in paths {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Open {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("reading config {}", path.display());
        warnings.extend(config.apply_text(path, &text));
    }
    tracing::info!(
        groups = config.groups.len(),
        problems = config.problems.len(),
        categories = config.categories.len(),
        buckets = config.buckets.len(),
        "configuration loaded"
    );
    Ok((config, warnings))
}

impl CourseConfig {
    pub fn apply_text(&mut self, path: &Path, text: &str) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim_end();
            if line.trim().is_empty() {
                continue;
            }
            let outcome = parse_line(line)
                .map_err(|e| e.to_string())
                .and_then(|d| self.apply(d));
            if let Err(reason) = outcome {
                tracing::warn!("{}:{}: invalid line '{}': {}", path.display(), idx + 1, line, reason);
                warnings.push(ConfigWarning {
                    path: path.to_path_buf(),
                    line_no: idx + 1,
                    line: line.to_string(),
                    reason,
                });
            }
        }
        warnings
    }

    /// Applies one directive; `Err` carries a warning reason for directives that
    /// parsed but cannot be accepted.
    pub fn apply(&mut self, directive: Directive) -> Result<(), String> {
        match directive {
            Directive::Flag(flag) => {
                let f = &mut self.flags;
                match flag {
                    Flag::HideSummary => f.hide_summary = true,
                    Flag::HideMarks => f.hide_marks = true,
                    Flag::HideGrades => f.hide_grades = true,
                    Flag::ShowPercent => f.show_percent = true,
                    Flag::ShowProblems => f.show_problems = true,
                    Flag::ShowAccumulated => f.show_accumulated = true,
                }
            }
            Directive::Include(which, path) => match which {
                Include::Header => self.header = Some(path),
                Include::Notes => self.notes = Some(path),
                Include::Footer => self.footer = Some(path),
            },
            Directive::Group { name, source } => {
                if self.group(&name).is_some() {
                    tracing::debug!("group '{}' already declared, keeping the first", name);
                } else {
                    self.groups.push(GroupDef { name, source });
                }
            }
            Directive::Problem {
                name,
                max_score,
                category,
            } => {
                if self.problems.iter().any(|p| p.name == name) {
                    return Err(format!("problem '{name}' already declared"));
                }
                self.problems.push(ProblemDef {
                    name,
                    max_score,
                    category,
                });
            }
            Directive::Category {
                name,
                crediting,
                grader,
            } => {
                if self.categories.iter().any(|c| c.name == name) {
                    return Err(format!("category '{name}' already declared"));
                }
                self.categories.push(CategorySpec {
                    name,
                    crediting,
                    grader,
                });
            }
            Directive::Grade { bucket, mode, rule } => {
                match self.buckets.iter_mut().find(|b| b.name == bucket) {
                    Some(spec) => spec.rules.push(rule),
                    None => self.buckets.push(BucketSpec {
                        name: bucket,
                        mode,
                        rules: vec![rule],
                    }),
                }
            }
            Directive::Sort(mode) => self.sort_mode = mode,
        }
        Ok(())
    }

    pub fn group(&self, name: &str) -> Option<&GroupDef> {
        self.groups.iter().find(|g| g.name == name)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/config/tests.rs"]
mod tests;
