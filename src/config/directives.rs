use std::path::PathBuf;

use thiserror::Error;

use crate::config::SortMode;
use crate::model::grades::GradeRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    HideSummary,
    HideMarks,
    HideGrades,
    ShowPercent,
    ShowProblems,
    ShowAccumulated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Include {
    Header,
    Notes,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Flag(Flag),
    Include(Include, PathBuf),
    Group {
        name: String,
        source: PathBuf,
    },
    Problem {
        name: String,
        max_score: i64,
        category: String,
    },
    Category {
        name: String,
        crediting: bool,
        grader: String,
    },
    Grade {
        bucket: String,
        mode: i64,
        rule: GradeRule,
    },
    Sort(SortMode),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("unknown directive '{0}'")]
    UnknownDirective(String),
    #[error("'{directive}' expects {expected} argument(s), got {found}")]
    Arity {
        directive: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("'{directive}': '{value}' is not an integer")]
    NotInteger {
        directive: &'static str,
        value: String,
    },
    #[error("'{directive}': value {value} out of range {range}")]
    OutOfRange {
        directive: &'static str,
        value: i64,
        range: &'static str,
    },
}

/// Parses one non-blank config line. Tokens are whitespace separated and every
/// directive has a fixed arity; extra tokens make the line invalid.
pub fn parse_line(line: &str) -> Result<Directive, LineError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&cmd, args)) = tokens.split_first() else {
        return Err(LineError::UnknownDirective(String::new()));
    };

    match cmd {
        "hide_summary" => flag("hide_summary", args, Flag::HideSummary),
        "hide_marks" => flag("hide_marks", args, Flag::HideMarks),
        "hide_grades" => flag("hide_grades", args, Flag::HideGrades),
        "show_percent" => flag("show_percent", args, Flag::ShowPercent),
        "show_problems" => flag("show_problems", args, Flag::ShowProblems),
        "show_accumulated" => flag("show_accumulated", args, Flag::ShowAccumulated),
        "header" => include("header", args, Include::Header),
        "notes" => include("notes", args, Include::Notes),
        "footer" => include("footer", args, Include::Footer),
        "group" => {
            arity("group", args, 2)?;
            Ok(Directive::Group {
                name: args[0].to_string(),
                source: PathBuf::from(args[1]),
            })
        }
        "problem" => {
            arity("problem", args, 3)?;
            Ok(Directive::Problem {
                name: args[0].to_string(),
                max_score: integer("problem", args[1])?,
                category: args[2].to_string(),
            })
        }
        "category" => {
            arity("category", args, 3)?;
            Ok(Directive::Category {
                name: args[0].to_string(),
                crediting: integer("category", args[1])? != 0,
                grader: args[2].to_string(),
            })
        }
        "grade" => {
            arity("grade", args, 4)?;
            let mode = integer("grade", args[1])?;
            let min_percent = integer("grade", args[2])?;
            let mark = integer("grade", args[3])?;
            if !(0..=100).contains(&min_percent) {
                return Err(LineError::OutOfRange {
                    directive: "grade",
                    value: min_percent,
                    range: "0..=100",
                });
            }
            let mark = i32::try_from(mark).map_err(|_| LineError::OutOfRange {
                directive: "grade",
                value: mark,
                range: "i32",
            })?;
            Ok(Directive::Grade {
                bucket: args[0].to_string(),
                mode,
                rule: GradeRule {
                    min_percent: min_percent as u8,
                    mark,
                },
            })
        }
        "sort" => {
            arity("sort", args, 1)?;
            match integer("sort", args[0])? {
                0 => Ok(Directive::Sort(SortMode::Score)),
                1 => Ok(Directive::Sort(SortMode::Problems)),
                other => Err(LineError::OutOfRange {
                    directive: "sort",
                    value: other,
                    range: "0..=1",
                }),
            }
        }
        other => Err(LineError::UnknownDirective(other.to_string())),
    }
}

fn flag(directive: &'static str, args: &[&str], flag: Flag) -> Result<Directive, LineError> {
    arity(directive, args, 0)?;
    Ok(Directive::Flag(flag))
}

fn include(directive: &'static str, args: &[&str], which: Include) -> Result<Directive, LineError> {
    arity(directive, args, 1)?;
    Ok(Directive::Include(which, PathBuf::from(args[0])))
}

fn arity(directive: &'static str, args: &[&str], expected: usize) -> Result<(), LineError> {
    if args.len() != expected {
        return Err(LineError::Arity {
            directive,
            expected,
            found: args.len(),
        });
    }
    Ok(())
}

fn integer(directive: &'static str, token: &str) -> Result<i64, LineError> {
    token.parse::<i64>().map_err(|_| LineError::NotInteger {
        directive,
        value: token.to_string(),
    })
}
