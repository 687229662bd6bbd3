use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::CourseConfig;
use crate::report::html::render_report_html;
use crate::report::json::render_summary_json;
use crate::report::{Includes, ReportContext, ReportError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTargets {
    /// Report destination; stdout when `None`.
    pub report: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
}

pub fn read_includes(config: &CourseConfig) -> Result<Includes, ReportError> {
    Ok(Includes {
        header: read_include(config.header.as_deref())?,
        notes: read_include(config.notes.as_deref())?,
        footer: read_include(config.footer.as_deref())?,
    })
}

fn read_include(path: Option<&Path>) -> Result<Option<String>, ReportError> {
    let Some(path) = path else {
        return Ok(None);
    };
    fs::read_to_string(path)
        .map(Some)
        .map_err(|source| ReportError::Include {
            path: path.to_path_buf(),
            source,
        })
}

/// Renders everything in memory first so a failed include leaves no partial output.
pub fn write_reports(ctx: &ReportContext<'_>, targets: &OutputTargets) -> Result<(), ReportError> {
    let includes = read_includes(ctx.config)?;
    let html = render_report_html(ctx, &includes);
    let json = match &targets.summary_json {
        Some(_) => Some(render_summary_json(ctx)?),
        None => None,
    };

    match &targets.report {
        Some(path) => write_text(path, &html)?,
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(html.as_bytes())?;
            lock.flush()?;
        }
    }
    if let (Some(path), Some(json)) = (&targets.summary_json, json) {
        write_text(path, &json)?;
    }
    tracing::info!(ranked = ctx.ranking.len(), "report written");
    Ok(())
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut f = std::io::BufWriter::new(fs::File::create(path)?);
    f.write_all(contents.as_bytes())?;
    f.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
