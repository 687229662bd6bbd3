use crate::config::CourseConfig;
use crate::input::standings::{Extraction, TableSummary};
use crate::input::{InputError, StandingsSource};

#[derive(Debug, Clone, Default)]
pub struct Stage1Output {
    pub extraction: Extraction,
    pub summaries: Vec<(String, TableSummary)>,
}

/// Extracts every declared group, strictly in declaration order.
pub fn run_stage1(
    config: &CourseConfig,
    source: &dyn StandingsSource,
) -> Result<Stage1Output, InputError> {
    let mut out = Stage1Output::default();
    for group in &config.groups {
        let table = source.load_table(group)?;
        let summary = out.extraction.absorb(&group.name, &table);
        if summary.discarded > 0 {
            tracing::debug!(
                "group '{}': {} cell(s) with unusable values dropped",
                group.name,
                summary.discarded
            );
        }
        tracing::info!(
            group = %group.name,
            users = summary.users,
            cells = summary.cells,
            "group extracted"
        );
        out.summaries.push((group.name.clone(), summary));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_extract.rs"]
mod tests;
