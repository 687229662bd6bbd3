use std::fs;
use std::path::PathBuf;

use thiserror::Error;

pub mod html;
pub mod standings;

use crate::config::GroupDef;

/// One cell of an extracted standings row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawCell {
    pub text: String,
    /// The value was wrapped in a nested element (a fully solved problem).
    pub emphasized: bool,
}

impl RawCell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// A standings table: the first row's labels, then one row per user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StandingsTable {
    pub labels: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read standings for group '{group}' from '{path}': {source}")]
    Io {
        group: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Supplies the standings table of one declared group.
pub trait StandingsSource {
    fn load_table(&self, group: &GroupDef) -> Result<StandingsTable, InputError>;
}

/// Reads each group's HTML standings page from its configured path.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFileSource;

impl StandingsSource for HtmlFileSource {
    fn load_table(&self, group: &GroupDef) -> Result<StandingsTable, InputError> {
        let doc = fs::read_to_string(&group.source).map_err(|source| InputError::Io {
            group: group.name.clone(),
            path: group.source.clone(),
            source,
        })?;
        match html::extract_standings_table(&doc) {
            Some(table) => {
                tracing::debug!(
                    group = %group.name,
                    columns = table.labels.len(),
                    rows = table.rows.len(),
                    "standings table extracted"
                );
                Ok(table)
            }
            None => {
                tracing::warn!(
                    "no standings table found for group '{}' in {}",
                    group.name,
                    group.source.display()
                );
                Ok(StandingsTable::default())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
