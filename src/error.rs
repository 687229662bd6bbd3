use thiserror::Error;

use crate::config::ConfigError;
use crate::input::InputError;
use crate::pipeline::stage3_aggregate::AggregateError;
use crate::report::ReportError;

/// Any condition that aborts the run with exit status 1.
#[derive(Debug, Error)]
pub enum RaterError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error(transparent)]
    Report(#[from] ReportError),
}
