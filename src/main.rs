mod config;
mod error;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{CourseConfig, load_configs};
use crate::error::RaterError;
use crate::input::{HtmlFileSource, StandingsSource};
use crate::pipeline::stage1_extract::run_stage1;
use crate::pipeline::stage2_layout::{Layout, run_stage2};
use crate::pipeline::stage3_aggregate::{Stage3Output, run_stage3};
use crate::pipeline::stage4_rank::{RankedUser, run_stage4};
use crate::pipeline::stage5_stats::{Stage5Output, run_stage5};
use crate::pipeline::stage6_report::{OutputTargets, write_reports};
use crate::report::ReportContext;

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Merge contest standings pages into one graded ranking report.
#[derive(Debug, Clone, Parser)]
#[command(name = "standings-rater", version, about)]
struct Cli {
    /// Configuration files; their directives accumulate in the given order.
    #[arg(required = true, value_name = "CONFIG")]
    configs: Vec<PathBuf>,

    /// Write the HTML report here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Also write a JSON summary of the ranking and statistics.
    #[arg(long, value_name = "FILE")]
    summary_json: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(&cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), RaterError> {
    let (config, warnings) = load_configs(&cli.configs)?;
    if !warnings.is_empty() {
        tracing::info!("{} config line(s) ignored", warnings.len());
    }

    let output = run_pipeline(&config, &HtmlFileSource)?;
    let generated_at = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
    let ctx = output.context(&config, &generated_at);
    let targets = OutputTargets {
        report: cli.output.clone(),
        summary_json: cli.summary_json.clone(),
    };
    write_reports(&ctx, &targets)?;
    Ok(())
}

#[derive(Debug, Clone)]
struct PipelineOutput {
    layout: Layout,
    stage3: Stage3Output,
    ranking: Vec<RankedUser>,
    stats: Stage5Output,
}

impl PipelineOutput {
    fn context<'a>(&'a self, config: &'a CourseConfig, generated_at: &'a str) -> ReportContext<'a> {
        ReportContext {
            config,
            layout: &self.layout,
            users: &self.stage3.users,
            ranking: &self.ranking,
            stats: &self.stats,
            generated_at,
        }
    }
}

fn run_pipeline(
    config: &CourseConfig,
    source: &dyn StandingsSource,
) -> Result<PipelineOutput, RaterError> {
    let stage1 = run_stage1(config, source)?;
    let layout = run_stage2(config);
    let stage3 = run_stage3(&layout, &stage1.extraction, config.flags.show_accumulated)?;
    let ranking = run_stage4(&stage3.users, config.sort_mode);
    let stats = run_stage5(config, &stage3.users, &ranking);
    tracing::info!(
        groups = stage1.summaries.len(),
        layout_warnings = layout.warnings.len(),
        skipped_cells = stage3.skipped.len(),
        ranked = ranking.len(),
        "pipeline finished"
    );
    Ok(PipelineOutput {
        layout,
        stage3,
        ranking,
        stats,
    })
}

#[cfg(test)]
#[path = "../tests/src_inline/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
