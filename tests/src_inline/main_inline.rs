use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::model::grades::GradingError;
use crate::pipeline::stage3_aggregate::AggregateError;
use crate::test_support::{COURSE_CFG, config, course_config, course_source};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("standings_rater_main_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_cli_requires_a_config() {
    assert!(Cli::try_parse_from(["standings-rater"]).is_err());
}

#[test]
fn test_cli_collects_configs_in_order() {
    let cli = Cli::try_parse_from([
        "standings-rater",
        "base.cfg",
        "term.cfg",
        "-o",
        "rating.html",
        "--summary-json",
        "rating.json",
        "-vv",
    ])
    .unwrap();
    assert_eq!(
        cli.configs,
        [PathBuf::from("base.cfg"), PathBuf::from("term.cfg")]
    );
    assert_eq!(cli.output, Some(PathBuf::from("rating.html")));
    assert_eq!(cli.summary_json, Some(PathBuf::from("rating.json")));
    assert_eq!(cli.verbose, 2);
}

#[test]
fn test_cli_defaults_to_stdout() {
    let cli = Cli::try_parse_from(["standings-rater", "course.cfg"]).unwrap();
    assert_eq!(cli.output, None);
    assert_eq!(cli.summary_json, None);
    assert_eq!(cli.verbose, 0);
}

#[test]
fn test_pipeline_end_to_end() {
    let config = course_config();
    let output = run_pipeline(&config, &course_source()).unwrap();
    assert_eq!(output.stage3.users.len(), 5);
    assert_eq!(output.stage3.skipped.len(), 1);
    assert_eq!(output.ranking.len(), 4);
    assert_eq!(output.stats.groups.len(), 2);
    assert_eq!(output.stats.overall.users(), 4);
}

#[test]
fn test_pipeline_fails_on_unreadable_group() {
    let config = config("group g9 nowhere.html\n");
    let err = run_pipeline(&config, &course_source()).unwrap_err();
    assert!(matches!(err, RaterError::Input(_)));
}

#[test]
fn test_pipeline_fails_on_inconsistent_accumulated_mark() {
    let config = config(&format!("{COURSE_CFG}show_accumulated\n"));
    let err = run_pipeline(&config, &course_source()).unwrap_err();
    assert!(matches!(
        err,
        RaterError::Aggregate(AggregateError::Grading(GradingError::Inconsistent { .. }))
    ));
}

#[test]
fn test_run_reads_configs_and_writes_report() {
    let dir = make_temp_dir();
    let page = dir.join("g1.html");
    fs::write(
        &page,
        "<table class=\"standings\">\
         <tr><th>Place</th><th>User</th><th>A</th><th>B</th><th>Score</th></tr>\
         <tr><td>1</td><td>zoe</td><td><b>10</b></td><td>3</td><td>13</td></tr>\
         <tr><td>2</td><td>yan</td><td><b>10</b></td><td></td><td>10</td></tr>\
         </table>",
    )
    .unwrap();
    let base = dir.join("base.cfg");
    fs::write(
        &base,
        "category Tasks 1 Main\nproblem A 10 Tasks\nproblem B 10 Tasks\n\
         grade Main 0 50 5\ngrade Main 0 0 2\n",
    )
    .unwrap();
    let groups = dir.join("groups.cfg");
    fs::write(
        &groups,
        format!("group g1 {}\nshow_problems\nbogus line\n", page.display()),
    )
    .unwrap();
    let report = dir.join("out.html");
    let cli = Cli {
        configs: vec![base, groups],
        output: Some(report.clone()),
        summary_json: None,
        verbose: 0,
    };

    run(&cli).unwrap();

    let html = fs::read_to_string(&report).unwrap();
    assert!(html.contains("<td>1</td><td>zoe</td><td>g1</td><td>13</td><td>1</td><td><b>10</b></td><td>3</td>"));
    assert!(html.contains("<td>2</td><td>yan</td>"));
    assert!(html.contains("<td>13 (65%)</td>"));
}

#[test]
fn test_run_reports_missing_config() {
    let dir = make_temp_dir();
    let cli = Cli {
        configs: vec![dir.join("missing.cfg")],
        output: None,
        summary_json: None,
        verbose: 0,
    };
    let err = run(&cli).unwrap_err();
    assert!(matches!(err, RaterError::Config(_)));
}
