use super::directives::{Directive, Flag, LineError, parse_line};
use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("standings_rater_config_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn apply(text: &str) -> (CourseConfig, Vec<ConfigWarning>) {
    let mut config = CourseConfig::default();
    let warnings = config.apply_text(Path::new("test.cfg"), text);
    (config, warnings)
}

#[test]
fn test_parse_flags_and_includes() {
    assert_eq!(parse_line("hide_marks"), Ok(Directive::Flag(Flag::HideMarks)));
    assert_eq!(
        parse_line("show_accumulated"),
        Ok(Directive::Flag(Flag::ShowAccumulated))
    );
    let (config, warnings) = apply("show_problems\nshow_percent\nheader head.html\nnotes n.html\n");
    assert!(warnings.is_empty());
    assert!(config.flags.show_problems);
    assert!(config.flags.show_percent);
    assert!(!config.flags.hide_summary);
    assert_eq!(config.header, Some(PathBuf::from("head.html")));
    assert_eq!(config.notes, Some(PathBuf::from("n.html")));
    assert_eq!(config.footer, None);
}

#[test]
fn test_trailing_tokens_invalidate_line() {
    assert_eq!(
        parse_line("group g1 a.html extra"),
        Err(LineError::Arity {
            directive: "group",
            expected: 2,
            found: 3,
        })
    );
    assert!(parse_line("hide_summary now").is_err());
    assert!(parse_line("sort 1 2").is_err());
}

#[test]
fn test_non_integer_and_out_of_range_values() {
    assert!(matches!(
        parse_line("problem A x Homework"),
        Err(LineError::NotInteger { .. })
    ));
    assert!(matches!(
        parse_line("grade Exam 0 101 5"),
        Err(LineError::OutOfRange { .. })
    ));
    assert!(matches!(
        parse_line("grade Exam 0 -1 5"),
        Err(LineError::OutOfRange { .. })
    ));
    assert!(matches!(parse_line("sort 2"), Err(LineError::OutOfRange { .. })));
}

#[test]
fn test_malformed_lines_warn_and_continue() {
    let text = "\
group g1 a.html
bogus directive
problem A 10
problem B 10 Homework

sort 1
";
    let (config, warnings) = apply(text);
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0].line_no, 2);
    assert_eq!(warnings[1].line_no, 3);
    assert_eq!(warnings[1].line, "problem A 10");
    assert_eq!(config.groups.len(), 1);
    assert_eq!(config.problems.len(), 1);
    assert_eq!(config.problems[0].name, "B");
    assert_eq!(config.sort_mode, SortMode::Problems);
}

#[test]
fn test_duplicate_group_first_wins() {
    let (config, warnings) = apply("group g1 first.html\ngroup g1 second.html\ngroup g2 b.html\n");
    assert!(warnings.is_empty());
    assert_eq!(config.groups.len(), 2);
    assert_eq!(config.groups[0].source, PathBuf::from("first.html"));
}

#[test]
fn test_category_crediting_and_order() {
    let (config, _) = apply("category Homework 1 Main\ncategory Bonus 0 Main\ncategory Exam 2 Final\n");
    let names: Vec<&str> = config.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Homework", "Bonus", "Exam"]);
    assert!(config.categories[0].crediting);
    assert!(!config.categories[1].crediting);
    assert!(config.categories[2].crediting);
}

#[test]
fn test_grade_rules_accumulate_per_bucket() {
    let (config, warnings) =
        apply("grade Main 2 80 5\ngrade Main 9 50 4\ngrade Other 1 0 3\ngrade Main 0 0 2\n");
    assert!(warnings.is_empty());
    assert_eq!(config.buckets.len(), 2);
    let main = &config.buckets[0];
    assert_eq!(main.name, "Main");
    assert_eq!(main.mode, 2);
    let mins: Vec<u8> = main.rules.iter().map(|r| r.min_percent).collect();
    assert_eq!(mins, [80, 50, 0]);
}

#[test]
fn test_load_configs_accumulates_in_argument_order() {
    let dir = make_temp_dir();
    let a = dir.join("a.cfg");
    let b = dir.join("b.cfg");
    fs::write(&a, "group g1 one.html\nproblem A 10 Homework\n").unwrap();
    fs::write(&b, "group g2 two.html\ngroup g1 ignored.html\nsort 1\nnope\n").unwrap();

    let (config, warnings) = load_configs(&[a, b.clone()]).unwrap();
    let names: Vec<&str> = config.groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["g1", "g2"]);
    assert_eq!(config.groups[0].source, PathBuf::from("one.html"));
    assert_eq!(config.sort_mode, SortMode::Problems);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].path, b);
    assert_eq!(warnings[0].line_no, 4);
}

#[test]
fn test_missing_config_is_fatal() {
    let dir = make_temp_dir();
    let missing = dir.join("missing.cfg");
    let err = load_configs(&[missing]).unwrap_err();
    assert!(matches!(err, ConfigError::Open { .. }));
    assert!(err.to_string().contains("cannot open config file"));
}
