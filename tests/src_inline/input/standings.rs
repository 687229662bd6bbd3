use super::*;

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn row(user: &str, a: RawCell, b: RawCell) -> Vec<RawCell> {
    vec![
        RawCell::plain("1"),
        RawCell::plain(user),
        a,
        b,
        RawCell::plain("9"),
        RawCell::plain("99"),
    ]
}

fn sample_table() -> StandingsTable {
    StandingsTable {
        labels: labels(&["Place", "User", "A", "B", "Solved", "Score"]),
        rows: vec![
            row("alice", RawCell::emphasized("10"), RawCell::plain("4")),
            row("bob", RawCell::plain(""), RawCell::emphasized("7")),
            row("Total:", RawCell::plain("2"), RawCell::plain("2")),
            row("ghost", RawCell::plain("5"), RawCell::plain("5")),
        ],
    }
}

#[test]
fn test_interpret_cell_status_rules() {
    assert_eq!(
        interpret_cell(&RawCell::emphasized("10")),
        Some(Cell::new(CellStatus::Full, 10))
    );
    assert_eq!(
        interpret_cell(&RawCell::plain("3")),
        Some(Cell::new(CellStatus::Partial, 3))
    );
    assert_eq!(interpret_cell(&RawCell::plain("")), None);
    assert_eq!(interpret_cell(&RawCell::plain("&nbsp;")), None);
    assert_eq!(interpret_cell(&RawCell::plain("-2")), None);
    assert_eq!(interpret_cell(&RawCell::emphasized("abc")), None);
    assert_eq!(
        interpret_cell(&RawCell::plain("12 (3)")),
        Some(Cell::new(CellStatus::Partial, 12))
    );
}

#[test]
fn test_parse_leading_int() {
    assert_eq!(parse_leading_int("42"), Some(42));
    assert_eq!(parse_leading_int("+5x"), Some(5));
    assert_eq!(parse_leading_int("-7"), Some(-7));
    assert_eq!(parse_leading_int("x5"), None);
    assert_eq!(parse_leading_int("-"), None);
}

#[test]
fn test_absorb_stops_at_footer_row() {
    let mut ex = Extraction::default();
    let summary = ex.absorb("g1", &sample_table());
    assert_eq!(summary.users, 2);
    assert_eq!(summary.cells, 3);
    assert!(!ex.memberships.contains_key("ghost"));
    assert!(!ex.memberships.contains_key("Total:"));
    assert_eq!(
        ex.cells.get(&CellKey::new("alice", "A")),
        Some(&Cell::new(CellStatus::Full, 10))
    );
    assert_eq!(
        ex.cells.get(&CellKey::new("alice", "B")),
        Some(&Cell::new(CellStatus::Partial, 4))
    );
    assert_eq!(ex.cells.get(&CellKey::new("bob", "A")), None);
    // Place/Solved/Score never become cells
    assert!(ex.cells.keys().all(|k| k.label == "A" || k.label == "B"));
}

#[test]
fn test_membership_is_a_set_in_first_seen_order() {
    let mut ex = Extraction::default();
    ex.absorb("g2", &sample_table());
    ex.absorb("g1", &sample_table());
    ex.absorb("g2", &sample_table());
    assert_eq!(ex.memberships["alice"], ["g2", "g1"]);
    assert_eq!(ex.memberships["bob"], ["g2", "g1"]);
}

#[test]
fn test_later_duplicate_cell_overwrites() {
    let mut ex = Extraction::default();
    ex.absorb("g1", &sample_table());
    let update = StandingsTable {
        labels: labels(&["User", "A"]),
        rows: vec![vec![RawCell::plain("alice"), RawCell::plain("3")]],
    };
    ex.absorb("g2", &update);
    assert_eq!(
        ex.cells[&CellKey::new("alice", "A")],
        Cell::new(CellStatus::Partial, 3)
    );
}

#[test]
fn test_discarded_cells_counted() {
    let mut ex = Extraction::default();
    let table = StandingsTable {
        labels: labels(&["User", "A", "B"]),
        rows: vec![vec![
            RawCell::plain("zed"),
            RawCell::plain("-1"),
            RawCell::plain("oops"),
        ]],
    };
    let summary = ex.absorb("g1", &table);
    assert_eq!(summary.discarded, 2);
    assert!(ex.cells.is_empty());
    assert!(ex.memberships.contains_key("zed"));
}

#[test]
fn test_table_without_user_column_contributes_nothing() {
    let mut ex = Extraction::default();
    let table = StandingsTable {
        labels: labels(&["Place", "A"]),
        rows: vec![vec![RawCell::plain("1"), RawCell::plain("5")]],
    };
    assert_eq!(ex.absorb("g1", &table), TableSummary::default());
    assert!(ex.cells.is_empty());
}
