use std::collections::BTreeMap;

use crate::input::{RawCell, StandingsTable};
use crate::model::cell::{Cell, CellKey, CellStatus};

/// User-column texts that mark the synthetic footer rows of a standings table.
const FOOTER_MARKERS: [&str; 3] = ["%:", "Success:", "Total:"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column<'a> {
    Ignored,
    User,
    Problem(&'a str),
}

fn column_role(label: &str) -> Column<'_> {
    match label {
        "Place" | "Solved" | "Score" | "" => Column::Ignored,
        "User" => Column::User,
        other => Column::Problem(other),
    }
}

/// Cells and group membership collected across every group's table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub cells: BTreeMap<CellKey, Cell>,
    /// User -> groups in first-seen order, without repeats.
    pub memberships: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableSummary {
    pub users: usize,
    pub cells: usize,
    pub discarded: usize,
}

impl Extraction {
    pub fn absorb(&mut self, group: &str, table: &StandingsTable) -> TableSummary {
        let roles: Vec<Column<'_>> = table.labels.iter().map(|l| column_role(l)).collect();
        let user_col = roles.iter().position(|r| *r == Column::User);
        let mut summary = TableSummary::default();

        for row in &table.rows {
            let Some(user) = user_col.and_then(|i| row.get(i)).map(|c| c.text.as_str()) else {
                continue;
            };
            if FOOTER_MARKERS.contains(&user) {
                break;
            }
            if user.is_empty() {
                continue;
            }
            self.add_membership(user, group);
            summary.users += 1;

            for (raw, role) in row.iter().zip(roles.iter()) {
                let Column::Problem(label) = *role else {
                    continue;
                };
                match interpret_cell(raw) {
                    Some(cell) => {
                        self.cells.insert(CellKey::new(user, label), cell);
                        summary.cells += 1;
                    }
                    None if !raw.text.is_empty() => summary.discarded += 1,
                    None => {}
                }
            }
        }
        summary
    }

    pub fn add_membership(&mut self, user: &str, group: &str) {
        let groups = self.memberships.entry(user.to_string()).or_default();
        if !groups.iter().any(|g| g == group) {
            groups.push(group.to_string());
        }
    }
}

/// Converts an extracted cell into a storable `Cell`. Blank cells and values that
/// are unparsable or negative yield `None`.
pub fn interpret_cell(raw: &RawCell) -> Option<Cell> {
    let text = raw.text.trim();
    if text.is_empty() || text == "&nbsp;" {
        return None;
    }
    let score = parse_leading_int(text)?;
    if score < 0 {
        return None;
    }
    let status = if raw.emphasized {
        CellStatus::Full
    } else {
        CellStatus::Partial
    };
    Some(Cell::new(status, score))
}

/// Parses an optional sign followed by leading digits, ignoring anything after them.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/standings.rs"]
mod tests;
