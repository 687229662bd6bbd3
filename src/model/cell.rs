use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellStatus {
    #[default]
    Empty,
    Partial,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub status: CellStatus,
    pub score: i64,
}

impl Cell {
    pub fn new(status: CellStatus, score: i64) -> Self {
        Self { status, score }
    }

    pub fn is_scored(&self) -> bool {
        self.status != CellStatus::Empty && self.score >= 0
    }

    pub fn is_full(&self) -> bool {
        self.status == CellStatus::Full
    }
}

/// Identifies one scored cell: a user's result under one column label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub user: String,
    pub label: String,
}

impl CellKey {
    pub fn new(user: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            label: label.into(),
        }
    }
}

impl Ord for CellKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.user.cmp(&other.user) {
            Ordering::Equal => self.label.cmp(&other.label),
            other => other,
        }
    }
}

impl PartialOrd for CellKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
