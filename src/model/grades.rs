use thiserror::Error;

pub const PERCENT_SLOTS: usize = 101;

/// Marks awarded for a summed bucket mark of 0..=6.
pub const ACCUMULATED_MARKS: [i32; 7] = [0, 2, 3, 5, 7, 8, 10];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GradingError {
    #[error(
        "grading configuration inconsistent: user '{user}' has mark sum {sum}, accumulated scale covers 0..={max}"
    )]
    Inconsistent { user: String, sum: i64, max: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeRule {
    pub min_percent: u8,
    pub mark: i32,
}

/// Dense percentage -> mark table. A slot, once claimed by a rule with a
/// non-negative mark, keeps it; unset and negative slots stay open to later rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeTable {
    slots: [Option<i32>; PERCENT_SLOTS],
}

impl Default for GradeTable {
    fn default() -> Self {
        Self {
            slots: [None; PERCENT_SLOTS],
        }
    }
}

impl GradeTable {
    pub fn from_rules(rules: &[GradeRule]) -> Self {
        let mut table = Self::default();
        for rule in rules {
            table.apply(*rule);
        }
        table
    }

    pub fn apply(&mut self, rule: GradeRule) {
        let start = (rule.min_percent as usize).min(PERCENT_SLOTS - 1);
        for slot in &mut self.slots[start..] {
            if slot.is_none_or(|m| m < 0) {
                *slot = Some(rule.mark);
            }
        }
    }

    pub fn slot(&self, percent: u8) -> Option<i32> {
        self.slots.get(percent as usize).copied().flatten()
    }

    pub fn mark_at(&self, percent: u8) -> i32 {
        self.slot(percent.min(100)).unwrap_or(0).max(0)
    }

    pub fn top_mark(&self) -> i32 {
        self.mark_at(100)
    }
}

/// Ceiling percentage of `achieved` out of `max_score`, clamped to 0..=100.
pub fn percentage(achieved: i64, max_score: i64) -> u8 {
    if max_score <= 0 {
        return 0;
    }
    let scaled = achieved.saturating_mul(100);
    let pct = if scaled >= 0 {
        scaled.saturating_add(max_score - 1) / max_score
    } else {
        scaled / max_score
    };
    pct.clamp(0, 100) as u8
}

pub fn accumulated_mark(user: &str, mark_sum: i64) -> Result<i32, GradingError> {
    usize::try_from(mark_sum)
        .ok()
        .and_then(|idx| ACCUMULATED_MARKS.get(idx).copied())
        .ok_or_else(|| GradingError::Inconsistent {
            user: user.to_string(),
            sum: mark_sum,
            max: ACCUMULATED_MARKS.len() - 1,
        })
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/grades.rs"]
mod tests;
