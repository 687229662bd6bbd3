//! Just enough HTML scanning to pull a `standings` table out of an exported page.

use crate::input::{RawCell, StandingsTable};

const STANDINGS_CLASS: &str = "standings";

/// Extracts the last `<table class="standings">` of the document.
pub fn extract_standings_table(doc: &str) -> Option<StandingsTable> {
    let lc = doc.to_ascii_lowercase();
    let mut found = None;
    let mut pos = 0usize;
    while let Some(start) = find_open_tag(&lc, "table", pos) {
        let open_end = lc[start..].find('>').map(|i| start + i + 1)?;
        let body_end = lc[open_end..]
            .find("</table")
            .map(|i| open_end + i)
            .unwrap_or(lc.len());
        if has_class(&doc[start..open_end], STANDINGS_CLASS) {
            found = Some((open_end, body_end));
        }
        pos = open_end;
    }
    let (s, e) = found?;
    Some(parse_table(&doc[s..e]))
}

fn parse_table(table: &str) -> StandingsTable {
    let lc = table.to_ascii_lowercase();
    let mut rows = split_blocks(&lc, "tr", 0, lc.len()).into_iter();

    let mut out = StandingsTable::default();
    let Some((hs, he)) = rows.next() else {
        return out;
    };
    for (cs, ce) in split_cells(&lc, hs, he, &["td", "th"]) {
        out.labels.push(clean_text(&table[cs..ce]));
    }
    for (rs, re) in rows {
        let cells = split_cells(&lc, rs, re, &["td"])
            .into_iter()
            .map(|(cs, ce)| read_cell(&table[cs..ce]))
            .collect();
        out.rows.push(cells);
    }
    out
}

fn read_cell(inner: &str) -> RawCell {
    let text = clean_text(inner);
    let trimmed = inner.trim_start();
    let nested = trimmed.starts_with('<')
        && !trimmed.starts_with("</")
        && !trimmed.starts_with("<!")
        && !text.is_empty();
    if nested {
        RawCell::emphasized(text)
    } else {
        RawCell::plain(text)
    }
}

/// Returns the inner ranges of consecutive `<name ...>` blocks between `from` and `to`.
/// A block ends at its closing tag or at the next opening tag of the same name.
fn split_blocks(lc: &str, name: &str, from: usize, to: usize) -> Vec<(usize, usize)> {
    let close = format!("</{name}");
    let mut out = Vec::new();
    let mut pos = from;
    while let Some(start) = find_open_tag(&lc[..to], name, pos) {
        let Some(open_end) = lc[start..to].find('>').map(|i| start + i + 1) else {
            break;
        };
        let next_open = find_open_tag(&lc[..to], name, open_end).unwrap_or(to);
        let end = lc[open_end..next_open]
            .find(&close)
            .map(|i| open_end + i)
            .unwrap_or(next_open);
        out.push((open_end, end));
        pos = end.max(open_end);
    }
    out
}

fn split_cells(lc: &str, from: usize, to: usize, names: &[&str]) -> Vec<(usize, usize)> {
    let mut starts: Vec<(usize, &str)> = Vec::new();
    for &name in names {
        let mut pos = from;
        while let Some(s) = find_open_tag(&lc[..to], name, pos) {
            starts.push((s, name));
            pos = s + 1;
        }
    }
    starts.sort_by_key(|&(s, _)| s);

    let mut out = Vec::with_capacity(starts.len());
    for (i, &(start, name)) in starts.iter().enumerate() {
        let Some(open_end) = lc[start..to].find('>').map(|k| start + k + 1) else {
            break;
        };
        let limit = starts.get(i + 1).map(|&(s, _)| s).unwrap_or(to);
        if open_end > limit {
            continue;
        }
        let close = format!("</{name}");
        let end = lc[open_end..limit]
            .find(&close)
            .map(|k| open_end + k)
            .unwrap_or(limit);
        out.push((open_end, end));
    }
    out
}

/// Finds `<name` followed by whitespace, `>` or `/`.
fn find_open_tag(lc: &str, name: &str, from: usize) -> Option<usize> {
    let pat = format!("<{name}");
    let mut pos = from;
    while pos <= lc.len() {
        let idx = lc.get(pos..)?.find(&pat)? + pos;
        let after = lc.as_bytes().get(idx + pat.len()).copied();
        match after {
            Some(b) if b.is_ascii_whitespace() || b == b'>' || b == b'/' => return Some(idx),
            None => return None,
            _ => pos = idx + pat.len(),
        }
    }
    None
}

fn has_class(open_tag: &str, class: &str) -> bool {
    attribute(open_tag, "class")
        .map(|v| v.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

fn attribute(open_tag: &str, name: &str) -> Option<String> {
    let lc = open_tag.to_ascii_lowercase();
    let mut pos = 0usize;
    while let Some(i) = lc[pos..].find(name) {
        let at = pos + i;
        pos = at + name.len();
        let boundary = at > 0 && lc.as_bytes()[at - 1].is_ascii_whitespace();
        let rest = lc[pos..].trim_start();
        if !boundary || !rest.starts_with('=') {
            continue;
        }
        let value_start = open_tag.len() - rest.len() + 1;
        let value = open_tag[value_start..].trim_start();
        return Some(match value.chars().next() {
            Some(q @ ('"' | '\'')) => value[1..].split(q).next().unwrap_or("").to_string(),
            _ => value
                .split(|c: char| c.is_whitespace() || c == '>')
                .next()
                .unwrap_or("")
                .to_string(),
        });
    }
    None
}

pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

fn clean_text(inner: &str) -> String {
    normalize_ws(&normalize_entities(&strip_tags(inner)))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/html.rs"]
mod tests;
