// File: ./src/recommend/grammar.rs
//! Line grammar for the advisor's schedule advice.
//!
//! The advisor is asked to emit one action item per line:
//!
//!     Task: <title> at <Month DD, YYYY> at <H:MM AM|PM>, task id: <uuid>
//!
//! Anything that does not fit the grammar (prose, numbering, closing
//! remarks) is simply not a match. That is the normal case for most lines,
//! not an error.
use once_cell::sync::Lazy;
use regex::Regex;

/// One action line extracted from the advice text. Date, time and id are
/// kept raw here; resolution happens downstream so a bad date on one line
/// cannot take the others down with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub title: String,
    pub date: String,
    pub time: String,
    pub task_id: String,
}

static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"Task:\s(.+?)\s+at\s+([A-Za-z]{3,9}\s\d{1,2},\s\d{4})\s+at\s+(\d{1,2}:\d{2}\s[APM]{2}),\s+task id:\s+([A-Fa-f0-9-]+)",
    )
    .expect("advice line pattern must compile")
});

/// Matches a single line against the grammar. Leading list markers ("1) ")
/// are tolerated because the pattern is unanchored.
pub fn parse_line(line: &str) -> Option<LineMatch> {
    let caps = LINE_RE.captures(line)?;
    let title = caps[1].trim();
    if title.is_empty() {
        return None;
    }
    Some(LineMatch {
        title: title.to_string(),
        date: caps[2].to_string(),
        time: caps[3].to_string(),
        task_id: caps[4].to_string(),
    })
}

/// Extracts every action line from a full advice text, preserving line
/// order. An empty result means "no actionable lines", which is valid.
pub fn parse_recommendations(text: &str) -> Vec<LineMatch> {
    text.lines().filter_map(parse_line).collect()
}
