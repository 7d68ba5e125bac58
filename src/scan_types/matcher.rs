//! Ranked, case-insensitive matching of partial input against scan type labels

use std::fmt;

use serde::Serialize;

/// Match quality, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchRank {
    /// Label equals the query
    Exact = 0,
    /// Label starts with the query
    Prefix = 1,
    /// Query appears somewhere inside the label
    Substring = 2,
}

impl fmt::Display for MatchRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchRank::Exact => "exact",
            MatchRank::Prefix => "prefix",
            MatchRank::Substring => "substring",
        };
        f.write_str(name)
    }
}

/// A label that matched a query, with its rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanTypeMatch<'a> {
    pub label: &'a str,
    pub rank: MatchRank,
}

/// Rank a single label against a query, or `None` if it does not match.
pub fn rank(query: &str, label: &str) -> Option<MatchRank> {
    let query = query.to_lowercase();
    let label = label.to_lowercase();

    if label == query {
        Some(MatchRank::Exact)
    } else if label.starts_with(&query) {
        Some(MatchRank::Prefix)
    } else if label.contains(&query) {
        Some(MatchRank::Substring)
    } else {
        None
    }
}

/// All labels matching `query`, best rank first.
///
/// The sort is stable, so labels of equal rank keep their catalog order. An
/// empty query ranks every label as a prefix match.
pub fn ranked<'a, S: AsRef<str>>(query: &str, labels: &'a [S]) -> Vec<ScanTypeMatch<'a>> {
    let mut matches: Vec<ScanTypeMatch<'a>> = labels
        .iter()
        .filter_map(|label| {
            let label = label.as_ref();
            rank(query, label).map(|rank| ScanTypeMatch { label, rank })
        })
        .collect();

    matches.sort_by_key(|m| m.rank);
    matches
}

/// Labels matching `query`, best rank first.
pub fn suggest<'a, S: AsRef<str>>(query: &str, labels: &'a [S]) -> Vec<&'a str> {
    ranked(query, labels).into_iter().map(|m| m.label).collect()
}

/// The match to commit without asking, if there is one.
///
/// That is the only match, or the sole member of the best rank group when
/// that rank is [`MatchRank::Exact`] or [`MatchRank::Prefix`].
pub fn unique_best<'a>(matches: &[ScanTypeMatch<'a>]) -> Option<&'a str> {
    let first = matches.first()?;
    if matches.len() == 1 {
        return Some(first.label);
    }

    if first.rank > MatchRank::Prefix {
        return None;
    }

    let tied = matches.iter().filter(|m| m.rank == first.rank).count();
    (tied == 1).then_some(first.label)
}

/// Tab-cycling state owned by an interactive prompt.
///
/// Each cycle action moves the highlight to the next match, wrapping at the
/// end. Changing the query puts the highlight back on the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchCycle {
    query: String,
    index: usize,
}

impl MatchCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Record the current query, resetting the highlight if it changed.
    pub fn set_query(&mut self, query: &str) {
        if self.query != query {
            self.query = query.to_string();
            self.index = 0;
        }
    }

    /// Advance the highlight over `len` matches and return the new index.
    pub fn advance(&mut self, len: usize) -> usize {
        self.index = if len == 0 { 0 } else { (self.index + 1) % len };
        self.index
    }

    /// The currently highlighted match.
    pub fn highlighted<'a>(&self, matches: &[ScanTypeMatch<'a>]) -> Option<&'a str> {
        matches.get(self.index).map(|m| m.label)
    }
}
