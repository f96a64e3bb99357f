//! Scoring - weighted keyword matching against catalog records.

use serde::{Deserialize, Serialize};

use asset_catalog::AssetRecord;

/// Points per matched include term.
pub const INCLUDE_WEIGHT: i32 = 4;

/// Points per matched bonus term.
pub const BONUS_WEIGHT: i32 = 2;

/// Points subtracted per matched exclude term.
pub const EXCLUDE_PENALTY: i32 = 5;

/// Path segments marking marketplace/import-staging content (preferred).
const IMPORT_MARKERS: [&str; 2] = ["/fab/", "/marketplace/"];

/// Path segments marking demo/test content (penalized).
const DEMO_MARKERS: [&str; 2] = ["/demo/", "/test/"];

/// An ordered, duplicate-free set of lowercase search terms.
///
/// Order is the declaration order of the role vocabulary; duplicates are
/// dropped on insertion so a repeated term can never double-count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSet {
    terms: Vec<String>,
}

impl TermSet {
    /// Create an empty term set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a term set from terms, lowercasing and dropping duplicates
    /// while keeping first-occurrence order.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for term in terms {
            set.push(term);
        }
        set
    }

    /// Insert a term unless already present.
    pub fn push(&mut self, term: impl Into<String>) {
        let term = term.into().to_lowercase();
        if !self.terms.contains(&term) {
            self.terms.push(term);
        }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Union with another set, keeping this set's terms first.
    pub fn merged(&self, other: &TermSet) -> TermSet {
        let mut merged = self.clone();
        for term in other.iter() {
            merged.push(term);
        }
        merged
    }

    /// This set minus the terms of another.
    pub fn without(&self, other: &TermSet) -> TermSet {
        TermSet {
            terms: self
                .terms
                .iter()
                .filter(|t| !other.contains(t))
                .cloned()
                .collect(),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for TermSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_terms(iter)
    }
}

/// Score a record against weighted term sets.
///
/// Each term is matched independently as a substring of the record's
/// lowercase search text and contributes cumulatively; structural path
/// adjustments apply regardless of caller terms. Pure: identical inputs
/// always yield identical output.
pub fn score_record(
    record: &AssetRecord,
    include_terms: &TermSet,
    exclude_terms: &TermSet,
    bonus_terms: &TermSet,
) -> i32 {
    let text = record.search_text();

    let mut score = 0;
    for term in include_terms.iter() {
        if text.contains(term) {
            score += INCLUDE_WEIGHT;
        }
    }
    for term in bonus_terms.iter() {
        if text.contains(term) {
            score += BONUS_WEIGHT;
        }
    }
    for term in exclude_terms.iter() {
        if text.contains(term) {
            score -= EXCLUDE_PENALTY;
        }
    }

    let path = record.reference().to_lowercase();
    if IMPORT_MARKERS.iter().any(|m| path.contains(m)) {
        score += 2;
    }
    if DEMO_MARKERS.iter().any(|m| path.contains(m)) {
        score -= 2;
    }

    score
}
