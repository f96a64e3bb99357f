//! Candidate filtering and selection - type whitelist, score cutoff, ranking.

use asset_catalog::{AssetRecord, TypeTag};

use crate::scoring::{score_record, TermSet};

/// A candidate that passed the whitelist and received a score. Ephemeral;
/// discarded once the top choice is taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub score: i32,
    pub reference: String,
}

/// Select the single best-matching reference, or `None` when no candidate
/// clears `min_score`. Callers treat `None` as "unresolved", never an error.
pub fn select_best(
    records: &[AssetRecord],
    allowed_types: &[TypeTag],
    include_terms: &TermSet,
    exclude_terms: &TermSet,
    bonus_terms: &TermSet,
    min_score: i32,
) -> Option<String> {
    select_top_n(
        records,
        allowed_types,
        include_terms,
        exclude_terms,
        bonus_terms,
        1,
        min_score,
    )
    .into_iter()
    .next()
}

/// Select the best `max_results` references, ranked.
///
/// Ordering is score descending, tie-broken by the reference string
/// ascending. The tie-break is deliberate: candidates sharing a top score
/// resolve the same way regardless of catalog enumeration order.
pub fn select_top_n(
    records: &[AssetRecord],
    allowed_types: &[TypeTag],
    include_terms: &TermSet,
    exclude_terms: &TermSet,
    bonus_terms: &TermSet,
    max_results: usize,
    min_score: i32,
) -> Vec<String> {
    let mut candidates: Vec<ScoredCandidate> = records
        .iter()
        .filter(|r| allowed_types.contains(&r.type_tag))
        .filter_map(|r| {
            let score = score_record(r, include_terms, exclude_terms, bonus_terms);
            (score >= min_score).then(|| ScoredCandidate {
                score,
                reference: r.reference(),
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.reference.cmp(&b.reference))
    });

    candidates
        .into_iter()
        .take(max_results)
        .map(|c| c.reference)
        .collect()
}
