//! Collapses raw per-chunk semantic hits into one ranked result per page.
//!
//! Hits are grouped by exact URL string equality. Two URL forms that reach
//! the same page (trailing slash, query string) therefore count as distinct
//! groups; that matches the behavior this engine replaces and is kept
//! deliberately.

use sitesearch_core::config::RankBy;
use sitesearch_core::types::{AggregatedResult, SemanticHit};

fn ranking_value(group: &[&SemanticHit], rank_by: RankBy, best: &SemanticHit) -> f64 {
    match rank_by {
        RankBy::MaxSimilarity => best.similarity,
        RankBy::Average => {
            group.iter().map(|h| h.similarity).sum::<f64>() / group.len() as f64
        }
        RankBy::Count => group.len() as f64,
        RankBy::WeightedAverage => {
            let sum: f64 = group.iter().map(|h| h.similarity).sum();
            if sum == 0.0 {
                0.0
            } else {
                group.iter().map(|h| h.similarity * h.similarity).sum::<f64>() / sum
            }
        }
    }
}

/// Reduce one query's hit list to one result per distinct URL.
///
/// The representative attributes always come from the group's
/// highest-similarity hit (first one on ties). Results are stable-sorted
/// descending by the strategy's ranking value, so ties keep the order in
/// which their URLs first appeared in the input. The output URL set equals
/// the input URL set: no URL is dropped or invented.
pub fn aggregate(hits: &[SemanticHit], rank_by: RankBy) -> Vec<AggregatedResult> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: std::collections::HashMap<&str, Vec<&SemanticHit>> =
        std::collections::HashMap::new();
    for hit in hits {
        let url = hit.attributes.url.as_str();
        if !groups.contains_key(url) {
            order.push(url);
        }
        groups.entry(url).or_default().push(hit);
    }

    let mut results: Vec<AggregatedResult> = order
        .into_iter()
        .map(|url| {
            let group = &groups[url];
            let best = group.iter().copied().fold(group[0], |acc, h| {
                if h.similarity > acc.similarity {
                    h
                } else {
                    acc
                }
            });
            let value = ranking_value(group, rank_by, best);
            AggregatedResult {
                url: url.to_string(),
                title: best.attributes.title.clone(),
                similarity: value,
                count: (rank_by == RankBy::Count).then_some(group.len()),
                attributes: best.attributes.clone(),
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results
}
