//! Merge-dedup of the vector and lexical rankings.

use std::collections::HashSet;

use crate::store::ResultItem;

fn push_unique<'a>(item: &'a ResultItem, seen: &mut HashSet<&'a str>, merged: &mut Vec<ResultItem>) {
    if seen.insert(item.title.as_str()) {
        merged.push(item.clone());
    }
}

/// Interleaves `vector` and `fulltext` pairwise (vector first at each rank), then appends
/// the tail of the longer list. A title already taken is skipped, so the output never holds
/// a title twice. The earlier-ranked copy wins; at equal rank the vector copy wins.
pub fn merge_results(vector: &[ResultItem], fulltext: &[ResultItem]) -> Vec<ResultItem> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(vector.len() + fulltext.len());

    for (v, t) in vector.iter().zip(fulltext) {
        push_unique(v, &mut seen, &mut merged);
        push_unique(t, &mut seen, &mut merged);
    }
    let paired = vector.len().min(fulltext.len());
    for item in vector[paired..].iter().chain(&fulltext[paired..]) {
        push_unique(item, &mut seen, &mut merged);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(prefix: &str, n: usize) -> Vec<ResultItem> {
        (0..n)
            .map(|i| ResultItem::new(format!("{prefix}{i}"), "", 7.0, 1.0 - i as f64 * 0.1))
            .collect()
    }

    fn titles(v: &[ResultItem]) -> Vec<&str> {
        v.iter().map(|i| i.title.as_str()).collect()
    }

    /// **Scenario**: disjoint lists of equal length alternate v,t,v,t and keep every item.
    #[test]
    fn disjoint_lists_alternate() {
        let merged = merge_results(&items("v", 3), &items("t", 3));
        assert_eq!(titles(&merged), vec!["v0", "t0", "v1", "t1", "v2", "t2"]);
    }

    /// **Scenario**: for every length combination up to 6x6, disjoint inputs keep the sum.
    #[test]
    fn disjoint_lengths_sum() {
        for nv in 0..6 {
            for nt in 0..6 {
                let merged = merge_results(&items("v", nv), &items("t", nt));
                assert_eq!(merged.len(), nv + nt, "nv={nv} nt={nt}");
            }
        }
    }

    /// **Scenario**: the longer tail is appended after pairing.
    #[test]
    fn longer_tail_appended() {
        let merged = merge_results(&items("v", 1), &items("t", 3));
        assert_eq!(titles(&merged), vec!["v0", "t0", "t1", "t2"]);
        let merged = merge_results(&items("v", 3), &items("t", 1));
        assert_eq!(titles(&merged), vec!["v0", "t0", "v1", "v2"]);
    }

    /// **Scenario**: a duplicate at different ranks keeps whichever copy is reached first.
    #[test]
    fn duplicate_keeps_earlier_ranked_entry() {
        let vector = vec![
            ResultItem::new("Heat", "vector copy", 8.3, 0.9),
            ResultItem::new("Ronin", "", 7.2, 0.8),
        ];
        let fulltext = vec![
            ResultItem::new("Ronin", "lexical copy", 7.2, 4.0),
            ResultItem::new("Heat", "lexical copy", 8.3, 3.0),
        ];
        let merged = merge_results(&vector, &fulltext);
        assert_eq!(titles(&merged), vec!["Heat", "Ronin"]);
        assert_eq!(merged[0].overview, "vector copy");
        assert_eq!(merged[1].overview, "lexical copy");
        assert_eq!(merged[1].score, 4.0);
    }

    /// **Scenario**: a duplicate at the same rank keeps the vector copy.
    #[test]
    fn same_rank_duplicate_keeps_vector_entry() {
        let vector = vec![
            ResultItem::new("Heat", "vector copy", 8.3, 0.9),
            ResultItem::new("Ronin", "", 7.2, 0.8),
        ];
        let fulltext = vec![
            ResultItem::new("Heat", "lexical copy", 8.3, 5.0),
            ResultItem::new("Alien", "", 8.5, 2.0),
        ];
        let merged = merge_results(&vector, &fulltext);
        assert_eq!(titles(&merged), vec!["Heat", "Ronin", "Alien"]);
        assert_eq!(merged[0].overview, "vector copy");
        assert_eq!(merged[0].score, 0.9);
    }

    /// **Scenario**: titles are case-sensitive keys.
    #[test]
    fn title_key_is_case_sensitive() {
        let merged = merge_results(
            &[ResultItem::new("Heat", "", 0.0, 0.0)],
            &[ResultItem::new("heat", "", 0.0, 0.0)],
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn empty_inputs_give_empty_output() {
        assert!(merge_results(&[], &[]).is_empty());
    }
}
