use crate::storage::ItemsetLevel;

/// Keeps the candidates whose support reaches `min_support`.
///
/// Candidate order is preserved, so lexicographic input gives lexicographic
/// output and the next join stays valid.
pub fn filter_frequent(
    candidates: &ItemsetLevel,
    supports: &[usize],
    min_support: usize,
) -> ItemsetLevel {
    debug_assert_eq!(candidates.len(), supports.len());

    let mut frequent = ItemsetLevel::new(candidates.itemset_size);
    for (itemset, &support) in candidates.iter_itemsets().zip(supports) {
        if support >= min_support {
            frequent.add_itemset(itemset, support);
        }
    }
    frequent
}
