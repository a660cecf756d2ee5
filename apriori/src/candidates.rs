use crate::config::TerminationPolicy;
use crate::storage::{Item, ItemsetLevel};
use crate::store::TransactionStore;
use tracing::debug;

/// Candidates of one level together with how many the subset check removed.
#[derive(Debug, Clone)]
pub struct GeneratedCandidates {
    pub candidates: ItemsetLevel,
    pub pruned: usize,
}

/// One candidate per distinct item in the store, ascending.
pub fn level_one_candidates(store: &TransactionStore) -> ItemsetLevel {
    let mut level = ItemsetLevel::with_capacity(1, store.item_count());
    for item in store.items() {
        level.add_itemset(&[item], 0);
    }
    level
}

/// Every pair `{a, b}` with `a < b` drawn from the frequent single items.
pub fn pair_candidates(frequent: &ItemsetLevel) -> ItemsetLevel {
    debug_assert_eq!(frequent.itemset_size, 1);
    let n = frequent.len();
    let mut level = ItemsetLevel::with_capacity(2, n * n.saturating_sub(1) / 2);
    for i in 0..n {
        let a = frequent.get_itemset(i)[0];
        for j in (i + 1)..n {
            level.add_itemset(&[a, frequent.get_itemset(j)[0]], 0);
        }
    }
    level
}

/// Joins frequent `(k-1)`-itemsets that share their first `k-2` items.
///
/// `frequent` must be in lexicographic order, so all partners of itemset `i`
/// sit in a contiguous run right after it. The output is lexicographic and
/// duplicate-free. With `subset_pruning`, a joined candidate is kept only if
/// all of its `(k-1)`-subsets are frequent.
pub fn join_candidates(frequent: &ItemsetLevel, subset_pruning: bool) -> GeneratedCandidates {
    let prev_size = frequent.itemset_size;
    let prefix_len = prev_size - 1;
    let n = frequent.len();

    let mut candidates = ItemsetLevel::new(prev_size + 1);
    let mut pruned = 0;
    let mut joined: Vec<Item> = Vec::with_capacity(prev_size + 1);
    let mut scratch: Vec<Item> = Vec::with_capacity(prev_size);

    for i in 0..n {
        let left = frequent.get_itemset(i);
        let prefix = &left[..prefix_len];

        let mut j = i + 1;
        while j < n {
            let right = frequent.get_itemset(j);
            if right[..prefix_len] != *prefix {
                break;
            }

            joined.clear();
            joined.extend_from_slice(left);
            joined.push(right[prefix_len]);

            if subset_pruning && !has_frequent_subsets(&joined, frequent, &mut scratch) {
                pruned += 1;
            } else {
                candidates.add_itemset(&joined, 0);
            }
            j += 1;
        }
    }

    GeneratedCandidates { candidates, pruned }
}

/// Whether every subset of `candidate` that is one item smaller is in `frequent`.
///
/// Dropping either of the last two items yields one of the join parents,
/// so only the earlier positions are looked up.
pub fn has_frequent_subsets(
    candidate: &[Item],
    frequent: &ItemsetLevel,
    scratch: &mut Vec<Item>,
) -> bool {
    let k = candidate.len();
    if k < 3 {
        return true;
    }
    (0..k - 2).all(|skip| {
        scratch.clear();
        scratch.extend_from_slice(&candidate[..skip]);
        scratch.extend_from_slice(&candidate[skip + 1..]);
        frequent.contains(scratch.as_slice())
    })
}

/// Candidates for the level after `frequent`, or `None` when the search stops.
pub fn next_candidates(
    frequent: &ItemsetLevel,
    termination: TerminationPolicy,
    subset_pruning: bool,
) -> Option<GeneratedCandidates> {
    let next_size = frequent.itemset_size + 1;

    if termination == TerminationPolicy::LegacyFrequentCount
        && next_size > 2
        && frequent.len() <= 2
    {
        debug!(
            itemset_size = next_size,
            frequent = frequent.len(),
            "two or fewer frequent itemsets, stopping"
        );
        return None;
    }

    let generated = if next_size == 2 {
        GeneratedCandidates {
            candidates: pair_candidates(frequent),
            pruned: 0,
        }
    } else {
        join_candidates(frequent, subset_pruning)
    };

    if generated.candidates.is_empty() {
        debug!(itemset_size = next_size, pruned = generated.pruned, "no candidates left");
        return None;
    }
    Some(generated)
}
