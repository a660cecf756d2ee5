use crate::storage::{Item, ItemsetLevel};
use crate::store::TransactionStore;
use rayon::prelude::*;
use tracing::trace;

/// Item of `candidate` with the shortest posting list.
///
/// Ties go to the earliest item in the candidate.
pub fn select_pivot(candidate: &[Item], store: &TransactionStore) -> Option<Item> {
    candidate
        .iter()
        .copied()
        .min_by_key(|&item| store.posting_len(item))
}

/// Whether every item of `needle` occurs in `haystack`; both ascending.
pub fn is_subset(needle: &[Item], haystack: &[Item]) -> bool {
    if needle.len() > haystack.len() {
        return false;
    }
    let mut rest = haystack.iter();
    'outer: for &wanted in needle {
        for &item in rest.by_ref() {
            if item == wanted {
                continue 'outer;
            }
            if item > wanted {
                return false;
            }
        }
        return false;
    }
    true
}

/// Number of transactions containing every item of `candidate`.
///
/// Only the pivot's posting list is scanned. An empty candidate is contained
/// in every transaction.
pub fn count_support(candidate: &[Item], store: &TransactionStore) -> usize {
    let Some(pivot) = select_pivot(candidate, store) else {
        return store.len();
    };
    trace!(?candidate, pivot, postings = store.posting_len(pivot), "pivot selected");
    store
        .postings(pivot)
        .iter()
        .filter(|&&tid| is_subset(candidate, store.transaction(tid)))
        .count()
}

/// Supports of every candidate of a level, in candidate order.
///
/// With `parallel` the candidates are counted on the rayon pool; the
/// returned vector is complete before this function returns.
pub fn count_level(
    candidates: &ItemsetLevel,
    store: &TransactionStore,
    parallel: bool,
) -> Vec<usize> {
    if parallel {
        (0..candidates.len())
            .into_par_iter()
            .map(|idx| count_support(candidates.get_itemset(idx), store))
            .collect()
    } else {
        candidates
            .iter_itemsets()
            .map(|candidate| count_support(candidate, store))
            .collect()
    }
}
