mod io;

use crate::storage::Item;
use crate::store::TransactionStore;

pub(crate) fn store_of(transactions: &[&[Item]]) -> TransactionStore {
    TransactionStore::from_transactions(transactions.iter().map(|t| t.to_vec()))
}

/// Counts support by scanning every transaction.
pub(crate) fn brute_force_support(store: &TransactionStore, itemset: &[Item]) -> usize {
    store
        .transactions()
        .filter(|t| itemset.iter().all(|item| t.contains(item)))
        .count()
}
