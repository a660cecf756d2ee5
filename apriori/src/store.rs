use crate::error::Result;
use crate::source::{DataSource, MatrixSource};
use crate::storage::Item;
use ndarray::ArrayView2;
use std::collections::BTreeMap;

/// All transactions of a dataset plus the inverted item index.
///
/// Transactions are stored back to back in one buffer, each sorted and
/// duplicate-free. `postings[item]` lists, in ascending order, the index of
/// every transaction containing `item`. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    items: Vec<Item>,
    offsets: Vec<(usize, usize)>,
    postings: BTreeMap<Item, Vec<usize>>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains `source` into a new store.
    pub fn load<S: DataSource>(mut source: S) -> Result<Self> {
        let mut store = Self::new();
        while let Some(transaction) = source.next_transaction()? {
            store.push_transaction(transaction);
        }
        Ok(store)
    }

    pub fn from_transactions<I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = Vec<Item>>,
    {
        let mut store = Self::new();
        for transaction in transactions {
            store.push_transaction(transaction);
        }
        store
    }

    pub fn from_matrix(matrix: ArrayView2<i32>) -> Result<Self> {
        Self::load(MatrixSource::new(matrix))
    }

    /// Appends a transaction, sorting and deduplicating its items.
    ///
    /// Indices are handed out in load order, so posting lists stay ascending.
    pub(crate) fn push_transaction(&mut self, mut transaction: Vec<Item>) -> usize {
        transaction.sort_unstable();
        transaction.dedup();

        let tid = self.offsets.len();
        for &item in &transaction {
            self.postings.entry(item).or_default().push(tid);
        }
        let start = self.items.len();
        self.items.extend_from_slice(&transaction);
        self.offsets.push((start, transaction.len()));
        tid
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn transaction(&self, tid: usize) -> &[Item] {
        let (start, len) = self.offsets[tid];
        &self.items[start..start + len]
    }

    pub fn transactions(&self) -> impl Iterator<Item = &[Item]> {
        (0..self.len()).map(move |tid| self.transaction(tid))
    }

    /// Transactions containing `item`; empty if the item never occurs.
    pub fn postings(&self, item: Item) -> &[usize] {
        self.postings.get(&item).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn posting_len(&self, item: Item) -> usize {
        self.postings.get(&item).map_or(0, Vec::len)
    }

    /// Distinct items in ascending order.
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.postings.keys().copied()
    }

    pub fn item_count(&self) -> usize {
        self.postings.len()
    }

    pub fn iter_postings(&self) -> impl Iterator<Item = (Item, &[usize])> {
        self.postings
            .iter()
            .map(|(&item, tids)| (item, tids.as_slice()))
    }
}
