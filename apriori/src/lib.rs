//! Level-wise frequent itemset mining.
//!
//! Transactions are loaded into a [`TransactionStore`] that keeps an inverted
//! index from each item to the transactions containing it. Mining proceeds
//! one itemset size at a time: candidates of size `k` are joined from the
//! frequent itemsets of size `k - 1`, counted against the posting list of
//! their rarest item and kept if their support reaches the threshold.

pub mod candidates;
pub mod config;
pub mod counter;
pub mod error;
pub mod filter;
pub mod mining;
pub mod sink;
pub mod source;
pub mod storage;
pub mod store;

#[cfg(feature = "python")]
mod python;

#[cfg(test)]
mod tests;

pub use config::{DEFAULT_MIN_SUPPORT, MalformedLinePolicy, MiningConfig, TerminationPolicy};
pub use error::{MiningError, Result};
pub use mining::{LevelStats, MiningLoop, MiningOutcome, MiningPhase, apriori_algorithm, mine};
pub use sink::{ResultSink, TextSink, write_results};
pub use source::{DataSource, MatrixSource, TextSource};
pub use storage::{FrequentItemsets, Item, ItemsetLevel};
pub use store::TransactionStore;
