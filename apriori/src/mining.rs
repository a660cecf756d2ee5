use crate::candidates::{level_one_candidates, next_candidates};
use crate::config::MiningConfig;
use crate::counter::count_level;
use crate::error::Result;
use crate::filter::filter_frequent;
use crate::source::DataSource;
use crate::storage::FrequentItemsets;
use crate::store::TransactionStore;
use std::time::Instant;
use tracing::{debug, info};

/// Where the level-wise search currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiningPhase {
    /// Store built, nothing mined yet.
    Init,
    /// Frequent single items.
    Level1,
    /// Pairs of frequent single items.
    Level2,
    /// Joins of frequent itemsets one item smaller, for the given size (>= 3).
    LevelK(usize),
    /// Search finished; results are final.
    Terminal,
}

/// Counts for one completed level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStats {
    pub itemset_size: usize,
    pub candidates: usize,
    pub pruned: usize,
    pub frequent: usize,
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct MiningOutcome {
    pub itemsets: FrequentItemsets,
    pub stats: Vec<LevelStats>,
}

/// Drives the level-wise search over a loaded store.
pub struct MiningLoop<'a> {
    store: &'a TransactionStore,
    config: MiningConfig,
    phase: MiningPhase,
    results: FrequentItemsets,
    stats: Vec<LevelStats>,
}

impl<'a> MiningLoop<'a> {
    pub fn new(store: &'a TransactionStore, config: MiningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            phase: MiningPhase::Init,
            results: FrequentItemsets::new(),
            stats: Vec::new(),
        })
    }

    pub fn phase(&self) -> MiningPhase {
        self.phase
    }

    pub fn results(&self) -> &FrequentItemsets {
        &self.results
    }

    pub fn stats(&self) -> &[LevelStats] {
        &self.stats
    }

    /// Runs the current phase and moves to the next one.
    pub fn step(&mut self) -> MiningPhase {
        self.phase = match self.phase {
            MiningPhase::Init => {
                debug!(
                    transactions = self.store.len(),
                    items = self.store.item_count(),
                    min_support = self.config.min_support,
                    "starting level-wise search"
                );
                MiningPhase::Level1
            }
            MiningPhase::Level1 => self.mine_single_items(),
            MiningPhase::Level2 => self.mine_level(2),
            MiningPhase::LevelK(size) => self.mine_level(size),
            MiningPhase::Terminal => MiningPhase::Terminal,
        };
        self.phase
    }

    pub fn run(mut self) -> MiningOutcome {
        while self.step() != MiningPhase::Terminal {}
        MiningOutcome {
            itemsets: self.results,
            stats: self.stats,
        }
    }

    fn mine_single_items(&mut self) -> MiningPhase {
        let candidates = level_one_candidates(self.store);
        let supports: Vec<usize> = candidates
            .iter_itemsets()
            .map(|itemset| self.store.posting_len(itemset[0]))
            .collect();
        let frequent = filter_frequent(&candidates, &supports, self.config.min_support);

        self.record(1, candidates.len(), 0, frequent.len());
        self.results.push_level(frequent);
        MiningPhase::Level2
    }

    fn mine_level(&mut self, itemset_size: usize) -> MiningPhase {
        let Some(previous) = self.results.level(itemset_size - 1) else {
            return MiningPhase::Terminal;
        };
        let Some(generated) =
            next_candidates(previous, self.config.termination, self.config.subset_pruning)
        else {
            return MiningPhase::Terminal;
        };

        let candidates = generated.candidates;
        let supports = count_level(&candidates, self.store, self.config.parallel);
        let frequent = filter_frequent(&candidates, &supports, self.config.min_support);

        self.record(itemset_size, candidates.len(), generated.pruned, frequent.len());
        if !self.results.push_level(frequent) {
            return MiningPhase::Terminal;
        }
        MiningPhase::LevelK(itemset_size + 1)
    }

    fn record(&mut self, itemset_size: usize, candidates: usize, pruned: usize, frequent: usize) {
        debug!(itemset_size, candidates, pruned, frequent, "level complete");
        self.stats.push(LevelStats {
            itemset_size,
            candidates,
            pruned,
            frequent,
        });
    }
}

/// Mines every frequent itemset of an already loaded store.
pub fn apriori_algorithm(
    store: &TransactionStore,
    config: &MiningConfig,
) -> Result<MiningOutcome> {
    let started = Instant::now();
    let outcome = MiningLoop::new(store, config.clone())?.run();
    info!(
        transactions = store.len(),
        levels = outcome.itemsets.max_itemset_size(),
        itemsets = outcome.itemsets.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "mining finished"
    );
    Ok(outcome)
}

/// Validates `config`, loads `source` and mines it.
pub fn mine<S: DataSource>(source: S, config: &MiningConfig) -> Result<MiningOutcome> {
    config.validate()?;

    let started = Instant::now();
    let store = TransactionStore::load(source)?;
    info!(
        transactions = store.len(),
        items = store.item_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "transactions loaded"
    );

    apriori_algorithm(&store, config)
}
