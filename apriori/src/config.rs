use crate::error::{MiningError, Result};

/// Minimum support used when none is configured.
pub const DEFAULT_MIN_SUPPORT: usize = 2;

/// When the level-wise search stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TerminationPolicy {
    /// Stop once a level yields no candidates.
    #[default]
    #[value(name = "exhausted")]
    ExhaustedCandidates,
    /// Stop once a level of size >= 2 yields two or fewer frequent itemsets.
    ///
    /// Can cut the search short: two long frequent itemsets sharing a
    /// prefix would still join into a candidate.
    #[value(name = "legacy")]
    LegacyFrequentCount,
}

/// What to do with a transaction line that cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MalformedLinePolicy {
    /// Fail the whole load with a parse error.
    #[default]
    Abort,
    /// Drop the line, log a warning and keep reading.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiningConfig {
    pub min_support: usize,
    pub termination: TerminationPolicy,
    pub subset_pruning: bool,
    pub parallel: bool,
    pub malformed_lines: MalformedLinePolicy,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: DEFAULT_MIN_SUPPORT,
            termination: TerminationPolicy::default(),
            subset_pruning: true,
            parallel: false,
            malformed_lines: MalformedLinePolicy::default(),
        }
    }
}

impl MiningConfig {
    pub fn new(min_support: usize) -> Self {
        Self {
            min_support,
            ..Self::default()
        }
    }

    pub fn with_termination(mut self, termination: TerminationPolicy) -> Self {
        self.termination = termination;
        self
    }

    pub fn with_subset_pruning(mut self, enabled: bool) -> Self {
        self.subset_pruning = enabled;
        self
    }

    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn with_malformed_lines(mut self, policy: MalformedLinePolicy) -> Self {
        self.malformed_lines = policy;
        self
    }

    /// Rejects settings that would make the run meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.min_support == 0 {
            return Err(MiningError::configuration(
                "minimum support must be a positive integer",
            ));
        }
        Ok(())
    }
}
