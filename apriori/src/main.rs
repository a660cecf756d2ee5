//! Command-line frequent itemset miner.
//!
//! ```bash
//! # Mine Data.txt with minimum support 2, writing Results.txt
//! apriori
//!
//! # Read stdin, write stdout, support threshold 50
//! apriori - -o - -s 50
//! ```

use apriori::{
    DEFAULT_MIN_SUPPORT, MalformedLinePolicy, MiningConfig, Result, TerminationPolicy, TextSink,
    TextSource, mine, write_results,
};
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Finds every itemset whose support reaches the threshold
#[derive(Parser, Debug)]
#[command(name = "apriori")]
#[command(about = "Level-wise frequent itemset mining")]
#[command(version)]
struct Args {
    /// Transaction file, one `count item item ...` line per transaction ("-" for stdin)
    #[arg(default_value = "Data.txt")]
    input: PathBuf,

    /// Where to write `[items] support` lines ("-" for stdout)
    #[arg(short, long, default_value = "Results.txt")]
    output: PathBuf,

    /// Minimum number of transactions an itemset must appear in
    #[arg(short = 's', long, default_value_t = DEFAULT_MIN_SUPPORT)]
    min_support: usize,

    /// When to stop generating larger itemsets
    #[arg(long, value_enum, default_value_t = TerminationPolicy::ExhaustedCandidates)]
    termination: TerminationPolicy,

    /// Keep joined candidates even if one of their subsets is infrequent
    #[arg(long)]
    no_prune: bool,

    /// Count candidates on all cores
    #[arg(long)]
    parallel: bool,

    /// Skip unparseable lines instead of aborting
    #[arg(long)]
    skip_malformed: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn config(&self) -> MiningConfig {
        let malformed = if self.skip_malformed {
            MalformedLinePolicy::Skip
        } else {
            MalformedLinePolicy::Abort
        };
        MiningConfig::new(self.min_support)
            .with_termination(self.termination)
            .with_subset_pruning(!self.no_prune)
            .with_parallel(self.parallel)
            .with_malformed_lines(malformed)
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn run(args: &Args) -> Result<()> {
    let config = args.config();
    config.validate()?;

    let outcome = if is_stdio(&args.input) {
        mine(TextSource::new(io::stdin().lock(), config.malformed_lines), &config)?
    } else {
        mine(TextSource::open(&args.input, config.malformed_lines)?, &config)?
    };

    for level in &outcome.stats {
        tracing::info!(
            itemset_size = level.itemset_size,
            candidates = level.candidates,
            pruned = level.pruned,
            frequent = level.frequent,
            "level"
        );
    }

    let started = Instant::now();
    if is_stdio(&args.output) {
        let mut sink = TextSink::new(io::stdout().lock());
        write_results(&outcome.itemsets, &mut sink)?;
    } else {
        let mut sink = TextSink::create(&args.output)?;
        if let Err(err) = write_results(&outcome.itemsets, &mut sink) {
            drop(sink);
            let _ = std::fs::remove_file(&args.output);
            return Err(err);
        }
    }
    tracing::info!(
        itemsets = outcome.itemsets.len(),
        output = %args.output.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "results written"
    );
    Ok(())
}

fn main() {
    let args = Args::parse();

    let filter = if args.debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!(%err, "apriori failed");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
