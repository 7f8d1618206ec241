//! A simple CLI for the zeroone library.

#![warn(clippy::all, clippy::pedantic)]

extern crate zeroone_common;
use zeroone_common::answer_file::append_answer;
use zeroone_common::base_range::BaseRange;
use zeroone_common::benchmark::{BenchmarkMode, get_benchmark_config, known_term};
use zeroone_common::candidate_filter::search_sequential;
use zeroone_common::digit_test::is_zero_one_in_base;
use zeroone_common::natural_ops::decimal_digit_count;
use zeroone_common::progress::ProgressReporter;
use zeroone_common::search::search_parallel;
use zeroone_common::{
    CLIENT_VERSION, DEFAULT_ANSWER_FILE, DEFAULT_BIT_WINDOW, DEFAULT_MAX_BASE, DEFAULT_MIN_BASE,
    DEFAULT_START_LOG10, DEFAULT_THREADS, SearchConfig, SearchMode, SearchResults,
};

extern crate serde_json;
use anyhow::{Result, bail};
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// The search mode to use
    #[arg(value_enum, default_value = "parallel", env = "ZEROONE_MODE")]
    mode: SearchMode,

    /// Smallest base every digit must be 0 or 1 in
    #[arg(long, default_value_t = DEFAULT_MIN_BASE, env = "ZEROONE_MIN_BASE")]
    min_base: u32,

    /// Largest base every digit must be 0 or 1 in
    #[arg(long, default_value_t = DEFAULT_MAX_BASE, env = "ZEROONE_MAX_BASE")]
    max_base: u32,

    /// Start the search at 10 to this power
    #[arg(long, default_value_t = DEFAULT_START_LOG10, env = "ZEROONE_START_LOG10")]
    start_log10: u32,

    /// Number of bit-lengths each worker claims at a time
    #[arg(long, default_value_t = DEFAULT_BIT_WINDOW, env = "ZEROONE_BIT_WINDOW")]
    bit_window: u64,

    /// Stop after searching every candidate with at most this many bits
    #[arg(long, env = "ZEROONE_MAX_BITS")]
    max_bits: Option<u64>,

    /// Run parallel with this many threads
    #[arg(short, long, default_value_t = DEFAULT_THREADS, env = "ZEROONE_THREADS")]
    threads: usize,

    /// Append the answer to this file
    #[arg(long, default_value = DEFAULT_ANSWER_FILE, env = "ZEROONE_ANSWER_FILE")]
    answer_file: PathBuf,

    /// Run an offline benchmark
    #[arg(short, long, env = "ZEROONE_BENCHMARK")]
    benchmark: Option<BenchmarkMode>,

    /// Check both search modes against the known answer for bases 3 through 5
    #[arg(long, env = "ZEROONE_VALIDATE")]
    validate: bool,

    /// Suppress all output
    #[arg(short, long, env = "ZEROONE_QUIET")]
    quiet: bool,

    /// Show additional output
    #[arg(short, long, env = "ZEROONE_VERBOSE")]
    verbose: bool,
}

impl Cli {
    /// Build the search configuration from the command line.
    fn search_config(&self) -> Result<SearchConfig> {
        let config = if let Some(benchmark) = self.benchmark {
            get_benchmark_config(benchmark, self.threads)
        } else {
            SearchConfig {
                bases: BaseRange::new(self.min_base, self.max_base)?,
                start_log10: self.start_log10,
                bit_window: self.bit_window,
                threads: self.threads,
                max_bits: self.max_bits,
            }
        };
        config.validate()?;
        Ok(config)
    }
}

/// Run one search in the requested mode.
fn run_search(config: &SearchConfig, mode: SearchMode, quiet: bool) -> Result<SearchResults> {
    match mode {
        SearchMode::Parallel => search_parallel(config, &ProgressReporter::new(quiet)),
        SearchMode::Sequential => Ok(search_sequential(config)),
    }
}

/// Double-check an answer digit by digit in every base.
fn verify_answer(results: &SearchResults, config: &SearchConfig) -> bool {
    results.answer.as_ref().is_none_or(|answer| {
        config
            .bases
            .descending()
            .all(|base| is_zero_one_in_base(answer, base))
    })
}

/// Run both modes on the known term and compare against the published answer.
fn run_validation(cli: &Cli) -> Result<()> {
    let config = get_benchmark_config(BenchmarkMode::KnownTerm, cli.threads);
    let Some(expected) = known_term(config.bases.max_base) else {
        bail!("No known answer for max base {}", config.bases.max_base);
    };

    let mut validation_passed = true;
    for mode in [SearchMode::Parallel, SearchMode::Sequential] {
        let results = run_search(&config, mode, true)?;
        if results.answer.as_ref() == Some(&expected) {
            if !cli.quiet {
                println!("{mode} search found {expected} as expected.");
            }
        } else {
            println!(
                "VALIDATION FAILED: {mode} search found {:?}, expected {expected}",
                results.answer.map(|n| n.to_string())
            );
            validation_passed = false;
        }
    }

    if validation_passed {
        println!("Validation passed! Both search modes match the known answer.");
        Ok(())
    } else {
        println!("Validation failed! Results do not match the known answer.");
        std::process::exit(1);
    }
}

fn print_summary(results: &SearchResults, config: &SearchConfig) {
    println!();
    match &results.answer {
        Some(answer) => println!(
            "Answer for bases {}: {answer} ({} digits)",
            config.bases,
            decimal_digit_count(answer)
        ),
        None => println!("No answer found for bases {} in the searched range.", config.bases),
    }
    #[allow(clippy::cast_precision_loss)]
    let rate = if results.elapsed_secs > 0.0 {
        results.candidates_checked as f64 / results.elapsed_secs
    } else {
        0.0
    };
    println!(
        "Checked {} candidates over {} ranges in {:.2}s ({:.2e} candidates/sec)",
        results.candidates_checked, results.ranges_claimed, results.elapsed_secs, rate
    );
}

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Set up logger
    env_logger::init();

    if cli.validate {
        return run_validation(&cli);
    }

    let config = cli.search_config()?;

    if !cli.quiet {
        println!(
            "Zeroone Client v{} started in {} mode, using {} threads.",
            CLIENT_VERSION, cli.mode, config.threads
        );
        println!(
            "Finding smallest number represented by only 0s and 1s from base {} to {}, starting at 10^{}",
            config.bases.min_base, config.bases.max_base, config.start_log10
        );
        if let Some(benchmark) = cli.benchmark {
            println!("Beginning benchmark:  {benchmark}");
        }
    }
    if cli.verbose {
        println!("CLI Inputs: {cli:?}");
        println!("Search Config: {}", serde_json::to_string_pretty(&config)?);
    }

    let results = run_search(&config, cli.mode, cli.quiet)?;

    if !verify_answer(&results, &config) {
        bail!("Search returned an answer that fails the digit check, this is a bug");
    }

    if !cli.quiet {
        print_summary(&results, &config);
    }
    if cli.verbose {
        println!("Results: {}", serde_json::to_string_pretty(&results)?);
    }

    // Benchmarks don't produce answers worth keeping
    if cli.benchmark.is_none() {
        match &results.answer {
            Some(answer) => match append_answer(&cli.answer_file, answer) {
                Ok(()) => {
                    info!("Answer written to {}", cli.answer_file.display());
                    if !cli.quiet {
                        println!("Answer written to {}", cli.answer_file.display());
                    }
                }
                Err(e) => error!(
                    "{e:#}. The answer has {} digits: {answer}",
                    decimal_digit_count(answer)
                ),
            },
            None => warn!("No answer to write to {}", cli.answer_file.display()),
        }
    }

    Ok(())
}
