#![allow(clippy::cast_precision_loss)]

use crate::command_line::logging::{Messages, Verbosity};
use clap::{CommandFactory, Parser};
use sat_symmetry::symmetry::check::first_violation;
use sat_symmetry::symmetry::cnf::Cnf;
use sat_symmetry::symmetry::config::{DetectorConfig, Mode};
use sat_symmetry::symmetry::detector::{SearchStats, SymmetryDetector};
use sat_symmetry::symmetry::dimacs::{STDIN_NAME, parse_input};
use sat_symmetry::symmetry::error::{Error, Result};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};
use tracing::warn;

/// Defines the command-line interface of the symmetry detector.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "satsym",
    version,
    about = "Detects simple syntactic symmetries in DIMACS CNF formulas"
)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct Cli {
    /// DIMACS file to read. Standard input is read when omitted.
    pub path: Option<PathBuf>,

    /// Trace every verification sweep on stderr (implies --verbose).
    #[arg(short, long, default_value_t = false)]
    pub logging: bool,

    /// Print only the symmetries, no `c` comment lines.
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Print progress and search statistics.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Kind of symmetry to search for.
    #[arg(long, value_enum, default_value_t = Mode::Single)]
    pub mode: Mode,

    /// Visit variables by ascending occurrence counts.
    #[arg(short, long, default_value_t = false)]
    pub sorting: bool,

    /// Chain confirmed pairs into symmetry groups (implies --mode pair).
    #[arg(short, long, default_value_t = false)]
    pub groups: bool,

    /// Verify by moving matched clauses out of the search range.
    #[arg(long = "clauseswapping", default_value_t = false)]
    pub clause_swapping: bool,

    /// Try shorter clauses first when matching.
    #[arg(short = 'c', long = "sortclauses", default_value_t = false)]
    pub sort_clauses: bool,

    /// Sort clause literals by variable before matching.
    #[arg(long = "sortliterals", default_value_t = false)]
    pub sort_literals: bool,

    /// Re-check every reported symmetry against the whole formula.
    #[arg(long, default_value_t = false)]
    pub verify: bool,

    /// Print a completion script for the given shell and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

impl Cli {
    pub(crate) const fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose, self.logging)
    }

    /// The detector settings selected on the command line.
    pub(crate) fn config(&self) -> DetectorConfig {
        DetectorConfig {
            mode: if self.groups { Mode::Pair } else { self.mode },
            variable_sorting: self.sorting,
            groups: self.groups,
            clause_swapping: self.clause_swapping,
            sort_clauses: self.sort_clauses,
            sort_literals: self.sort_literals,
            ..DetectorConfig::default()
        }
    }

    fn input_name(&self) -> String {
        self.path
            .as_ref()
            .map_or_else(|| STDIN_NAME.to_string(), |path| path.display().to_string())
    }
}

/// Writes the completion script for `shell` to stdout.
pub(crate) fn print_completions(shell: clap_complete::Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
}

/// Parses the input, runs the detector and reports the symmetries.
///
/// # Errors
///
/// If the input cannot be read or parsed, or if `--verify` rejects a reported
/// symmetry.
pub(crate) fn run(cli: &Cli) -> Result<()> {
    let messages = Messages::new(cli.verbosity());
    let config = cli.config();

    messages.message(format_args!("satsym {}", env!("CARGO_PKG_VERSION")));
    messages.message(format_args!("reading from '{}'", cli.input_name()));

    let time = Instant::now();
    let cnf = parse_input(cli.path.as_deref())?;
    let parse_time = time.elapsed();

    messages.message(format_args!(
        "parsed header 'p cnf {} {}'",
        cnf.num_vars,
        cnf.len()
    ));
    messages.message(format_args!(
        "parsed {} literals in {} clauses",
        cnf.num_literals,
        cnf.len()
    ));
    if let Some(c_ref) = cnf.empty_clause {
        messages.verbose(format_args!("clause {} is empty", c_ref + 1));
    }
    messages.verbose(format_args!(
        "searching {} symmetries with {} matching",
        config.mode,
        config.matching_strategy()
    ));

    let time = Instant::now();
    let mut detector = SymmetryDetector::new(cnf, config);
    let report = detector.run();
    let search_time = time.elapsed();

    for symmetry in &report.symmetries {
        println!("{symmetry}");
    }

    if report.stats.limit_reached {
        warn!(limit = config.pair_limit, "pair limit reached, result is incomplete");
        messages.message(format_args!(
            "stopped after {} pairs, result is incomplete",
            config.pair_limit
        ));
    }
    messages.message(format_args!("found {} candidates", report.stats.candidates));
    if config.mode == Mode::Pair {
        messages.message(format_args!("checked {} pairs", report.stats.pairs_checked));
    }
    messages.message(format_args!("found {} symmetries", report.symmetries.len()));

    if cli.verify {
        if let Some(symmetry) = first_violation(detector.cnf(), &report.symmetries) {
            return Err(Error::Verification {
                symmetry: symmetry.to_string(),
            });
        }
        messages.message(format_args!(
            "verified {} symmetries",
            report.symmetries.len()
        ));
    }

    if messages.verbosity() >= Verbosity::Verbose {
        print_stats(parse_time, search_time, detector.cnf(), &report.stats);
    }

    Ok(())
}

/// Allocated and resident memory in MiB, if jemalloc reports them.
fn memory_usage() -> Option<(f64, f64)> {
    const MIB: f64 = 1024.0 * 1024.0;

    epoch::advance().ok()?;
    let allocated = stats::allocated::read().ok()?;
    let resident = stats::resident::read().ok()?;
    Some((allocated as f64 / MIB, resident as f64 / MIB))
}

/// Prints one statistic as a `c` comment table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("c |  {label:<28} {value:>18}  |");
}

/// Prints a statistic together with its rate per second.
pub(crate) fn stat_line_with_rate(label: &str, value: u64, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("c |  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(parse_time: Duration, search_time: Duration, cnf: &Cnf, s: &SearchStats) {
    let elapsed = search_time.as_secs_f64();

    println!("c =======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", cnf.num_vars);
    stat_line("Clauses", cnf.len());
    stat_line("Literals", cnf.num_literals);

    println!("c ========================[ Search Statistics ]========================");
    stat_line("Candidates", s.candidates);
    stat_line_with_rate("Pairs checked", s.pairs_checked, elapsed);
    stat_line_with_rate("Clause comparisons", s.clause_comparisons, elapsed);
    stat_line("Clauses sorted", s.sorted_clauses);
    stat_line("Pair limit reached", s.limit_reached);
    if let Some((allocated, resident)) = memory_usage() {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("Search time (s)", format!("{elapsed:.3}"));
    println!("c =====================================================================");
}
