//! # satsym
//!
//! `satsym` reads a CNF formula in DIMACS format and reports simple syntactic
//! symmetries of it:
//!
//! -   **single mode** (default): variables `v` for which exchanging `v` and
//!     `-v` in every clause yields the same formula, printed as `-v v 0`.
//! -   **pair mode** (`--mode pair`): pairs `v1`, `v2` whose exchange yields
//!     the same formula, printed as `-v1 v2 0`. With `--groups`, confirmed
//!     pairs are chained and printed as `found symmetry group: v1 v2 ... `.
//!
//! The heuristic switches (`--sorting`, `--sortclauses`, `--sortliterals`,
//! `--clauseswapping`) only change how much work the search does.
//!
//! ```sh
//! satsym formula.cnf
//! satsym --mode pair --sorting --groups formula.cnf
//! cat formula.cnf | satsym --quiet
//! ```
//!
//! Informational lines are DIMACS comments (`c ...`) on stdout; diagnostics
//! go to stderr. The exit status is 1 on invalid arguments, unreadable input
//! or parse errors.

use crate::command_line::cli::{Cli, print_completions, run};
use crate::command_line::logging::init_tracing;
use clap::Parser;
use sat_symmetry::symmetry::error::Error;
use std::error::Error as _;
use std::process::ExitCode;

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// statistics.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Some(shell) = cli.completions {
        print_completions(shell);
        return ExitCode::SUCCESS;
    }

    init_tracing(cli.verbosity());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn report(e: &Error) {
    match e {
        Error::Parse { .. } => eprintln!("satsym: {e}"),
        _ => match e.source() {
            Some(source) => eprintln!("satsym: error: {e}: {source}"),
            None => eprintln!("satsym: error: {e}"),
        },
    }
}
