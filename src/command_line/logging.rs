//! Both output channels of the binary: `c `-prefixed protocol comments on
//! stdout, and `tracing` diagnostics on stderr.

use std::fmt::Arguments;
use tracing_subscriber::EnvFilter;

/// How much the binary reports besides the symmetries themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub(crate) enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Logging,
}

impl Verbosity {
    /// `--logging` wins over `--verbose`, which wins over `--quiet`.
    pub(crate) const fn from_flags(quiet: bool, verbose: bool, logging: bool) -> Self {
        if logging {
            Self::Logging
        } else if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    /// Default `tracing` filter for this verbosity.
    pub(crate) const fn directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
            Self::Logging => "trace",
        }
    }
}

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over the
/// verbosity flags.
pub(crate) fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .try_init();
}

/// Printer for `c ` comment lines.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Messages {
    verbosity: Verbosity,
}

impl Messages {
    pub(crate) const fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    pub(crate) const fn verbosity(self) -> Verbosity {
        self.verbosity
    }

    /// Printed unless `--quiet`.
    pub(crate) fn message(self, args: Arguments<'_>) {
        if self.verbosity >= Verbosity::Normal {
            println!("c {args}");
        }
    }

    /// Printed with `--verbose` or `--logging`.
    pub(crate) fn verbose(self, args: Arguments<'_>) {
        if self.verbosity >= Verbosity::Verbose {
            println!("c {args}");
        }
    }
}
