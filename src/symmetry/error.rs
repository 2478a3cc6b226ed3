//! Errors surfaced to the command line.
//!
//! The symmetry search itself is total over a parsed formula; everything that
//! can fail happens while getting the formula in, or when `--verify` rejects a
//! reported symmetry.

use crate::symmetry::dimacs::ParseError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not open and read '{path}'")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("parse error in '{file}': {source}")]
    Parse {
        file: String,
        #[source]
        source: ParseError,
    },

    #[error("reported symmetry '{symmetry}' failed verification")]
    Verification { symmetry: String },
}

pub type Result<T> = std::result::Result<T, Error>;
