#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A strict parser for the DIMACS CNF file format.
//!
//! The accepted layout is:
//! - Optional comment lines starting with 'c'. Every comment must be
//!   terminated by a newline.
//! - A problem line `p cnf <num_variables> <num_clauses>`.
//! - Exactly `<num_clauses>` clauses, each a whitespace separated sequence of
//!   non-zero literals terminated by `0`. Line breaks carry no meaning.
//! - An optional '%' token ending the clause data (SATLIB convention);
//!   anything after it is ignored. Once all declared clauses are read, the
//!   first non-numeric token ends the data as well.
//!
//! Unlike a solver front end, the declared counts are checked: a literal
//! outside `1..=num_variables`, too many or too few clauses, and a missing
//! terminating zero are all rejected.

use crate::symmetry::clause::Clause;
use crate::symmetry::cnf::Cnf;
use crate::symmetry::error::Error;
use crate::symmetry::literal::Variable;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Name used in diagnostics when the formula comes from standard input.
pub const STDIN_NAME: &str = "<stdin>";

/// Reasons a DIMACS text is rejected.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("end-of-file in comment")]
    EofInComment,

    #[error("expected 'c' or 'p'")]
    ExpectedHeader,

    #[error("invalid header")]
    InvalidHeader,

    #[error("too many clauses")]
    TooManyClauses,

    #[error("invalid literal '{0}'")]
    InvalidLiteral(String),

    #[error("terminating zero missing")]
    MissingTerminator,

    #[error("clause missing")]
    ClauseMissing,

    #[error("read error: {0}")]
    Io(#[from] io::Error),
}

/// Counts declared by the problem line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub variables: Variable,
    pub clauses: usize,
}

/// Parses DIMACS data from any reader.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first violation found.
pub fn parse_dimacs<R: Read>(mut reader: R) -> Result<Cnf, ParseError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_str(&input)
}

/// Parses DIMACS data held in memory.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first violation found.
pub fn parse_str(input: &str) -> Result<Cnf, ParseError> {
    let (header, body) = split_header(input)?;

    let mut cnf = Cnf {
        num_vars: header.variables,
        ..Cnf::default()
    };
    cnf.clauses.reserve(header.clauses);

    let mut clause: Vec<i32> = Vec::new();
    let mut parsed = 0_usize;

    for token in body.split_whitespace() {
        if token == "%" {
            break;
        }

        let Ok(lit) = token.parse::<i32>() else {
            if parsed == header.clauses && clause.is_empty() {
                break;
            }
            return Err(ParseError::InvalidLiteral(token.to_string()));
        };

        if parsed == header.clauses {
            return Err(ParseError::TooManyClauses);
        }
        if lit == i32::MIN || lit.unsigned_abs() > header.variables {
            return Err(ParseError::InvalidLiteral(lit.to_string()));
        }

        if lit == 0 {
            cnf.add_clause(Clause::new(&clause));
            clause.clear();
            parsed += 1;
        } else {
            clause.push(lit);
        }
    }

    if !clause.is_empty() {
        return Err(ParseError::MissingTerminator);
    }
    if parsed != header.clauses {
        return Err(ParseError::ClauseMissing);
    }

    Ok(cnf)
}

/// Skips leading comments and blank lines, parses the problem line and
/// returns it with the remaining text.
fn split_header(input: &str) -> Result<(Header, &str), ParseError> {
    let mut rest = input;

    loop {
        let (line, tail) = match rest.split_once('\n') {
            Some((line, tail)) => (line, Some(tail)),
            None => (rest, None),
        };

        match line.trim_start().chars().next() {
            Some('c') if tail.is_none() => return Err(ParseError::EofInComment),
            Some('c') => {}
            Some('p') => return Ok((parse_header(line)?, tail.unwrap_or(""))),
            Some(_) => return Err(ParseError::ExpectedHeader),
            None if tail.is_none() => return Err(ParseError::ExpectedHeader),
            None => {}
        }

        rest = tail.unwrap_or("");
    }
}

fn parse_header(line: &str) -> Result<Header, ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    let ["p", "cnf", variables, clauses] = parts.as_slice() else {
        return Err(ParseError::InvalidHeader);
    };

    let variables: i32 = variables.parse().map_err(|_| ParseError::InvalidHeader)?;
    let clauses: i32 = clauses.parse().map_err(|_| ParseError::InvalidHeader)?;

    if variables < 0 || variables == i32::MAX || clauses < 0 || clauses == i32::MAX {
        return Err(ParseError::InvalidHeader);
    }

    Ok(Header {
        variables: variables.unsigned_abs(),
        clauses: clauses.unsigned_abs() as usize,
    })
}

/// Parses a DIMACS CNF file.
///
/// # Errors
///
/// [`Error::Open`] if the file cannot be opened, [`Error::Parse`] naming the
/// file if its content is rejected.
pub fn parse_file(path: &Path) -> Result<Cnf, Error> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.display().to_string(),
        source,
    })?;

    parse_dimacs(BufReader::new(file)).map_err(|source| Error::Parse {
        file: path.display().to_string(),
        source,
    })
}

/// Parses the named file, or standard input when no path is given.
///
/// # Errors
///
/// See [`parse_file`]; parse errors on standard input name it `<stdin>`.
pub fn parse_input(path: Option<&Path>) -> Result<Cnf, Error> {
    match path {
        Some(path) => parse_file(path),
        None => parse_dimacs(io::stdin().lock()).map_err(|source| Error::Parse {
            file: STDIN_NAME.to_string(),
            source,
        }),
    }
}
