#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod candidates;
pub mod check;
pub mod clause;
pub mod cnf;
pub mod config;
pub mod detector;
pub mod dimacs;
pub mod error;
pub mod literal;
pub mod matcher;
pub mod occurrence;
pub mod ordering;
pub mod substitution;
pub mod verifier;
