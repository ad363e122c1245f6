//! This modules implements a line parser for FTP control channel commands
//!
//! Use the parse method. It takes a FTP line and returns a [`Command`](super::command::Command).
//!
/// The error type returned by [`parse`].
pub mod error;
mod parser;
#[cfg(test)]
mod tests;

pub use parser::parse;
