//! Contains the `ControlChanError` struct that that defines the control channel error type.

use super::line_parser::error::ParseError;

use derive_more::Display;
use thiserror::Error;

/// The error type of the control channel transport.
#[derive(Debug, Error)]
#[error("control channel error: {kind}")]
pub struct ControlChanError {
    kind: ControlChanErrorKind,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

/// A list specifying categories of control channel errors. It is meant to be used with the
/// [ControlChanError] type.
#[derive(Eq, PartialEq, Debug, Display)]
pub enum ControlChanErrorKind {
    /// We encountered a system IO error.
    #[display("Failed to perform IO")]
    IoError,
    /// Something went wrong parsing the client's command.
    #[display("Failed to parse command")]
    ParseError,
    /// The client was idle for too long.
    #[display("Encountered read timeout on the control channel")]
    ControlChannelTimeout,
}

impl ControlChanError {
    /// Creates a new control channel error with the specific kind
    pub fn new(kind: ControlChanErrorKind) -> Self {
        ControlChanError { kind, source: None }
    }

    /// Return the inner error kind of this error.
    pub fn kind(&self) -> &ControlChanErrorKind {
        &self.kind
    }
}

impl From<ControlChanErrorKind> for ControlChanError {
    fn from(kind: ControlChanErrorKind) -> ControlChanError {
        ControlChanError::new(kind)
    }
}

impl From<std::io::Error> for ControlChanError {
    fn from(err: std::io::Error) -> ControlChanError {
        ControlChanError {
            kind: ControlChanErrorKind::IoError,
            source: Some(Box::new(err)),
        }
    }
}

impl From<ParseError> for ControlChanError {
    fn from(err: ParseError) -> ControlChanError {
        ControlChanError {
            kind: ControlChanErrorKind::ParseError,
            source: Some(Box::new(err)),
        }
    }
}
