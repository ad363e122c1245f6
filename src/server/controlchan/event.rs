use super::{command::Command, line_parser::error::ParseError};

/// Event represents a control channel `Event` that will be handled by our per-client control
/// channel event loop. A line that can not be parsed is an event too, so that the loop can
/// answer it without ending the connection.
#[derive(Debug, PartialEq, Eq)]
pub enum Event {
    /// A command from a client (e.g. `USER` or `PASV`)
    Command(Command),
    /// A line that could not be parsed
    ParseFailure(ParseError),
}
