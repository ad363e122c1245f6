use super::error::{ParseErrorKind, Result};
use crate::server::controlchan::command::Command;

use std::str;

// Verbs whose argument is a pathname or free text. Everything after the first space is their
// single parameter, embedded spaces included.
const TEXT_ARGUMENT_VERBS: &[&str] = &[
    "USER", "PASS", "ACCT", "CWD", "XCWD", "SMNT", "RETR", "STOR", "STOU", "APPE", "RNFR", "RNTO", "DELE", "RMD", "XRMD", "MKD", "XMKD", "LIST",
    "NLST", "SITE", "STAT", "HELP",
];

/// Parse the given bytes into a [`Command`].
///
/// The verb is upper cased. Only one space after the verb is skipped, so that a text argument may
/// start with a space. `PORT` arguments are split on `,`, other arguments on spaces.
pub fn parse<T>(line: T) -> Result<Command>
where
    T: AsRef<[u8]>,
{
    let text = str::from_utf8(line.as_ref())?;
    let text = strip_eol(text)?;

    let (verb, params) = match text.split_once(' ') {
        Some((verb, params)) => (verb, Some(params)),
        None => (text.as_str(), None),
    };
    if verb.chars().any(char::is_control) {
        return Err(ParseErrorKind::InvalidCommand.into());
    }
    let name = verb.to_uppercase();

    let params: Vec<&str> = match params {
        None | Some("") => vec![],
        Some(params) if TEXT_ARGUMENT_VERBS.contains(&name.as_str()) => vec![params],
        Some(params) if name == "PORT" => params.trim().split(',').map(str::trim).collect(),
        Some(params) => params.split(' ').filter(|p| !p.is_empty()).collect(),
    };

    Ok(Command::new(&name, params))
}

/// Cuts the line at the first `\n`, dropping an optional `\r` before it. A `\r` anywhere else is
/// an error, as is a missing `\n`. NUL characters, which some clients send after a `\r`, are
/// removed.
fn strip_eol(text: &str) -> Result<String> {
    let Some(eol) = text.find('\n') else {
        return Err(ParseErrorKind::InvalidEol.into());
    };
    let mut line: String = text[..eol].chars().filter(|c| *c != '\0').collect();
    if line.ends_with('\r') {
        line.pop();
    }
    if line.contains('\r') {
        return Err(ParseErrorKind::InvalidEol.into());
    }
    Ok(line)
}
