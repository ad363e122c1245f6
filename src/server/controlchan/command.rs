//! A command received on the control channel.

use std::fmt;

/// A control channel command: a verb and its parameters.
///
/// The verb is kept in upper case so that lookup in the
/// [`CommandRegistry`](crate::server::CommandRegistry) is case insensitive. A command is immutable
/// once created.
#[derive(Clone, PartialEq, Eq)]
pub struct Command {
    name: String,
    params: Vec<String>,
}

impl Command {
    /// Creates a command from a verb and its parameters.
    pub fn new<I, S>(name: &str, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Command {
            name: name.to_uppercase(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a command without parameters.
    pub fn named(name: &str) -> Self {
        Command {
            name: name.to_uppercase(),
            params: vec![],
        }
    }

    /// The verb, in upper case. Empty for an empty control line.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All parameters.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The parameter at `index`, if present.
    pub fn parameter(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }
}

// Passwords stay out of the logs.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name == "PASS" {
            return write!(f, "PASS ******");
        }
        if self.params.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.name, self.params.join(" "))
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: &[String] = if self.name == "PASS" { &[] } else { &self.params };
        f.debug_struct("Command").field("name", &self.name).field("params", &params).finish()
    }
}
