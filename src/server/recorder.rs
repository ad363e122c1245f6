//! Records stub handler invocations so that tests can verify what a client sent.

use chrono::prelude::{DateTime, Utc};
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

/// One recorded handler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    command: String,
    params: Vec<String>,
    data: BTreeMap<String, String>,
    time: DateTime<Utc>,
}

impl Invocation {
    /// Creates an invocation record of `command` with a snapshot of its parameters.
    pub fn new(command: impl Into<String>, params: &[String]) -> Self {
        Invocation {
            command: command.into(),
            params: params.to_vec(),
            data: BTreeMap::new(),
            time: Utc::now(),
        }
    }

    /// Adds a named data element, e.g. `"pathname"`.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// The name of the command that was handled.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The parameters exactly as the client sent them.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The data element stored under `key`.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// The number of data elements.
    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    /// When the invocation happened.
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }
}

/// An append-only log of invocations made during one session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InvocationRecorder {
    log: Vec<Invocation>,
}

impl InvocationRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        InvocationRecorder::default()
    }

    /// Appends an invocation.
    pub fn record(&mut self, invocation: Invocation) {
        self.log.push(invocation);
    }

    /// All invocations in the order they were made.
    pub fn all(&self) -> &[Invocation] {
        &self.log
    }

    /// The invocations of `command`, in order.
    pub fn invocations<'a, 'c>(&'a self, command: &'c str) -> impl Iterator<Item = &'a Invocation> + use<'a, 'c> {
        self.log.iter().filter(move |i| i.command.eq_ignore_ascii_case(command))
    }

    /// The `n`th (zero based) invocation of `command`.
    pub fn invocation(&self, command: &str, n: usize) -> Option<&Invocation> {
        self.invocations(command).nth(n)
    }

    /// How many times `command` was handled.
    pub fn number_of_invocations(&self, command: &str) -> usize {
        self.invocations(command).count()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}

/// Collects the recorders of sessions that ran over the network, so that a test can inspect them
/// once the client disconnected.
#[derive(Debug, Default, Clone)]
pub struct Recordings {
    finished: Arc<Mutex<Vec<InvocationRecorder>>>,
}

impl Recordings {
    pub(crate) fn push(&self, recorder: InvocationRecorder) {
        if let Ok(mut finished) = self.finished.lock() {
            finished.push(recorder);
        }
    }

    /// The recorders of all finished sessions, in the order the sessions ended.
    pub fn sessions(&self) -> Vec<InvocationRecorder> {
        self.finished.lock().map(|f| f.clone()).unwrap_or_default()
    }

    /// The number of finished sessions.
    pub fn len(&self) -> usize {
        self.finished.lock().map(|f| f.len()).unwrap_or(0)
    }

    /// Returns true if no session finished yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn per_command_view_keeps_order() {
        let mut recorder = InvocationRecorder::new();
        recorder.record(Invocation::new("REST", &["m1".to_string()]).with_data("marker", "m1"));
        recorder.record(Invocation::new("ABOR", &[]));
        recorder.record(Invocation::new("REST", &["m2".to_string()]).with_data("marker", "m2"));

        assert_eq!(recorder.number_of_invocations("REST"), 2);
        assert_eq!(recorder.number_of_invocations("rest"), 2);
        assert_eq!(recorder.invocation("REST", 1).unwrap().data("marker"), Some("m2"));
        assert_eq!(recorder.invocation("ABOR", 0).unwrap().data_len(), 0);
        assert!(recorder.invocation("REST", 2).is_none());
        assert_eq!(recorder.all().len(), 3);
    }

    #[test]
    fn looked_up_invocations_outlive_the_command_name() {
        let mut recorder = InvocationRecorder::new();
        recorder.record(Invocation::new("PWD", &[]));
        let found = {
            let name = String::from("pwd");
            recorder.invocation(&name, 0)
        };
        assert_eq!(found.map(|i| i.data_len()), Some(0));
    }

    #[test]
    fn recordings_are_shared_between_clones() {
        let recordings = Recordings::default();
        let clone = recordings.clone();
        clone.push(InvocationRecorder::new());
        assert_eq!(recordings.len(), 1);
    }
}
