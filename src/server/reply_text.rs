//! The text catalog that turns reply message keys into human readable text.
//!
//! Handlers never hard-code reply text. They name a message key (either a reply code such as
//! `"350"` or a command specific key such as `"acct"`) and the substitution arguments, and the
//! [`ReplyText`] installed on the session resolves them. Templates use positional placeholders:
//! `{0}`, `{1}` and so on.

use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Debug, sync::Arc};

/// Resolves message keys to reply text.
pub trait ReplyText: Send + Sync + Debug {
    /// Returns the text for `key` with `args` substituted, or `None` if the key is unknown.
    fn resolve(&self, key: &str, args: &[String]) -> Option<String>;
}

lazy_static! {
    static ref DEFAULT_TEXTS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("110", "Restart marker reply.");
        m.insert("120", "Service ready in a few minutes.");
        m.insert("125", "Data connection already open; transfer starting.");
        m.insert("150", "File status okay; about to open data connection.");
        m.insert("200", "Command okay.");
        m.insert("202", "Command not implemented, superfluous at this site.");
        m.insert("211", "System status.");
        m.insert("212", "Directory status.");
        m.insert("213", "End of status.");
        m.insert("214", "Help message.");
        m.insert("215", "UNIX system type.");
        m.insert("220", "Service ready for new user.");
        m.insert("221", "Service closing control connection.");
        m.insert("225", "Data connection open; no transfer in progress.");
        m.insert("226", "Closing data connection. Requested file action successful.");
        m.insert("227", "Entering Passive Mode.");
        m.insert("229", "Entering Extended Passive Mode.");
        m.insert("230", "User logged in, proceed.");
        m.insert("250", "Requested file action okay, completed.");
        m.insert("257", "Pathname created.");
        m.insert("331", "User name okay, need password.");
        m.insert("332", "Need account for login.");
        m.insert("350", "Requested file action pending further information.");
        m.insert("421", "Service not available, closing control connection.");
        m.insert("425", "Can't open data connection.");
        m.insert("426", "Connection closed; transfer aborted.");
        m.insert("450", "Requested file action not taken.");
        m.insert("451", "Requested action aborted: local error in processing.");
        m.insert("452", "Requested action not taken. Insufficient storage space in system.");
        m.insert("500", "Syntax error, command unrecognized.");
        m.insert("501", "Syntax error in parameters or arguments.");
        m.insert("502", "Command not implemented.");
        m.insert("503", "Bad sequence of commands.");
        m.insert("504", "Command not implemented for that parameter.");
        m.insert("530", "Not logged in.");
        m.insert("532", "Need account for storing files.");
        m.insert("550", "Requested action not taken. File unavailable.");
        m.insert("551", "Requested action aborted: page type unknown.");
        m.insert("552", "Requested file action aborted. Exceeded storage allocation.");
        m.insert("553", "Requested action not taken. File name not allowed.");

        m.insert("command.notImplemented", "Command not implemented: {0}.");
        m.insert("parameter.invalidNumber", "Invalid number of parameters.");
        m.insert("parameter.invalidSyntax", "Syntax error in parameter: {0}.");
        m.insert("parameter.notImplemented", "Command not implemented for parameter {0}.");
        m.insert("sequence.bad", "Bad sequence of commands: {0} not set.");
        m.insert("login.required", "Not logged in.");
        m.insert("login.failed", "Login incorrect.");
        m.insert("login.homeDirectoryNotValid", "Home directory {0} is not valid.");
        m.insert("filesystem.doesNotExist", "{0} does not exist.");
        m.insert("filesystem.permissionDenied", "Permission denied: {0}.");
        m.insert("filesystem.fileNameNotAllowed", "File name not allowed: {0}.");
        m.insert("filesystem.alreadyExists", "{0} already exists.");
        m.insert("filesystem.isNotADirectory", "{0} is not a directory.");
        m.insert("filesystem.isNotAFile", "{0} is not a file.");
        m.insert("filesystem.directoryIsNotEmpty", "Directory {0} is not empty.");
        m.insert("internal.error", "Local error in processing.");

        m.insert("user.needPassword", "User name okay, need password.");
        m.insert("user.loggedIn", "User {0} logged in, proceed.");
        m.insert("pass.loggedIn", "User {0} logged in, proceed.");
        m.insert("pass.needAccount", "Need account for login.");
        m.insert("acct", "Account accepted for user {0}.");
        m.insert("cwd", "Directory changed to {0}.");
        m.insert("cdup", "Directory changed to {0}.");
        m.insert("pwd", "\"{0}\" is current directory.");
        m.insert("mkd", "\"{0}\" created.");
        m.insert("rmd", "\"{0}\" removed.");
        m.insert("dele", "\"{0}\" deleted.");
        m.insert("rnfr", "Requested file action pending further information.");
        m.insert("rnto", "Rename from {0} to {1} completed.");
        m.insert("transfer.started", "File status okay; about to open data connection.");
        m.insert("stor", "Created file {0}.");
        m.insert("stou", "Created file {0}.");
        m.insert("appe", "Appended to file {0}.");
        m.insert("retr", "Transferred file {0}.");
        m.insert("list", "Transferred directory listing for {0}.");
        m.insert("nlst", "Transferred name list for {0}.");
        m.insert("rest", "Restarting at {0}. Send STORE or RETRIEVE.");
        m.insert("abor", "Abort successful.");
        m.insert("allo", "Allocation not needed.");
        m.insert("noop", "NOOP okay.");
        m.insert("syst", "{0}");
        m.insert("type", "Type set to {0}.");
        m.insert("mode", "Mode set to {0}.");
        m.insert("stru", "Structure set to {0}.");
        m.insert("pasv", "Entering Passive Mode ({0}).");
        m.insert("epsv", "Entering Extended Passive Mode (|||{0}|).");
        m.insert("port", "PORT command successful.");
        m.insert("eprt", "EPRT command successful.");
        m.insert("stat", "Connected as {0}.");
        m.insert("stat.path", "Status of {0}:");
        m.insert("help", "{0}");
        m.insert("help.noHelpTextDefined", "No help text defined for {0}.");
        m.insert("site", "SITE command okay.");
        m.insert("smnt", "Structure mounted.");
        m.insert("rein", "Service ready for new user.");
        m.insert("quit", "Goodbye.");
        m
    };
}

/// Substitutes `{0}`, `{1}`, ... in `template` with the matching entry of `args`.
///
/// Placeholders without a matching argument are left as they are.
/// Arguments are inserted verbatim, so placeholders inside an argument stay untouched.
pub fn format_template(template: &str, args: &[String]) -> String {
    let mut text = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let arg = after
            .find('}')
            .and_then(|close| after[..close].parse::<usize>().ok().map(|index| (index, close)))
            .and_then(|(index, close)| args.get(index).map(|arg| (arg, close)));
        match arg {
            Some((arg, close)) => {
                text.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                text.push('{');
                rest = after;
            }
        }
    }
    text.push_str(rest);
    text
}

/// The built-in English reply texts.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultReplyText;

impl ReplyText for DefaultReplyText {
    fn resolve(&self, key: &str, args: &[String]) -> Option<String> {
        DEFAULT_TEXTS.get(key).map(|template| format_template(template, args))
    }
}

/// A catalog of custom texts, e.g. a translation, that falls back to another catalog for keys it
/// does not define.
#[derive(Debug, Clone)]
pub struct MapReplyText {
    texts: HashMap<String, String>,
    fallback: Option<Arc<dyn ReplyText>>,
}

impl Default for MapReplyText {
    fn default() -> Self {
        MapReplyText {
            texts: HashMap::new(),
            fallback: Some(Arc::new(DefaultReplyText)),
        }
    }
}

impl MapReplyText {
    /// Creates a catalog without any texts and without fallback.
    pub fn empty() -> Self {
        MapReplyText {
            texts: HashMap::new(),
            fallback: None,
        }
    }

    /// Defines or replaces the template for `key`.
    pub fn text(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.texts.insert(key.into(), template.into());
        self
    }

    /// Sets the catalog consulted for unknown keys.
    pub fn fallback(mut self, fallback: Arc<dyn ReplyText>) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl ReplyText for MapReplyText {
    fn resolve(&self, key: &str, args: &[String]) -> Option<String> {
        match self.texts.get(key) {
            Some(template) => Some(format_template(template, args)),
            None => self.fallback.as_ref().and_then(|f| f.resolve(key, args)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_text_for_every_code_key() {
        assert_eq!(DefaultReplyText.resolve("350", &[]).unwrap(), "Requested file action pending further information.");
        assert_eq!(DefaultReplyText.resolve("nope", &[]), None);
    }

    #[test]
    fn substitutes_arguments() {
        let text = DefaultReplyText.resolve("rnto", &["/a".to_string(), "/b".to_string()]).unwrap();
        assert_eq!(text, "Rename from /a to /b completed.");
        assert_eq!(format_template("{0} and {1}", &["x".to_string()]), "x and {1}");
    }

    #[test]
    fn placeholders_inside_arguments_are_not_expanded() {
        let text = DefaultReplyText.resolve("rnto", &["/home/alice/a{1}".to_string(), "/home/alice/b".to_string()]).unwrap();
        assert_eq!(text, "Rename from /home/alice/a{1} to /home/alice/b completed.");
        assert_eq!(format_template("{0}{1}", &["{1}".to_string(), "{0}".to_string()]), "{1}{0}");
        assert_eq!(format_template("{x} {0", &["a".to_string()]), "{x} {0");
    }

    #[test]
    fn map_overrides_and_falls_back() {
        let catalog = MapReplyText::default().text("acct", "Konto ok voor {0}");
        assert_eq!(catalog.resolve("acct", &["alice".to_string()]).unwrap(), "Konto ok voor alice");
        assert_eq!(catalog.resolve("221", &[]).unwrap(), "Service closing control connection.");
        assert_eq!(MapReplyText::empty().resolve("221", &[]), None);
    }
}
