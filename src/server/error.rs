//! Contains the error types of command handling.

use super::reply::ReplyCode;
use crate::{BoxError, storage};
use derive_more::Display;
use thiserror::Error;

/// The error a [`CommandHandler`](super::CommandHandler) returns.
///
/// Most kinds are caused by the client and are answered with a reply by the
/// [`Dispatcher`](super::Dispatcher); the session stays usable. The fatal kinds indicate a setup
/// defect of the server and are propagated instead.
#[derive(Debug, Error)]
#[error("command error: {kind}")]
pub struct CommandError {
    kind: CommandErrorKind,
    #[source]
    source: Option<BoxError>,
}

/// A list specifying categories of command errors. It is meant to be used with the
/// [`CommandError`] type.
#[derive(Clone, Eq, PartialEq, Debug, Display)]
pub enum CommandErrorKind {
    /// 501 A required parameter is missing.
    #[display("Missing parameter at index {index}")]
    MissingParameter {
        /// The zero based position of the parameter
        index: usize,
    },
    /// 501 A parameter is malformed.
    #[display("Invalid parameter: {_0}")]
    InvalidParameter(String),
    /// 504 The parameter is understood but not supported.
    #[display("Parameter not implemented: {_0}")]
    ParameterNotImplemented(String),
    /// 502 No handler is registered for the command.
    #[display("Command not implemented: {_0}")]
    CommandNotImplemented(String),
    /// 503 A session attribute set by an earlier command is missing.
    #[display("Bad sequence of commands: {attribute} not set")]
    BadSequence {
        /// The name of the missing attribute
        attribute: &'static str,
    },
    /// 530 The command requires a logged in user.
    #[display("Not logged in")]
    NotLoggedIn,
    /// 530 Unknown user or wrong password.
    #[display("Login failed")]
    LoginFailed,
    /// 530 The user's home directory does not exist in the filesystem.
    #[display("Invalid home directory {_0}")]
    InvalidHomeDirectory(String),
    /// 550 The path does not exist.
    #[display("Not found: {_0}")]
    NotFound(String),
    /// 550 The user lacks the permission.
    #[display("Permission denied: {_0}")]
    PermissionDenied(String),
    /// 553 The name can not be used.
    #[display("File name not allowed: {_0}")]
    FileNameNotAllowed(String),
    /// 550 The path is taken.
    #[display("Already exists: {_0}")]
    AlreadyExists(String),
    /// 550 A directory was expected.
    #[display("Not a directory: {_0}")]
    NotADirectory(String),
    /// 550 A file was expected.
    #[display("Not a file: {_0}")]
    NotAFile(String),
    /// 550 The directory has children.
    #[display("Directory not empty: {_0}")]
    DirectoryNotEmpty(String),
    /// 425 No `PASV`, `EPSV`, `PORT` or `EPRT` preceded the transfer.
    #[display("No data connection")]
    NoDataConnection,
    /// Fatal: a collaborator the handler needs is missing, e.g. the reply text catalog.
    #[display("Configuration fault: {_0}")]
    ConfigurationFault(String),
    /// Fatal: shared state can not be used any more, e.g. a poisoned lock.
    #[display("Internal error: {_0}")]
    InternalError(String),
}

impl CommandError {
    /// Creates a new error with the given kind and cause.
    pub fn new<E>(kind: CommandErrorKind, error: E) -> CommandError
    where
        E: Into<BoxError>,
    {
        CommandError {
            kind,
            source: Some(error.into()),
        }
    }

    /// Return the inner error kind of this error.
    pub fn kind(&self) -> &CommandErrorKind {
        &self.kind
    }

    /// Returns true for errors that must not be answered with a reply but end the session.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, CommandErrorKind::ConfigurationFault(_) | CommandErrorKind::InternalError(_))
    }

    /// The reply code, text key and text arguments that answer this error. Fatal errors map to
    /// 421.
    pub fn reply(&self) -> (ReplyCode, &'static str, Vec<String>) {
        use CommandErrorKind::*;
        match &self.kind {
            MissingParameter { .. } => (ReplyCode::ParameterSyntaxError, "parameter.invalidNumber", vec![]),
            InvalidParameter(p) => (ReplyCode::ParameterSyntaxError, "parameter.invalidSyntax", vec![p.clone()]),
            ParameterNotImplemented(p) => (ReplyCode::CommandNotImplementedForParameter, "parameter.notImplemented", vec![p.clone()]),
            CommandNotImplemented(c) => (ReplyCode::CommandNotImplemented, "command.notImplemented", vec![c.clone()]),
            BadSequence { attribute } => (ReplyCode::BadCommandSequence, "sequence.bad", vec![attribute.to_string()]),
            NotLoggedIn => (ReplyCode::NotLoggedIn, "login.required", vec![]),
            LoginFailed => (ReplyCode::NotLoggedIn, "login.failed", vec![]),
            InvalidHomeDirectory(p) => (ReplyCode::NotLoggedIn, "login.homeDirectoryNotValid", vec![p.clone()]),
            NotFound(p) => (ReplyCode::FileError, "filesystem.doesNotExist", vec![p.clone()]),
            PermissionDenied(p) => (ReplyCode::FileError, "filesystem.permissionDenied", vec![p.clone()]),
            FileNameNotAllowed(p) => (ReplyCode::BadFileName, "filesystem.fileNameNotAllowed", vec![p.clone()]),
            AlreadyExists(p) => (ReplyCode::FileError, "filesystem.alreadyExists", vec![p.clone()]),
            NotADirectory(p) => (ReplyCode::FileError, "filesystem.isNotADirectory", vec![p.clone()]),
            NotAFile(p) => (ReplyCode::FileError, "filesystem.isNotAFile", vec![p.clone()]),
            DirectoryNotEmpty(p) => (ReplyCode::FileError, "filesystem.directoryIsNotEmpty", vec![p.clone()]),
            NoDataConnection => (ReplyCode::CantOpenDataConnection, "425", vec![]),
            ConfigurationFault(_) | InternalError(_) => (ReplyCode::ServiceNotAvailable, "421", vec![]),
        }
    }
}

impl From<CommandErrorKind> for CommandError {
    fn from(kind: CommandErrorKind) -> CommandError {
        CommandError { kind, source: None }
    }
}

impl From<storage::Error> for CommandError {
    fn from(err: storage::Error) -> CommandError {
        let path = err.path().to_string();
        let kind = match err.kind() {
            storage::ErrorKind::NotFound => CommandErrorKind::NotFound(path),
            storage::ErrorKind::AlreadyExists => CommandErrorKind::AlreadyExists(path),
            storage::ErrorKind::NotADirectory => CommandErrorKind::NotADirectory(path),
            storage::ErrorKind::NotAFile => CommandErrorKind::NotAFile(path),
            storage::ErrorKind::DirectoryNotEmpty => CommandErrorKind::DirectoryNotEmpty(path),
            storage::ErrorKind::FileNameNotAllowed => CommandErrorKind::FileNameNotAllowed(path),
        };
        CommandError::new(kind, err)
    }
}

/// A fatal error that [`Dispatcher::dispatch`](super::Dispatcher::dispatch) could not turn into a
/// reply. The connection should be closed.
#[derive(Debug, Error)]
#[error("dispatch of {command} failed")]
pub struct DispatchError {
    command: String,
    #[source]
    source: CommandError,
}

impl DispatchError {
    pub(crate) fn new(command: impl Into<String>, source: CommandError) -> Self {
        DispatchError {
            command: command.into(),
            source,
        }
    }

    /// The command being dispatched.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The underlying fatal error kind.
    pub fn kind(&self) -> &CommandErrorKind {
        self.source.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn client_errors_map_to_reply_codes() {
        let cases = [
            (CommandErrorKind::MissingParameter { index: 0 }, 501),
            (CommandErrorKind::BadSequence { attribute: "USERNAME" }, 503),
            (CommandErrorKind::NotFound("/x".into()), 550),
            (CommandErrorKind::PermissionDenied("/x".into()), 550),
            (CommandErrorKind::FileNameNotAllowed("/x".into()), 553),
            (CommandErrorKind::NotLoggedIn, 530),
            (CommandErrorKind::NoDataConnection, 425),
            (CommandErrorKind::ParameterNotImplemented("X".into()), 504),
        ];
        for (kind, code) in cases {
            let err = CommandError::from(kind);
            assert!(!err.is_fatal());
            assert_eq!(err.reply().0.code(), code);
        }
    }

    #[test]
    fn storage_errors_keep_their_path() {
        let err = CommandError::from(storage::Error::new(storage::ErrorKind::NotFound, "/gone"));
        assert_eq!(err.kind(), &CommandErrorKind::NotFound("/gone".into()));
    }

    #[test]
    fn configuration_faults_are_fatal() {
        assert!(CommandError::from(CommandErrorKind::ConfigurationFault("no catalog".into())).is_fatal());
    }
}
