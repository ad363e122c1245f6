//! Contains code shared by the fake mode command handlers.

use crate::{
    auth::UserAccount,
    server::{
        controlchan::{command::Command, handler::require_access},
        environment::Environment,
        error::{CommandError, CommandErrorKind},
        session::{DataConnection, Session},
    },
    storage::{Access, Entry, FileSystem, path},
};

/// Looks up `path`, failing with 550 when it does not exist.
pub(super) fn resolve<'f>(fs: &'f FileSystem, path: &str) -> Result<&'f Entry, CommandError> {
    fs.resolve(path).ok_or_else(|| CommandErrorKind::NotFound(path.to_string()).into())
}

/// Looks up the directory at `path`.
pub(super) fn resolve_directory<'f>(fs: &'f FileSystem, path: &str) -> Result<&'f Entry, CommandError> {
    let entry = resolve(fs, path)?;
    if !entry.is_directory() {
        return Err(CommandErrorKind::NotADirectory(path.to_string()).into());
    }
    Ok(entry)
}

/// Looks up the file at `path`.
pub(super) fn resolve_file<'f>(fs: &'f FileSystem, path: &str) -> Result<&'f Entry, CommandError> {
    let entry = resolve(fs, path)?;
    if !entry.is_file() {
        return Err(CommandErrorKind::NotAFile(path.to_string()).into());
    }
    Ok(entry)
}

/// Checks that a new entry may be created at `path`: its parent must be an existing directory
/// (553 otherwise) that `user` can write to (550 otherwise).
pub(super) fn require_writable_parent(fs: &FileSystem, path: &str, user: &UserAccount) -> Result<(), CommandError> {
    let parent = path::parent(path)
        .filter(|p| fs.is_directory(p))
        .ok_or_else(|| CommandError::from(CommandErrorKind::FileNameNotAllowed(path.to_string())))?;
    require_access(resolve(fs, &parent)?, user, Access::Write)
}

/// Checks that an upload may write to `path`: an existing file must be writable, otherwise its
/// parent directory must be.
pub(super) fn require_upload_target(fs: &FileSystem, path: &str, user: &UserAccount) -> Result<(), CommandError> {
    match fs.resolve(path) {
        Some(entry) if entry.is_directory() => Err(CommandErrorKind::NotAFile(path.to_string()).into()),
        Some(entry) => require_access(entry, user, Access::Write),
        None => require_writable_parent(fs, path, user),
    }
}

/// Creates the entries of files and directories that `user` makes.
pub(super) fn owned_by(user: &UserAccount) -> impl FnOnce(&str) -> Entry + '_ {
    move |path| Entry::file(path, "").with_owner(user.username()).with_group(user.primary_group())
}

/// Fails with 425 unless `PASV`, `EPSV`, `PORT` or `EPRT` set up a data connection.
pub(super) fn require_data_connection(session: &Session) -> Result<DataConnection, CommandError> {
    session.attributes.data_connection.ok_or_else(|| CommandErrorKind::NoDataConnection.into())
}

/// Consumes the data connection and the restart marker once a transfer is done.
pub(super) fn finish_transfer(session: &mut Session) {
    session.attributes.data_connection = None;
    session.attributes.restart_marker = None;
}

/// The path a `LIST`, `NLST` or `STAT` argument names, ignoring leading `ls` style options such
/// as `-la`. Without a path the current directory is meant.
pub(super) fn listing_path(cmd: &Command, session: &Session) -> Option<String> {
    let path = strip_listing_options(cmd.parameter(0)?);
    if path.is_empty() { None } else { Some(session.resolve_path(path)) }
}

/// Drops the option words at the start of `arg`; what follows is kept as it is.
pub(super) fn strip_listing_options(arg: &str) -> &str {
    let mut rest = arg.trim_start_matches(' ');
    while rest.starts_with('-') {
        rest = match rest.find(' ') {
            Some(end) => rest[end..].trim_start_matches(' '),
            None => "",
        };
    }
    rest
}

/// The current directory, or the root for a session that has none.
pub(super) fn current_directory(session: &Session) -> String {
    session.attributes.current_directory.clone().unwrap_or_else(|| path::ROOT.to_string())
}

/// Fails with 530 unless the home directory of `account` exists.
pub(super) fn require_home_directory(env: &Environment, account: &UserAccount) -> Result<(), CommandError> {
    let fs = env.lock_filesystem()?;
    if fs.is_directory(account.home_directory()) {
        Ok(())
    } else {
        Err(CommandErrorKind::InvalidHomeDirectory(account.home_directory().to_string()).into())
    }
}

/// Completes the login of `account`: the session starts in its home directory.
pub(super) fn log_in(session: &mut Session, account: UserAccount) {
    slog::info!(session.log(), "User logged in"; "username" => account.username());
    session.attributes.current_directory = Some(path::normalize(account.home_directory()));
    session.attributes.user_account = Some(account);
    session.attributes.pending_login = None;
}
