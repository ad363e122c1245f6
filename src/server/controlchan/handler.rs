use crate::{
    auth::UserAccount,
    server::{
        controlchan::command::Command,
        environment::Environment,
        error::{CommandError, CommandErrorKind},
        session::Session,
    },
    storage::{Access, Entry},
};

/// Handles one FTP verb.
///
/// Implementations validate first, then change state, then reply. A validation failure is
/// returned as a [`CommandError`] before anything was changed or sent; the
/// [`Dispatcher`](crate::server::Dispatcher) turns it into the reply.
pub trait CommandHandler: Send + Sync + std::fmt::Debug {
    /// Handles `args.cmd` on behalf of `args.session`.
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError>;
}

/// Convenience struct to group command args
#[derive(Debug)]
pub struct CommandContext<'a> {
    /// The command to handle
    pub cmd: &'a Command,
    /// The session of the client that sent it
    pub session: &'a mut Session,
    /// The fake mode collaborators; `None` in stub mode
    pub environment: Option<&'a Environment>,
}

impl<'a> CommandContext<'a> {
    /// The fake mode collaborators. A handler that needs them but runs without them is
    /// misconfigured, which is fatal.
    pub fn environment(&self) -> Result<&'a Environment, CommandError> {
        self.environment
            .ok_or_else(|| CommandErrorKind::ConfigurationFault(format!("{} handler needs a fake server environment", self.cmd.name())).into())
    }
}

/// Returns parameter `index` of `cmd`, or fails with 501.
pub fn require_parameter(cmd: &Command, index: usize) -> Result<&str, CommandError> {
    cmd.parameter(index)
        .ok_or_else(|| CommandErrorKind::MissingParameter { index }.into())
}

/// Returns the value of a session attribute set by an earlier command, or fails with 503.
pub fn require_attribute<T: Clone>(value: &Option<T>, attribute: &'static str) -> Result<T, CommandError> {
    value.clone().ok_or_else(|| CommandErrorKind::BadSequence { attribute }.into())
}

/// Returns the logged in user, or fails with 530.
pub fn require_logged_in(session: &Session) -> Result<UserAccount, CommandError> {
    session.attributes.user_account.clone().ok_or_else(|| CommandErrorKind::NotLoggedIn.into())
}

/// Fails with 550 unless `user` has `access` to `entry`.
pub(crate) fn require_access(entry: &Entry, user: &UserAccount, access: Access) -> Result<(), CommandError> {
    if entry.allows(user, access) {
        Ok(())
    } else {
        Err(CommandErrorKind::PermissionDenied(entry.path().to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Permissions;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_parameter_is_501() {
        let err = require_parameter(&Command::named("CWD"), 0).unwrap_err();
        assert_eq!(err.kind(), &CommandErrorKind::MissingParameter { index: 0 });
        assert_eq!(require_parameter(&Command::new("CWD", ["/a"]), 0).unwrap(), "/a");
    }

    #[test]
    fn missing_attribute_is_503() {
        let session = Session::new();
        let err = require_attribute(&session.attributes.rename_from, "RENAME_FROM").unwrap_err();
        assert_eq!(err.reply().0.code(), 503);
    }

    #[test]
    fn missing_login_is_530() {
        let err = require_logged_in(&Session::new()).unwrap_err();
        assert_eq!(err.kind(), &CommandErrorKind::NotLoggedIn);
    }

    #[test]
    fn access_checks_use_the_entry_permissions() {
        let user = UserAccount::new("bob", "pw", "/");
        let entry = Entry::file("/f", "").with_owner("alice").with_permissions(Permissions::parse("rw-------").unwrap());
        assert!(require_access(&entry, &user, Access::Read).unwrap_err().kind() == &CommandErrorKind::PermissionDenied("/f".into()));
    }

    #[test]
    fn stub_context_has_no_environment() {
        let cmd = Command::named("PWD");
        let mut session = Session::new();
        let args = CommandContext {
            cmd: &cmd,
            session: &mut session,
            environment: None,
        };
        assert!(args.environment().unwrap_err().is_fatal());
    }
}
