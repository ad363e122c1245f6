//! The collaborators fake mode handlers work against.

use super::{
    error::{CommandError, CommandErrorKind},
    ftpserver::options,
};
use crate::{
    auth::UserAccount,
    storage::{FileSystem, SharedFileSystem},
};
use std::{collections::HashMap, net::SocketAddr, sync::MutexGuard};

/// Holds the simulated filesystem, the user accounts and the fixed answers of a fake server.
///
/// The filesystem is shared by all sessions. Keep a handle from [`Environment::filesystem`] to
/// seed entries or to inspect the outcome of a scenario.
#[derive(Debug, Clone)]
pub struct Environment {
    filesystem: SharedFileSystem,
    user_accounts: HashMap<String, UserAccount>,
    system_name: String,
    help_text: HashMap<String, String>,
    passive_address: SocketAddr,
}

impl Environment {
    /// Creates an environment around `filesystem`, without user accounts.
    pub fn new(filesystem: FileSystem) -> Self {
        Environment::with_shared(filesystem.shared())
    }

    /// Creates an environment around a filesystem that is already shared.
    pub fn with_shared(filesystem: SharedFileSystem) -> Self {
        Environment {
            filesystem,
            user_accounts: HashMap::new(),
            system_name: options::DEFAULT_SYSTEM_NAME.to_string(),
            help_text: HashMap::new(),
            passive_address: options::DEFAULT_PASSIVE_ADDRESS,
        }
    }

    /// Adds an account that can log in.
    pub fn user_account(mut self, account: UserAccount) -> Self {
        self.user_accounts.insert(account.username().to_string(), account);
        self
    }

    /// Sets the answer to `SYST`.
    pub fn system_name(mut self, name: impl Into<String>) -> Self {
        self.system_name = name.into();
        self
    }

    /// Sets the answer to `HELP topic`. The empty topic is the answer to a bare `HELP`.
    pub fn help_text(mut self, topic: &str, text: impl Into<String>) -> Self {
        self.help_text.insert(topic.to_uppercase(), text.into());
        self
    }

    /// Sets the address that `PASV` and `EPSV` announce.
    pub fn passive_address(mut self, address: SocketAddr) -> Self {
        self.passive_address = address;
        self
    }

    /// A handle to the shared filesystem.
    pub fn filesystem(&self) -> SharedFileSystem {
        self.filesystem.clone()
    }

    /// Locks the filesystem. Handlers hold the guard for the whole command so that the commands of
    /// concurrent sessions never interleave.
    pub fn lock_filesystem(&self) -> Result<MutexGuard<'_, FileSystem>, CommandError> {
        self.filesystem
            .lock()
            .map_err(|_| CommandErrorKind::InternalError("filesystem lock poisoned".to_string()).into())
    }

    /// Looks up the account of `username`.
    pub fn find_user_account(&self, username: &str) -> Option<&UserAccount> {
        self.user_accounts.get(username)
    }

    /// The answer to `SYST`.
    pub fn get_system_name(&self) -> &str {
        &self.system_name
    }

    /// The help text for `topic`, case insensitive.
    pub fn get_help_text(&self, topic: &str) -> Option<&str> {
        self.help_text.get(&topic.to_uppercase()).map(String::as_str)
    }

    /// The address `PASV` and `EPSV` announce.
    pub fn get_passive_address(&self) -> SocketAddr {
        self.passive_address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn help_topics_are_case_insensitive() {
        let env = Environment::new(FileSystem::new()).help_text("stor", "Stores a file");
        assert_eq!(env.get_help_text("STOR"), Some("Stores a file"));
        assert_eq!(env.get_help_text("RETR"), None);
    }

    #[test]
    fn filesystem_handle_is_shared() {
        let env = Environment::new(FileSystem::new());
        let handle = env.filesystem();
        handle.lock().unwrap().add(crate::storage::Entry::directory("/data")).unwrap();
        assert!(env.lock_filesystem().unwrap().is_directory("/data"));
    }
}
