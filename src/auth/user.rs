use std::fmt::{self, Display, Formatter};

/// A user that may log in to a fake-mode server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    username: String,
    password: Option<String>,
    home_directory: String,
    groups: Vec<String>,
    password_required_for_login: bool,
    account_required_for_login: bool,
}

impl UserAccount {
    /// Creates an account that needs the given password to log in.
    pub fn new(username: impl Into<String>, password: impl Into<String>, home_directory: impl Into<String>) -> Self {
        UserAccount {
            username: username.into(),
            password: Some(password.into()),
            home_directory: home_directory.into(),
            groups: vec![],
            password_required_for_login: true,
            account_required_for_login: false,
        }
    }

    /// Creates an account that is logged in by the `USER` command alone, the way anonymous FTP
    /// accounts usually behave.
    pub fn anonymous(username: impl Into<String>, home_directory: impl Into<String>) -> Self {
        UserAccount {
            username: username.into(),
            password: None,
            home_directory: home_directory.into(),
            groups: vec![],
            password_required_for_login: false,
            account_required_for_login: false,
        }
    }

    /// Adds the user to a group.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// When set, a successful `PASS` is answered with 332 and login completes only after `ACCT`.
    pub fn account_required_for_login(mut self, required: bool) -> Self {
        self.account_required_for_login = required;
        self
    }

    /// The login name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The absolute path of the directory a session starts in after login.
    pub fn home_directory(&self) -> &str {
        &self.home_directory
    }

    /// The groups this user belongs to.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Returns true if `group` is one of this user's groups.
    pub fn is_member_of(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    /// The group assigned to entries this user creates.
    pub fn primary_group(&self) -> &str {
        self.groups.first().map(String::as_str).unwrap_or("")
    }

    /// Whether `PASS` must follow `USER` for this account.
    pub fn is_password_required_for_login(&self) -> bool {
        self.password_required_for_login
    }

    /// Whether `ACCT` must follow `PASS` for this account.
    pub fn is_account_required_for_login(&self) -> bool {
        self.account_required_for_login
    }

    /// Checks a password presented by the client. Accounts without a password accept anything.
    pub fn is_valid_password(&self, password: &str) -> bool {
        match &self.password {
            Some(expected) => expected == password,
            None => true,
        }
    }
}

impl Display for UserAccount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}
