//! The RFC 959 User Name (`USER`) command
//
// The argument field is a Telnet string identifying the user.
// The user identification is that which is required by the
// server for access to its file system.  This command will
// normally be the first command transmitted by the user after
// the control connections are made.

use super::common::{log_in, require_home_directory};
use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_parameter},
    error::CommandError,
    reply::ReplyCode,
};

/// Handles `USER`. A new `USER` forgets any earlier login.
#[derive(Debug)]
pub struct User;

impl CommandHandler for User {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let username = require_parameter(args.cmd, 0)?;
        let env = args.environment()?;
        // Accounts without a password are logged in right away.
        let account = match env.find_user_account(username) {
            Some(account) if !account.is_password_required_for_login() => {
                require_home_directory(env, account)?;
                Some(account.clone())
            }
            _ => None,
        };

        let session = args.session;
        session.attributes.clear_login();
        session.attributes.username = Some(username.to_string());
        match account {
            Some(account) if account.is_account_required_for_login() => {
                session.attributes.pending_login = Some(account);
                session.send_reply(ReplyCode::NeedAccount, "pass.needAccount", &[])
            }
            Some(account) => {
                log_in(session, account);
                session.send_reply(ReplyCode::UserLoggedIn, "user.loggedIn", &[username.to_string()])
            }
            None => session.send_reply(ReplyCode::NeedPassword, "user.needPassword", &[]),
        }
    }
}
