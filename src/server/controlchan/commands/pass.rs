//! The RFC 959 Password (`PASS`) command
//
// The argument field is a Telnet string specifying the user's
// password.  This command must be immediately preceded by the
// user name command, and, for some sites, completes the user's
// identification for access control.

use super::common::{log_in, require_home_directory};
use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_attribute, require_parameter},
    error::{CommandError, CommandErrorKind},
    reply::ReplyCode,
};

/// Handles `PASS`, checking the password of the user named by `USER`.
#[derive(Debug)]
pub struct Pass;

impl CommandHandler for Pass {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let password = require_parameter(args.cmd, 0)?;
        let env = args.environment()?;
        let session = args.session;
        let username = require_attribute(&session.attributes.username, "USERNAME")?;
        let account = match env.find_user_account(&username) {
            Some(account) if account.is_valid_password(password) => account.clone(),
            _ => {
                slog::warn!(session.log(), "Login failed"; "username" => &username);
                return Err(CommandErrorKind::LoginFailed.into());
            }
        };
        require_home_directory(env, &account)?;

        if account.is_account_required_for_login() && session.attributes.account_name.is_none() {
            session.attributes.pending_login = Some(account);
            session.send_reply(ReplyCode::NeedAccount, "pass.needAccount", &[])
        } else {
            log_in(session, account);
            session.send_reply(ReplyCode::UserLoggedIn, "pass.loggedIn", &[username])
        }
    }
}
