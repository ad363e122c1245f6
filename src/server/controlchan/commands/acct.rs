//! The RFC 959 Account (`ACCT`) command
//
// The argument field is a Telnet string identifying the user's
// account.  The command is not necessarily related to the USER
// command, as some sites may require an account for login and
// others only for specific access, such as storing files.  In
// the latter case the command may arrive at any time.
//
// There are reply codes to differentiate these cases for the
// automation: when account information is required for login,
// the response to a successful PASSword command is reply code
// 332.

use super::common::log_in;
use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_attribute, require_parameter},
    error::CommandError,
    reply::ReplyCode,
};

/// Handles `ACCT`, completing a login that waits for an account.
#[derive(Debug)]
pub struct Acct;

impl CommandHandler for Acct {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let account_name = require_parameter(args.cmd, 0)?;
        let session = args.session;
        let username = require_attribute(&session.attributes.username, "USERNAME")?;

        session.attributes.account_name = Some(account_name.to_string());
        if let Some(pending) = session.attributes.pending_login.take() {
            log_in(session, pending);
        }
        session.send_reply(ReplyCode::UserLoggedIn, "acct", &[username])
    }
}
