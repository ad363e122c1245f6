//! The RFC 959 Site Parameters (`SITE`) command
//
// This command is used by the server to provide services
// specific to his system that are essential to file transfer
// but not sufficiently universal to be included as commands in
// the protocol.  The nature of these services and the
// specification of their syntax can be stated in a reply to
// the HELP SITE command.

use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_logged_in, require_parameter},
    error::CommandError,
    reply::ReplyCode,
};

/// Handles `SITE`.
#[derive(Debug)]
pub struct Site;

impl CommandHandler for Site {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        require_logged_in(args.session)?;
        require_parameter(args.cmd, 0)?;
        args.session.send_reply(ReplyCode::CommandOkay, "site", &[])
    }
}
