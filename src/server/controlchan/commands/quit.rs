//! The RFC 959 Logout (`QUIT`) command.
//
// This command terminates a USER and if file transfer is not
// in progress, the server closes the control connection.

use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler},
    error::CommandError,
    reply::ReplyCode,
};

/// Handles `QUIT` by closing the session.
#[derive(Debug)]
pub struct Quit;

impl CommandHandler for Quit {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        args.session.close();
        args.session.send_reply(ReplyCode::ClosingControlConnection, "quit", &[])
    }
}
