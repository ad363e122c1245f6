//! The RFC 959 No Operation (`NOOP`) command
//
// This command does not affect any parameters or previously
// entered commands. It specifies no action other than that the
// server send an OK reply.

use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler},
    error::CommandError,
    reply::ReplyCode,
};

/// Handles `NOOP`.
#[derive(Debug)]
pub struct Noop;

impl CommandHandler for Noop {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        args.session.send_reply(ReplyCode::CommandOkay, "noop", &[])
    }
}
