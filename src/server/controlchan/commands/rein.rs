//! The RFC 959 Reinitialize (`REIN`) command
//
// This command terminates a USER, flushing all I/O and account
// information, except to allow any transfer in progress to be
// completed.  All parameters are reset to the default settings
// and the control connection is left open.

use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler},
    error::CommandError,
    reply::ReplyCode,
};

/// Handles `REIN`, which resets the session to its state after connecting.
#[derive(Debug)]
pub struct Rein;

impl CommandHandler for Rein {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        args.session.reset();
        args.session.send_reply(ReplyCode::ServiceReady, "rein", &[])
    }
}
