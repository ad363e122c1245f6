//! Restart of Interrupted Transfer (REST)
//! To avoid having to resend the entire file if the file is only
//! partially transferred, both sides need some way to agree on where in
//! the data stream to restart the data transfer.
//!
//! The marker is kept as given. The next `STOR` or `RETR` reads it as a byte offset; a marker that
//! is not a number restarts at 0.
//!
//! See also: <https://cr.yp.to/ftp/retr.html>
//!

use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_parameter},
    error::CommandError,
    reply::ReplyCode,
};

/// Handles `REST` by storing the restart marker for the next transfer.
#[derive(Debug)]
pub struct Rest;

impl CommandHandler for Rest {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let marker = require_parameter(args.cmd, 0)?;
        args.session.attributes.restart_marker = Some(marker.to_string());
        args.session.send_reply(ReplyCode::FileActionPending, "rest", &[marker.to_string()])
    }
}
