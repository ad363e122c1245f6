//! The RFC 959 Abort (`ABOR`) command
//
// This command tells the server to abort the previous FTP
// service command and any associated transfer of data.
//
// Transfers complete within the command that starts them, so there is never one to abort. Any
// data connection that was set up is dropped.

use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler},
    error::CommandError,
    reply::ReplyCode,
};

/// Handles `ABOR` by dropping the data connection.
#[derive(Debug)]
pub struct Abor;

impl CommandHandler for Abor {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        args.session.attributes.data_connection = None;
        args.session.send_reply(ReplyCode::ClosingDataConnection, "abor", &[])
    }
}
