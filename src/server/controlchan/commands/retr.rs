//! The RFC 959 Retrieve (`RETR`) command
//
// This command causes the server-DTP to transfer a copy of the
// file, specified in the pathname, to the server- or user-DTP
// at the other end of the data connection.  The status and
// contents of the file at the server site shall be unaffected.

use super::common::{finish_transfer, require_data_connection, resolve_file};
use crate::{
    server::{
        controlchan::handler::{CommandContext, CommandHandler, require_access, require_logged_in, require_parameter},
        error::CommandError,
        reply::ReplyCode,
    },
    storage::Access,
};

/// Handles `RETR` by sending a file, from the restart offset on, over the data channel.
#[derive(Debug)]
pub struct Retr;

impl CommandHandler for Retr {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let env = args.environment()?;
        let session = args.session;
        let user = require_logged_in(session)?;
        let path = session.resolve_path(require_parameter(args.cmd, 0)?);
        let contents = {
            let fs = env.lock_filesystem()?;
            let entry = resolve_file(&fs, &path)?;
            require_access(entry, &user, Access::Read)?;
            require_data_connection(session)?;
            entry.contents().cloned().unwrap_or_default()
        };

        let offset = (session.attributes.restart_offset() as usize).min(contents.len());
        session.data_channel_mut().send(contents.slice(offset..));
        finish_transfer(session);
        session.send_default_reply(ReplyCode::FileStatusOkay)?;
        session.send_reply(ReplyCode::ClosingDataConnection, "retr", &[path])
    }
}
