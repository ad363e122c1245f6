//! The RFC 959 Name List (`NLST`) command
//
// This command causes a directory listing to be sent from
// server to user site.  The pathname should specify a
// directory or other system-specific file group descriptor; a
// null argument implies the current directory.  The server
// will return a stream of names of files and no other
// information.

use super::{
    common::{current_directory, finish_transfer, listing_path, require_data_connection, resolve},
    list::listed_entries,
};
use crate::{
    server::{
        controlchan::handler::{CommandContext, CommandHandler, require_access, require_logged_in},
        error::CommandError,
        reply::ReplyCode,
    },
    storage::Access,
};

/// Handles `NLST` by sending the bare names of a directory.
#[derive(Debug)]
pub struct Nlst;

impl CommandHandler for Nlst {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let env = args.environment()?;
        let session = args.session;
        let user = require_logged_in(session)?;
        let path = listing_path(args.cmd, session).unwrap_or_else(|| current_directory(session));
        let names = {
            let fs = env.lock_filesystem()?;
            let entry = resolve(&fs, &path)?;
            require_access(entry, &user, Access::Read)?;
            require_data_connection(session)?;
            listed_entries(&fs, entry)?
                .iter()
                .map(|e| format!("{}\r\n", e.name()))
                .collect::<String>()
        };

        session.data_channel_mut().send(names);
        finish_transfer(session);
        session.send_default_reply(ReplyCode::FileStatusOkay)?;
        session.send_reply(ReplyCode::ClosingDataConnection, "nlst", &[path])
    }
}
