//! The RFC 959 List (`LIST`) command
//
// This command causes a list to be sent from the server to the
// passive DTP.  If the pathname specifies a directory or other
// group of files, the server should transfer a list of files
// in the specified directory.  If the pathname specifies a
// file then the server should send current information on the
// file.  A null argument implies the user's current working or
// default directory.

use super::common::{current_directory, finish_transfer, listing_path, require_data_connection, resolve};
use crate::{
    server::{
        controlchan::handler::{CommandContext, CommandHandler, require_access, require_logged_in},
        error::CommandError,
        reply::ReplyCode,
    },
    storage::{Access, Entry, FileSystem},
};

/// Handles `LIST` by sending an `ls -l` style listing over the data channel.
#[derive(Debug)]
pub struct List;

/// The entries a listing of `entry` shows: the children of a directory, or the file itself.
pub(super) fn listed_entries<'f>(fs: &'f FileSystem, entry: &'f Entry) -> Result<Vec<&'f Entry>, CommandError> {
    if entry.is_directory() {
        Ok(fs.children(entry.path())?)
    } else {
        Ok(vec![entry])
    }
}

impl CommandHandler for List {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let env = args.environment()?;
        let session = args.session;
        let user = require_logged_in(session)?;
        let path = listing_path(args.cmd, session).unwrap_or_else(|| current_directory(session));
        let listing = {
            let fs = env.lock_filesystem()?;
            let entry = resolve(&fs, &path)?;
            require_access(entry, &user, Access::Read)?;
            require_data_connection(session)?;
            listed_entries(&fs, entry)?
                .iter()
                .map(|e| format!("{}\r\n", e))
                .collect::<String>()
        };

        session.data_channel_mut().send(listing);
        finish_transfer(session);
        session.send_default_reply(ReplyCode::FileStatusOkay)?;
        session.send_reply(ReplyCode::ClosingDataConnection, "list", &[path])
    }
}
