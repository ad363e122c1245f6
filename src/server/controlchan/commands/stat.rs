//! The RFC 959 Status (`STAT`) command
//
// This command shall cause a status response to be sent over
// the control connection in the form of a reply.  The command
// may be sent during a file transfer (along with the Telnet IP
// and Synch signals--see the Section on FTP Commands) in which
// case the server will respond with the status of the
// operation in progress, or it may be sent between file
// transfers.  In the latter case, the command may have an
// argument field.  If the argument is a pathname, the command
// is analogous to the "list" command except that data shall be
// transferred over the control connection.  If a partial
// pathname is given, the server may respond with a list of
// file names or attributes associated with that specification.
// If no argument is given, the server should return general
// status information about the server FTP process.

use super::{
    common::{listing_path, resolve},
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

/// Handles `STAT`: the session status without an argument, a listing with one.
#[derive(Debug)]
pub struct Stat;

impl CommandHandler for Stat {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let env = args.environment()?;
        let session = args.session;
        let user = require_logged_in(session)?;
        match listing_path(args.cmd, session) {
            None => session.send_reply(ReplyCode::SystemStatus, "stat", &[user.username().to_string()]),
            Some(path) => {
                let lines = {
                    let fs = env.lock_filesystem()?;
                    let entry = resolve(&fs, &path)?;
                    require_access(entry, &user, Access::Read)?;
                    listed_entries(&fs, entry)?.iter().map(|e| e.to_string()).collect()
                };
                session.send_multiline_reply(ReplyCode::FileStatus, "stat.path", &[path], lines)
            }
        }
    }
}
