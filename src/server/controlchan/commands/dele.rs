//! The RFC 959 Delete (`DELE`) command
//
// This command causes the file specified in the pathname to be
// deleted at the server site.  If an extra level of protection
// is desired (such as the query, "Do you really wish to
// delete?"), it should be provided by the user-FTP process.

use super::common::{require_writable_parent, resolve_file};
use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_logged_in, require_parameter},
    error::CommandError,
    reply::ReplyCode,
};

/// Handles `DELE`.
#[derive(Debug)]
pub struct Dele;

impl CommandHandler for Dele {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let env = args.environment()?;
        let session = args.session;
        let user = require_logged_in(session)?;
        let path = session.resolve_path(require_parameter(args.cmd, 0)?);
        {
            let mut fs = env.lock_filesystem()?;
            resolve_file(&fs, &path)?;
            require_writable_parent(&fs, &path, &user)?;

            fs.delete(&path)?;
        }
        session.send_reply(ReplyCode::FileActionOkay, "dele", &[path])
    }
}
