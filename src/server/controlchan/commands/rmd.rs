//! The RFC 959 Remove Directory (`RMD`) command
//
// This command causes the directory specified in the pathname
// to be removed as a directory (if the pathname is absolute)
// or as a subdirectory of the current working directory (if
// the pathname is relative).

use super::common::{require_writable_parent, resolve_directory};
use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_logged_in, require_parameter},
    error::{CommandError, CommandErrorKind},
    reply::ReplyCode,
};

/// Handles `RMD` and `XRMD`. Only empty directories are removed.
#[derive(Debug)]
pub struct Rmd;

impl CommandHandler for Rmd {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let env = args.environment()?;
        let session = args.session;
        let user = require_logged_in(session)?;
        let path = session.resolve_path(require_parameter(args.cmd, 0)?);
        {
            let mut fs = env.lock_filesystem()?;
            resolve_directory(&fs, &path)?;
            if !fs.children(&path)?.is_empty() {
                return Err(CommandErrorKind::DirectoryNotEmpty(path).into());
            }
            require_writable_parent(&fs, &path, &user)?;

            fs.delete(&path)?;
        }
        session.send_reply(ReplyCode::FileActionOkay, "rmd", &[path])
    }
}
