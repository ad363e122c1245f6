//! The RFC 959 Rename To (`RNTO`) command
//
// This command specifies the new pathname of the file
// specified in the immediately preceding "rename from"
// command.  Together the two commands cause a file to be
// renamed.

use super::common::{require_writable_parent, resolve};
use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_attribute, require_logged_in, require_parameter},
    error::{CommandError, CommandErrorKind},
    reply::ReplyCode,
};

/// Handles `RNTO`, renaming the entry named by the preceding `RNFR`.
#[derive(Debug)]
pub struct Rnto;

impl CommandHandler for Rnto {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let env = args.environment()?;
        let session = args.session;
        let user = require_logged_in(session)?;
        let to = session.resolve_path(require_parameter(args.cmd, 0)?);
        let from = require_attribute(&session.attributes.rename_from, "RENAME_FROM")?;
        {
            let mut fs = env.lock_filesystem()?;
            resolve(&fs, &from)?;
            require_writable_parent(&fs, &to, &user)?;
            if fs.exists(&to) {
                return Err(CommandErrorKind::AlreadyExists(to).into());
            }

            fs.rename(&from, &to)?;
        }
        session.attributes.rename_from = None;
        session.send_reply(ReplyCode::FileActionOkay, "rnto", &[from, to])
    }
}
