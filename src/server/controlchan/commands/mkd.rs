//! The RFC 959 Make Directory (`MKD`) command
//
// This command causes the directory specified in the pathname
// to be created as a directory (if the pathname is absolute)
// or as a subdirectory of the current working directory (if
// the pathname is relative).

use super::common::require_writable_parent;
use crate::{
    server::{
        controlchan::handler::{CommandContext, CommandHandler, require_logged_in, require_parameter},
        error::{CommandError, CommandErrorKind},
        reply::ReplyCode,
    },
    storage::Entry,
};

/// Handles `MKD`. The new directory is owned by the logged in user.
#[derive(Debug)]
pub struct Mkd;

impl CommandHandler for Mkd {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let env = args.environment()?;
        let session = args.session;
        let user = require_logged_in(session)?;
        let path = session.resolve_path(require_parameter(args.cmd, 0)?);
        {
            let mut fs = env.lock_filesystem()?;
            if fs.exists(&path) {
                return Err(CommandErrorKind::AlreadyExists(path).into());
            }
            require_writable_parent(&fs, &path, &user)?;

            fs.add(Entry::directory(&path).with_owner(user.username()).with_group(user.primary_group()))?;
        }
        session.send_reply(ReplyCode::DirCreated, "mkd", &[path])
    }
}
