//! The RFC 959 Change To Parent Directory (`CDUP`) command
//
// This command is a special case of CWD, and is included to
// simplify the implementation of programs for transferring
// directory trees between operating systems having different
// syntaxes for naming the parent directory.

use super::common::resolve_directory;
use crate::{
    server::{
        controlchan::handler::{CommandContext, CommandHandler, require_access, require_attribute, require_logged_in},
        error::CommandError,
        reply::ReplyCode,
    },
    storage::{Access, path},
};

/// Handles `CDUP`.
#[derive(Debug)]
pub struct Cdup;

impl CommandHandler for Cdup {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let env = args.environment()?;
        let session = args.session;
        let user = require_logged_in(session)?;
        let cwd = require_attribute(&session.attributes.current_directory, "CURRENT_DIRECTORY")?;
        let parent = path::parent(&cwd).unwrap_or_else(|| path::ROOT.to_string());
        {
            let fs = env.lock_filesystem()?;
            require_access(resolve_directory(&fs, &parent)?, &user, Access::Execute)?;
        }

        session.attributes.current_directory = Some(parent.clone());
        session.send_reply(ReplyCode::CommandOkay, "cdup", &[parent])
    }
}
