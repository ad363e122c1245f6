//! The RFC 959 Change Working Directory (`CWD`) command
//
// This command allows the user to work with a different
// directory or dataset for file storage or retrieval without
// altering his login or accounting information.  Transfer
// parameters are similarly unchanged.  The argument is a
// pathname specifying a directory or other system dependent
// file group designator.

use super::common::resolve_directory;
use crate::{
    server::{
        controlchan::handler::{CommandContext, CommandHandler, require_access, require_logged_in, require_parameter},
        error::CommandError,
        reply::ReplyCode,
    },
    storage::Access,
};

/// Handles `CWD` by moving the session into another directory.
#[derive(Debug)]
pub struct Cwd;

impl CommandHandler for Cwd {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let env = args.environment()?;
        let session = args.session;
        let user = require_logged_in(session)?;
        let path = session.resolve_path(require_parameter(args.cmd, 0)?);
        {
            let fs = env.lock_filesystem()?;
            require_access(resolve_directory(&fs, &path)?, &user, Access::Execute)?;
        }

        session.attributes.current_directory = Some(path.clone());
        session.send_reply(ReplyCode::FileActionOkay, "cwd", &[path])
    }
}
