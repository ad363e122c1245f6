//! The RFC 959 Rename From (`RNFR`) command
//
// This command specifies the old pathname of the file which is
// to be renamed.  This command must be immediately followed by
// a "rename to" command specifying the new file pathname.

use super::common::resolve;
use crate::{
    server::{
        controlchan::handler::{CommandContext, CommandHandler, require_access, require_logged_in, require_parameter},
        error::CommandError,
        reply::ReplyCode,
    },
    storage::Access,
};

/// Handles `RNFR`.
#[derive(Debug)]
pub struct Rnfr;

impl CommandHandler for Rnfr {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let env = args.environment()?;
        let session = args.session;
        let user = require_logged_in(session)?;
        let path = session.resolve_path(require_parameter(args.cmd, 0)?);
        {
            let fs = env.lock_filesystem()?;
            require_access(resolve(&fs, &path)?, &user, Access::Read)?;
        }

        session.attributes.rename_from = Some(path.clone());
        session.send_reply(ReplyCode::FileActionPending, "rnfr", &[path])
    }
}
