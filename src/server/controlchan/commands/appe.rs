//! The RFC 959 Append (with create) (`APPE`) command
//
// This command causes the server-DTP to accept the data
// transferred via the data connection and to store the data in
// a file at the server site.  If the file specified in the
// pathname exists at the server site, then the data shall be
// appended to that file; otherwise the file specified in the
// pathname shall be created at the server site.

use super::common::{finish_transfer, owned_by, require_data_connection, require_upload_target};
use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_logged_in, require_parameter},
    error::CommandError,
    reply::ReplyCode,
};

/// Handles `APPE` by appending the staged upload to a file.
#[derive(Debug)]
pub struct Appe;

impl CommandHandler for Appe {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let env = args.environment()?;
        let session = args.session;
        let user = require_logged_in(session)?;
        let path = session.resolve_path(require_parameter(args.cmd, 0)?);
        require_data_connection(session)?;
        {
            let mut fs = env.lock_filesystem()?;
            require_upload_target(&fs, &path, &user)?;

            let data = session.data_channel_mut().take_upload();
            fs.append(&path, data, owned_by(&user))?;
        }
        finish_transfer(session);
        session.send_default_reply(ReplyCode::FileStatusOkay)?;
        session.send_reply(ReplyCode::ClosingDataConnection, "appe", &[path])
    }
}
