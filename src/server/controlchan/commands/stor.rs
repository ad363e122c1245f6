//! The RFC 959 Store (`STOR`) command
//
// This command causes the server-DTP to accept the data
// transferred via the data connection and to store the data as
// a file at the server site.  If the file specified in the
// pathname exists at the server site, then its contents shall
// be replaced by the data being transferred.  A new file is
// created at the server site if the file specified in the
// pathname does not already exist.

use super::common::{finish_transfer, owned_by, require_data_connection, require_upload_target};
use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_logged_in, require_parameter},
    error::CommandError,
    reply::ReplyCode,
};

/// Handles `STOR` by writing the staged upload, from the restart offset on.
#[derive(Debug)]
pub struct Stor;

impl CommandHandler for Stor {
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

            let offset = session.attributes.restart_marker.as_ref().map(|_| session.attributes.restart_offset());
            let data = session.data_channel_mut().take_upload();
            fs.write(&path, data, offset, owned_by(&user))?;
        }
        finish_transfer(session);
        session.send_default_reply(ReplyCode::FileStatusOkay)?;
        session.send_reply(ReplyCode::ClosingDataConnection, "stor", &[path])
    }
}
