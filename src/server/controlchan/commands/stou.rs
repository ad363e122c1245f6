//! The RFC 959 Store Unique (`STOU`) command
//
// This command behaves like STOR except that the resultant
// file is to be created in the current directory under a name
// unique to that directory.  The 250 Transfer Started response
// must include the name generated.

use super::common::{current_directory, finish_transfer, owned_by, require_data_connection, require_upload_target};
use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_logged_in},
    error::CommandError,
    reply::ReplyCode,
};

const DEFAULT_BASE_NAME: &str = "file";

/// Handles `STOU` by storing the staged upload under a name that is not taken yet.
#[derive(Debug)]
pub struct Stou;

impl CommandHandler for Stou {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let env = args.environment()?;
        let session = args.session;
        let user = require_logged_in(session)?;
        let base = args.cmd.parameter(0).unwrap_or(DEFAULT_BASE_NAME);
        require_data_connection(session)?;
        let path = {
            let mut fs = env.lock_filesystem()?;
            let path = fs.unique_path(&current_directory(session), base);
            require_upload_target(&fs, &path, &user)?;

            let data = session.data_channel_mut().take_upload();
            fs.write(&path, data, None, owned_by(&user))?;
            path
        };
        finish_transfer(session);
        session.send_default_reply(ReplyCode::FileStatusOkay)?;
        session.send_reply(ReplyCode::ClosingDataConnection, "stou", &[path])
    }
}
