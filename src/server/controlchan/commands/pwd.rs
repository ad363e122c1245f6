//! The RFC 959 Print Working Directory (`PWD`) command
//
// This command causes the name of the current working
// directory to be returned in the reply.

use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_attribute, require_logged_in},
    error::CommandError,
    reply::ReplyCode,
};

/// Handles `PWD` and `XPWD`.
#[derive(Debug)]
pub struct Pwd;

impl CommandHandler for Pwd {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let session = args.session;
        require_logged_in(session)?;
        let cwd = require_attribute(&session.attributes.current_directory, "CURRENT_DIRECTORY")?;
        session.send_reply(ReplyCode::DirCreated, "pwd", &[cwd])
    }
}
