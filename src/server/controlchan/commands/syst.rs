//! The RFC 959 System (`SYST`) command
//
// This command is used to find out the type of operating
// system at the server.  The reply shall have as its first
// word one of the system names listed in the current version
// of the Assigned Numbers document.

use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler},
    error::CommandError,
    reply::ReplyCode,
};

/// Handles `SYST` with the system name of the environment.
#[derive(Debug)]
pub struct Syst;

impl CommandHandler for Syst {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let system_name = args.environment()?.get_system_name().to_string();
        args.session.send_reply(ReplyCode::SystemType, "syst", &[system_name])
    }
}
