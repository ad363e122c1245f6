//! The RFC 959 Help (`HELP`) command
//
// This command shall cause the server to send helpful
// information regarding its implementation status over the
// control connection to the user.  The command may take an
// argument (e.g., any command name) and return more specific
// information as a response.

use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler},
    error::CommandError,
    reply::ReplyCode,
};

/// Handles `HELP` with the help texts of the [`Environment`](crate::server::Environment).
#[derive(Debug)]
pub struct Help;

impl CommandHandler for Help {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let env = args.environment()?;
        let topic = args.cmd.parameter(0).unwrap_or_default().trim();
        match env.get_help_text(topic) {
            Some(text) => args.session.send_reply(ReplyCode::HelpMessage, "help", &[text.to_string()]),
            None => args.session.send_reply(ReplyCode::HelpMessage, "help.noHelpTextDefined", &[topic.to_string()]),
        }
    }
}
