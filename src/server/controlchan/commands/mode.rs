//! The RFC 959 Transfer Mode (`MODE`) command
//
// The argument is a single Telnet character code specifying
// the data transfer modes described in the Section on
// Transmission Modes.
//
// The following codes are assigned for transfer modes:
//
// S - Stream
// B - Block
// C - Compressed
//
// The default transfer mode is Stream.

use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_logged_in, require_parameter},
    error::{CommandError, CommandErrorKind},
    reply::ReplyCode,
    session::TransferMode,
};

/// Handles `MODE`; only stream mode is supported.
#[derive(Debug)]
pub struct Mode;

impl CommandHandler for Mode {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        require_logged_in(args.session)?;
        let param = require_parameter(args.cmd, 0)?;
        let mode = match param.to_uppercase().as_str() {
            "S" => TransferMode::Stream,
            "B" => TransferMode::Block,
            "C" => TransferMode::Compressed,
            _ => return Err(CommandErrorKind::ParameterNotImplemented(param.to_string()).into()),
        };

        args.session.attributes.transfer_mode = mode;
        args.session.send_reply(ReplyCode::CommandOkay, "mode", &[param.to_uppercase()])
    }
}
