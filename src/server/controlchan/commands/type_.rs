//! The RFC 959 Representation Type (`TYPE`) command
//
// The argument specifies the representation type as described
// in the Section on Data Representation and Storage.  Several
// types take a second parameter.  The first parameter is
// denoted by a single Telnet character, as is the second
// Format parameter for ASCII and EBCDIC; the second parameter
// for local byte is a decimal integer to indicate Bytesize.
// The parameters are separated by a <SP> (Space, ASCII code
// 32).
//
// The following codes are assigned for type:
//
// A - ASCII
// E - EBCDIC
// I - Image
// L <byte size> - Local byte Byte size
//
// The default representation type is ASCII Non-print.

use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_logged_in, require_parameter},
    error::{CommandError, CommandErrorKind},
    reply::ReplyCode,
    session::TransferType,
};

/// Handles `TYPE`.
#[derive(Debug)]
pub struct Type;

impl CommandHandler for Type {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        require_logged_in(args.session)?;
        let param = require_parameter(args.cmd, 0)?;
        let transfer_type = match param.to_uppercase().as_str() {
            "A" => TransferType::Ascii,
            "E" => TransferType::Ebcdic,
            "I" => TransferType::Image,
            "L" => TransferType::Local,
            _ => return Err(CommandErrorKind::ParameterNotImplemented(param.to_string()).into()),
        };

        args.session.attributes.transfer_type = transfer_type;
        args.session.send_reply(ReplyCode::CommandOkay, "type", &[param.to_uppercase()])
    }
}
