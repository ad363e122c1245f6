//! The RFC 959 File Structure (`STRU`) command
//
// The argument is a single Telnet character code specifying
// file structure described in the Section on Data
// Representation and Storage.
//
// The following codes are assigned for structure:
//
// F - File (no record structure)
// R - Record structure
// P - Page structure
//
// The default structure is File.

use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_logged_in, require_parameter},
    error::{CommandError, CommandErrorKind},
    reply::ReplyCode,
    session::FileStructure,
};

/// Handles `STRU`; only file structure is supported.
#[derive(Debug)]
pub struct Stru;

impl CommandHandler for Stru {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        require_logged_in(args.session)?;
        let param = require_parameter(args.cmd, 0)?;
        let structure = match param.to_uppercase().as_str() {
            "F" => FileStructure::File,
            "R" => FileStructure::Record,
            "P" => FileStructure::Page,
            _ => return Err(CommandErrorKind::ParameterNotImplemented(param.to_string()).into()),
        };

        args.session.attributes.file_structure = structure;
        args.session.send_reply(ReplyCode::CommandOkay, "stru", &[param.to_uppercase()])
    }
}
