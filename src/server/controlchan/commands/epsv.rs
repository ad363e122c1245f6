//! The RFC 2428 Extended Passive Mode (`EPSV`) command
//
// The EPSV command requests that a server listen on a data port and
// wait for a connection.  The response to this command includes only
// the TCP port number of the listening connection.

use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_logged_in},
    error::CommandError,
    reply::ReplyCode,
    session::DataConnection,
};

/// Handles `EPSV`.
#[derive(Debug)]
pub struct Epsv;

impl CommandHandler for Epsv {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let env = args.environment()?;
        let session = args.session;
        require_logged_in(session)?;
        let address = env.get_passive_address();

        session.attributes.data_connection = Some(DataConnection::Passive(address));
        session.send_reply(ReplyCode::EnteringExtendedPassiveMode, "epsv", &[address.port().to_string()])
    }
}
