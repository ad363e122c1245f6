//! The RFC 959 Passive (`PASV`) command
//
// This command requests the server-DTP to "listen" on a data
// port (which is not its default data port) and to wait for a
// connection rather than initiate one upon receipt of a
// transfer command.  The response to this command includes the
// host and port address this server is listening on.
//
// Nothing actually listens. The announced address is the configured passive address and
// transfers go through the session's simulated data channel.

use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_logged_in},
    error::{CommandError, CommandErrorKind},
    reply::ReplyCode,
    session::DataConnection,
};
use std::net::{IpAddr, SocketAddr};

/// Handles `PASV` with the passive address of the environment.
#[derive(Debug)]
pub struct Pasv;

/// Formats `address` the way a `227` reply announces it: `h1,h2,h3,h4,p1,p2`.
pub(crate) fn format_pasv_address(address: SocketAddr) -> Option<String> {
    match address.ip() {
        IpAddr::V4(ip) => {
            let [h1, h2, h3, h4] = ip.octets();
            let port = address.port();
            Some(format!("{},{},{},{},{},{}", h1, h2, h3, h4, port >> 8, port & 0xff))
        }
        IpAddr::V6(_) => None,
    }
}

impl CommandHandler for Pasv {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let env = args.environment()?;
        let session = args.session;
        require_logged_in(session)?;
        let address = env.get_passive_address();
        // PASV can only announce IPv4 addresses, clients should use EPSV instead.
        let announced = format_pasv_address(address).ok_or_else(|| CommandError::from(CommandErrorKind::NoDataConnection))?;

        session.attributes.data_connection = Some(DataConnection::Passive(address));
        session.send_reply(ReplyCode::EnteringPassiveMode, "pasv", &[announced])
    }
}
