//! The RFC 959 Data Port (`PORT`) command
//
// The argument is a HOST-PORT specification for the data port
// to be used in data connection.  There are defaults for both
// the user and server data ports, and under normal
// circumstances this command and its reply are not needed.  If
// this command is used, the argument is the concatenation of a
// 32-bit internet host address and a 16-bit TCP port address.
// This address information is broken into 8-bit fields and the
// value of each field is transmitted as a decimal number (in
// character string representation).  The fields are separated
// by commas.  A port command would be:
//
//    PORT h1,h2,h3,h4,p1,p2
//
// where h1 is the high order 8 bits of the internet host
// address.

use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_logged_in},
    error::{CommandError, CommandErrorKind},
    reply::ReplyCode,
    session::DataConnection,
};
use std::net::{Ipv4Addr, SocketAddr};

/// Handles `PORT`.
#[derive(Debug)]
pub struct Port;

/// Reads the address of `PORT h1,h2,h3,h4,p1,p2` from its six parameters.
pub(crate) fn parse_port_address(params: &[String]) -> Result<SocketAddr, CommandError> {
    if params.is_empty() {
        return Err(CommandErrorKind::MissingParameter { index: 0 }.into());
    }
    let invalid = || CommandError::from(CommandErrorKind::InvalidParameter(params.join(",")));
    let bytes = params.iter().map(|p| p.parse::<u8>()).collect::<Result<Vec<u8>, _>>().map_err(|_| invalid())?;
    let [h1, h2, h3, h4, p1, p2] = bytes[..] else {
        return Err(invalid());
    };
    Ok(SocketAddr::new(Ipv4Addr::new(h1, h2, h3, h4).into(), (u16::from(p1) << 8) | u16::from(p2)))
}

impl CommandHandler for Port {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        require_logged_in(args.session)?;
        let address = parse_port_address(args.cmd.params())?;

        args.session.attributes.data_connection = Some(DataConnection::Active(address));
        args.session.send_reply(ReplyCode::CommandOkay, "port", &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(line: &str) -> Vec<String> {
        line.split(',').map(String::from).collect()
    }

    #[test]
    fn parses_host_and_port() {
        let address = parse_port_address(&params("127,0,0,1,4,1")).unwrap();
        assert_eq!(address, "127.0.0.1:1025".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn rejects_malformed_addresses() {
        for line in ["127,0,0,1,4", "127,0,0,1,4,1,9", "127,0,0,1,4,256", "a,b,c,d,e,f"] {
            let err = parse_port_address(&params(line)).unwrap_err();
            assert_eq!(err.reply().0.code(), 501, "{}", line);
        }
        assert_eq!(parse_port_address(&[]).unwrap_err().kind(), &CommandErrorKind::MissingParameter { index: 0 });
    }
}
