//! The RFC 2428 Extended Port (`EPRT`) command
//
// The EPRT command allows for the specification of an extended address
// for the data connection.  The extended address MUST consist of the
// network protocol as well as the network and transport addresses.  The
// format of EPRT is:
//
//    EPRT<space><d><net-prt><d><net-addr><d><tcp-port><d>

use crate::server::{
    controlchan::handler::{CommandContext, CommandHandler, require_logged_in, require_parameter},
    error::{CommandError, CommandErrorKind},
    reply::ReplyCode,
    session::DataConnection,
};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

/// Handles `EPRT`, remembering the client address for the next transfer.
#[derive(Debug)]
pub struct Eprt;

/// Reads the address of `EPRT |af|addr|port|`. Address family 1 is IPv4, 2 is IPv6.
pub(crate) fn parse_eprt_address(param: &str) -> Result<SocketAddr, CommandError> {
    let invalid = || CommandError::from(CommandErrorKind::InvalidParameter(param.to_string()));
    let delimiter = param.chars().next().ok_or_else(invalid)?;
    let fields: Vec<&str> = param.split(delimiter).collect();
    let ["", family, addr, port, ""] = fields[..] else {
        return Err(invalid());
    };
    let ip: IpAddr = match family {
        "1" => addr.parse::<Ipv4Addr>().map_err(|_| invalid())?.into(),
        "2" => addr.parse::<Ipv6Addr>().map_err(|_| invalid())?.into(),
        _ => return Err(CommandErrorKind::ParameterNotImplemented(family.to_string()).into()),
    };
    let port = port.parse::<u16>().map_err(|_| invalid())?;
    Ok(SocketAddr::new(ip, port))
}

impl CommandHandler for Eprt {
    #[tracing_attributes::instrument]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        require_logged_in(args.session)?;
        let address = parse_eprt_address(require_parameter(args.cmd, 0)?)?;

        args.session.attributes.data_connection = Some(DataConnection::Active(address));
        args.session.send_reply(ReplyCode::CommandOkay, "eprt", &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_both_address_families() {
        assert_eq!(parse_eprt_address("|1|132.235.1.2|6275|").unwrap(), "132.235.1.2:6275".parse::<SocketAddr>().unwrap());
        assert_eq!(parse_eprt_address("|2|::1|5282|").unwrap(), "[::1]:5282".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn rejects_unknown_families_and_garbage() {
        assert_eq!(parse_eprt_address("|3|x|1|").unwrap_err().reply().0.code(), 504);
        assert_eq!(parse_eprt_address("|1|132.235.1.2|").unwrap_err().reply().0.code(), 501);
        assert_eq!(parse_eprt_address("|1|nohost|21|").unwrap_err().reply().0.code(), 501);
    }
}
