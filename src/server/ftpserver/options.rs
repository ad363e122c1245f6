//! Contains code pertaining to the setup options that can be given to the [`MockFtpServer`](crate::server::MockFtpServer)

use std::{
    fmt::{self, Display, Formatter},
    net::{IpAddr, Ipv4Addr, SocketAddr},
};

// These are exposed so that the API user can see what our server defaults are.

/// The text of the 220 reply sent when a client connects.
pub const DEFAULT_GREETING: &str = "Service ready for new user.";
/// Idle sessions are closed with 421 after this many seconds.
pub const DEFAULT_IDLE_SESSION_TIMEOUT_SECS: u64 = 600;
/// The answer to `SYST`.
pub const DEFAULT_SYSTEM_NAME: &str = "UNIX Type: L8";
/// The address announced by `PASV` and `EPSV`. Nothing listens there.
pub const DEFAULT_PASSIVE_ADDRESS: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 50000);

/// The operating mode of a [`MockFtpServer`](crate::server::MockFtpServer). It is fixed when the
/// server is constructed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    /// Handlers play back configured replies and record their invocations.
    Stub,
    /// Handlers act on a simulated filesystem.
    Fake,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Stub => write!(f, "stub"),
            Mode::Fake => write!(f, "fake"),
        }
    }
}
