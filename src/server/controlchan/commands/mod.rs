//! Fake mode: the command handlers that act on the simulated filesystem and user accounts of an
//! [`Environment`](crate::server::Environment).
//!
//! This module contains the implementations for the FTP commands defined in
//!
//! - [RFC 959 - FTP](https://tools.ietf.org/html/rfc959)
//! - [RFC 2428 - FTP Extensions for IPv6 and NATs](https://tools.ietf.org/html/rfc2428)
//!
//! Apart from `USER`, `PASS`, `ACCT`, `QUIT`, `REIN`, `NOOP`, `SYST`, `HELP`, `REST` and `ABOR`,
//! every command requires a logged in user.

mod abor;
mod acct;
mod allo;
mod appe;
mod cdup;
mod common;
mod cwd;
mod dele;
pub(crate) mod eprt;
mod epsv;
mod help;
mod list;
mod mkd;
mod mode;
mod nlst;
mod noop;
mod pass;
pub(crate) mod pasv;
pub(crate) mod port;
mod pwd;
mod quit;
mod rein;
mod rest;
mod retr;
mod rmd;
mod rnfr;
mod rnto;
mod site;
mod stat;
mod stor;
mod stou;
mod stru;
mod syst;
mod type_;
mod user;

pub use abor::Abor;
pub use acct::Acct;
pub use allo::Allo;
pub use appe::Appe;
pub use cdup::Cdup;
pub use cwd::Cwd;
pub use dele::Dele;
pub use eprt::Eprt;
pub use epsv::Epsv;
pub use help::Help;
pub use list::List;
pub use mkd::Mkd;
pub use mode::Mode;
pub use nlst::Nlst;
pub use noop::Noop;
pub use pass::Pass;
pub use pasv::Pasv;
pub use port::Port;
pub use pwd::Pwd;
pub use quit::Quit;
pub use rein::Rein;
pub use rest::Rest;
pub use retr::Retr;
pub use rmd::Rmd;
pub use rnfr::Rnfr;
pub use rnto::Rnto;
pub use site::Site;
pub use stat::Stat;
pub use stor::Stor;
pub use stou::Stou;
pub use stru::Stru;
pub use syst::Syst;
pub use type_::Type;
pub use user::User;

use super::{dispatcher::CommandRegistry, handler::CommandHandler};
use std::sync::Arc;

/// The registry of a fake server. `SMNT` is not supported and answered with 502.
pub fn fake_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register("ABOR", Abor);
    registry.register("ACCT", Acct);
    registry.register("ALLO", Allo);
    registry.register("APPE", Appe);
    registry.register("DELE", Dele);
    registry.register("EPRT", Eprt);
    registry.register("EPSV", Epsv);
    registry.register("HELP", Help);
    registry.register("LIST", List);
    registry.register("MODE", Mode);
    registry.register("NLST", Nlst);
    registry.register("NOOP", Noop);
    registry.register("PASS", Pass);
    registry.register("PASV", Pasv);
    registry.register("PORT", Port);
    registry.register("QUIT", Quit);
    registry.register("REIN", Rein);
    registry.register("REST", Rest);
    registry.register("RETR", Retr);
    registry.register("RNFR", Rnfr);
    registry.register("RNTO", Rnto);
    registry.register("SITE", Site);
    registry.register("STAT", Stat);
    registry.register("STOR", Stor);
    registry.register("STOU", Stou);
    registry.register("STRU", Stru);
    registry.register("SYST", Syst);
    registry.register("TYPE", Type);
    registry.register("USER", User);

    let aliased: [(&[&str], Arc<dyn CommandHandler>); 5] = [
        (&["CDUP", "XCUP"], Arc::new(Cdup)),
        (&["CWD", "XCWD"], Arc::new(Cwd)),
        (&["MKD", "XMKD"], Arc::new(Mkd)),
        (&["PWD", "XPWD"], Arc::new(Pwd)),
        (&["RMD", "XRMD"], Arc::new(Rmd)),
    ];
    for (names, handler) in aliased {
        for name in names {
            registry.register_shared(name, handler.clone());
        }
    }
    registry
}
