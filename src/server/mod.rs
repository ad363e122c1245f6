//! Contains the [`MockFtpServer`] and the session, dispatch and reply machinery behind it.

pub(crate) mod controlchan;
mod environment;
pub(crate) mod error;
pub(crate) mod ftpserver;
mod recorder;
mod reply;
mod reply_text;
mod session;

pub use controlchan::command::Command;
pub use controlchan::commands;
pub use controlchan::dispatcher::{CommandRegistry, Dispatcher};
pub use controlchan::handler::{CommandContext, CommandHandler, require_attribute, require_logged_in, require_parameter};
pub use controlchan::line_parser::{self, error::ParseError, error::ParseErrorKind};
pub use controlchan::stub::{self, ScriptedReply, StubCommandHandler};
pub use environment::Environment;
pub use error::{CommandError, CommandErrorKind, DispatchError};
pub use ftpserver::{MockFtpServer, error::ServerError, options};
pub use recorder::{Invocation, InvocationRecorder, Recordings};
pub use reply::{Reply, ReplyCode};
pub use reply_text::{DefaultReplyText, MapReplyText, ReplyText};
pub use session::{DataChannel, DataConnection, FileStructure, Session, SessionAttributes, TransferMode, TransferType};
