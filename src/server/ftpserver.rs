//! Contains the [`MockFtpServer`] struct that is used to configure and control a mock FTP server
//! instance.

pub mod error;
pub mod options;

use super::{
    controlchan::{
        commands::fake_registry,
        control_loop,
        dispatcher::{CommandRegistry, Dispatcher},
        handler::CommandHandler,
        stub::default_registry,
    },
    environment::Environment,
    recorder::Recordings,
    reply_text::{DefaultReplyText, ReplyText},
    session::Session,
};
use error::ServerError;
use options::Mode;
use slog::Drain;
use std::{
    fmt::{self, Debug, Formatter},
    net::SocketAddr,
    sync::Arc,
    time::Duration,
};
use tokio::net::TcpListener;

/// An instance of a mock FTP server. It is either a stub server, whose handlers play back fixed
/// replies and record how they were invoked, or a fake server, whose handlers act on the
/// simulated filesystem of an [`Environment`]. The mode is chosen by the constructor and can not
/// change afterwards.
///
/// Commands can be driven in-process through [`MockFtpServer::dispatcher`] and
/// [`MockFtpServer::new_session`], or over TCP with [`MockFtpServer::listen`].
///
/// # Example
///
/// ```rust
/// use mockftp::server::{MockFtpServer, ReplyCode, StubCommandHandler};
///
/// let server = MockFtpServer::stub()
///     .greeting("Welcome to the test server")
///     .register_handler("PWD", StubCommandHandler::new(ReplyCode::DirCreated).reply_text("\"/srv\""));
/// ```
pub struct MockFtpServer {
    mode: Mode,
    registry: CommandRegistry,
    environment: Option<Environment>,
    greeting: String,
    idle_session_timeout: Duration,
    reply_text: Option<Arc<dyn ReplyText>>,
    recordings: Recordings,
    logger: slog::Logger,
}

impl MockFtpServer {
    /// Creates a stub server with a [`StubCommandHandler`](super::StubCommandHandler) for every
    /// supported command.
    pub fn stub() -> Self {
        MockFtpServer::with_mode(Mode::Stub, default_registry(), None)
    }

    /// Creates a fake server that acts on the filesystem and user accounts of `environment`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mockftp::{auth::UserAccount, server::{Environment, MockFtpServer}, storage::{Entry, FileSystem}};
    ///
    /// let mut fs = FileSystem::new();
    /// fs.add_with_parents(Entry::directory("/home/alice")).unwrap();
    /// let env = Environment::new(fs).user_account(UserAccount::new("alice", "secret", "/home/alice"));
    /// let server = MockFtpServer::fake(env);
    /// ```
    pub fn fake(environment: Environment) -> Self {
        MockFtpServer::with_mode(Mode::Fake, fake_registry(), Some(environment))
    }

    fn with_mode(mode: Mode, registry: CommandRegistry, environment: Option<Environment>) -> Self {
        MockFtpServer {
            mode,
            registry,
            environment,
            greeting: options::DEFAULT_GREETING.to_string(),
            idle_session_timeout: Duration::from_secs(options::DEFAULT_IDLE_SESSION_TIMEOUT_SECS),
            reply_text: Some(Arc::new(DefaultReplyText)),
            recordings: Recordings::default(),
            logger: slog::Logger::root(slog_stdlog::StdLog {}.fuse(), slog::o!()),
        }
    }

    /// Set the greeting that will be sent to the client after connecting.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mockftp::server::MockFtpServer;
    ///
    /// let server = MockFtpServer::stub().greeting("Welcome to my FTP Server");
    /// ```
    pub fn greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// Set the idle session timeout in seconds. Clients that send nothing for that long are
    /// disconnected with a 421 reply. The default is 600 seconds.
    pub fn idle_session_timeout(mut self, secs: u64) -> Self {
        self.idle_session_timeout = Duration::from_secs(secs);
        self
    }

    /// Set the text catalog that reply keys are resolved against. Without a catalog every reply
    /// fails with a fatal configuration fault.
    pub fn reply_text(mut self, reply_text: Option<Arc<dyn ReplyText>>) -> Self {
        self.reply_text = reply_text;
        self
    }

    /// Sets the structured logger to use. With `None` the server logs through the `log` crate.
    pub fn logger<L: Into<Option<slog::Logger>>>(mut self, logger: L) -> Self {
        self.logger = logger
            .into()
            .unwrap_or_else(|| slog::Logger::root(slog_stdlog::StdLog {}.fuse(), slog::o!()));
        self
    }

    /// Registers `handler` for `name`, replacing the handler the mode installed. In stub mode this
    /// is how replies are customized; in fake mode it allows stubbing out a single command.
    pub fn register_handler<H>(mut self, name: &str, handler: H) -> Self
    where
        H: CommandHandler + 'static,
    {
        self.registry.register(name, handler);
        self
    }

    /// The operating mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The fake mode collaborators; `None` for a stub server.
    pub fn environment(&self) -> Option<&Environment> {
        self.environment.as_ref()
    }

    /// A dispatcher over this server's handlers. All dispatchers of one server share its
    /// filesystem.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.registry.clone(), self.environment.clone())
    }

    /// A fresh session with this server's text catalog and logger.
    pub fn new_session(&self) -> Session {
        Session::new().reply_text(self.reply_text.clone()).logger(self.logger.clone())
    }

    /// The recorders of the sessions that ran over TCP and have ended.
    pub fn recordings(&self) -> Recordings {
        self.recordings.clone()
    }

    /// Runs the server on `bind_address`, handling every connection in its own task. Returns
    /// only when the address can not be used.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mockftp::server::MockFtpServer;
    /// use tokio::runtime::Runtime;
    ///
    /// let rt = Runtime::new().unwrap();
    /// let server = MockFtpServer::stub();
    /// rt.spawn(server.listen("127.0.0.1:2121"));
    /// // ...
    /// drop(rt);
    /// ```
    #[tracing_attributes::instrument]
    pub async fn listen<T: Into<String> + Debug>(self, bind_address: T) -> Result<(), ServerError> {
        let bind_address: SocketAddr = bind_address.into().parse()?;
        let listener = TcpListener::bind(bind_address).await?;
        let dispatcher = self.dispatcher();
        slog::info!(self.logger, "Listening for control connections"; "address" => %bind_address, "mode" => %self.mode);
        loop {
            let (tcp_stream, socket_addr) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    slog::error!(self.logger, "Error accepting incoming control connection {:?}", err);
                    continue;
                }
            };
            slog::info!(self.logger, "Incoming control connection from {:?}", socket_addr);
            let config = control_loop::Config {
                dispatcher: dispatcher.clone(),
                greeting: self.greeting.clone(),
                idle_session_timeout: self.idle_session_timeout,
                reply_text: self.reply_text.clone(),
                recordings: self.recordings.clone(),
                logger: self.logger.new(slog::o!("peer" => socket_addr.to_string())),
            };
            if let Err(err) = control_loop::spawn(config, tcp_stream).await {
                slog::error!(self.logger, "Could not spawn control channel loop for connection from {:?}: {:?}", socket_addr, err);
            }
        }
    }
}

impl Debug for MockFtpServer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockFtpServer")
            .field("mode", &self.mode)
            .field("commands", &self.registry.names())
            .field("greeting", &self.greeting)
            .field("idle_session_timeout", &self.idle_session_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        server::{Command, ReplyCode, StubCommandHandler},
        storage::FileSystem,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn modes_install_their_handlers() {
        let stub = MockFtpServer::stub();
        assert_eq!(stub.mode(), Mode::Stub);
        assert!(stub.dispatcher().registry().contains("SMNT"));
        assert!(stub.environment().is_none());

        let fake = MockFtpServer::fake(Environment::new(FileSystem::new()));
        assert_eq!(fake.mode(), Mode::Fake);
        assert!(!fake.dispatcher().registry().contains("SMNT"));
        assert!(fake.dispatcher().registry().contains("XPWD"));
    }

    #[test]
    fn registered_handlers_replace_the_defaults() {
        let server = MockFtpServer::stub()
            .logger(slog::Logger::root(slog::Discard, slog::o!()))
            .register_handler("PWD", StubCommandHandler::new(ReplyCode::DirCreated).reply_text("\"/srv\""));
        let mut session = server.new_session();
        server.dispatcher().dispatch(&Command::named("PWD"), &mut session).unwrap();
        assert_eq!(session.last_reply().unwrap().text(), "\"/srv\"");
        assert_eq!(session.recorder().number_of_invocations("PWD"), 1);
    }

    #[test]
    fn sessions_use_the_configured_catalog() {
        let server = MockFtpServer::stub().reply_text(None);
        let mut session = server.new_session();
        assert!(server.dispatcher().dispatch(&Command::named("NOOP"), &mut session).is_err());
    }
}
