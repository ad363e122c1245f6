//! Stub mode: handlers that play back configured replies and record how they were invoked.
//!
//! A [`StubCommandHandler`] does not model any server state. It checks that the required
//! parameters are present, records the invocation in the session's
//! [`InvocationRecorder`](crate::server::InvocationRecorder) and sends its reply. Tests then
//! assert on the recorded invocations:
//!
//! ```rust
//! use mockftp::server::{Command, MockFtpServer};
//!
//! let server = MockFtpServer::stub();
//! let dispatcher = server.dispatcher();
//! let mut session = server.new_session();
//! dispatcher.dispatch(&Command::new("REST", ["marker1"]), &mut session).unwrap();
//!
//! let rest = session.recorder().invocation("REST", 0).unwrap();
//! assert_eq!(rest.data("marker"), Some("marker1"));
//! ```

use super::{
    commands::{eprt::parse_eprt_address, pasv::format_pasv_address, port::parse_port_address},
    dispatcher::CommandRegistry,
    handler::{CommandContext, CommandHandler, require_parameter},
};
use crate::server::{
    error::CommandError,
    ftpserver::options,
    recorder::Invocation,
    reply::ReplyCode,
};
use bytes::Bytes;
use std::{net::SocketAddr, sync::Arc};

/// One entry of a reply script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedReply {
    code: ReplyCode,
    text: Option<String>,
}

impl ScriptedReply {
    /// A reply with the default text of `code`.
    pub fn new(code: ReplyCode) -> Self {
        ScriptedReply { code, text: None }
    }

    /// A reply with literal text.
    pub fn with_text(code: ReplyCode, text: impl Into<String>) -> Self {
        ScriptedReply {
            code,
            text: Some(text.into()),
        }
    }
}

// What a handler copies from the command into the recorded invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Recorded {
    Parameter { index: usize, key: &'static str },
    // `PORT h1,h2,h3,h4,p1,p2` as "host" and "port"
    PortAddress,
    // `EPRT |af|addr|port|` as "host" and "port"
    ExtendedPortAddress,
}

/// A handler that replies with a fixed code and records each invocation.
///
/// The final reply is, in order of precedence: the entry of the reply script matching the number
/// of earlier invocations of this verb in the session (the last entry repeats), the literal text,
/// the text of the configured message key, or the default text of the reply code.
#[derive(Debug, Clone)]
pub struct StubCommandHandler {
    reply_code: ReplyCode,
    reply_key: Option<String>,
    reply_args: Vec<String>,
    reply_text: Option<String>,
    required_params: usize,
    recorded: Vec<Recorded>,
    transfer: bool,
    data: Option<Bytes>,
    capture_upload: bool,
    closes_session: bool,
    script: Vec<ScriptedReply>,
}

impl StubCommandHandler {
    /// A handler that replies with `code` and its default text.
    pub fn new(reply_code: ReplyCode) -> Self {
        StubCommandHandler {
            reply_code,
            reply_key: None,
            reply_args: vec![],
            reply_text: None,
            required_params: 0,
            recorded: vec![],
            transfer: false,
            data: None,
            capture_upload: false,
            closes_session: false,
            script: vec![],
        }
    }

    /// Replies with `code` instead.
    pub fn reply_code(mut self, code: ReplyCode) -> Self {
        self.reply_code = code;
        self
    }

    /// Resolves the reply text from `key` and `args` in the session's text catalog.
    pub fn reply_key<I, S>(mut self, key: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reply_key = Some(key.to_string());
        self.reply_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Replies with literal text, bypassing the catalog.
    pub fn reply_text(mut self, text: impl Into<String>) -> Self {
        self.reply_text = Some(text.into());
        self
    }

    /// Fails with 501 unless the command has at least `count` parameters.
    pub fn required_params(mut self, count: usize) -> Self {
        self.required_params = count;
        self
    }

    /// Records parameter `index`, when present, as data element `key`.
    pub fn record(mut self, index: usize, key: &'static str) -> Self {
        self.recorded.push(Recorded::Parameter { index, key });
        self
    }

    /// Sends a preliminary 150 before the final reply.
    pub fn transfer(mut self) -> Self {
        self.transfer = true;
        self
    }

    /// Sends `data` on the data channel, as a download or listing would. Implies
    /// [`transfer`](Self::transfer).
    pub fn send_data(mut self, data: impl Into<Bytes>) -> Self {
        self.data = Some(data.into());
        self.transfer = true;
        self
    }

    /// Takes the staged upload and records it as data element `"fileContents"`. Implies
    /// [`transfer`](Self::transfer).
    pub fn capture_upload(mut self) -> Self {
        self.capture_upload = true;
        self.transfer = true;
        self
    }

    /// Closes the session after replying, as `QUIT` does.
    pub fn closes_session(mut self) -> Self {
        self.closes_session = true;
        self
    }

    /// Sets the reply script.
    pub fn script(mut self, replies: Vec<ScriptedReply>) -> Self {
        self.script = replies;
        self
    }

    fn record_port_address(mut self) -> Self {
        self.recorded.push(Recorded::PortAddress);
        self
    }

    fn record_extended_port_address(mut self) -> Self {
        self.recorded.push(Recorded::ExtendedPortAddress);
        self
    }
}

impl CommandHandler for StubCommandHandler {
    #[tracing_attributes::instrument(skip(args))]
    fn handle(&self, args: CommandContext<'_>) -> Result<(), CommandError> {
        let cmd = args.cmd;
        let session = args.session;

        for index in 0..self.required_params {
            require_parameter(cmd, index)?;
        }
        let mut invocation = Invocation::new(cmd.name(), cmd.params());
        for recorded in &self.recorded {
            match recorded {
                Recorded::Parameter { index, key } => {
                    if let Some(value) = cmd.parameter(*index) {
                        invocation = invocation.with_data(*key, value);
                    }
                }
                Recorded::PortAddress => {
                    invocation = with_address(invocation, parse_port_address(cmd.params())?);
                }
                Recorded::ExtendedPortAddress => {
                    invocation = with_address(invocation, parse_eprt_address(require_parameter(cmd, 0)?)?);
                }
            }
        }

        let nth = session.recorder().number_of_invocations(cmd.name());
        if self.capture_upload {
            let upload = session.data_channel_mut().take_upload();
            invocation = invocation.with_data("fileContents", String::from_utf8_lossy(&upload));
        }
        session.recorder_mut().record(invocation);
        if let Some(data) = &self.data {
            session.data_channel_mut().send(data.clone());
        }

        if self.transfer {
            session.send_default_reply(ReplyCode::FileStatusOkay)?;
        }
        match self.script.get(nth).or(self.script.last()) {
            Some(ScriptedReply { code, text: Some(text) }) => session.send_reply_text(*code, text.clone()),
            Some(ScriptedReply { code, text: None }) => session.send_default_reply(*code)?,
            None => match (&self.reply_text, &self.reply_key) {
                (Some(text), _) => session.send_reply_text(self.reply_code, text.clone()),
                (None, Some(key)) => session.send_reply(self.reply_code, key, &self.reply_args)?,
                (None, None) => session.send_default_reply(self.reply_code)?,
            },
        }
        if self.closes_session {
            session.close();
        }
        Ok(())
    }
}

fn with_address(invocation: Invocation, address: SocketAddr) -> Invocation {
    invocation
        .with_data("host", address.ip().to_string())
        .with_data("port", address.port().to_string())
}

/// The registry of a stub server: a [`StubCommandHandler`] for every supported verb.
pub fn default_registry() -> CommandRegistry {
    use ReplyCode::*;
    type Stub = StubCommandHandler;

    let passive = options::DEFAULT_PASSIVE_ADDRESS;
    let pasv_address = format_pasv_address(passive).unwrap_or_default();

    let mut registry = CommandRegistry::new();
    registry.register("ABOR", Stub::new(ClosingDataConnection));
    registry.register("ACCT", Stub::new(UserLoggedIn).required_params(1).record(0, "account"));
    registry.register("ALLO", Stub::new(CommandOkay).record(0, "numberOfBytes").record(2, "recordSize"));
    registry.register("APPE", Stub::new(ClosingDataConnection).required_params(1).record(0, "pathname").capture_upload());
    registry.register("EPRT", Stub::new(CommandOkay).required_params(1).record_extended_port_address());
    registry.register("EPSV", Stub::new(EnteringExtendedPassiveMode).reply_key("epsv", [passive.port().to_string()]));
    registry.register("HELP", Stub::new(HelpMessage).record(0, "help"));
    registry.register("LIST", Stub::new(ClosingDataConnection).record(0, "pathname").send_data(""));
    registry.register("MODE", Stub::new(CommandOkay).required_params(1).record(0, "mode"));
    registry.register("NLST", Stub::new(ClosingDataConnection).record(0, "pathname").send_data(""));
    registry.register("NOOP", Stub::new(CommandOkay));
    registry.register("PASS", Stub::new(UserLoggedIn).required_params(1).record(0, "password"));
    registry.register("PASV", Stub::new(EnteringPassiveMode).reply_key("pasv", [pasv_address]));
    registry.register("PORT", Stub::new(CommandOkay).required_params(1).record_port_address());
    registry.register("QUIT", Stub::new(ClosingControlConnection).closes_session());
    registry.register("REIN", Stub::new(ServiceReady));
    registry.register("REST", Stub::new(FileActionPending).required_params(1).record(0, "marker"));
    registry.register("RETR", Stub::new(ClosingDataConnection).required_params(1).record(0, "pathname").send_data(""));
    registry.register("RNFR", Stub::new(FileActionPending).required_params(1).record(0, "pathname"));
    registry.register("RNTO", Stub::new(FileActionOkay).required_params(1).record(0, "pathname"));
    registry.register("SITE", Stub::new(CommandOkay).required_params(1).record(0, "parameters"));
    registry.register("SMNT", Stub::new(FileActionOkay).required_params(1).record(0, "pathname"));
    registry.register("STAT", Stub::new(SystemStatus).record(0, "pathname"));
    registry.register("STOR", Stub::new(ClosingDataConnection).required_params(1).record(0, "pathname").capture_upload());
    registry.register("STOU", Stub::new(ClosingDataConnection).capture_upload());
    registry.register("STRU", Stub::new(CommandOkay).required_params(1).record(0, "fileStructure"));
    registry.register("SYST", Stub::new(SystemType).reply_key("syst", [options::DEFAULT_SYSTEM_NAME]));
    registry.register("TYPE", Stub::new(CommandOkay).required_params(1).record(0, "type").record(1, "format"));
    registry.register("USER", Stub::new(NeedPassword).required_params(1).record(0, "username"));

    let aliases: [(&[&str], StubCommandHandler); 5] = [
        (&["CDUP", "XCUP"], Stub::new(CommandOkay)),
        (&["CWD", "XCWD"], Stub::new(FileActionOkay).required_params(1).record(0, "pathname")),
        (&["DELE"], Stub::new(FileActionOkay).required_params(1).record(0, "pathname")),
        (&["MKD", "XMKD"], Stub::new(DirCreated).required_params(1).record(0, "pathname")),
        (&["RMD", "XRMD"], Stub::new(FileActionOkay).required_params(1).record(0, "pathname")),
    ];
    for (names, handler) in aliases {
        let shared: Arc<dyn CommandHandler> = Arc::new(handler);
        for name in names {
            registry.register_shared(name, shared.clone());
        }
    }
    registry.register("PWD", Stub::new(DirCreated).reply_key("pwd", ["/"]));
    registry.register("XPWD", Stub::new(DirCreated).reply_key("pwd", ["/"]));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{Command, Dispatcher, Session};
    use pretty_assertions::assert_eq;

    fn run(dispatcher: &Dispatcher, session: &mut Session, cmd: Command) -> Vec<u32> {
        dispatcher.dispatch(&cmd, session).unwrap();
        session.take_replies().iter().map(|r| r.code().code()).collect()
    }

    #[test]
    fn rest_records_each_marker() {
        let dispatcher = Dispatcher::new(default_registry(), None);
        let mut session = Session::new();
        assert_eq!(run(&dispatcher, &mut session, Command::new("REST", ["marker1"])), vec![350]);
        assert_eq!(run(&dispatcher, &mut session, Command::new("REST", ["marker2"])), vec![350]);

        let recorder = session.recorder();
        assert_eq!(recorder.number_of_invocations("REST"), 2);
        for (n, marker) in ["marker1", "marker2"].iter().enumerate() {
            let invocation = recorder.invocation("REST", n).unwrap();
            assert_eq!(invocation.data_len(), 1);
            assert_eq!(invocation.data("marker"), Some(*marker));
            assert_eq!(invocation.params(), &[marker.to_string()]);
        }
    }

    #[test]
    fn abor_records_no_parameters() {
        let dispatcher = Dispatcher::new(default_registry(), None);
        let mut session = Session::new();
        assert_eq!(run(&dispatcher, &mut session, Command::named("ABOR")), vec![226]);
        let invocation = session.recorder().invocation("ABOR", 0).unwrap();
        assert_eq!(invocation.data_len(), 0);
        assert!(invocation.params().is_empty());
    }

    #[test]
    fn missing_parameter_is_not_recorded() {
        let dispatcher = Dispatcher::new(default_registry(), None);
        let mut session = Session::new();
        assert_eq!(run(&dispatcher, &mut session, Command::named("CWD")), vec![501]);
        assert!(session.recorder().is_empty());
    }

    #[test]
    fn script_plays_in_order_and_repeats_the_last_reply() {
        let mut registry = default_registry();
        registry.register(
            "PASS",
            StubCommandHandler::new(ReplyCode::UserLoggedIn).script(vec![
                ScriptedReply::new(ReplyCode::NotLoggedIn),
                ScriptedReply::with_text(ReplyCode::UserLoggedIn, "welcome"),
            ]),
        );
        let dispatcher = Dispatcher::new(registry, None);
        let mut session = Session::new();
        assert_eq!(run(&dispatcher, &mut session, Command::new("PASS", ["a"])), vec![530]);
        assert_eq!(run(&dispatcher, &mut session, Command::new("PASS", ["b"])), vec![230]);
        dispatcher.dispatch(&Command::new("PASS", ["c"]), &mut session).unwrap();
        assert_eq!(session.last_reply().unwrap().text(), "welcome");
        assert_eq!(session.recorder().number_of_invocations("PASS"), 3);
    }

    #[test]
    fn transfers_send_a_preliminary_reply() {
        let mut registry = default_registry();
        registry.register("RETR", StubCommandHandler::new(ReplyCode::ClosingDataConnection).send_data("abc"));
        let dispatcher = Dispatcher::new(registry, None);
        let mut session = Session::new();
        assert_eq!(run(&dispatcher, &mut session, Command::new("RETR", ["f"])), vec![150, 226]);
        assert_eq!(session.data_channel().last_sent().unwrap(), &Bytes::from("abc"));
    }

    #[test]
    fn stor_captures_the_upload() {
        let dispatcher = Dispatcher::new(default_registry(), None);
        let mut session = Session::new();
        session.data_channel_mut().set_upload("hello");
        assert_eq!(run(&dispatcher, &mut session, Command::new("STOR", ["f.txt"])), vec![150, 226]);
        let invocation = session.recorder().invocation("STOR", 0).unwrap();
        assert_eq!(invocation.data("fileContents"), Some("hello"));
        assert_eq!(invocation.data("pathname"), Some("f.txt"));
    }

    #[test]
    fn port_records_host_and_port() {
        let dispatcher = Dispatcher::new(default_registry(), None);
        let mut session = Session::new();
        let cmd = Command::new("PORT", ["11", "22", "33", "44", "1", "206"]);
        assert_eq!(run(&dispatcher, &mut session, cmd), vec![200]);
        let invocation = session.recorder().invocation("PORT", 0).unwrap();
        assert_eq!(invocation.data("host"), Some("11.22.33.44"));
        assert_eq!(invocation.data("port"), Some("462"));
    }

    #[test]
    fn aliases_share_a_handler() {
        let dispatcher = Dispatcher::new(default_registry(), None);
        let mut session = Session::new();
        assert_eq!(run(&dispatcher, &mut session, Command::new("XCWD", ["/d"])), vec![250]);
        assert_eq!(session.recorder().invocation("XCWD", 0).unwrap().data("pathname"), Some("/d"));
    }

    #[test]
    fn quit_closes_the_session() {
        let dispatcher = Dispatcher::new(default_registry(), None);
        let mut session = Session::new();
        session.attributes.username = Some("alice".into());
        assert_eq!(run(&dispatcher, &mut session, Command::named("QUIT")), vec![221]);
        assert!(session.is_closed());
        assert_eq!(session.attributes.username, None);
    }
}
