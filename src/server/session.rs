//! The per-connection state of an FTP session.

use super::{
    error::{CommandError, CommandErrorKind},
    recorder::InvocationRecorder,
    reply::{Reply, ReplyCode},
    reply_text::{DefaultReplyText, ReplyText},
};
use crate::{auth::UserAccount, storage::path};
use bytes::Bytes;
use std::{
    fmt::{self, Display, Formatter},
    net::SocketAddr,
    sync::Arc,
};
use uuid::Uuid;

/// The representation type selected with `TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferType {
    /// `A`
    #[default]
    Ascii,
    /// `E`
    Ebcdic,
    /// `I`, binary
    Image,
    /// `L`
    Local,
}

/// The transfer mode selected with `MODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferMode {
    /// `S`
    #[default]
    Stream,
    /// `B`
    Block,
    /// `C`
    Compressed,
}

/// The file structure selected with `STRU`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileStructure {
    /// `F`
    #[default]
    File,
    /// `R`
    Record,
    /// `P`
    Page,
}

/// How the (simulated) data connection for the next transfer will be made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataConnection {
    /// The client connects to this address, announced by `PASV` or `EPSV`.
    Passive(SocketAddr),
    /// The server connects to this address, given by `PORT` or `EPRT`.
    Active(SocketAddr),
}

/// The typed session attributes.
///
/// An attribute that gates a later command must be present when that command runs: `ACCT` needs
/// `username`, `RNTO` needs `rename_from`, `PWD` needs `current_directory`. Handlers check this
/// with [`require_attribute`](super::require_attribute).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionAttributes {
    /// Set by `USER`.
    pub username: Option<String>,
    /// Set by `ACCT`.
    pub account_name: Option<String>,
    /// The logged in user, set once login completes.
    pub user_account: Option<UserAccount>,
    /// A user whose password was accepted but who still has to send `ACCT`.
    pub pending_login: Option<UserAccount>,
    /// The working directory, by path.
    pub current_directory: Option<String>,
    /// Set by `RNFR`, consumed by `RNTO`.
    pub rename_from: Option<String>,
    /// Set by `REST`, consumed by the next transfer.
    pub restart_marker: Option<String>,
    /// Set by `TYPE`.
    pub transfer_type: TransferType,
    /// Set by `MODE`.
    pub transfer_mode: TransferMode,
    /// Set by `STRU`.
    pub file_structure: FileStructure,
    /// Set by `PASV`, `EPSV`, `PORT` or `EPRT`, consumed by the next transfer.
    pub data_connection: Option<DataConnection>,
}

impl SessionAttributes {
    /// The restart offset for the next transfer. Markers that are not a byte offset count as 0.
    pub fn restart_offset(&self) -> u64 {
        self.restart_marker.as_deref().and_then(|m| m.trim().parse().ok()).unwrap_or(0)
    }

    /// Forgets who is logged in, as a new `USER` does. Transfer settings are kept.
    pub fn clear_login(&mut self) {
        self.username = None;
        self.account_name = None;
        self.user_account = None;
        self.pending_login = None;
        self.current_directory = None;
        self.rename_from = None;
    }
}

/// The in-memory stand-in for the data connection.
///
/// Tests stage the bytes a client would upload with [`DataChannel::set_upload`] and inspect what
/// the server sent with [`DataChannel::sent`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataChannel {
    upload: Bytes,
    sent: Vec<Bytes>,
}

impl DataChannel {
    /// Stages the bytes the next upload (`STOR`, `STOU`, `APPE`) will receive.
    pub fn set_upload(&mut self, data: impl Into<Bytes>) {
        self.upload = data.into();
    }

    /// Takes the staged upload, leaving nothing behind.
    pub fn take_upload(&mut self) -> Bytes {
        std::mem::take(&mut self.upload)
    }

    /// Records bytes the server sends during a download or listing.
    pub fn send(&mut self, data: impl Into<Bytes>) {
        self.sent.push(data.into());
    }

    /// Everything sent, one element per transfer.
    pub fn sent(&self) -> &[Bytes] {
        &self.sent
    }

    /// The last transfer's bytes.
    pub fn last_sent(&self) -> Option<&Bytes> {
        self.sent.last()
    }
}

/// The state of one client connection.
///
/// A session is owned by exactly one connection and never shared. Replies that handlers send are
/// queued in an outbox that the transport drains with [`Session::take_replies`].
#[derive(Debug)]
pub struct Session {
    /// The typed attributes.
    pub attributes: SessionAttributes,
    replies: Vec<Reply>,
    reply_text: Option<Arc<dyn ReplyText>>,
    data_channel: DataChannel,
    recorder: InvocationRecorder,
    closed: bool,
    trace_id: Uuid,
    logger: slog::Logger,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    /// Creates a session that uses the default English reply texts and discards log output.
    pub fn new() -> Self {
        let trace_id = Uuid::new_v4();
        Session {
            attributes: SessionAttributes::default(),
            replies: vec![],
            reply_text: Some(Arc::new(DefaultReplyText)),
            data_channel: DataChannel::default(),
            recorder: InvocationRecorder::new(),
            closed: false,
            trace_id,
            logger: slog::Logger::root(slog::Discard, slog::o!("trace-id" => trace_id.to_string())),
        }
    }

    /// Installs the text catalog, or removes it with `None`.
    pub fn reply_text(mut self, reply_text: Option<Arc<dyn ReplyText>>) -> Self {
        self.reply_text = reply_text;
        self
    }

    /// Sets the logger; a `trace-id` key is added to it.
    pub fn logger(mut self, logger: slog::Logger) -> Self {
        self.logger = logger.new(slog::o!("trace-id" => self.trace_id.to_string()));
        self
    }

    /// Sends a reply whose text is resolved from `key` with `args`.
    ///
    /// Fails with a fatal configuration fault when no text catalog is installed or the catalog
    /// lacks the key.
    pub fn send_reply(&mut self, code: ReplyCode, key: &str, args: &[String]) -> Result<(), CommandError> {
        let text = self.resolve_text(key, args)?;
        self.push_reply(Reply::new_with_string(code, text));
        Ok(())
    }

    /// Sends a reply with the default text of `code`.
    pub fn send_default_reply(&mut self, code: ReplyCode) -> Result<(), CommandError> {
        self.send_reply(code, &code.text_key(), &[])
    }

    /// Sends a multi line reply: the text of `key` opens it, `body` follows and the default text
    /// of `code` closes it.
    pub fn send_multiline_reply(&mut self, code: ReplyCode, key: &str, args: &[String], body: Vec<String>) -> Result<(), CommandError> {
        let mut lines = vec![self.resolve_text(key, args)?];
        lines.extend(body);
        lines.push(self.resolve_text(&code.text_key(), &[])?);
        self.push_reply(Reply::new_multiline(code, lines));
        Ok(())
    }

    /// Sends a reply with literal text, bypassing the catalog.
    pub fn send_reply_text(&mut self, code: ReplyCode, text: impl Into<String>) {
        self.push_reply(Reply::new_with_string(code, text.into()));
    }

    fn resolve_text(&self, key: &str, args: &[String]) -> Result<String, CommandError> {
        let catalog = self
            .reply_text
            .as_ref()
            .ok_or_else(|| CommandError::from(CommandErrorKind::ConfigurationFault("no reply text catalog installed".to_string())))?;
        catalog
            .resolve(key, args)
            .ok_or_else(|| CommandErrorKind::ConfigurationFault(format!("reply text catalog has no text for key '{}'", key)).into())
    }

    fn push_reply(&mut self, reply: Reply) {
        slog::debug!(self.logger, "Reply {}", reply);
        self.replies.push(reply);
    }

    /// The replies not yet taken by the transport.
    pub fn replies(&self) -> &[Reply] {
        &self.replies
    }

    /// The most recent reply not yet taken by the transport.
    pub fn last_reply(&self) -> Option<&Reply> {
        self.replies.last()
    }

    /// Drains the outbox.
    pub fn take_replies(&mut self) -> Vec<Reply> {
        std::mem::take(&mut self.replies)
    }

    /// Resolves `path` against the current directory. Without a current directory the root is
    /// used.
    pub fn resolve_path(&self, path: &str) -> String {
        path::join(self.attributes.current_directory.as_deref().unwrap_or(path::ROOT), path)
    }

    /// The simulated data channel.
    pub fn data_channel(&self) -> &DataChannel {
        &self.data_channel
    }

    /// The simulated data channel, for staging uploads.
    pub fn data_channel_mut(&mut self) -> &mut DataChannel {
        &mut self.data_channel
    }

    /// The invocations recorded during this session.
    pub fn recorder(&self) -> &InvocationRecorder {
        &self.recorder
    }

    /// The recorder, for handlers that record invocations.
    pub fn recorder_mut(&mut self) -> &mut InvocationRecorder {
        &mut self.recorder
    }

    /// Gives up the session, returning what it recorded.
    pub fn into_recorder(self) -> InvocationRecorder {
        self.recorder
    }

    /// Resets every attribute, as `REIN` does.
    pub fn reset(&mut self) {
        self.attributes = SessionAttributes::default();
    }

    /// Clears every attribute and marks the session as finished, as `QUIT` does.
    pub fn close(&mut self) {
        self.reset();
        self.closed = true;
    }

    /// Returns true once the session was closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The unique id of this session, also present in its log output.
    pub fn trace_id(&self) -> Uuid {
        self.trace_id
    }

    /// The session's logger.
    pub fn log(&self) -> &slog::Logger {
        &self.logger
    }
}

impl Display for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "session {} (user: {}, cwd: {})",
            self.trace_id,
            self.attributes.username.as_deref().unwrap_or("-"),
            self.attributes.current_directory.as_deref().unwrap_or("-")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn send_reply_resolves_text() {
        let mut session = Session::new();
        session.send_reply(ReplyCode::UserLoggedIn, "acct", &["alice".to_string()]).unwrap();
        assert_eq!(session.last_reply().unwrap().text(), "Account accepted for user alice.");
        assert_eq!(session.take_replies().len(), 1);
        assert!(session.replies().is_empty());
    }

    #[test]
    fn missing_catalog_is_a_fatal_fault() {
        let mut session = Session::new().reply_text(None);
        let err = session.send_default_reply(ReplyCode::CommandOkay).unwrap_err();
        assert!(err.is_fatal());
        assert!(session.replies().is_empty());
    }

    #[test]
    fn missing_key_is_a_fatal_fault() {
        let mut session = Session::new();
        assert!(session.send_reply(ReplyCode::CommandOkay, "no.such.key", &[]).unwrap_err().is_fatal());
    }

    #[test]
    fn restart_offset_parses_numeric_markers() {
        let mut attributes = SessionAttributes::default();
        assert_eq!(attributes.restart_offset(), 0);
        attributes.restart_marker = Some("1024".to_string());
        assert_eq!(attributes.restart_offset(), 1024);
        attributes.restart_marker = Some("marker1".to_string());
        assert_eq!(attributes.restart_offset(), 0);
    }

    #[test]
    fn close_clears_attributes() {
        let mut session = Session::new();
        session.attributes.username = Some("alice".to_string());
        session.attributes.rename_from = Some("/a".to_string());
        session.close();
        assert_eq!(session.attributes, SessionAttributes::default());
        assert!(session.is_closed());
    }

    #[test]
    fn resolve_path_uses_current_directory() {
        let mut session = Session::new();
        assert_eq!(session.resolve_path("a.txt"), "/a.txt");
        session.attributes.current_directory = Some("/home/alice".to_string());
        assert_eq!(session.resolve_path("a.txt"), "/home/alice/a.txt");
        assert_eq!(session.resolve_path("/etc"), "/etc");
    }
}
