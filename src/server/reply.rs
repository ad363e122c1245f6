use std::fmt::{self, Display, Formatter};

/// A reply to the FTP client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A single line reply
    CodeAndMsg {
        /// The reply code
        code: ReplyCode,
        /// The text following the code
        msg: String,
    },
    /// A reply spanning multiple lines, e.g. `STAT` or `HELP` output
    MultiLine {
        /// The reply code
        code: ReplyCode,
        /// The lines; the last one is the closing line
        lines: Vec<String>,
    },
}

/// The reply codes according to RFC 959.
//
// From: https://cr.yp.to/ftp/request.html#response
//
// The three digits form a code. Codes between 100 and 199 indicate marks; codes between 200
// and 399 indicate acceptance; codes between 400 and 599 indicate rejection.
//
// The server can reject any request with code
// - 421 if the server is about to close the connection;
// - 500, 501, 502, or 504 for unacceptable syntax; or
// - 530 if permission is denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
#[allow(missing_docs)]
pub enum ReplyCode {
    RestartMarker = 110,
    InNMinutes = 120,
    ConnectionAlreadyOpen = 125,
    FileStatusOkay = 150,

    CommandOkay = 200,
    CommandOkayNotImplemented = 202,
    SystemStatus = 211,
    DirectoryStatus = 212,
    FileStatus = 213,
    HelpMessage = 214,
    SystemType = 215,
    ServiceReady = 220,
    ClosingControlConnection = 221,
    DataConnectionOpen = 225,
    ClosingDataConnection = 226,
    EnteringPassiveMode = 227,
    EnteringExtendedPassiveMode = 229,
    UserLoggedIn = 230,
    FileActionOkay = 250,
    DirCreated = 257,

    NeedPassword = 331,
    NeedAccount = 332,
    FileActionPending = 350,

    ServiceNotAvailable = 421,
    CantOpenDataConnection = 425,
    ConnectionClosed = 426,
    TransientFileError = 450,
    LocalError = 451,
    OutOfSpace = 452,

    CommandSyntaxError = 500,
    ParameterSyntaxError = 501,
    CommandNotImplemented = 502,
    BadCommandSequence = 503,
    CommandNotImplementedForParameter = 504,
    NotLoggedIn = 530,
    NeedAccountToStore = 532,
    FileError = 550,
    PageTypeUnknown = 551,
    ExceededStorageAllocation = 552,
    BadFileName = 553,
}

impl ReplyCode {
    /// The numeric three digit code.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// The key of this code's default text in a [`ReplyText`](super::ReplyText) catalog. It is
    /// the code itself, e.g. `"350"`.
    pub fn text_key(self) -> String {
        self.code().to_string()
    }

    /// Returns true for the 1yz, 2yz and 3yz codes.
    pub fn is_positive(self) -> bool {
        self.code() < 400
    }
}

impl Display for ReplyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Reply {
    /// Creates a single line reply.
    pub fn new(code: ReplyCode, message: &str) -> Self {
        Reply::CodeAndMsg {
            code,
            msg: message.to_string(),
        }
    }

    /// Creates a single line reply from an owned message.
    pub fn new_with_string(code: ReplyCode, msg: String) -> Self {
        Reply::CodeAndMsg { code, msg }
    }

    /// Creates a multi line reply.
    pub fn new_multiline<I>(code: ReplyCode, lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: std::fmt::Display,
    {
        Reply::MultiLine {
            code,
            lines: lines.into_iter().map(|item| format!("{}", item)).collect(),
        }
    }

    /// The reply code.
    pub fn code(&self) -> ReplyCode {
        match self {
            Reply::CodeAndMsg { code, .. } | Reply::MultiLine { code, .. } => *code,
        }
    }

    /// The reply text. Lines of a multi line reply are joined with `\n`.
    pub fn text(&self) -> String {
        match self {
            Reply::CodeAndMsg { msg, .. } => msg.clone(),
            Reply::MultiLine { lines, .. } => lines.join("\n"),
        }
    }
}

impl Display for Reply {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.text())
    }
}
