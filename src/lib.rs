//! mockftp is a mock FTP server for testing FTP client code.
//!
//! It speaks the FTP control channel but never touches a real filesystem. Two operating modes
//! exist and are chosen when the server is constructed:
//!
//! - **Stub mode**: every command handler plays back a fixed (optionally scripted) reply and
//!   records each invocation so that tests can assert on exactly what the client sent.
//! - **Fake mode**: command handlers keep consistent simulated state in an in-memory
//!   [`FileSystem`](storage::FileSystem) with user accounts and permissions, so that the effects of
//!   commands compose across a session.
//!
//! The data channel is simulated at the metadata level only: file contents that a client would
//! upload or download are exchanged through an in-memory [`DataChannel`](server::DataChannel) on
//! the [`Session`](server::Session).
//!
//! # Example
//!
//! ```rust
//! use mockftp::{auth::UserAccount, server::{Command, Environment, MockFtpServer}, storage::{Entry, FileSystem}};
//!
//! let mut fs = FileSystem::new();
//! fs.add(Entry::directory("/home")).unwrap();
//! fs.add(Entry::file("/home/readme.txt", "hello")).unwrap();
//!
//! let env = Environment::new(fs).user_account(UserAccount::new("alice", "secret", "/home"));
//! let server = MockFtpServer::fake(env);
//!
//! let dispatcher = server.dispatcher();
//! let mut session = server.new_session();
//! dispatcher.dispatch(&Command::new("USER", ["alice"]), &mut session).unwrap();
//! dispatcher.dispatch(&Command::new("PASS", ["secret"]), &mut session).unwrap();
//! assert_eq!(session.last_reply().unwrap().code().code(), 230);
//! ```
//!
//! To run over TCP, call [`MockFtpServer::listen`](server::MockFtpServer::listen) from within a
//! tokio runtime.

pub mod auth;
pub mod server;
pub mod storage;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
