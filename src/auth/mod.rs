//! User accounts known to a fake-mode server.
//!
//! Authentication is simulated: passwords are compared in plain text and no external identity
//! provider is ever consulted. A [`UserAccount`] also carries the home directory that becomes the
//! session's current directory after login and the groups used for permission checks against the
//! simulated [`FileSystem`](crate::storage::FileSystem).

mod user;

pub use user::UserAccount;
