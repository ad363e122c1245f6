use derive_more::Display;
use thiserror::Error;

/// The Error returned by operations on the simulated [`FileSystem`](super::FileSystem).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("filesystem error: {kind}: {path}")]
pub struct Error {
    kind: ErrorKind,
    path: String,
}

impl Error {
    /// Creates a new filesystem error for the given path.
    pub fn new(kind: ErrorKind, path: impl Into<String>) -> Error {
        Error { kind, path: path.into() }
    }

    /// What went wrong.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The path the operation failed on.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// The `ErrorKind` variants that can be produced by the simulated filesystem.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Display)]
pub enum ErrorKind {
    /// 550 No entry exists at the path.
    #[display("No such file or directory")]
    NotFound,
    /// 550 An entry already exists at the path.
    #[display("Already exists")]
    AlreadyExists,
    /// 550 A directory was expected.
    #[display("Not a directory")]
    NotADirectory,
    /// 550 A file was expected.
    #[display("Not a file")]
    NotAFile,
    /// 550 The directory still has children.
    #[display("Directory not empty")]
    DirectoryNotEmpty,
    /// 553 The name can not be used, e.g. because its parent directory is missing.
    #[display("File name not allowed")]
    FileNameNotAllowed,
}
