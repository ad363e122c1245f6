use super::path;
use crate::auth::UserAccount;
use bitflags::bitflags;
use bytes::Bytes;
use chrono::prelude::{DateTime, Utc};
use std::fmt::{self, Display, Formatter, Write};

bitflags! {
    /// Unix style permissions of an [`Entry`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u32 {
        /// Owner may read
        const USER_READ = 0o400;
        /// Owner may write
        const USER_WRITE = 0o200;
        /// Owner may execute
        const USER_EXECUTE = 0o100;
        /// Group may read
        const GROUP_READ = 0o040;
        /// Group may write
        const GROUP_WRITE = 0o020;
        /// Group may execute
        const GROUP_EXECUTE = 0o010;
        /// Others may read
        const WORLD_READ = 0o004;
        /// Others may write
        const WORLD_WRITE = 0o002;
        /// Others may execute
        const WORLD_EXECUTE = 0o001;
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::all()
    }
}

impl Permissions {
    /// Parses the nine character `ls` notation, e.g. `rwxr-x---`.
    pub fn parse(s: &str) -> Option<Permissions> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 9 {
            return None;
        }
        let mut bits = 0u32;
        for (i, c) in chars.iter().enumerate() {
            let expected = ['r', 'w', 'x'][i % 3];
            match *c {
                '-' => {}
                c if c == expected => bits |= 1 << (8 - i),
                _ => return None,
            }
        }
        Some(Permissions::from_bits_truncate(bits))
    }
}

impl Display for Permissions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for i in 0..9 {
            let set = self.bits() & (1 << (8 - i)) != 0;
            f.write_char(if set { ['r', 'w', 'x'][i % 3] } else { '-' })?;
        }
        Ok(())
    }
}

/// The kind of access a command needs on an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// List a directory or download a file
    Read,
    /// Create, change or remove children of a directory, or overwrite a file
    Write,
    /// Enter a directory
    Execute,
}

/// What an [`Entry`] is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file and its contents.
    File {
        /// The bytes a `RETR` sends
        contents: Bytes,
    },
    /// A directory. Children are found by path, not stored here.
    Directory,
}

/// A file or directory in the simulated filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    path: String,
    kind: EntryKind,
    permissions: Permissions,
    owner: String,
    group: String,
    last_modified: DateTime<Utc>,
}

impl Entry {
    /// Creates a file entry at `path` with the given contents.
    pub fn file(path: &str, contents: impl Into<Bytes>) -> Entry {
        Entry::new(path, EntryKind::File { contents: contents.into() })
    }

    /// Creates a directory entry at `path`.
    pub fn directory(path: &str) -> Entry {
        Entry::new(path, EntryKind::Directory)
    }

    fn new(path: &str, kind: EntryKind) -> Entry {
        Entry {
            path: path::normalize(path),
            kind,
            permissions: Permissions::default(),
            owner: String::new(),
            group: String::new(),
            last_modified: Utc::now(),
        }
    }

    /// Sets the permissions.
    pub fn with_permissions(mut self, permissions: Permissions) -> Entry {
        self.permissions = permissions;
        self
    }

    /// Sets the owning user.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Entry {
        self.owner = owner.into();
        self
    }

    /// Sets the owning group.
    pub fn with_group(mut self, group: impl Into<String>) -> Entry {
        self.group = group.into();
        self
    }

    /// Sets the last modification time.
    pub fn with_last_modified(mut self, time: DateTime<Utc>) -> Entry {
        self.last_modified = time;
        self
    }

    /// The normalized absolute path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The last path segment.
    pub fn name(&self) -> &str {
        path::name(&self.path)
    }

    /// File or directory.
    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    /// Returns true if this is a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    /// Returns true if this is a regular file.
    pub fn is_file(&self) -> bool {
        !self.is_directory()
    }

    /// The contents of a file. Directories have none.
    pub fn contents(&self) -> Option<&Bytes> {
        match &self.kind {
            EntryKind::File { contents } => Some(contents),
            EntryKind::Directory => None,
        }
    }

    /// The size in bytes. Directories report 0.
    pub fn size(&self) -> u64 {
        self.contents().map(|c| c.len() as u64).unwrap_or(0)
    }

    /// The permission bits.
    pub fn permissions(&self) -> Permissions {
        self.permissions
    }

    /// The owning user.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The owning group.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The last modification time.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Returns true if `user` has the given access, choosing the owner, group or world triplet
    /// the same way a unix filesystem does.
    pub fn allows(&self, user: &UserAccount, access: Access) -> bool {
        let shift = if !self.owner.is_empty() && self.owner == user.username() {
            6
        } else if !self.group.is_empty() && user.is_member_of(&self.group) {
            3
        } else {
            0
        };
        let bit = match access {
            Access::Read => 0o4,
            Access::Write => 0o2,
            Access::Execute => 0o1,
        };
        self.permissions.bits() & (bit << shift) != 0
    }

    pub(super) fn set_contents(&mut self, contents: Bytes) {
        self.kind = EntryKind::File { contents };
        self.last_modified = Utc::now();
    }

    pub(super) fn set_path(&mut self, path: String) {
        self.path = path;
    }
}

// Formats the entry as a line of `ls -l` output.
impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{filetype}{permissions} {links:>4} {owner:<8} {group:<8} {size:>12} {modified} {name}",
            filetype = if self.is_directory() { "d" } else { "-" },
            permissions = self.permissions,
            links = 1,
            owner = if self.owner.is_empty() { "none" } else { &self.owner },
            group = if self.group.is_empty() { "none" } else { &self.group },
            size = self.size(),
            modified = self.last_modified.format("%b %d %H:%M"),
            name = self.name(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn permissions_roundtrip_notation() {
        let p = Permissions::parse("rwxr-x---").unwrap();
        assert_eq!(p.bits(), 0o750);
        assert_eq!(p.to_string(), "rwxr-x---");
        assert_eq!(Permissions::parse("rwz------"), None);
        assert_eq!(Permissions::parse("rwx"), None);
    }

    #[test]
    fn allows_picks_the_right_triplet() {
        let alice = UserAccount::new("alice", "pw", "/").group("staff");
        let bob = UserAccount::new("bob", "pw", "/").group("staff");
        let eve = UserAccount::new("eve", "pw", "/");
        let entry = Entry::file("/f", "x")
            .with_owner("alice")
            .with_group("staff")
            .with_permissions(Permissions::parse("rw-r-----").unwrap());

        assert!(entry.allows(&alice, Access::Write));
        assert!(entry.allows(&bob, Access::Read));
        assert!(!entry.allows(&bob, Access::Write));
        assert!(!entry.allows(&eve, Access::Read));
    }

    #[test]
    fn listing_line() {
        let time = Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 0).unwrap();
        let entry = Entry::file("/pub/notes.txt", "12345")
            .with_owner("alice")
            .with_group("staff")
            .with_permissions(Permissions::parse("rw-r--r--").unwrap())
            .with_last_modified(time);
        assert_eq!(
            entry.to_string(),
            "-rw-r--r--    1 alice    staff               5 Mar 07 14:05 notes.txt"
        );
    }
}
