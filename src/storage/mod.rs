//! The in-memory filesystem simulated by a fake-mode server.
//!
//! Entries live in a map keyed by their normalized absolute path. Nothing outside this module
//! holds references into the tree: sessions remember directories by path and resolve them again
//! on every use, so renames and deletes are visible immediately and never leave anything dangling.
//!
//! Sessions share one filesystem through a [`SharedFileSystem`]. Command handlers hold its lock
//! for the whole command, which makes every create, delete and rename atomic with respect to
//! other sessions.

mod entry;
mod error;
pub mod path;

pub use entry::{Access, Entry, EntryKind, Permissions};
pub use error::{Error, ErrorKind};

use bytes::{Bytes, BytesMut};
use std::{
    collections::BTreeMap,
    result,
    sync::{Arc, Mutex},
};

/// Result type used by the filesystem operations
pub type Result<T> = result::Result<T, Error>;

/// A [`FileSystem`] shared between the sessions of one server.
pub type SharedFileSystem = Arc<Mutex<FileSystem>>;

/// An in-memory tree of files and directories.
#[derive(Debug, Clone)]
pub struct FileSystem {
    entries: BTreeMap<String, Entry>,
}

impl Default for FileSystem {
    fn default() -> Self {
        FileSystem::new()
    }
}

impl FileSystem {
    /// Creates a filesystem that contains only the root directory.
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(path::ROOT.to_string(), Entry::directory(path::ROOT));
        FileSystem { entries }
    }

    /// Wraps this filesystem so that it can be shared between sessions.
    pub fn shared(self) -> SharedFileSystem {
        Arc::new(Mutex::new(self))
    }

    /// Looks up the entry at `path`. A missing entry is reported as `None`, never as an error.
    pub fn resolve(&self, path: &str) -> Option<&Entry> {
        self.entries.get(&path::normalize(path))
    }

    /// Returns true if an entry exists at `path`.
    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_some()
    }

    /// Returns true if a directory exists at `path`.
    pub fn is_directory(&self, path: &str) -> bool {
        self.resolve(path).is_some_and(Entry::is_directory)
    }

    /// Returns true if a regular file exists at `path`.
    pub fn is_file(&self, path: &str) -> bool {
        self.resolve(path).is_some_and(Entry::is_file)
    }

    /// Adds an entry. Its parent directory must already exist.
    pub fn add(&mut self, entry: Entry) -> Result<()> {
        let path = entry.path().to_string();
        if self.entries.contains_key(&path) {
            return Err(Error::new(ErrorKind::AlreadyExists, path));
        }
        match path::parent(&path) {
            Some(parent) if self.is_directory(&parent) => {}
            _ => return Err(Error::new(ErrorKind::FileNameNotAllowed, path)),
        }
        self.entries.insert(path, entry);
        Ok(())
    }

    /// Adds an entry, creating any missing parent directories first. Meant for seeding a
    /// filesystem before a test scenario runs.
    pub fn add_with_parents(&mut self, entry: Entry) -> Result<()> {
        let mut missing = vec![];
        let mut current = path::parent(entry.path());
        while let Some(dir) = current {
            match self.resolve(&dir) {
                Some(e) if e.is_directory() => break,
                Some(_) => return Err(Error::new(ErrorKind::NotADirectory, dir)),
                None => {
                    current = path::parent(&dir);
                    missing.push(dir);
                }
            }
        }
        for dir in missing.into_iter().rev() {
            self.add(Entry::directory(&dir))?;
        }
        self.add(entry)
    }

    /// Lists the direct children of the directory at `path`, ordered by name.
    pub fn children(&self, path: &str) -> Result<Vec<&Entry>> {
        let dir = path::normalize(path);
        match self.entries.get(&dir) {
            None => return Err(Error::new(ErrorKind::NotFound, dir)),
            Some(e) if !e.is_directory() => return Err(Error::new(ErrorKind::NotADirectory, dir)),
            Some(_) => {}
        }
        let children = self
            .entries
            .values()
            .filter(|e| path::parent(e.path()).as_deref() == Some(dir.as_str()))
            .collect();
        Ok(children)
    }

    /// Removes the entry at `path`. Directories must be empty and the root can not be removed.
    pub fn delete(&mut self, path: &str) -> Result<Entry> {
        let path = path::normalize(path);
        if path == path::ROOT {
            return Err(Error::new(ErrorKind::FileNameNotAllowed, path));
        }
        if !self.children(&path).map(|c| c.is_empty()).unwrap_or(true) {
            return Err(Error::new(ErrorKind::DirectoryNotEmpty, path));
        }
        self.entries.remove(&path).ok_or(Error::new(ErrorKind::NotFound, path))
    }

    /// Moves the entry at `from`, together with everything below it, to `to`.
    pub fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        let from = path::normalize(from);
        let to = path::normalize(to);
        if !self.entries.contains_key(&from) {
            return Err(Error::new(ErrorKind::NotFound, from));
        }
        if self.entries.contains_key(&to) {
            return Err(Error::new(ErrorKind::AlreadyExists, to));
        }
        if from == path::ROOT || path::is_within(&to, &from) {
            return Err(Error::new(ErrorKind::FileNameNotAllowed, to));
        }
        match path::parent(&to) {
            Some(parent) if self.is_directory(&parent) => {}
            _ => return Err(Error::new(ErrorKind::FileNameNotAllowed, to)),
        }

        let moved: Vec<String> = self.entries.keys().filter(|p| path::is_within(p, &from)).cloned().collect();
        for old in moved {
            if let Some(mut entry) = self.entries.remove(&old) {
                let new = format!("{}{}", to, &old[from.len()..]);
                entry.set_path(new.clone());
                self.entries.insert(new, entry);
            }
        }
        Ok(())
    }

    /// Replaces the contents of the file at `path`, creating it if it does not exist yet.
    ///
    /// With an `offset`, existing contents up to that byte are kept and `data` is written after
    /// them, the way a restarted upload behaves.
    pub fn write(&mut self, path: &str, data: Bytes, offset: Option<u64>, template: impl FnOnce(&str) -> Entry) -> Result<()> {
        let path = path::normalize(path);
        match self.entries.get_mut(&path) {
            Some(entry) if entry.is_directory() => Err(Error::new(ErrorKind::NotAFile, path)),
            Some(entry) => {
                let contents = match (offset, entry.contents()) {
                    (Some(offset), Some(existing)) => {
                        let keep = existing.len().min(offset as usize);
                        let mut buf = BytesMut::from(&existing[..keep]);
                        buf.extend_from_slice(&data);
                        buf.freeze()
                    }
                    _ => data,
                };
                entry.set_contents(contents);
                Ok(())
            }
            None => {
                let mut entry = template(&path);
                entry.set_contents(data);
                self.add(entry)
            }
        }
    }

    /// Appends `data` to the file at `path`, creating it if it does not exist yet.
    pub fn append(&mut self, path: &str, data: Bytes, template: impl FnOnce(&str) -> Entry) -> Result<()> {
        let existing = self.resolve(path).and_then(Entry::contents).map(|c| c.len() as u64);
        match existing {
            Some(len) => self.write(path, data, Some(len), template),
            None => self.write(path, data, None, template),
        }
    }

    /// Returns a path in `dir` that is not in use yet, derived from `base`.
    pub fn unique_path(&self, dir: &str, base: &str) -> String {
        let candidate = path::join(dir, base);
        if !self.exists(&candidate) {
            return candidate;
        }
        (1..)
            .map(|n| path::join(dir, &format!("{}.{}", base, n)))
            .find(|p| !self.exists(p))
            .unwrap_or(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seeded() -> FileSystem {
        let mut fs = FileSystem::new();
        fs.add_with_parents(Entry::file("/a/b/c.txt", "abc")).unwrap();
        fs.add(Entry::directory("/other")).unwrap();
        fs
    }

    #[test]
    fn resolve_missing_is_stable() {
        let fs = seeded();
        assert!(fs.resolve("/nope").is_none());
        assert!(fs.resolve("/nope").is_none());
        assert!(fs.is_directory("/a/b"));
        assert!(fs.is_file("/a/b/c.txt"));
    }

    #[test]
    fn add_requires_parent() {
        let mut fs = FileSystem::new();
        let err = fs.add(Entry::file("/x/y", "")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNameNotAllowed);
        let err = fs.add(Entry::directory("/")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[test]
    fn children_are_direct_only() {
        let fs = seeded();
        let names: Vec<&str> = fs.children("/").unwrap().into_iter().map(Entry::name).collect();
        assert_eq!(names, vec!["a", "other"]);
        assert_eq!(fs.children("/a/b/c.txt").unwrap_err().kind(), ErrorKind::NotADirectory);
    }

    #[test]
    fn delete_non_empty_directory_fails() {
        let mut fs = seeded();
        assert_eq!(fs.delete("/a").unwrap_err().kind(), ErrorKind::DirectoryNotEmpty);
        fs.delete("/a/b/c.txt").unwrap();
        fs.delete("/a/b").unwrap();
        assert!(!fs.exists("/a/b"));
        assert_eq!(fs.delete("/").unwrap_err().kind(), ErrorKind::FileNameNotAllowed);
    }

    #[test]
    fn rename_moves_subtree() {
        let mut fs = seeded();
        fs.rename("/a", "/other/z").unwrap();
        assert!(!fs.exists("/a"));
        assert!(fs.is_directory("/other/z/b"));
        assert_eq!(fs.resolve("/other/z/b/c.txt").unwrap().path(), "/other/z/b/c.txt");
    }

    #[test]
    fn rename_into_itself_fails() {
        let mut fs = seeded();
        assert_eq!(fs.rename("/a", "/a/b/d").unwrap_err().kind(), ErrorKind::FileNameNotAllowed);
        assert_eq!(fs.rename("/missing", "/b").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(fs.rename("/a", "/other").unwrap_err().kind(), ErrorKind::AlreadyExists);
    }

    #[test]
    fn write_with_offset_and_append() {
        let mut fs = seeded();
        fs.write("/a/b/c.txt", Bytes::from_static(b"XY"), Some(1), Entry::directory).unwrap();
        assert_eq!(fs.resolve("/a/b/c.txt").unwrap().contents().unwrap(), &Bytes::from_static(b"aXY"));
        fs.append("/a/b/c.txt", Bytes::from_static(b"!"), |p| Entry::file(p, "")).unwrap();
        assert_eq!(fs.resolve("/a/b/c.txt").unwrap().size(), 4);
        fs.append("/a/new.txt", Bytes::from_static(b"n"), |p| Entry::file(p, "")).unwrap();
        assert!(fs.is_file("/a/new.txt"));
    }

    #[test]
    fn unique_path_skips_existing() {
        let fs = seeded();
        assert_eq!(fs.unique_path("/a/b", "c.txt"), "/a/b/c.txt.1");
        assert_eq!(fs.unique_path("/a/b", "d.txt"), "/a/b/d.txt");
    }
}
