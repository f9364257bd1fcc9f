//! This module provides the in-memory mock file system: whole-file reads and writes,
//! copy, move, delete and timestamp access over a [`Store`] keyed by normalized paths.

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::clock::{SharedClock, SystemClock};
use crate::core::{FsBackend, FsError, NormalizedPath, Result, TimeKind, normalize};
use crate::encoding::{Encoding, split_lines};
use crate::vfs::{Entry, Store};

/// A file system that lives entirely in memory.
///
/// `MockFS` stands in for a real disk in tests. Paths follow Windows conventions
/// (drive letters, UNC shares, `\` or `/` separators) and are matched case-insensitively,
/// so `c:\something\demo.txt` and `C:/SomeThing/Demo.TXT` name the same file.
///
/// ### Internal state
///
/// * `store` — every file, keyed by [`NormalizedPath`]. Raw caller paths never become keys.
/// * `default_encoding` — used by text operations called with `None`; UTF-8 without BOM
///   unless changed via `set_default_encoding()`.
/// * `clock` — source of the timestamps operations set on their own; the system clock
///   unless changed via `set_clock()`.
///
/// ### Timestamps
///
/// - Writing a new file stamps all three times with `clock.now()`.
/// - Rewriting, appending and copying onto an existing file refresh last-write and
///   last-access time and keep the creation time.
/// - Copying to a new destination creates a fresh entry: all three times are `clock.now()`.
/// - Moving keeps all three times.
/// - Reading changes nothing.
///
/// ### Thread Safety
///
/// Mutating operations take `&mut self`. To share one instance between threads, wrap it
/// in a `Mutex` or `RwLock`.
///
/// ### Example
///
/// ```
/// use vfs_mock::{Entry, FsBackend, MockFS};
///
/// let mut fs = MockFS::with_files([(r"c:\something\demo.txt", Entry::from_text("Demo"))])
///     .unwrap();
///
/// fs.append_text(r"C:\SOMETHING\demo.txt", " text", None).unwrap();
/// assert_eq!(fs.read_text("c:/something/demo.txt", None).unwrap(), "Demo text");
///
/// fs.mv(r"c:\something\demo.txt", r"c:\other\demo.txt").unwrap();
/// assert!(!fs.exists(r"c:\something\demo.txt"));
/// ```
#[derive(Debug)]
pub struct MockFS {
    store: Store,
    default_encoding: Encoding,
    clock: SharedClock,
}

impl MockFS {
    /// Creates an empty file system.
    pub fn new() -> Self {
        Self {
            store: Store::new(),
            default_encoding: Encoding::default(),
            clock: SystemClock::shared(),
        }
    }

    /// Creates a file system holding `files`.
    /// Entries are stored as given, timestamps included: the `Entry::from_*` constructors
    /// stamp the system time, not this file system's clock (which is still the default
    /// `SystemClock` here). Seeds that need exact times are built with `Entry::new(bytes, t)`
    /// or the `Entry::with_*` builders.
    /// An error is returned if one of the paths is malformed.
    pub fn with_files<I, P, E>(files: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, E)>,
        P: AsRef<str>,
        E: Into<Entry>,
    {
        let mut fs = Self::new();
        for (path, entry) in files {
            fs.add_file(path, entry)?;
        }
        Ok(fs)
    }

    pub fn default_encoding(&self) -> Encoding {
        self.default_encoding
    }

    /// Changes the encoding used by text operations called without one.
    pub fn set_default_encoding(&mut self, encoding: Encoding) {
        self.default_encoding = encoding;
    }

    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    /// Changes the source of automatically assigned timestamps.
    pub fn set_clock(&mut self, clock: SharedClock) {
        self.clock = clock;
    }

    /// Stores `entry` at `path` as is, replacing any existing file.
    /// The entry keeps its own timestamps; the configured clock is not consulted.
    pub fn add_file<P: AsRef<str>, E: Into<Entry>>(&mut self, path: P, entry: E) -> Result<()> {
        let key = normalize(path)?;
        debug!(key = %key, "add file");
        self.store.set(key, entry.into());
        Ok(())
    }

    pub fn file_exists<P: AsRef<str>>(&self, path: P) -> bool {
        self.exists(path)
    }

    /// Returns the live entry stored at `path`.
    pub fn get_file<P: AsRef<str>>(&self, path: P) -> Option<&Entry> {
        let key = normalize(path).ok()?;
        self.store.get(&key).ok()
    }

    /// Returns the keys of all files, in no particular order.
    pub fn paths(&self) -> impl Iterator<Item = &NormalizedPath> {
        self.store.keys()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn encoding(&self, encoding: Option<Encoding>) -> Encoding {
        encoding.unwrap_or(self.default_encoding)
    }

    /// Normalizes `path` and checks that a file is stored under it.
    fn existing_key(&self, path: &str) -> Result<NormalizedPath> {
        let key = normalize(path)?;
        if !self.store.exists(&key) {
            return Err(FsError::NotFound(path.to_string()).into());
        }
        Ok(key)
    }
}

impl Default for MockFS {
    fn default() -> Self {
        Self::new()
    }
}

impl FsBackend for MockFS {
    /// Checks if a file exists at `path`.
    /// Malformed paths simply do not exist.
    fn exists<P: AsRef<str>>(&self, path: P) -> bool {
        normalize(path)
            .map(|key| self.store.exists(&key))
            .unwrap_or(false)
    }

    /// Reads the entire contents of a file.
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - a copy of the stored bytes; changing it leaves the file untouched.
    /// * `Err(anyhow::Error)` - `FsError::NotFound` if there is no file at `path`,
    ///   `FsError::Malformed` if `path` is not a valid path.
    fn read<P: AsRef<str>>(&self, path: P) -> Result<Vec<u8>> {
        let key = self.existing_key(path.as_ref())?;
        let entry = self.store.get(&key)?;
        trace!(key = %key, len = entry.len(), "read");
        Ok(entry.contents().to_vec())
    }

    fn read_text<P: AsRef<str>>(&self, path: P, encoding: Option<Encoding>) -> Result<String> {
        let bytes = self.read(path)?;
        Ok(self.encoding(encoding).decode(&bytes))
    }

    /// Reads a text file split into lines at `\r\n`, `\n` and `\r`.
    fn read_lines<P: AsRef<str>>(
        &self,
        path: P,
        encoding: Option<Encoding>,
    ) -> Result<Vec<String>> {
        Ok(split_lines(&self.read_text(path, encoding)?))
    }

    /// Writes bytes to a file, replacing its entire contents.
    /// The file is created if it does not exist.
    fn write<P: AsRef<str>>(&mut self, path: P, content: &[u8]) -> Result<()> {
        let key = normalize(path)?;
        let now = self.now();
        debug!(key = %key, len = content.len(), "write");
        if self.store.exists(&key) {
            self.store.get_mut(&key)?.overwrite(content.to_vec(), now);
        } else {
            self.store.set(key, Entry::new(content.to_vec(), now));
        }
        Ok(())
    }

    fn write_text<P: AsRef<str>>(
        &mut self,
        path: P,
        text: &str,
        encoding: Option<Encoding>,
    ) -> Result<()> {
        let bytes = self.encoding(encoding).encode(text);
        self.write(path, &bytes)
    }

    /// Writes every line followed by `\r\n`.
    fn write_lines<P, I, S>(&mut self, path: P, lines: I, encoding: Option<Encoding>) -> Result<()>
    where
        P: AsRef<str>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for line in lines {
            text.push_str(line.as_ref());
            text.push_str("\r\n");
        }
        self.write_text(path, &text, encoding)
    }

    /// Appends text to an existing file.
    ///
    /// The stored bytes are decoded with `encoding`, `text` is added and the result is
    /// encoded again, so a preamble such as a BOM appears once at the start.
    /// Fails with `FsError::NotFound` if the file does not exist.
    fn append_text<P: AsRef<str>>(
        &mut self,
        path: P,
        text: &str,
        encoding: Option<Encoding>,
    ) -> Result<()> {
        let key = self.existing_key(path.as_ref())?;
        let encoding = self.encoding(encoding);
        let now = self.now();
        let entry = self.store.get_mut(&key)?;

        let mut combined = encoding.decode(entry.contents());
        combined.push_str(text);
        debug!(key = %key, %encoding, appended = text.len(), "append text");
        entry.overwrite(encoding.encode(&combined), now);
        Ok(())
    }

    /// Copies the contents of `from` into `to`.
    ///
    /// If `to` exists and `overwrite` is false, `FsError::AlreadyExists` is returned and
    /// nothing changes. With `overwrite` the destination keeps its creation time.
    fn copy<P: AsRef<str>, Q: AsRef<str>>(
        &mut self,
        from: P,
        to: Q,
        overwrite: bool,
    ) -> Result<()> {
        let (from, to) = (from.as_ref(), to.as_ref());
        let source = self.existing_key(from)?;
        let target = normalize(to)?;

        let target_exists = self.store.exists(&target);
        if target_exists && !overwrite {
            return Err(FsError::AlreadyExists(to.to_string()).into());
        }
        if source == target {
            return Ok(());
        }

        let contents = self.store.get(&source)?.contents().to_vec();
        let now = self.now();
        debug!(from = %source, to = %target, overwrite, len = contents.len(), "copy");
        if target_exists {
            self.store.get_mut(&target)?.overwrite(contents, now);
        } else {
            self.store.set(target, Entry::new(contents, now));
        }
        Ok(())
    }

    /// Moves a file to `to`, which must not exist yet.
    /// Contents and timestamps travel with the file.
    fn mv<P: AsRef<str>, Q: AsRef<str>>(&mut self, from: P, to: Q) -> Result<()> {
        let (from, to) = (from.as_ref(), to.as_ref());
        let source = self.existing_key(from)?;
        let target = normalize(to)?;

        if source != target && self.store.exists(&target) {
            return Err(FsError::AlreadyExists(to.to_string()).into());
        }
        debug!(from = %source, to = %target, "move");
        self.store.rekey(&source, target, false)
    }

    /// Removes the file at `path`.
    /// Removing a file that does not exist is not an error.
    fn rm<P: AsRef<str>>(&mut self, path: P) -> Result<()> {
        let key = normalize(path)?;
        if self.store.exists(&key) {
            debug!(key = %key, "remove");
            self.store.remove(&key)?;
        }
        Ok(())
    }

    fn time<P: AsRef<str>>(&self, path: P, kind: TimeKind) -> Result<DateTime<Utc>> {
        let key = self.existing_key(path.as_ref())?;
        Ok(self.store.get(&key)?.time(kind))
    }

    fn set_time<P: AsRef<str>>(
        &mut self,
        path: P,
        kind: TimeKind,
        time: DateTime<Utc>,
    ) -> Result<()> {
        let key = self.existing_key(path.as_ref())?;
        debug!(key = %key, ?kind, %time, "set time");
        self.store.get_mut(&key)?.set_time(kind, time);
        Ok(())
    }
}
