use chrono::{DateTime, Local, Utc};

use crate::core::TimeKind;
use crate::encoding::Encoding;

/// Contents and timestamps of one file.
///
/// Timestamps are held as UTC instants; the `*_local` accessors are views over them.
/// Entries built with the `from_*` constructors carry the current system time in all three
/// timestamps until a builder or setter changes them.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    contents: Vec<u8>,
    creation_time: DateTime<Utc>,
    last_access_time: DateTime<Utc>,
    last_write_time: DateTime<Utc>,
}

impl Entry {
    pub fn new(contents: Vec<u8>, now: DateTime<Utc>) -> Entry {
        Entry {
            contents,
            creation_time: now,
            last_access_time: now,
            last_write_time: now,
        }
    }

    pub fn from_bytes<B: Into<Vec<u8>>>(bytes: B) -> Entry {
        Entry::new(bytes.into(), Utc::now())
    }

    /// UTF-8 encoded text, no byte order mark.
    pub fn from_text<S: AsRef<str>>(text: S) -> Entry {
        Entry::from_text_with(text, Encoding::default())
    }

    pub fn from_text_with<S: AsRef<str>>(text: S, encoding: Encoding) -> Entry {
        Entry::from_bytes(encoding.encode(text.as_ref()))
    }

    pub fn with_creation_time(mut self, time: DateTime<Utc>) -> Self {
        self.creation_time = time;
        self
    }

    pub fn with_last_access_time(mut self, time: DateTime<Utc>) -> Self {
        self.last_access_time = time;
        self
    }

    pub fn with_last_write_time(mut self, time: DateTime<Utc>) -> Self {
        self.last_write_time = time;
        self
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Contents decoded as UTF-8.
    pub fn text_contents(&self) -> String {
        self.text_contents_with(Encoding::default())
    }

    pub fn text_contents_with(&self, encoding: Encoding) -> String {
        encoding.decode(&self.contents)
    }

    pub fn time(&self, kind: TimeKind) -> DateTime<Utc> {
        match kind {
            TimeKind::Creation => self.creation_time,
            TimeKind::LastAccess => self.last_access_time,
            TimeKind::LastWrite => self.last_write_time,
        }
    }

    pub fn time_local(&self, kind: TimeKind) -> DateTime<Local> {
        self.time(kind).with_timezone(&Local)
    }

    pub fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    pub fn last_access_time(&self) -> DateTime<Utc> {
        self.last_access_time
    }

    pub fn last_write_time(&self) -> DateTime<Utc> {
        self.last_write_time
    }

    pub(crate) fn set_time(&mut self, kind: TimeKind, time: DateTime<Utc>) {
        match kind {
            TimeKind::Creation => self.creation_time = time,
            TimeKind::LastAccess => self.last_access_time = time,
            TimeKind::LastWrite => self.last_write_time = time,
        }
    }

    /// Replaces the contents and marks the entry as written at `now`.
    pub(crate) fn overwrite(&mut self, contents: Vec<u8>, now: DateTime<Utc>) {
        self.contents = contents;
        self.last_write_time = now;
        self.last_access_time = now;
    }
}

impl From<&str> for Entry {
    fn from(text: &str) -> Self {
        Entry::from_text(text)
    }
}

impl From<String> for Entry {
    fn from(text: String) -> Self {
        Entry::from_text(text)
    }
}

impl From<Vec<u8>> for Entry {
    fn from(bytes: Vec<u8>) -> Self {
        Entry::from_bytes(bytes)
    }
}

impl From<&[u8]> for Entry {
    fn from(bytes: &[u8]) -> Self {
        Entry::from_bytes(bytes)
    }
}
