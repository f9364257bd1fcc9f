use chrono::{DateTime, Local, Utc};

use crate::encoding::Encoding;

pub mod error;
pub mod path;

pub use error::FsError;
pub use path::{NormalizedPath, normalize};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// Selects one of the three timestamps every file carries.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TimeKind {
    Creation,
    LastAccess,
    LastWrite,
}

/// Whole-file operations of a file system.
///
/// Paths are plain strings in either Windows (`c:\dir\file.txt`, `\\server\share\x`)
/// or slash-separated form; lookups ignore case and separator style.
/// Text operations accept an optional [`Encoding`]; `None` selects the backend's default.
pub trait FsBackend {
    fn exists<P: AsRef<str>>(&self, path: P) -> bool;
    fn read<P: AsRef<str>>(&self, path: P) -> Result<Vec<u8>>;
    fn read_text<P: AsRef<str>>(&self, path: P, encoding: Option<Encoding>) -> Result<String>;
    fn read_lines<P: AsRef<str>>(&self, path: P, encoding: Option<Encoding>)
    -> Result<Vec<String>>;
    fn write<P: AsRef<str>>(&mut self, path: P, content: &[u8]) -> Result<()>;
    fn write_text<P: AsRef<str>>(
        &mut self,
        path: P,
        text: &str,
        encoding: Option<Encoding>,
    ) -> Result<()>;
    fn write_lines<P, I, S>(&mut self, path: P, lines: I, encoding: Option<Encoding>) -> Result<()>
    where
        P: AsRef<str>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>;
    fn append_text<P: AsRef<str>>(
        &mut self,
        path: P,
        text: &str,
        encoding: Option<Encoding>,
    ) -> Result<()>;
    fn copy<P: AsRef<str>, Q: AsRef<str>>(&mut self, from: P, to: Q, overwrite: bool)
    -> Result<()>;
    fn mv<P: AsRef<str>, Q: AsRef<str>>(&mut self, from: P, to: Q) -> Result<()>;
    fn rm<P: AsRef<str>>(&mut self, path: P) -> Result<()>;

    /// Returns the requested timestamp as a UTC instant.
    fn time<P: AsRef<str>>(&self, path: P, kind: TimeKind) -> Result<DateTime<Utc>>;
    /// Stores `time` as the requested timestamp.
    fn set_time<P: AsRef<str>>(&mut self, path: P, kind: TimeKind, time: DateTime<Utc>)
    -> Result<()>;

    fn creation_time<P: AsRef<str>>(&self, path: P) -> Result<DateTime<Local>> {
        Ok(self.time(path, TimeKind::Creation)?.with_timezone(&Local))
    }

    fn creation_time_utc<P: AsRef<str>>(&self, path: P) -> Result<DateTime<Utc>> {
        self.time(path, TimeKind::Creation)
    }

    fn set_creation_time<P: AsRef<str>>(&mut self, path: P, time: DateTime<Local>) -> Result<()> {
        self.set_time(path, TimeKind::Creation, time.with_timezone(&Utc))
    }

    fn set_creation_time_utc<P: AsRef<str>>(&mut self, path: P, time: DateTime<Utc>) -> Result<()> {
        self.set_time(path, TimeKind::Creation, time)
    }

    fn last_access_time<P: AsRef<str>>(&self, path: P) -> Result<DateTime<Local>> {
        Ok(self.time(path, TimeKind::LastAccess)?.with_timezone(&Local))
    }

    fn last_access_time_utc<P: AsRef<str>>(&self, path: P) -> Result<DateTime<Utc>> {
        self.time(path, TimeKind::LastAccess)
    }

    fn set_last_access_time<P: AsRef<str>>(
        &mut self,
        path: P,
        time: DateTime<Local>,
    ) -> Result<()> {
        self.set_time(path, TimeKind::LastAccess, time.with_timezone(&Utc))
    }

    fn set_last_access_time_utc<P: AsRef<str>>(
        &mut self,
        path: P,
        time: DateTime<Utc>,
    ) -> Result<()> {
        self.set_time(path, TimeKind::LastAccess, time)
    }

    fn last_write_time<P: AsRef<str>>(&self, path: P) -> Result<DateTime<Local>> {
        Ok(self.time(path, TimeKind::LastWrite)?.with_timezone(&Local))
    }

    fn last_write_time_utc<P: AsRef<str>>(&self, path: P) -> Result<DateTime<Utc>> {
        self.time(path, TimeKind::LastWrite)
    }

    fn set_last_write_time<P: AsRef<str>>(&mut self, path: P, time: DateTime<Local>) -> Result<()> {
        self.set_time(path, TimeKind::LastWrite, time.with_timezone(&Utc))
    }

    fn set_last_write_time_utc<P: AsRef<str>>(
        &mut self,
        path: P,
        time: DateTime<Utc>,
    ) -> Result<()> {
        self.set_time(path, TimeKind::LastWrite, time)
    }
}
