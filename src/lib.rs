//! An in-memory file system for testing code that reads and writes files.
//!
//! ### Overview
//!
//! `vfs-mock` lets tests exercise file I/O without touching a disk. [`MockFS`] keeps every
//! file as bytes plus creation, last-access and last-write timestamps, and implements the
//! whole-file operations of [`FsBackend`]: read and write (bytes, text, lines), append,
//! copy, move, delete and timestamp access in both local time and UTC.
//!
//! **Key ideas**:
//! - **Windows-style paths**: drive letters, UNC shares, `\` or `/`; lookups ignore case.
//! - **Byte-exact storage**: text goes through a selectable [`Encoding`]; bytes are never altered.
//! - **One timestamp, two views**: local-time accessors convert the stored UTC instant.
//! - **Typed failures**: errors are `anyhow::Error` values carrying an [`FsError`] kind.
//!
//! ```
//! use vfs_mock::{Encoding, Entry, FsBackend, MockFS};
//!
//! let mut fs = MockFS::with_files([
//!     (r"c:\something\demo.txt", Entry::from_text("Demo text content")),
//!     (r"c:\something\other.gif", Entry::from_bytes(vec![0x21, 0x58, 0x3f, 0xa9])),
//! ])
//! .unwrap();
//!
//! assert!(fs.exists(r"C:\SomeThing\Other.gif"));
//! fs.write_text(r"c:\u16.txt", "Hi", Some(Encoding::Utf16Be)).unwrap();
//! assert_eq!(fs.read(r"c:\u16.txt").unwrap(), vec![0, b'H', 0, b'i']);
//! ```

pub mod clock;
mod core;
pub mod encoding;
mod vfs;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use crate::core::{FsBackend, FsError, NormalizedPath, Result, TimeKind, normalize};
pub use encoding::{Encoding, bytes_to_text, split_lines, text_to_bytes};
pub use vfs::{Entry, MockFS, Store};
