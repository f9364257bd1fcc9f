use chrono::{Local, TimeZone};
use tracing_subscriber::EnvFilter;
use vfs_mock::{Encoding, Entry, FsBackend, MockFS};

fn main() -> vfs_mock::Result<()> {
    // RUST_LOG=vfs_mock=debug shows every operation
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // seeds one text file and one binary file;
    // both paths are stored case-insensitively
    let mut fs = MockFS::with_files([
        (r"c:\docs\first.txt", Entry::from_text("Hello")),
        (r"c:\docs\logo.gif", Entry::from_bytes(vec![0x47, 0x49, 0x46])),
    ])?;

    // creates `c:\docs\second.txt`; forward slashes work too
    fs.write_text("C:/Docs/Second.txt", "World", None)?;
    assert!(fs.exists(r"c:\docs\second.txt"));

    // appending is read-modify-write through the chosen encoding
    fs.append_text(r"c:\docs\first.txt", ", there", None)?;

    let first = fs.read_text(r"C:\DOCS\FIRST.TXT", None)?;
    let second = fs.read_text(r"c:\docs\second.txt", None)?;
    println!("{}, {}!", first, second);

    // the same text stored as big-endian UTF-16
    fs.write_text(r"c:\docs\wide.txt", "Hi", Some(Encoding::Utf16Be))?;
    println!("wide.txt bytes: {:?}", fs.read(r"c:\docs\wide.txt")?);

    // timestamps: set in local time, read back in UTC
    let created = Local.with_ymd_and_hms(2010, 6, 4, 13, 26, 42).unwrap();
    fs.set_creation_time(r"c:\docs\first.txt", created)?;
    println!("created (utc): {}", fs.creation_time_utc(r"c:\docs\first.txt")?);

    // copy refuses to clobber unless asked to
    if let Err(err) = fs.copy(r"c:\docs\first.txt", r"c:\docs\second.txt", false) {
        println!("copy failed: {}", err);
    }
    fs.copy(r"c:\docs\first.txt", r"c:\docs\second.txt", true)?;

    // move, then delete twice: the second delete is a no-op
    fs.mv(r"c:\docs\second.txt", r"\\server\share\second.txt")?;
    fs.rm(r"\\server\share\second.txt")?;
    fs.rm(r"\\server\share\second.txt")?;

    let mut paths: Vec<_> = fs.paths().map(|p| p.to_string()).collect();
    paths.sort();
    println!("remaining: {:?}", paths);

    Ok(())
}
