mod entry;
mod mock_fs;
mod store;

pub use entry::Entry;
pub use mock_fs::MockFS;
pub use store::Store;
