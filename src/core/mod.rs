pub mod activity;
pub mod fs;
pub mod linker;
#[cfg(test)]
pub mod memory;

pub use activity::{ActivityEntry, ActivityLog, Level};
pub use fs::{FileSystem, RealFileSystem, is_elevated, unprivileged_links_expected};
pub use linker::{Confirm, FixedAnswer, LinkManager, LinkOutcome, LinkRequest, LinkState, LinkStatus};
#[cfg(test)]
pub use memory::MemoryFileSystem;
