//! VCS abstraction layer
//!
//! Release calculation and publishing depend on the [VcsPort] trait rather
//! than a concrete git implementation. Two implementations exist:
//!
//! - [repository::Git2Vcs]: a real implementation using the `git2` crate
//! - [mock::MockVcs]: an in-memory implementation for testing

pub mod mock;
pub mod repository;

pub use mock::MockVcs;
pub use repository::Git2Vcs;

use crate::domain::Commit;
use crate::error::Result;

/// Narrow interface over the git operations release-kit needs.
///
/// All implementors must be `Send + Sync`. Methods return
/// [crate::error::Result]; underlying failures (like `git2::Error`) map to
/// the appropriate [crate::error::ReleaseKitError] variant and propagate to
/// the caller, no retries.
pub trait VcsPort: Send + Sync {
    /// Refresh tags from the default remote
    fn fetch_tags(&self) -> Result<()>;

    /// Refresh all refs (branches and tags) from the default remote
    fn fetch_all(&self) -> Result<()>;

    /// List all tag names.
    ///
    /// With `sort_by_creation_date_desc` the newest tag comes first;
    /// otherwise tags come back in plain name order.
    fn list_tags(&self, sort_by_creation_date_desc: bool) -> Result<Vec<String>>;

    /// Commits in the range `(from, to]`, oldest first, merges excluded.
    ///
    /// Entries with an empty or whitespace-only subject are discarded here,
    /// at ingestion.
    fn log_commits(&self, from: &str, to: &str) -> Result<Vec<Commit>>;

    /// URL of the named remote (e.g. "origin")
    fn remote_url(&self, name: &str) -> Result<String>;

    /// Create a lightweight tag at the current HEAD
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Push a tag to the default remote
    fn push_tag(&self, name: &str) -> Result<()>;

    /// Push a branch to the default remote
    fn push_branch(&self, name: &str) -> Result<()>;

    /// Stage the given paths into the index
    fn stage_files(&self, paths: &[&str]) -> Result<()>;

    /// Commit the staged index with the given message
    fn commit(&self, message: &str) -> Result<()>;

    /// Set the committer identity in repository config
    fn set_identity(&self, name: &str, email: &str) -> Result<()>;
}
