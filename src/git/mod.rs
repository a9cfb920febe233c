//! Git query abstraction layer
//!
//! This module provides a trait-based abstraction over the read-only git
//! queries the pipeline needs, allowing for multiple implementations
//! including the real `git` binary and a mock implementation for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [GitClient] trait. The concrete
//! implementations include:
//!
//! - [cli::SystemGit]: invokes the system `git` binary as a subprocess
//! - [mock::MockGit]: a scripted implementation for testing
//!
//! Most code should depend on the [GitClient] trait rather than concrete
//! implementations so the pipeline can be exercised without a repository.

pub mod cli;
pub mod mock;

pub use cli::SystemGit;
pub use mock::MockGit;

use crate::error::Result;

/// Read-only git queries used by the release-notes pipeline.
///
/// All implementors must be `Send + Sync`. Every method maps to a single
/// git invocation; a failing invocation is an error, never a partial result.
pub trait GitClient: Send + Sync {
    /// Name of the currently checked out ref (`rev-parse --abbrev-ref HEAD`).
    fn current_ref(&self) -> Result<String>;

    /// Most specific tag reachable from HEAD (`describe --tags`).
    ///
    /// Errors when no tag is reachable.
    fn describe(&self) -> Result<String>;

    /// All tag names in the repository's native ref-sort order
    /// (`tag --sort=refname`).
    fn tags(&self) -> Result<Vec<String>>;

    /// Commit ids reachable from `head` but not from `base`, newest first
    /// (`rev-list base..head`). An empty range yields an empty vector.
    ///
    /// The newest-first ordering is load-bearing: rollback commits must be
    /// seen before the commits they reverted.
    fn rev_list(&self, base: &str, head: &str) -> Result<Vec<String>>;

    /// Full commit message as lines, blank lines preserved
    /// (`show -s <id> --pretty=format:%B`).
    fn commit_message(&self, id: &str) -> Result<Vec<String>>;

    /// Merge base of two refs (`merge-base a b`).
    fn merge_base(&self, a: &str, b: &str) -> Result<String>;

    /// One `<name>|<email>` line per commit in `base..head`
    /// (`log --format=%aN|%aE`).
    fn author_lines(&self, base: &str, head: &str) -> Result<Vec<String>>;

    /// `Co-authored-by` trailer lines for commits in `base..head`
    /// (`log --format=%(trailers:key=Co-authored-by)`). Commits without the
    /// trailer contribute empty lines.
    fn coauthor_lines(&self, base: &str, head: &str) -> Result<Vec<String>>;
}
