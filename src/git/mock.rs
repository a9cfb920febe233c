use crate::error::{RelnotesError, Result};
use std::collections::HashMap;

/// Mock git client for testing without a repository.
///
/// Commit ranges are scripted per `base..head` pair. Commits must be added
/// newest first, matching the ordering `rev-list` produces.
pub struct MockGit {
    branch: String,
    described: Option<String>,
    tags: Vec<String>,
    ranges: HashMap<String, Vec<String>>,
    messages: HashMap<String, Vec<String>>,
    merge_base: Option<String>,
    authors: Vec<String>,
    coauthors: Vec<String>,
}

impl MockGit {
    /// Create a new empty mock client checked out on `branch`.
    pub fn new(branch: impl Into<String>) -> Self {
        MockGit {
            branch: branch.into(),
            described: None,
            tags: Vec::new(),
            ranges: HashMap::new(),
            messages: HashMap::new(),
            merge_base: None,
            authors: Vec::new(),
            coauthors: Vec::new(),
        }
    }

    /// Set the tag `describe --tags` would report.
    pub fn set_described(&mut self, tag: impl Into<String>) {
        self.described = Some(tag.into());
    }

    /// Add a tag name (callers add in ref-sort order).
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Set the merge base returned for any ref pair.
    pub fn set_merge_base(&mut self, id: impl Into<String>) {
        self.merge_base = Some(id.into());
    }

    /// Add a commit to the `base..head` range. Call order is newest first.
    pub fn add_commit(&mut self, base: &str, head: &str, id: &str, message: &[&str]) {
        self.ranges
            .entry(format!("{}..{}", base, head))
            .or_default()
            .push(id.to_string());
        self.messages
            .insert(id.to_string(), message.iter().map(|l| l.to_string()).collect());
    }

    /// Set the `%aN|%aE` log lines.
    pub fn set_authors(&mut self, lines: &[&str]) {
        self.authors = lines.iter().map(|l| l.to_string()).collect();
    }

    /// Set the `Co-authored-by` trailer log lines.
    pub fn set_coauthors(&mut self, lines: &[&str]) {
        self.coauthors = lines.iter().map(|l| l.to_string()).collect();
    }
}

impl super::GitClient for MockGit {
    fn current_ref(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn describe(&self) -> Result<String> {
        self.described
            .clone()
            .ok_or_else(|| RelnotesError::git("no tags reachable from HEAD"))
    }

    fn tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }

    fn rev_list(&self, base: &str, head: &str) -> Result<Vec<String>> {
        Ok(self
            .ranges
            .get(&format!("{}..{}", base, head))
            .cloned()
            .unwrap_or_default())
    }

    fn commit_message(&self, id: &str) -> Result<Vec<String>> {
        self.messages
            .get(id)
            .cloned()
            .ok_or_else(|| RelnotesError::git(format!("unknown commit: {}", id)))
    }

    fn merge_base(&self, _a: &str, _b: &str) -> Result<String> {
        self.merge_base
            .clone()
            .ok_or_else(|| RelnotesError::git("no merge base configured"))
    }

    fn author_lines(&self, _base: &str, _head: &str) -> Result<Vec<String>> {
        Ok(self.authors.clone())
    }

    fn coauthor_lines(&self, _base: &str, _head: &str) -> Result<Vec<String>> {
        Ok(self.coauthors.clone())
    }
}
