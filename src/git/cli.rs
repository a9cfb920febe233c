use crate::error::{RelnotesError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// [GitClient](super::GitClient) implementation backed by the system `git`
/// binary.
///
/// Every query runs `git` as a subprocess and parses its standard output.
/// The whole output is trimmed and split on newlines; interior blank lines
/// are preserved because commit message parsing depends on them.
pub struct SystemGit {
    repo_dir: Option<PathBuf>,
}

impl SystemGit {
    /// Creates a client operating on the current working directory.
    pub fn new() -> Self {
        SystemGit { repo_dir: None }
    }

    /// Creates a client operating on the repository at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        SystemGit {
            repo_dir: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Runs `git` with the given arguments and returns stdout as lines.
    ///
    /// A non-zero exit status is an error carrying the command and stderr.
    fn run(&self, args: &[&str]) -> Result<Vec<String>> {
        let mut cmd = Command::new("git");
        if let Some(dir) = &self.repo_dir {
            cmd.current_dir(dir);
        }
        let output = cmd.args(args).output().map_err(|e| {
            RelnotesError::git(format!("failed to invoke git {}: {}", args.join(" "), e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RelnotesError::git(format!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.trim().split('\n').map(|l| l.to_string()).collect())
    }

    /// Runs `git` and returns the first output line.
    fn run_single(&self, args: &[&str]) -> Result<String> {
        let lines = self.run(args)?;
        lines
            .into_iter()
            .next()
            .ok_or_else(|| RelnotesError::git(format!("git {} produced no output", args.join(" "))))
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new()
    }
}

impl super::GitClient for SystemGit {
    fn current_ref(&self) -> Result<String> {
        self.run_single(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn describe(&self) -> Result<String> {
        self.run_single(&["describe", "--tags"])
    }

    fn tags(&self) -> Result<Vec<String>> {
        let lines = self.run(&["tag", "--sort=refname"])?;
        Ok(lines.into_iter().filter(|l| !l.is_empty()).collect())
    }

    fn rev_list(&self, base: &str, head: &str) -> Result<Vec<String>> {
        let range = format!("{}..{}", base, head);
        let lines = self.run(&["rev-list", &range])?;
        // An empty range prints nothing, which trims to one empty line.
        Ok(lines.into_iter().filter(|l| !l.is_empty()).collect())
    }

    fn commit_message(&self, id: &str) -> Result<Vec<String>> {
        self.run(&["show", "-s", id, "--pretty=format:%B"])
    }

    fn merge_base(&self, a: &str, b: &str) -> Result<String> {
        self.run_single(&["merge-base", a, b])
    }

    fn author_lines(&self, base: &str, head: &str) -> Result<Vec<String>> {
        let range = format!("{}..{}", base, head);
        self.run(&["log", &range, "--format=%aN|%aE"])
    }

    fn coauthor_lines(&self, base: &str, head: &str) -> Result<Vec<String>> {
        let range = format!("{}..{}", base, head);
        self.run(&["log", &range, "--format=%(trailers:key=Co-authored-by)"])
    }
}
