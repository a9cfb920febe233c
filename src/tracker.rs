use crate::config::Config;
use crate::error::{RelnotesError, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::process::Command;

/// Category bucket for notes without a resolvable team label.
pub const GENERAL_CATEGORY: &str = "General";

/// The subset of an issue label the categorizer cares about.
#[derive(Debug, Deserialize)]
struct Label {
    #[serde(default)]
    name: String,
}

/// Issue label lookup seam, so categorization is testable without HTTP.
pub trait LabelLookup {
    /// Returns the first label on the issue containing "team-", if any.
    fn team_label(&self, issue_id: &str) -> Result<Option<String>>;
}

/// GitHub-backed [LabelLookup] using a bearer token from the configured
/// secret-decryption command.
pub struct GithubTracker {
    client: reqwest::blocking::Client,
    api_base: String,
    repo: String,
    token: String,
}

impl GithubTracker {
    /// Fetches the bearer token and builds the HTTP client.
    pub fn connect(config: &Config) -> Result<Self> {
        let token = fetch_token(&config.token_command)?;
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("git-relnotes/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(GithubTracker {
            client,
            api_base: config.api_base.clone(),
            repo: config.repo.clone(),
            token,
        })
    }
}

impl LabelLookup for GithubTracker {
    fn team_label(&self, issue_id: &str) -> Result<Option<String>> {
        let url = format!(
            "{}/repos/{}/issues/{}/labels",
            self.api_base, self.repo, issue_id
        );
        let labels: Vec<Label> = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .send()?
            .error_for_status()?
            .json()?;

        Ok(labels
            .into_iter()
            .find(|label| label.name.contains("team-"))
            .map(|label| label.name.trim().to_string()))
    }
}

/// Runs the opaque token pipeline via the shell and returns the first line
/// of its output.
pub fn fetch_token(command: &str) -> Result<String> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .output()
        .map_err(|e| RelnotesError::credential(format!("failed to run token command: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RelnotesError::credential(format!(
            "token command exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    match stdout.trim().lines().next() {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(RelnotesError::credential("token command produced no output")),
    }
}

/// Groups notes by team category, preserving chronological order within each
/// category. Keys iterate lexicographically for display.
///
/// A note's category comes from the team label of its trailing `(#NNNN)`
/// issue reference, with the "team-" prefix removed; notes without a
/// reference or a resolvable label land in "General".
pub fn categorize(
    notes: &[String],
    lookup: &dyn LabelLookup,
) -> Result<BTreeMap<String, Vec<String>>> {
    let issue_ref = Regex::new(r"\(#([0-9]+)\)$").ok();

    let mut categorized: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for note in notes {
        let issue_id = issue_ref.as_ref().and_then(|re| {
            note.trim()
                .split_whitespace()
                .last()
                .and_then(|token| re.captures(token))
                .map(|caps| caps[1].to_string())
        });

        let category = match issue_id {
            Some(id) => lookup
                .team_label(&id)?
                .map(|label| label.replace("team-", ""))
                .unwrap_or_else(|| GENERAL_CATEGORY.to_string()),
            None => GENERAL_CATEGORY.to_string(),
        };

        categorized.entry(category).or_default().push(note.clone());
    }
    Ok(categorized)
}
