use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for git-relnotes.
///
/// Covers the organization identity used to classify contributors, the
/// GitHub repository queried for issue labels, and the command that yields
/// the issue-tracker bearer token.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Email domain of organizational (internal) authors.
    #[serde(default = "default_org_domain")]
    pub org_domain: String,

    /// Organization name used in the acknowledgements sentence.
    #[serde(default = "default_org_name")]
    pub org_name: String,

    /// `<owner>/<repo>` slug for issue label lookups.
    #[serde(default = "default_repo")]
    pub repo: String,

    /// Base URL of the issue tracker API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Branch name prefix for release branches (e.g. "release-1.2.3rc1").
    #[serde(default = "default_release_branch_prefix")]
    pub release_branch_prefix: String,

    /// Shell pipeline whose first output line is the bearer token.
    #[serde(default = "default_token_command")]
    pub token_command: String,
}

fn default_org_domain() -> String {
    "google.com".to_string()
}

fn default_org_name() -> String {
    "Google".to_string()
}

fn default_repo() -> String {
    "bazelbuild/bazel".to_string()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_release_branch_prefix() -> String {
    "release-".to_string()
}

fn default_token_command() -> String {
    "gsutil cat gs://bazel-trusted-encrypted-secrets/github-trusted-token.enc | \
     gcloud kms decrypt --project bazel-public --location global \
     --keyring buildkite --key github-trusted-token \
     --ciphertext-file - --plaintext-file -"
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            org_domain: default_org_domain(),
            org_name: default_org_name(),
            repo: default_repo(),
            api_base: default_api_base(),
            release_branch_prefix: default_release_branch_prefix(),
            token_command: default_token_command(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `relnotes.toml` in current directory
/// 3. `.relnotes.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./relnotes.toml").exists() {
        fs::read_to_string("./relnotes.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".relnotes.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
