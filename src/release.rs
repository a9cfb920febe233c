use crate::error::{RelnotesError, Result};
use crate::git::GitClient;
use regex::Regex;

/// Resolved release identifiers the rest of the pipeline runs against.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseContext {
    /// The release being cut (e.g. "7.1.0").
    pub current: String,
    /// The previous release tag to diff against (e.g. "7.0.2").
    pub last: String,
    /// True iff `current` is a major release (`X.0.0`).
    pub is_major: bool,
}

/// Determines the name of the release being cut.
///
/// If the checked out ref starts with the release branch prefix, the prefix
/// and any `rc<digits>` suffix are stripped (e.g. "release-7.1.0rc2" yields
/// "7.1.0"). Otherwise the most specific reachable tag is used. Fails when
/// neither applies.
pub fn current_release(git: &dyn GitClient, branch_prefix: &str) -> Result<String> {
    let head_ref = git.current_ref()?;

    if let Some(name) = head_ref.strip_prefix(branch_prefix) {
        let mut name = name.to_string();
        if let Ok(re) = Regex::new(r"rc\d+$") {
            name = re.replace(&name, "").to_string();
        }
        return Ok(name);
    }

    git.describe()
        .map_err(|_| RelnotesError::release("not on a release branch and no tag found"))
}

/// True iff the release string is exactly `<digits>.0.0`.
pub fn is_major_release(release: &str) -> bool {
    match semver::Version::parse(release) {
        Ok(v) => v.minor == 0 && v.patch == 0 && v.pre.is_empty() && v.build.is_empty(),
        Err(_) => false,
    }
}

/// Determines the release tag immediately preceding `current`.
///
/// Takes all non-prerelease tags in ref-sort order, inserts `current` into
/// its sorted position, and returns the predecessor. This keeps the diff
/// baseline consistent with the release line being cut: for current release
/// 5.3.3 the last release is 5.3.2 even when 6.1.1 exists.
///
/// Fails when the `current` tag already exists (the release was already cut)
/// or when no earlier tag exists.
pub fn last_release(git: &dyn GitClient, current: &str) -> Result<String> {
    let mut tags: Vec<String> = git
        .tags()?
        .into_iter()
        .filter(|tag| !tag.contains("pre"))
        .collect();

    if tags.iter().any(|tag| tag == current) {
        return Err(RelnotesError::release(format!(
            "release tag {} already exists",
            current
        )));
    }

    tags.push(current.to_string());
    tags.sort();

    let index = tags
        .iter()
        .position(|tag| tag == current)
        .unwrap_or_default();
    if index == 0 {
        return Err(RelnotesError::release(format!(
            "no release tag earlier than {}",
            current
        )));
    }
    Ok(tags[index - 1].clone())
}

/// Resolves the full release context: current name, previous tag, majorness.
pub fn resolve(git: &dyn GitClient, branch_prefix: &str) -> Result<ReleaseContext> {
    let current = current_release(git, branch_prefix)?;
    let last = last_release(git, &current)?;
    let is_major = is_major_release(&current);
    Ok(ReleaseContext {
        current,
        last,
        is_major,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockGit;

    #[test]
    fn test_current_release_from_branch() {
        let git = MockGit::new("release-7.1.0");
        assert_eq!(current_release(&git, "release-").unwrap(), "7.1.0");
    }

    #[test]
    fn test_current_release_strips_rc_suffix() {
        let git = MockGit::new("release-7.1.0rc2");
        assert_eq!(current_release(&git, "release-").unwrap(), "7.1.0");

        let git = MockGit::new("release-7.1.0rc12");
        assert_eq!(current_release(&git, "release-").unwrap(), "7.1.0");
    }

    #[test]
    fn test_current_release_falls_back_to_describe() {
        let mut git = MockGit::new("some-feature-branch");
        git.set_described("6.4.0");
        assert_eq!(current_release(&git, "release-").unwrap(), "6.4.0");
    }

    #[test]
    fn test_current_release_fails_without_branch_or_tag() {
        let git = MockGit::new("some-feature-branch");
        let err = current_release(&git, "release-").unwrap_err();
        assert!(err.to_string().contains("not on a release branch"));
    }

    #[test]
    fn test_is_major_release() {
        assert!(is_major_release("7.0.0"));
        assert!(is_major_release("10.0.0"));
        assert!(!is_major_release("7.1.0"));
        assert!(!is_major_release("7.0.1"));
        assert!(!is_major_release("7.0.0-pre.1"));
        assert!(!is_major_release("7.0.0rc1"));
        assert!(!is_major_release("not-a-version"));
    }

    #[test]
    fn test_last_release_takes_predecessor_on_release_line() {
        let mut git = MockGit::new("release-5.3.3");
        for tag in ["5.3.1", "5.3.2", "6.1.0", "6.1.1"] {
            git.add_tag(tag);
        }
        // 5.3.2 precedes 5.3.3 even though 6.1.1 is the latest release.
        assert_eq!(last_release(&git, "5.3.3").unwrap(), "5.3.2");
    }

    #[test]
    fn test_last_release_ignores_prerelease_tags() {
        let mut git = MockGit::new("release-5.3.3");
        for tag in ["5.3.1", "5.3.2", "5.3.3-pre.20230101", "6.0.0-pre.1"] {
            git.add_tag(tag);
        }
        assert_eq!(last_release(&git, "5.3.3").unwrap(), "5.3.2");
    }

    #[test]
    fn test_last_release_fails_when_tag_exists() {
        let mut git = MockGit::new("release-5.3.3");
        git.add_tag("5.3.2");
        git.add_tag("5.3.3");
        let err = last_release(&git, "5.3.3").unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_last_release_fails_without_earlier_tag() {
        let git = MockGit::new("release-0.1.0");
        let err = last_release(&git, "0.1.0").unwrap_err();
        assert!(err.to_string().contains("no release tag earlier"));
    }

    #[test]
    fn test_resolve_bundles_context() {
        let mut git = MockGit::new("release-7.0.0rc1");
        git.add_tag("6.5.0");
        let ctx = resolve(&git, "release-").unwrap();
        assert_eq!(
            ctx,
            ReleaseContext {
                current: "7.0.0".to_string(),
                last: "6.5.0".to_string(),
                is_major: true,
            }
        );
    }
}
