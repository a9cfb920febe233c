use crate::error::Result;
use crate::git::GitClient;
use regex::Regex;
use std::collections::HashSet;

/// Collects the external contributors for commits in `base..head`.
///
/// Primary authors come from `<name>|<email>` log lines; anyone whose email
/// ends with the organizational domain is excluded. Co-authors come from
/// `Co-authored-by` trailers, same exclusion, with the trailer prefix and the
/// angle-bracketed email stripped and internal whitespace collapsed. The two
/// sets are merged by exact string equality and sorted case-insensitively;
/// distinct capitalizations of a name remain distinct entries.
pub fn external_authors(
    git: &dyn GitClient,
    base: &str,
    head: &str,
    org_domain: &str,
) -> Result<Vec<String>> {
    let domain_suffix = format!("@{}", org_domain);

    let mut names: HashSet<String> = git
        .author_lines(base, head)?
        .iter()
        .filter(|line| !line.is_empty() && !line.ends_with(&domain_suffix))
        .map(|line| {
            line.split('|')
                .next()
                .unwrap_or("")
                .trim_end()
                .to_string()
        })
        .collect();

    let trailer = Regex::new(r"Co-authored-by: |<.*?>").ok();
    for line in git.coauthor_lines(base, head)? {
        if line.is_empty() || line.contains(&domain_suffix) {
            continue;
        }
        let stripped = match &trailer {
            Some(re) => re.replace_all(&line, "").to_string(),
            None => line,
        };
        let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            names.insert(collapsed);
        }
    }

    let mut sorted: Vec<String> = names.into_iter().collect();
    sorted.sort_by_key(|name| name.to_lowercase());
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockGit;

    #[test]
    fn test_internal_authors_excluded() {
        let mut git = MockGit::new("main");
        git.set_authors(&[
            "Alice External|alice@example.com",
            "Bob Internal|bob@google.com",
            "Carol External|carol@other.org",
        ]);
        let authors = external_authors(&git, "base", "HEAD", "google.com").unwrap();
        assert_eq!(authors, vec!["Alice External", "Carol External"]);
    }

    #[test]
    fn test_coauthor_trailers_stripped_and_collapsed() {
        let mut git = MockGit::new("main");
        git.set_authors(&["Alice External|alice@example.com"]);
        git.set_coauthors(&[
            "Co-authored-by: Dan   Helper <dan@example.com>",
            "Co-authored-by: Eve Internal <eve@google.com>",
            "",
        ]);
        let authors = external_authors(&git, "base", "HEAD", "google.com").unwrap();
        assert_eq!(authors, vec!["Alice External", "Dan Helper"]);
    }

    #[test]
    fn test_union_deduplicates_exact_matches_only() {
        let mut git = MockGit::new("main");
        git.set_authors(&["dan helper|dan@example.com"]);
        git.set_coauthors(&["Co-authored-by: Dan Helper <dan@example.com>"]);
        let authors = external_authors(&git, "base", "HEAD", "google.com").unwrap();
        // Names are not merged by case; only sorting is case-insensitive.
        assert_eq!(authors.len(), 2);
        assert!(authors.contains(&"Dan Helper".to_string()));
        assert!(authors.contains(&"dan helper".to_string()));
    }

    #[test]
    fn test_sorting_is_case_insensitive() {
        let mut git = MockGit::new("main");
        git.set_authors(&[
            "zed Last|zed@example.com",
            "Amy First|amy@example.com",
            "bob Middle|bob@example.com",
        ]);
        let authors = external_authors(&git, "base", "HEAD", "google.com").unwrap();
        assert_eq!(authors, vec!["Amy First", "bob Middle", "zed Last"]);
    }

    #[test]
    fn test_no_external_authors() {
        let mut git = MockGit::new("main");
        git.set_authors(&["Bob Internal|bob@google.com"]);
        let authors = external_authors(&git, "base", "HEAD", "google.com").unwrap();
        assert!(authors.is_empty());
    }
}
