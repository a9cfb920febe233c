use crate::error::Result;
use crate::git::GitClient;
use regex::Regex;
use std::collections::HashSet;

/// Prefix applied to notes extracted from a `RELNOTES[INC]:` block.
pub const INCOMPATIBLE_MARKER: &str = "**[Incompatible]**";

/// Extracts the release note from a commit message (passed in as lines).
///
/// A line matching `RELNOTES:`, `RELNOTES[INC]:` or `RELNOTES[NEW]:` opens an
/// annotation block; the marker itself is stripped and an `INC` qualifier
/// prefixes the text with the incompatibility marker. The block accumulates
/// non-empty lines until a blank line or a `PiperOrigin-RevId:` line, and all
/// captured lines are joined with single spaces.
///
/// Sentinel bodies ("n/a", "none", empty, trailing periods ignored) produce
/// no note for a major release; for other releases the subject line stands in,
/// with any leading `[x.y.z]` marker removed. Non-sentinel notes get the
/// subject's trailing `(#NNNN)` issue reference appended when present.
pub fn extract_note(lines: &[String], is_major_release: bool) -> Option<String> {
    let marker = Regex::new(r"^RELNOTES(?:\[(INC|NEW)\])?:").ok()?;

    let mut note_lines: Vec<String> = Vec::new();
    let mut in_note = false;
    for raw in lines {
        if raw.is_empty() || raw.starts_with("PiperOrigin-RevId:") {
            in_note = false;
        }
        let mut line = raw.clone();
        if let Some(caps) = marker.captures(raw) {
            in_note = true;
            if let Some(m) = caps.get(0) {
                line = raw[m.end()..].to_string();
            }
            if caps.get(1).map(|m| m.as_str()) == Some("INC") {
                line = format!("{} {}", INCOMPATIBLE_MARKER, line.trim());
            }
        }
        let line = line.trim();
        if in_note && !line.is_empty() {
            note_lines.push(line.to_string());
        }
    }

    let mut note = note_lines.join(" ");
    let lowered = note.trim().to_lowercase();
    let sentinel = lowered.trim_end_matches('.');

    if sentinel == "n/a" || sentinel == "none" || sentinel.is_empty() {
        if is_major_release {
            return None;
        }
        let subject = lines.first().map(|l| l.trim()).unwrap_or("");
        note = match Regex::new(r"\[\d+\.\d+\.\d+\]\s?") {
            Ok(re) => re.replace_all(subject, "").to_string(),
            Err(_) => subject.to_string(),
        };
    } else if let Some(last_token) = lines
        .first()
        .and_then(|l| l.trim().split_whitespace().last())
    {
        if let Ok(re) = Regex::new(r"\(#[0-9]+\)$") {
            if let Some(m) = re.find(last_token) {
                note = format!("{} {}", note, m.as_str());
            }
        }
    }

    Some(note)
}

/// Collects release notes for all commits in `base..head`.
///
/// Commits are walked newest first so that an automated-rollback commit is
/// seen before the commit it reverted; both are excluded from the result.
pub fn notes_between(
    git: &dyn GitClient,
    base: &str,
    head: &str,
    is_major_release: bool,
) -> Result<Vec<String>> {
    let commits = git.rev_list(base, head)?;

    let mut notes = Vec::new();
    let mut rolled_back: HashSet<String> = HashSet::new();
    let rollback = Regex::new(r"^Automated rollback of commit ([0-9A-Fa-f]+)").ok();

    for commit in commits {
        if rolled_back.contains(&commit) {
            continue;
        }
        let lines = git.commit_message(&commit)?;
        if let (Some(re), Some(first)) = (&rollback, lines.first()) {
            if let Some(caps) = re.captures(first) {
                rolled_back.insert(caps[1].to_string());
                // The rollback commit itself is also skipped.
                continue;
            }
        }
        if let Some(note) = extract_note(&lines, is_major_release) {
            notes.push(note);
        }
    }
    Ok(notes)
}

/// Drops notes already published in the prior release range, then reverses
/// the remainder so the output reads oldest first.
pub fn filter_published(current: Vec<String>, prior: &HashSet<String>) -> Vec<String> {
    let mut notes: Vec<String> = current
        .into_iter()
        .filter(|note| !prior.contains(note))
        .collect();
    notes.reverse();
    notes
}
