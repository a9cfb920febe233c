use anyhow::Result;
use clap::Parser;
use std::collections::HashSet;

use git_relnotes::config;
use git_relnotes::git::{GitClient, SystemGit};
use git_relnotes::tracker::GithubTracker;
use git_relnotes::{authors, notes, release, tracker, ui};

#[derive(clap::Parser)]
#[command(
    name = "git-relnotes",
    about = "Generate release notes and contributor acknowledgements from commit history"
)]
struct Args {
    #[arg(help = "Pass \"sort\" to group notes by team category")]
    mode: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("loading config: {}", e));
            std::process::exit(1);
        }
    };

    let git = SystemGit::new();

    // Resolve the release being cut and the previous release on the same
    // line, e.g. current 5.3.3 diffs against 5.3.2 even when 6.1.1 exists.
    let release = match release::resolve(&git, &config.release_branch_prefix) {
        Ok(ctx) => ctx,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    // HEAD is on the to-be-released branch; the merge base with the last
    // release bounds the commits to generate notes for.
    let merge_base = git.merge_base("HEAD", &release.last)?;
    ui::print_baseline(&merge_base);

    // Notes for the current range, minus anything already published on the
    // previous release branch.
    let current_notes = notes::notes_between(&git, &merge_base, "HEAD", release.is_major)?;
    let published: HashSet<String> =
        notes::notes_between(&git, &merge_base, &release.last, release.is_major)?
            .into_iter()
            .collect();
    let filtered = notes::filter_published(current_notes, &published);

    if args.mode.as_deref() == Some("sort") {
        let lookup = GithubTracker::connect(&config)?;
        let categorized = tracker::categorize(&filtered, &lookup)?;
        ui::print_categorized_notes(&categorized);
    } else {
        ui::print_flat_notes(&filtered);
    }

    let external = authors::external_authors(&git, &merge_base, "HEAD", &config.org_domain)?;
    ui::print_acknowledgements(&config.org_name, &external);

    Ok(())
}
