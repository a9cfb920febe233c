use console::style;
use std::collections::BTreeMap;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Prints the merge-base commit the note range was computed against.
pub fn print_baseline(merge_base: &str) {
    println!("Baseline: {}", merge_base);
}

/// Prints the notes section as a flat chronological bulleted list.
pub fn print_flat_notes(notes: &[String]) {
    println!();
    println!("Release Notes:");
    for note in notes {
        println!("+ {}", note);
    }
}

/// Prints the notes section grouped by category, one labeled block per
/// category in key order.
pub fn print_categorized_notes(categorized: &BTreeMap<String, Vec<String>>) {
    println!();
    println!("Release Notes:");
    println!();
    for (label, notes) in categorized {
        println!("{}:", label);
        for note in notes {
            println!("+ {}", note);
        }
        println!();
    }
}

/// Prints the acknowledgements sentence naming external contributors, or a
/// generic statement when there are none.
pub fn print_acknowledgements(org_name: &str, authors: &[String]) {
    println!();
    println!("Acknowledgements:");
    if authors.is_empty() {
        println!(
            "This release contains contributions from many people at {}.",
            org_name
        );
    } else {
        println!(
            "This release contains contributions from many people at {}, as well as {}.",
            org_name,
            authors.join(", ")
        );
    }
}
