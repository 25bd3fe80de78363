//! Fact file statistics.
//!
//! Read-only companion to the generation pipeline: scans the output
//! directory for previously written fact files and prints counts per
//! topic plus a total. Used by the `stats` menu option to give confidence
//! that past runs are where you left them.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::FactFileSummary;
use crate::writer::{parse_fact_file, FILE_PREFIX, FILE_SUFFIX};

/// Scan a directory for fact files and summarize each valid one.
///
/// Files that do not match the `facts_*.txt` naming scheme are ignored;
/// files that match but cannot be parsed (unreadable, malformed header)
/// are skipped rather than reported as errors. Results are sorted by
/// file name for stable output.
pub fn collect_stats(dir: &Path) -> Result<Vec<FactFileSummary>> {
    let mut summaries = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.starts_with(FILE_PREFIX) || !name.ends_with(FILE_SUFFIX) {
            continue;
        }

        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        let Some(parsed) = parse_fact_file(&content) else {
            continue;
        };

        summaries.push(FactFileSummary {
            topic: parsed.topic,
            fact_count: parsed.facts.len(),
            path,
        });
    }

    summaries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(summaries)
}

/// Run the stats command: scan the output directory and print a summary.
pub fn run_stats(dir: &Path) -> Result<()> {
    let summaries = collect_stats(dir)?;

    if summaries.is_empty() {
        println!("No fact files found in {}.", dir.display());
        return Ok(());
    }

    println!("Fact Harness — Facts Statistics");
    println!("===============================");
    println!();
    println!(
        "  {:<30} {:>6}   {:<28} {}",
        "TOPIC", "FACTS", "FILENAME", "GENERATED"
    );
    println!("  {}", "-".repeat(76));

    for s in &summaries {
        let filename = s
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let generated = fs::metadata(&s.path)
            .ok()
            .and_then(|m| m.modified().ok())
            .map(|t| format_relative(chrono::DateTime::<chrono::Utc>::from(t).timestamp()))
            .unwrap_or_else(|| "unknown".to_string());

        println!(
            "  {:<30} {:>6}   {:<28} {}",
            truncate(&s.topic, 28),
            s.fact_count,
            filename,
            generated
        );
    }

    let total_facts: usize = summaries.iter().map(|s| s.fact_count).sum();
    println!("  {}", "-".repeat(76));
    println!(
        "  Total: {} fact{} across {} file{}",
        total_facts,
        if total_facts == 1 { "" } else { "s" },
        summaries.len(),
        if summaries.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{}…", cut)
    }
}

/// Format a Unix timestamp as a relative time string (e.g. "3 hours ago").
fn format_relative(ts: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let delta = now - ts;

    if delta < 0 {
        return format_iso(ts);
    }

    if delta < 60 {
        "just now".to_string()
    } else if delta < 3600 {
        let mins = delta / 60;
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if delta < 86400 {
        let hours = delta / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if delta < 86400 * 30 {
        let days = delta / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        format_iso(ts)
    }
}

fn format_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Fact;
    use crate::writer::write_fact_file;

    fn fact(title: &str) -> Fact {
        Fact {
            title: title.to_string(),
            content: "content".to_string(),
            citation: String::new(),
        }
    }

    #[test]
    fn test_collect_counts_and_skips_malformed() {
        let dir = tempfile::tempdir().unwrap();

        write_fact_file(dir.path(), "Dogs", &[fact("a"), fact("b"), fact("c")]).unwrap();
        write_fact_file(
            dir.path(),
            "Cats",
            &[fact("a"), fact("b"), fact("c"), fact("d"), fact("e")],
        )
        .unwrap();
        std::fs::write(dir.path().join("facts_broken.txt"), "garbage contents\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "unrelated file").unwrap();

        let summaries = collect_stats(dir.path()).unwrap();
        assert_eq!(summaries.len(), 2);

        let total: usize = summaries.iter().map(|s| s.fact_count).sum();
        assert_eq!(total, 8);
    }

    #[test]
    fn test_collect_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_stats(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_format_relative() {
        let now = chrono::Utc::now().timestamp();
        assert_eq!(format_relative(now), "just now");
        assert_eq!(format_relative(now - 120), "2 mins ago");
        assert_eq!(format_relative(now - 7200), "2 hours ago");
    }
}
