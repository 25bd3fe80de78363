//! Fact file serialization and parsing.
//!
//! One fact file per generation run, named after the topic. The layout is
//! a contract shared with the stats viewer:
//!
//! ```text
//! Facts about: <Topic>
//! ==================================================
//!
//! Title: <Fact Title>
//! Content: <Detailed fact information>
//! Citation: <Source URL or reference>
//! --------------------------------------------------
//! ```
//!
//! with one `Title`/`Content`/`Citation` block per fact, in extraction
//! order, each block followed by the 50-dash separator and a blank line.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::Fact;

/// Prefix of every fact file name.
pub const FILE_PREFIX: &str = "facts_";
/// Suffix of every fact file name.
pub const FILE_SUFFIX: &str = ".txt";

const HEADER_PREFIX: &str = "Facts about: ";
const SEPARATOR_WIDTH: usize = 50;

/// A fact file read back from disk.
#[derive(Debug, Clone)]
pub struct ParsedFactFile {
    pub topic: String,
    pub facts: Vec<Fact>,
}

/// Derive the output file name for a topic: spaces become underscores,
/// letters are lowercased.
pub fn fact_filename(topic: &str) -> String {
    format!(
        "{}{}{}",
        FILE_PREFIX,
        topic.replace(' ', "_").to_lowercase(),
        FILE_SUFFIX
    )
}

/// Render a topic and its facts in the fact file layout.
pub fn render_fact_file(topic: &str, facts: &[Fact]) -> String {
    let mut out = String::new();
    out.push_str(HEADER_PREFIX);
    out.push_str(topic);
    out.push('\n');
    out.push_str(&"=".repeat(SEPARATOR_WIDTH));
    out.push_str("\n\n");

    for fact in facts {
        out.push_str("Title: ");
        out.push_str(&fact.title);
        out.push('\n');
        out.push_str("Content: ");
        out.push_str(&fact.content);
        out.push('\n');
        out.push_str("Citation: ");
        out.push_str(&fact.citation);
        out.push('\n');
        out.push_str(&"-".repeat(SEPARATOR_WIDTH));
        out.push_str("\n\n");
    }

    out
}

/// Write (or overwrite) the fact file for a topic and return its path.
///
/// No temp-file-and-rename: a rerun for the same topic simply replaces
/// the previous file.
pub fn write_fact_file(dir: &Path, topic: &str, facts: &[Fact]) -> Result<PathBuf> {
    let path = dir.join(fact_filename(topic));
    fs::write(&path, render_fact_file(topic, facts))?;
    Ok(path)
}

/// Parse a fact file's content back into its topic and fact records.
///
/// Returns `None` when the header is malformed — callers like the stats
/// viewer use this to skip files that are not valid fact files. Multi-line
/// field values are supported: a field runs until the next field keyword
/// or the block separator.
pub fn parse_fact_file(content: &str) -> Option<ParsedFactFile> {
    let mut lines = content.lines();

    let topic = lines.next()?.strip_prefix(HEADER_PREFIX)?.to_string();
    if lines.next()? != "=".repeat(SEPARATOR_WIDTH) {
        return None;
    }

    let mut facts = Vec::new();
    let mut block: Option<FactBuilder> = None;

    let block_separator = "-".repeat(SEPARATOR_WIDTH);

    for line in lines {
        if let Some(title) = line.strip_prefix("Title: ") {
            block = Some(FactBuilder::new(title));
        } else if line == block_separator {
            if let Some(b) = block.take() {
                facts.push(b.finish());
            }
        } else if let Some(b) = block.as_mut() {
            if let Some(content) = line.strip_prefix("Content: ") {
                b.start_field(Field::Content, content);
            } else if let Some(citation) = line.strip_prefix("Citation: ") {
                b.start_field(Field::Citation, citation);
            } else {
                b.continue_field(line);
            }
        }
    }

    Some(ParsedFactFile { topic, facts })
}

#[derive(Clone, Copy)]
enum Field {
    Title,
    Content,
    Citation,
}

struct FactBuilder {
    title: String,
    content: String,
    citation: String,
    current: Field,
}

impl FactBuilder {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            content: String::new(),
            citation: String::new(),
            current: Field::Title,
        }
    }

    fn start_field(&mut self, field: Field, value: &str) {
        self.current = field;
        match field {
            Field::Title => self.title = value.to_string(),
            Field::Content => self.content = value.to_string(),
            Field::Citation => self.citation = value.to_string(),
        }
    }

    fn continue_field(&mut self, line: &str) {
        let target = match self.current {
            Field::Title => &mut self.title,
            Field::Content => &mut self.content,
            Field::Citation => &mut self.citation,
        };
        if !target.is_empty() || !line.is_empty() {
            target.push('\n');
            target.push_str(line);
        }
    }

    fn finish(self) -> Fact {
        Fact {
            title: self.title,
            content: self.content,
            citation: self.citation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(title: &str, content: &str, citation: &str) -> Fact {
        Fact {
            title: title.to_string(),
            content: content.to_string(),
            citation: citation.to_string(),
        }
    }

    #[test]
    fn test_filename_slug() {
        assert_eq!(fact_filename("Climate Change"), "facts_climate_change.txt");
        assert_eq!(fact_filename("Dogs"), "facts_dogs.txt");
    }

    #[test]
    fn test_header_layout() {
        let rendered = render_fact_file("Dogs", &[]);
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("Facts about: Dogs"));
        assert_eq!(lines.next(), Some("=".repeat(50).as_str()));
        assert_eq!(lines.next(), Some(""));
    }

    #[test]
    fn test_block_count_and_order() {
        let facts = vec![
            fact("First", "C1", "https://one"),
            fact("Second", "C2", ""),
            fact("Third", "C3", "https://three"),
        ];
        let rendered = render_fact_file("Order", &facts);

        let separator = "-".repeat(50);
        assert_eq!(rendered.matches(separator.as_str()).count(), 3);

        let parsed = parse_fact_file(&rendered).unwrap();
        assert_eq!(parsed.facts, facts);
    }

    #[test]
    fn test_empty_citation_still_has_line() {
        let rendered = render_fact_file("Dogs", &[fact("T1", "C1", "")]);
        assert!(rendered.contains("Citation: \n"));
    }

    #[test]
    fn test_roundtrip_multiline_content() {
        let facts = vec![fact("T", "line one\nline two", "https://src")];
        let parsed = parse_fact_file(&render_fact_file("Multi", &facts)).unwrap();
        assert_eq!(parsed.topic, "Multi");
        assert_eq!(parsed.facts, facts);
    }

    #[test]
    fn test_malformed_header_rejected() {
        assert!(parse_fact_file("not a fact file\n").is_none());
        assert!(parse_fact_file("Facts about: X\nshort separator\n").is_none());
    }

    #[test]
    fn test_write_and_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let facts = vec![fact("T1", "C1", "")];

        let path = write_fact_file(dir.path(), "Dogs", &facts).unwrap();
        assert_eq!(path.file_name().unwrap(), "facts_dogs.txt");

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed = parse_fact_file(&content).unwrap();
        assert_eq!(parsed.topic, "Dogs");
        assert_eq!(parsed.facts, facts);
    }

    #[test]
    fn test_overwrite_same_topic() {
        let dir = tempfile::tempdir().unwrap();
        write_fact_file(dir.path(), "Dogs", &[fact("Old", "C", "")]).unwrap();
        let path = write_fact_file(dir.path(), "Dogs", &[fact("New", "C", "")]).unwrap();

        let parsed = parse_fact_file(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.facts.len(), 1);
        assert_eq!(parsed.facts[0].title, "New");
    }
}
