//! Core data types that flow through the fact generation pipeline.

use serde::Deserialize;
use std::path::PathBuf;

/// A structured fact extracted from a gathered answer.
///
/// `citation` may be empty; a written fact block always carries a
/// `Citation:` line regardless.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Fact {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub citation: String,
}

/// One question together with the answer and source URLs gathered for it.
#[derive(Debug, Clone)]
pub struct GatheredAnswer {
    pub question: String,
    pub answer: String,
    pub sources: Vec<String>,
}

/// Summary of one previously written fact file, as reported by the
/// stats viewer.
#[derive(Debug, Clone)]
pub struct FactFileSummary {
    pub topic: String,
    pub fact_count: usize,
    pub path: PathBuf,
}
