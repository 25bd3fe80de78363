//! The fact generation pipeline.
//!
//! One run is strictly sequential: generate questions for the topic,
//! gather an answer per question, extract facts from each answer, then
//! write the fact file. Any network or auth failure aborts the run;
//! per-answer parse failures are skipped so one bad reply does not throw
//! away the rest of the run.

use std::path::{Path, PathBuf};

use crate::answers::AnswerGatherer;
use crate::error::{FactsError, Result};
use crate::extract::FactExtractor;
use crate::models::{Fact, GatheredAnswer};
use crate::questions::QuestionGenerator;
use crate::writer::write_fact_file;

/// Run the full pipeline for one topic and return the written file path.
pub async fn run_generate(
    topic: &str,
    questions: &dyn QuestionGenerator,
    gatherer: &dyn AnswerGatherer,
    extractor: &dyn FactExtractor,
    output_dir: &Path,
) -> Result<PathBuf> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(FactsError::Config("Topic must not be empty".to_string()));
    }

    println!("Generating questions for '{}'...", topic);
    let question_list = questions.generate(topic).await?;
    println!("Generated {} questions.", question_list.len());

    println!();
    println!("Gathering answers...");
    let mut answers: Vec<GatheredAnswer> = Vec::with_capacity(question_list.len());
    for (i, question) in question_list.iter().enumerate() {
        println!("  Processing question {}/{}", i + 1, question_list.len());
        answers.push(gatherer.gather(question).await?);
    }

    println!();
    println!("Analyzing answers...");
    let mut facts: Vec<Fact> = Vec::new();
    for (i, answer) in answers.iter().enumerate() {
        println!("  Analyzing answer {}/{}", i + 1, answers.len());
        match extractor.extract(answer).await {
            Ok(extracted) => facts.extend(extracted),
            Err(FactsError::Parse(e)) => {
                println!("  Warning: could not parse facts from answer {}: {}", i + 1, e);
            }
            Err(e) => return Err(e),
        }
    }

    if facts.is_empty() {
        return Err(FactsError::Parse(
            "No facts were successfully extracted".to_string(),
        ));
    }

    write_fact_file(output_dir, topic, &facts)
}
