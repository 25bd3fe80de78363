//! Interactive menu loop.
//!
//! The default mode of the `facts` binary: a numeric menu with three
//! options — generate facts for a topic, view statistics for previous
//! runs, exit. Errors from one run are printed and the menu comes back,
//! so a failed topic never takes the program down.

use anyhow::Result;
use console::style;
use dialoguer::Input;

use crate::answers::AnswerGatherer;
use crate::config::Config;
use crate::extract::FactExtractor;
use crate::pipeline::run_generate;
use crate::questions::QuestionGenerator;
use crate::stats::run_stats;

fn print_banner() {
    println!();
    println!(
        "{}",
        style("╔══════════════════════════════════════════╗").cyan()
    );
    println!(
        "{}",
        style("║   Fact Harness — AI Fact Generation      ║").cyan()
    );
    println!(
        "{}",
        style("╠══════════════════════════════════════════╣").cyan()
    );
    println!(
        "{}",
        style("║  [1] Generate facts about a topic        ║").cyan()
    );
    println!(
        "{}",
        style("║  [2] View previous facts statistics      ║").cyan()
    );
    println!(
        "{}",
        style("║  [3] Exit                                ║").cyan()
    );
    println!(
        "{}",
        style("╚══════════════════════════════════════════╝").cyan()
    );
}

/// Run the interactive menu until the user exits.
pub async fn run_menu(
    config: &Config,
    questions: &dyn QuestionGenerator,
    gatherer: &dyn AnswerGatherer,
    extractor: &dyn FactExtractor,
) -> Result<()> {
    loop {
        print_banner();

        let choice: String = Input::new()
            .with_prompt("Enter your choice (1-3)")
            .interact_text()?;

        match choice.trim() {
            "1" => {
                let topic: String = Input::new().with_prompt("Enter a topic").interact_text()?;

                match run_generate(&topic, questions, gatherer, extractor, &config.output.dir)
                    .await
                {
                    Ok(path) => {
                        println!();
                        println!(
                            "{} Results saved to {}",
                            style("[+]").green(),
                            path.display()
                        );
                    }
                    Err(e) => {
                        println!();
                        println!("{} {}", style("[-]").red(), e);
                    }
                }
            }
            "2" => {
                println!();
                if let Err(e) = run_stats(&config.output.dir) {
                    println!("{} {}", style("[-]").red(), e);
                }
            }
            "3" => {
                println!();
                println!("{} Goodbye!", style("[+]").green());
                return Ok(());
            }
            other => {
                println!(
                    "{} Invalid choice '{}'. Please enter 1, 2, or 3.",
                    style("[-]").red(),
                    other
                );
            }
        }
    }
}
