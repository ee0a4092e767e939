//! Quiz command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::error::TingliError;
use crate::orchestrator::Orchestrator;
use crate::quiz::build_quiz;
use anyhow::Result;
use console::style;

/// Run the quiz command.
pub async fn run_quiz(clip_id: &str, limit: Option<usize>, settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(&settings)?;
    let store = orchestrator.store();

    let clip = store
        .get_clip(clip_id)
        .await?
        .ok_or_else(|| TingliError::ClipNotFound(clip_id.to_string()))?;
    let phrases = store.phrases_by_clip(clip_id).await?;

    let limit = limit.unwrap_or(settings.quiz.question_limit);
    let questions = build_quiz(
        &phrases,
        &orchestrator.dictionary(),
        limit,
        &mut rand::thread_rng(),
    );

    if questions.is_empty() {
        Output::info(&format!(
            "Nothing to review for '{}' yet. Ingest a transcript first.",
            clip.title
        ));
        return Ok(());
    }

    Output::header(&format!("Review quiz: {} ({} questions)", clip.title, questions.len()));

    for (i, question) in questions.iter().enumerate() {
        println!();
        println!("{}. {}", i + 1, style(&question.prompt).bold());
        for (j, option) in question.options.iter().enumerate() {
            let letter = (b'a' + j as u8) as char;
            println!("   {}) {}", letter, option);
        }
        let answer_letter = (b'a' + question.correct_index as u8) as char;
        println!(
            "   {}",
            style(format!("answer: {}) {}", answer_letter, question.explanation)).dim()
        );
    }

    println!();

    Ok(())
}
