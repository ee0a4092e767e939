//! Locate command implementation.
//!
//! A debugging surface over the timeline index: resolves a playback position
//! the same way a study session does on every tick.

use crate::catalog::format_timestamp;
use crate::cli::Output;
use crate::config::Settings;
use crate::error::TingliError;
use crate::orchestrator::Orchestrator;
use crate::timeline;
use anyhow::Result;

/// Run the locate command.
pub async fn run_locate(clip_id: &str, position: f64, settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(&settings)?;
    let store = orchestrator.store();

    if store.get_clip(clip_id).await?.is_none() {
        return Err(TingliError::ClipNotFound(clip_id.to_string()).into());
    }
    let phrases = store.phrases_by_clip(clip_id).await?;

    match timeline::locate(position, &phrases) {
        Some(phrase) => {
            Output::success(&format!(
                "Active phrase at {}:",
                format_timestamp(position)
            ));
            println!();
            Output::kv(
                "Interval",
                &format!(
                    "{} - {}",
                    format_timestamp(phrase.start_seconds),
                    format_timestamp(phrase.end_seconds)
                ),
            );
            Output::kv("Source", &phrase.source_text);
            if !phrase.phonetic_text.is_empty() {
                Output::kv("Phonetic", &phrase.phonetic_text);
            }
            if !phrase.translated_text.is_empty() {
                Output::kv("Translation", &phrase.translated_text);
            }
            if !phrase.vocab_refs.is_empty() {
                let refs: Vec<&str> = phrase.vocab_refs.iter().map(String::as_str).collect();
                Output::kv("Vocab", &refs.join(", "));
            }
            if !phrase.grammar_refs.is_empty() {
                let refs: Vec<&str> = phrase.grammar_refs.iter().map(String::as_str).collect();
                Output::kv("Grammar", &refs.join(", "));
            }
        }
        None => {
            // Normal outcome, not an error: the position sits in a gap or
            // past the last phrase.
            Output::info(&format!(
                "No active phrase at {} ({} phrases in clip).",
                format_timestamp(position),
                phrases.len()
            ));
        }
    }

    Ok(())
}
