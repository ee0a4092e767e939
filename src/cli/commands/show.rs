//! Show command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::error::TingliError;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the show command.
pub async fn run_show(clip_id: &str, settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(&settings)?;
    let store = orchestrator.store();

    let clip = store
        .get_clip(clip_id)
        .await?
        .ok_or_else(|| TingliError::ClipNotFound(clip_id.to_string()))?;
    let phrases = store.phrases_by_clip(clip_id).await?;

    Output::header(&clip.title);
    println!();
    Output::kv("Clip", &clip.id);
    Output::kv("Media", &clip.source.media_id);
    Output::kv(
        "Excerpt",
        &format!(
            "{:.0}s - {:.0}s ({:.0}s)",
            clip.source.start_seconds, clip.source.end_seconds, clip.duration_seconds
        ),
    );
    if !clip.tags.is_empty() {
        Output::kv("Tags", &clip.tags.join(", "));
    }
    println!();

    if phrases.is_empty() {
        Output::info("No transcript yet. Use 'tingli ingest' to paste one.");
        return Ok(());
    }

    for phrase in &phrases {
        Output::transcript_line(
            &phrase.format_timestamp(),
            &phrase.source_text,
            &phrase.translated_text,
        );
    }

    println!();
    Output::kv("Phrases", &phrases.len().to_string());

    Ok(())
}
