//! List command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the list command.
pub async fn run_list(settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(&settings)?;
    let store = orchestrator.store();

    let clips = store.list_clips().await?;

    if clips.is_empty() {
        Output::info("No clips registered yet. Use 'tingli clip add' to create one.");
        return Ok(());
    }

    Output::header(&format!("Clips ({})", clips.len()));
    println!();

    let mut total_phrases = 0;
    for clip in &clips {
        let phrases = store.phrases_by_clip(&clip.id).await?;
        total_phrases += phrases.len();
        Output::clip_info(&clip.title, &clip.id, phrases.len(), clip.duration_seconds);
    }

    println!();
    Output::kv("Total clips", &clips.len().to_string());
    Output::kv("Total phrases", &total_phrases.to_string());

    Ok(())
}
