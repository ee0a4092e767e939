//! Clip command implementation.

use crate::catalog::{Clip, ClipSource};
use crate::cli::{ClipAction, Output};
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the clip command.
pub async fn run_clip(action: &ClipAction, settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(&settings)?;

    match action {
        ClipAction::Add {
            id,
            title,
            media,
            start,
            end,
            tags,
            created_by,
        } => {
            if end <= start {
                Output::error("Clip end must be after its start.");
                anyhow::bail!("invalid clip bounds: start={start}, end={end}");
            }

            let tags: Vec<String> = tags
                .as_deref()
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();

            let clip = Clip::new(
                id.clone(),
                title.clone(),
                tags,
                ClipSource {
                    media_id: media.clone(),
                    start_seconds: *start,
                    end_seconds: *end,
                },
                created_by.clone(),
            );

            orchestrator.register_clip(&clip).await?;
            Output::success(&format!(
                "Registered clip '{}' ({}, {:.0}s)",
                clip.title, clip.id, clip.duration_seconds
            ));
            Output::info(&format!(
                "Paste its transcript with: tingli ingest {}",
                clip.id
            ));
        }

        ClipAction::Remove { clip_id } => {
            orchestrator.delete_clip(clip_id).await?;
            Output::success(&format!("Removed clip {} and its phrases.", clip_id));
        }
    }

    Ok(())
}
