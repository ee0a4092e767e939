//! Export command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::error::TingliError;
use crate::export::{format_transcript, OutputFormat};
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the export command.
pub async fn run_export(
    clip_id: &str,
    output: Option<String>,
    format: &str,
    settings: Settings,
) -> Result<()> {
    let output_format: OutputFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let orchestrator = Orchestrator::new(&settings)?;
    let store = orchestrator.store();

    let clip = store
        .get_clip(clip_id)
        .await?
        .ok_or_else(|| TingliError::ClipNotFound(clip_id.to_string()))?;
    let phrases = store.phrases_by_clip(clip_id).await?;

    if phrases.is_empty() {
        Output::error(&format!("Clip {} has no transcript to export.", clip_id));
        Output::info("Use 'tingli ingest' to paste one first.");
        return Ok(());
    }

    let output_str = format_transcript(&clip, &phrases, output_format);

    match output {
        Some(path) if path != "-" => {
            std::fs::write(&path, &output_str)?;
            Output::success(&format!(
                "Exported '{}' to {} ({} phrases)",
                clip.title,
                path,
                phrases.len()
            ));
        }
        _ => {
            println!("{}", output_str);
        }
    }

    Ok(())
}
