//! Ingest command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::ingest::ScriptFormat;
use crate::orchestrator::Orchestrator;
use anyhow::Result;
use std::io::Read;

/// Run the ingest command.
pub async fn run_ingest(clip_id: &str, file: Option<&str>, settings: Settings) -> Result<()> {
    let script = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            Output::info("Reading script from stdin (end with Ctrl+D)...");
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let orchestrator = Orchestrator::new(&settings)?;

    let spinner = Output::spinner("Parsing and committing script...");
    let result = orchestrator.ingest_script(clip_id, &script).await;
    spinner.finish_and_clear();

    match result {
        Ok(result) => {
            let format = match result.format {
                ScriptFormat::OneLine => "one-line",
                ScriptFormat::Block => "block",
            };
            Output::success(&format!(
                "Ingested {} phrases into clip {} ({} format)",
                result.phrase_count, result.clip_id, format
            ));
            Output::kv("Vocabulary refs", &result.vocab_matches.to_string());
            Output::kv("Grammar refs", &result.grammar_matches.to_string());
        }
        Err(e) => {
            Output::error(&format!("Script rejected: {}", e));
            Output::info("Nothing was written; the clip's previous phrases are intact.");
            return Err(e.into());
        }
    }

    Ok(())
}
