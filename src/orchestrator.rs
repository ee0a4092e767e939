//! Ingestion pipeline for Tingli.
//!
//! Wires the catalog store and dictionary together and coordinates the
//! script-to-phrases path: parse, extract keyword references, and commit the
//! clip's new phrase set in one replacement.

use crate::catalog::{Clip, ClipStore, MemoryClipStore, Phrase, SqliteClipStore};
use crate::config::{Settings, StoreProvider};
use crate::dictionary::{extract_refs, Dictionary};
use crate::error::{Result, TingliError};
use crate::ingest::{detect_format, parse_script, ScriptFormat};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// The main coordinator for catalog operations.
pub struct Orchestrator {
    store: Arc<dyn ClipStore>,
    dictionary: Arc<Dictionary>,
}

impl Orchestrator {
    /// Create an orchestrator from settings: store backend per the config,
    /// dictionary from the configured file or the built-in demo set.
    pub fn new(settings: &Settings) -> Result<Self> {
        let store: Arc<dyn ClipStore> = match settings.store.provider {
            StoreProvider::Sqlite => Arc::new(SqliteClipStore::new(&settings.sqlite_path())?),
            StoreProvider::Memory => Arc::new(MemoryClipStore::new()),
        };

        let dictionary = match settings.dictionary_path() {
            Some(path) => Dictionary::load(&path)?,
            None => Dictionary::builtin(),
        };

        Ok(Self {
            store,
            dictionary: Arc::new(dictionary),
        })
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(store: Arc<dyn ClipStore>, dictionary: Dictionary) -> Self {
        Self {
            store,
            dictionary: Arc::new(dictionary),
        }
    }

    /// Get a reference to the catalog store.
    pub fn store(&self) -> Arc<dyn ClipStore> {
        self.store.clone()
    }

    /// Get a reference to the dictionary.
    pub fn dictionary(&self) -> Arc<Dictionary> {
        self.dictionary.clone()
    }

    /// Register (or update) a clip in the catalog.
    #[instrument(skip(self, clip), fields(clip_id = %clip.id))]
    pub async fn register_clip(&self, clip: &Clip) -> Result<()> {
        self.store.upsert_clip(clip).await?;
        info!("Registered clip '{}'", clip.title);
        Ok(())
    }

    /// Delete a clip and its phrases.
    #[instrument(skip(self))]
    pub async fn delete_clip(&self, clip_id: &str) -> Result<()> {
        if !self.store.delete_clip(clip_id).await? {
            return Err(TingliError::ClipNotFound(clip_id.to_string()));
        }
        Ok(())
    }

    /// Ingest a pasted script for a clip: parse, extract keyword references,
    /// and replace the clip's whole phrase set.
    ///
    /// All-or-nothing: parse and ordering failures surface before anything is
    /// written, so a rejected submission leaves the previous phrases intact.
    #[instrument(skip(self, script), fields(clip_id = %clip_id))]
    pub async fn ingest_script(&self, clip_id: &str, script: &str) -> Result<IngestResult> {
        let clip = self
            .store
            .get_clip(clip_id)
            .await?
            .ok_or_else(|| TingliError::ClipNotFound(clip_id.to_string()))?;

        let format = detect_format(script);
        let parsed = parse_script(script)?;

        let mut vocab_matches = 0;
        let mut grammar_matches = 0;

        let phrases: Vec<Phrase> = parsed
            .into_iter()
            .map(|p| {
                let refs = extract_refs(&p.source_text, &self.dictionary);
                vocab_matches += refs.vocab.len();
                grammar_matches += refs.grammar.len();

                Phrase {
                    id: Uuid::new_v4(),
                    clip_id: clip.id.clone(),
                    start_seconds: p.start_seconds,
                    end_seconds: p.end_seconds,
                    source_text: p.source_text,
                    phonetic_text: p.phonetic_text,
                    translated_text: p.translated_text,
                    vocab_refs: refs.vocab,
                    grammar_refs: refs.grammar,
                }
            })
            .collect();

        let phrase_count = self.store.replace_phrases(&clip.id, &phrases).await?;

        info!(
            "Ingested {} phrases for clip {} ({} vocab refs, {} grammar refs)",
            phrase_count, clip.id, vocab_matches, grammar_matches
        );

        Ok(IngestResult {
            clip_id: clip.id,
            format,
            phrase_count,
            vocab_matches,
            grammar_matches,
        })
    }
}

/// Result of ingesting a script.
#[derive(Debug)]
pub struct IngestResult {
    /// Clip the phrases were written to.
    pub clip_id: String,
    /// Grammar the paste was parsed with.
    pub format: ScriptFormat,
    /// Number of phrases committed.
    pub phrase_count: usize,
    /// Total vocabulary references attached.
    pub vocab_matches: usize,
    /// Total grammar references attached.
    pub grammar_matches: usize,
}
