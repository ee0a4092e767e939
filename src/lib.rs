//! Tingli - Timed-Transcript Language Study
//!
//! A local-first study server and CLI for learning a language from video
//! clips with synchronized transcripts. The name comes from 听力 (tīnglì),
//! "listening comprehension."
//!
//! # Overview
//!
//! Tingli lets you:
//! - Register clips of external media as study units
//! - Paste timed transcripts that become structured, keyword-annotated phrases
//! - Follow the transcript in sync with playback, phrase by phrase
//! - Bookmark moments and review clips with generated quizzes
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `catalog` - Clip/phrase/bookmark models and the store abstraction
//! - `dictionary` - Static vocabulary and grammar dictionaries
//! - `ingest` - Script parsing (pasted transcript text to timed phrases)
//! - `timeline` - Playback-position to active-phrase resolution
//! - `quiz` - Review quiz generation
//! - `export` - Transcript export (JSON, SRT, VTT)
//! - `orchestrator` - Ingestion pipeline coordination
//! - `auth` - Demo admin credential check
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tingli::catalog::{Clip, ClipSource, MemoryClipStore};
//! use tingli::dictionary::Dictionary;
//! use tingli::orchestrator::Orchestrator;
//! use tingli::timeline::{self, StudySession};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let orchestrator =
//!         Orchestrator::with_components(Arc::new(MemoryClipStore::new()), Dictionary::builtin());
//!
//!     let clip = Clip::new(
//!         "clip_1".into(),
//!         "Game rules".into(),
//!         vec![],
//!         ClipSource { media_id: "abc123".into(), start_seconds: 300.0, end_seconds: 480.0 },
//!         "editor_01".into(),
//!     );
//!     orchestrator.register_clip(&clip).await?;
//!     orchestrator.ingest_script("clip_1", "00:00 你好\n00:03 我是学生").await?;
//!
//!     let phrases = orchestrator.store().phrases_by_clip("clip_1").await?;
//!     let mut session = StudySession::new();
//!     session.tick(1.0, &phrases);
//!     assert_eq!(session.active_phrase_id(), Some(phrases[0].id));
//!     assert_eq!(timeline::seek(&phrases[1]), 3.0);
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod export;
pub mod ingest;
pub mod orchestrator;
pub mod quiz;
pub mod timeline;

pub use error::{Result, TingliError};
