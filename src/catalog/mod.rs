//! Clip and phrase catalog for Tingli.
//!
//! Provides a trait-based repository interface over different storage backends.

mod memory;
mod sqlite;

pub use memory::MemoryClipStore;
pub use sqlite::SqliteClipStore;

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// A bounded excerpt of an external media source used as one study unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clip {
    /// Unique clip ID.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Free-form tags for filtering.
    pub tags: Vec<String>,
    /// Where this clip comes from in the source media's own timeline.
    pub source: ClipSource,
    /// Clip length in seconds.
    pub duration_seconds: f64,
    /// Editor who registered the clip.
    pub created_by: String,
    /// When the clip was registered.
    pub created_at: DateTime<Utc>,
}

/// External media identifier plus the absolute excerpt bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipSource {
    /// Opaque identifier of the source media.
    pub media_id: String,
    /// Excerpt start in the source's own timeline (seconds).
    pub start_seconds: f64,
    /// Excerpt end in the source's own timeline (seconds).
    pub end_seconds: f64,
}

impl Clip {
    /// Create a new clip. Duration is derived from the source bounds.
    pub fn new(
        id: String,
        title: String,
        tags: Vec<String>,
        source: ClipSource,
        created_by: String,
    ) -> Self {
        let duration_seconds = (source.end_seconds - source.start_seconds).max(0.0);
        Self {
            id,
            title,
            tags,
            source,
            duration_seconds,
            created_by,
            created_at: Utc::now(),
        }
    }
}

/// One timed line of transcript text within a clip.
///
/// Times are relative to the clip's own zero point, not the source media.
/// Within a clip the phrase list is ordered by `start_seconds` and intervals
/// are non-overlapping; each phrase's end is the next phrase's start, with a
/// fixed pad after the last one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phrase {
    /// Unique phrase ID.
    pub id: Uuid,
    /// Clip this phrase belongs to.
    pub clip_id: String,
    /// Interval start in seconds, inclusive.
    pub start_seconds: f64,
    /// Interval end in seconds, exclusive.
    pub end_seconds: f64,
    /// Original-language text.
    pub source_text: String,
    /// Phonetic transliteration (may be empty).
    pub phonetic_text: String,
    /// Translation (may be empty).
    pub translated_text: String,
    /// Vocabulary dictionary entries found in the source text.
    pub vocab_refs: BTreeSet<String>,
    /// Grammar dictionary entries found in the source text.
    pub grammar_refs: BTreeSet<String>,
}

impl Phrase {
    /// Duration of this phrase in seconds.
    pub fn duration(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }

    /// Format the start time as MM:SS or HH:MM:SS.
    pub fn format_timestamp(&self) -> String {
        format_timestamp(self.start_seconds)
    }
}

/// A learner's annotation on a clip position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    /// Unique bookmark ID.
    pub id: Uuid,
    /// User who created the bookmark.
    pub user_id: String,
    /// Clip the bookmark points into.
    pub clip_id: String,
    /// Bookmarked position in clip time (seconds).
    pub seconds: f64,
    /// Optional note.
    pub note: Option<String>,
    /// Phrase active at the bookmarked position, if any.
    pub phrase_id: Option<Uuid>,
    /// When the bookmark was created.
    pub created_at: DateTime<Utc>,
}

impl Bookmark {
    /// Create a new bookmark.
    pub fn new(
        user_id: String,
        clip_id: String,
        seconds: f64,
        note: Option<String>,
        phrase_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            clip_id,
            seconds,
            note,
            phrase_id,
            created_at: Utc::now(),
        }
    }
}

/// Trait for catalog storage implementations.
#[async_trait]
pub trait ClipStore: Send + Sync {
    /// Insert or update a clip.
    async fn upsert_clip(&self, clip: &Clip) -> Result<()>;

    /// Get a clip by ID.
    async fn get_clip(&self, clip_id: &str) -> Result<Option<Clip>>;

    /// List all clips, most recently registered first.
    async fn list_clips(&self) -> Result<Vec<Clip>>;

    /// Delete a clip and all of its phrases. Returns whether the clip existed.
    async fn delete_clip(&self, clip_id: &str) -> Result<bool>;

    /// Get a clip's phrases ordered by start time.
    async fn phrases_by_clip(&self, clip_id: &str) -> Result<Vec<Phrase>>;

    /// Replace a clip's whole phrase set atomically.
    ///
    /// This is the only phrase write path: phrases are created in bulk by
    /// script ingestion and immutable thereafter.
    async fn replace_phrases(&self, clip_id: &str, phrases: &[Phrase]) -> Result<usize>;

    /// Add a bookmark.
    async fn add_bookmark(&self, bookmark: &Bookmark) -> Result<()>;

    /// Remove a bookmark by ID. Returns whether it existed.
    async fn remove_bookmark(&self, bookmark_id: &Uuid) -> Result<bool>;

    /// List a user's bookmarks, newest first.
    async fn bookmarks_by_user(&self, user_id: &str) -> Result<Vec<Bookmark>>;

    /// Get total clip count.
    async fn clip_count(&self) -> Result<usize>;
}

/// Format seconds as MM:SS or HH:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
