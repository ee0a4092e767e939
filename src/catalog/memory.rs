//! In-memory catalog implementation.
//!
//! Useful for testing and for running the demo dataset without a database file.

use super::{Bookmark, Clip, ClipStore, Phrase};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory clip catalog.
pub struct MemoryClipStore {
    clips: RwLock<HashMap<String, Clip>>,
    phrases: RwLock<HashMap<String, Vec<Phrase>>>,
    bookmarks: RwLock<HashMap<Uuid, Bookmark>>,
}

impl MemoryClipStore {
    /// Create a new in-memory catalog.
    pub fn new() -> Self {
        Self {
            clips: RwLock::new(HashMap::new()),
            phrases: RwLock::new(HashMap::new()),
            bookmarks: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryClipStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipStore for MemoryClipStore {
    async fn upsert_clip(&self, clip: &Clip) -> Result<()> {
        let mut clips = self.clips.write().unwrap();
        clips.insert(clip.id.clone(), clip.clone());
        Ok(())
    }

    async fn get_clip(&self, clip_id: &str) -> Result<Option<Clip>> {
        let clips = self.clips.read().unwrap();
        Ok(clips.get(clip_id).cloned())
    }

    async fn list_clips(&self) -> Result<Vec<Clip>> {
        let clips = self.clips.read().unwrap();
        let mut result: Vec<Clip> = clips.values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn delete_clip(&self, clip_id: &str) -> Result<bool> {
        let mut clips = self.clips.write().unwrap();
        let mut phrases = self.phrases.write().unwrap();
        phrases.remove(clip_id);
        Ok(clips.remove(clip_id).is_some())
    }

    async fn phrases_by_clip(&self, clip_id: &str) -> Result<Vec<Phrase>> {
        let phrases = self.phrases.read().unwrap();
        let mut result = phrases.get(clip_id).cloned().unwrap_or_default();
        result.sort_by(|a, b| {
            a.start_seconds
                .partial_cmp(&b.start_seconds)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(result)
    }

    async fn replace_phrases(&self, clip_id: &str, new_phrases: &[Phrase]) -> Result<usize> {
        let mut phrases = self.phrases.write().unwrap();
        phrases.insert(clip_id.to_string(), new_phrases.to_vec());
        Ok(new_phrases.len())
    }

    async fn add_bookmark(&self, bookmark: &Bookmark) -> Result<()> {
        let mut bookmarks = self.bookmarks.write().unwrap();
        bookmarks.insert(bookmark.id, bookmark.clone());
        Ok(())
    }

    async fn remove_bookmark(&self, bookmark_id: &Uuid) -> Result<bool> {
        let mut bookmarks = self.bookmarks.write().unwrap();
        Ok(bookmarks.remove(bookmark_id).is_some())
    }

    async fn bookmarks_by_user(&self, user_id: &str) -> Result<Vec<Bookmark>> {
        let bookmarks = self.bookmarks.read().unwrap();
        let mut result: Vec<Bookmark> = bookmarks
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn clip_count(&self) -> Result<usize> {
        let clips = self.clips.read().unwrap();
        Ok(clips.len())
    }
}
