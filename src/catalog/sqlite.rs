//! SQLite-based catalog implementation.
//!
//! Tags and keyword reference sets are stored as JSON text columns, which
//! keeps the schema flat and lets the whole catalog live in a single file.

use super::{Bookmark, Clip, ClipSource, ClipStore, Phrase};
use crate::error::{Result, TingliError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, instrument};
use uuid::Uuid;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS clips (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    tags TEXT NOT NULL,
    media_id TEXT NOT NULL,
    source_start_seconds REAL NOT NULL,
    source_end_seconds REAL NOT NULL,
    duration_seconds REAL NOT NULL,
    created_by TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS phrases (
    id TEXT PRIMARY KEY,
    clip_id TEXT NOT NULL,
    start_seconds REAL NOT NULL,
    end_seconds REAL NOT NULL,
    source_text TEXT NOT NULL,
    phonetic_text TEXT NOT NULL,
    translated_text TEXT NOT NULL,
    vocab_refs TEXT NOT NULL,
    grammar_refs TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_phrases_clip_id ON phrases(clip_id);

CREATE TABLE IF NOT EXISTS bookmarks (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    clip_id TEXT NOT NULL,
    seconds REAL NOT NULL,
    note TEXT,
    phrase_id TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_bookmarks_user_id ON bookmarks(user_id);
"#;

/// SQLite-based clip catalog.
pub struct SqliteClipStore {
    conn: Mutex<Connection>,
}

impl SqliteClipStore {
    /// Create a new SQLite catalog at the given path.
    #[instrument(skip_all)]
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrent performance
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;

        info!("Initialized SQLite catalog at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite catalog (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| TingliError::Store(format!("Failed to acquire lock: {}", e)))
    }

    fn refs_to_json(refs: &BTreeSet<String>) -> String {
        serde_json::to_string(refs).unwrap_or_else(|_| "[]".to_string())
    }

    fn refs_from_json(json: &str) -> BTreeSet<String> {
        serde_json::from_str(json).unwrap_or_default()
    }

    fn clip_from_row(row: &Row<'_>) -> rusqlite::Result<Clip> {
        let tags_json: String = row.get(2)?;
        let created_at_str: String = row.get(8)?;

        Ok(Clip {
            id: row.get(0)?,
            title: row.get(1)?,
            tags: serde_json::from_str(&tags_json).unwrap_or_default(),
            source: ClipSource {
                media_id: row.get(3)?,
                start_seconds: row.get(4)?,
                end_seconds: row.get(5)?,
            },
            duration_seconds: row.get(6)?,
            created_by: row.get(7)?,
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }

    fn phrase_from_row(row: &Row<'_>) -> rusqlite::Result<Phrase> {
        let id_str: String = row.get(0)?;
        let vocab_json: String = row.get(7)?;
        let grammar_json: String = row.get(8)?;

        Ok(Phrase {
            id: Uuid::parse_str(&id_str).unwrap_or_default(),
            clip_id: row.get(1)?,
            start_seconds: row.get(2)?,
            end_seconds: row.get(3)?,
            source_text: row.get(4)?,
            phonetic_text: row.get(5)?,
            translated_text: row.get(6)?,
            vocab_refs: Self::refs_from_json(&vocab_json),
            grammar_refs: Self::refs_from_json(&grammar_json),
        })
    }
}

#[async_trait]
impl ClipStore for SqliteClipStore {
    #[instrument(skip(self, clip), fields(clip_id = %clip.id))]
    async fn upsert_clip(&self, clip: &Clip) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO clips
            (id, title, tags, media_id, source_start_seconds, source_end_seconds,
             duration_seconds, created_by, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                clip.id,
                clip.title,
                serde_json::to_string(&clip.tags)?,
                clip.source.media_id,
                clip.source.start_seconds,
                clip.source.end_seconds,
                clip.duration_seconds,
                clip.created_by,
                clip.created_at.to_rfc3339(),
            ],
        )?;

        debug!("Upserted clip {}", clip.id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_clip(&self, clip_id: &str) -> Result<Option<Clip>> {
        let conn = self.lock()?;

        let clip = conn.query_row(
            r#"
            SELECT id, title, tags, media_id, source_start_seconds, source_end_seconds,
                   duration_seconds, created_by, created_at
            FROM clips WHERE id = ?1
            "#,
            params![clip_id],
            Self::clip_from_row,
        );

        match clip {
            Ok(c) => Ok(Some(c)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn list_clips(&self) -> Result<Vec<Clip>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, title, tags, media_id, source_start_seconds, source_end_seconds,
                   duration_seconds, created_by, created_at
            FROM clips
            ORDER BY created_at DESC
            "#,
        )?;

        let clips = stmt.query_map([], Self::clip_from_row)?;
        let result: Vec<Clip> = clips.filter_map(|c| c.ok()).collect();
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn delete_clip(&self, clip_id: &str) -> Result<bool> {
        let conn = self.lock()?;

        // Clip owns its phrases: both go in one transaction.
        let tx = conn.unchecked_transaction()?;
        tx.execute("DELETE FROM phrases WHERE clip_id = ?1", params![clip_id])?;
        let deleted = tx.execute("DELETE FROM clips WHERE id = ?1", params![clip_id])?;
        tx.commit()?;

        info!("Deleted clip {} ({} row)", clip_id, deleted);
        Ok(deleted > 0)
    }

    #[instrument(skip(self))]
    async fn phrases_by_clip(&self, clip_id: &str) -> Result<Vec<Phrase>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, clip_id, start_seconds, end_seconds, source_text,
                   phonetic_text, translated_text, vocab_refs, grammar_refs
            FROM phrases
            WHERE clip_id = ?1
            ORDER BY start_seconds
            "#,
        )?;

        let phrases = stmt.query_map(params![clip_id], Self::phrase_from_row)?;
        let result: Vec<Phrase> = phrases.filter_map(|p| p.ok()).collect();

        debug!("Found {} phrases for clip {}", result.len(), clip_id);
        Ok(result)
    }

    #[instrument(skip(self, phrases))]
    async fn replace_phrases(&self, clip_id: &str, phrases: &[Phrase]) -> Result<usize> {
        let conn = self.lock()?;

        let tx = conn.unchecked_transaction()?;

        tx.execute("DELETE FROM phrases WHERE clip_id = ?1", params![clip_id])?;

        for phrase in phrases {
            tx.execute(
                r#"
                INSERT INTO phrases
                (id, clip_id, start_seconds, end_seconds, source_text,
                 phonetic_text, translated_text, vocab_refs, grammar_refs)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    phrase.id.to_string(),
                    clip_id,
                    phrase.start_seconds,
                    phrase.end_seconds,
                    phrase.source_text,
                    phrase.phonetic_text,
                    phrase.translated_text,
                    Self::refs_to_json(&phrase.vocab_refs),
                    Self::refs_to_json(&phrase.grammar_refs),
                ],
            )?;
        }

        tx.commit()?;
        info!("Replaced phrases for clip {} ({} rows)", clip_id, phrases.len());
        Ok(phrases.len())
    }

    #[instrument(skip(self, bookmark), fields(bookmark_id = %bookmark.id))]
    async fn add_bookmark(&self, bookmark: &Bookmark) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO bookmarks
            (id, user_id, clip_id, seconds, note, phrase_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                bookmark.id.to_string(),
                bookmark.user_id,
                bookmark.clip_id,
                bookmark.seconds,
                bookmark.note,
                bookmark.phrase_id.map(|id| id.to_string()),
                bookmark.created_at.to_rfc3339(),
            ],
        )?;

        debug!("Added bookmark {}", bookmark.id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_bookmark(&self, bookmark_id: &Uuid) -> Result<bool> {
        let conn = self.lock()?;

        let deleted = conn.execute(
            "DELETE FROM bookmarks WHERE id = ?1",
            params![bookmark_id.to_string()],
        )?;

        Ok(deleted > 0)
    }

    #[instrument(skip(self))]
    async fn bookmarks_by_user(&self, user_id: &str) -> Result<Vec<Bookmark>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, clip_id, seconds, note, phrase_id, created_at
            FROM bookmarks
            WHERE user_id = ?1
            ORDER BY created_at DESC
            "#,
        )?;

        let bookmarks = stmt.query_map(params![user_id], |row| {
            let id_str: String = row.get(0)?;
            let phrase_id_str: Option<String> = row.get(5)?;
            let created_at_str: String = row.get(6)?;

            Ok(Bookmark {
                id: Uuid::parse_str(&id_str).unwrap_or_default(),
                user_id: row.get(1)?,
                clip_id: row.get(2)?,
                seconds: row.get(3)?,
                note: row.get(4)?,
                phrase_id: phrase_id_str.and_then(|s| Uuid::parse_str(&s).ok()),
                created_at: DateTime::parse_from_rfc3339(&created_at_str)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now()),
            })
        })?;

        let result: Vec<Bookmark> = bookmarks.filter_map(|b| b.ok()).collect();
        Ok(result)
    }

    async fn clip_count(&self) -> Result<usize> {
        let conn = self.lock()?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM clips", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_clip(id: &str) -> Clip {
        Clip::new(
            id.to_string(),
            "Game rules".to_string(),
            vec!["gameRules".to_string()],
            ClipSource {
                media_id: "abc123".to_string(),
                start_seconds: 300.0,
                end_seconds: 480.0,
            },
            "editor_01".to_string(),
        )
    }

    fn sample_phrase(clip_id: &str, start: f64, end: f64, text: &str) -> Phrase {
        Phrase {
            id: Uuid::new_v4(),
            clip_id: clip_id.to_string(),
            start_seconds: start,
            end_seconds: end,
            source_text: text.to_string(),
            phonetic_text: String::new(),
            translated_text: String::new(),
            vocab_refs: BTreeSet::from(["vc_need".to_string()]),
            grammar_refs: BTreeSet::new(),
        }
    }

    #[tokio::test]
    async fn test_clip_roundtrip() {
        let store = SqliteClipStore::in_memory().unwrap();

        store.upsert_clip(&sample_clip("clip_1")).await.unwrap();

        let clip = store.get_clip("clip_1").await.unwrap().unwrap();
        assert_eq!(clip.title, "Game rules");
        assert_eq!(clip.source.media_id, "abc123");
        assert_eq!(clip.duration_seconds, 180.0);

        assert!(store.get_clip("missing").await.unwrap().is_none());
        assert_eq!(store.clip_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_replace_phrases_is_full_replacement() {
        let store = SqliteClipStore::in_memory().unwrap();
        store.upsert_clip(&sample_clip("clip_1")).await.unwrap();

        let first = vec![
            sample_phrase("clip_1", 0.0, 3.0, "你好"),
            sample_phrase("clip_1", 3.0, 6.0, "我是学生"),
        ];
        store.replace_phrases("clip_1", &first).await.unwrap();
        assert_eq!(store.phrases_by_clip("clip_1").await.unwrap().len(), 2);

        let second = vec![sample_phrase("clip_1", 0.0, 5.0, "太可怕了")];
        store.replace_phrases("clip_1", &second).await.unwrap();

        let phrases = store.phrases_by_clip("clip_1").await.unwrap();
        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].source_text, "太可怕了");
        assert_eq!(
            phrases[0].vocab_refs,
            BTreeSet::from(["vc_need".to_string()])
        );
    }

    #[tokio::test]
    async fn test_phrases_ordered_by_start() {
        let store = SqliteClipStore::in_memory().unwrap();
        store.upsert_clip(&sample_clip("clip_1")).await.unwrap();

        // Insert out of order; reads must come back sorted.
        let phrases = vec![
            sample_phrase("clip_1", 6.0, 9.0, "很高兴认识你"),
            sample_phrase("clip_1", 0.0, 3.0, "你好"),
            sample_phrase("clip_1", 3.0, 6.0, "我是学生"),
        ];
        store.replace_phrases("clip_1", &phrases).await.unwrap();

        let starts: Vec<f64> = store
            .phrases_by_clip("clip_1")
            .await
            .unwrap()
            .iter()
            .map(|p| p.start_seconds)
            .collect();
        assert_eq!(starts, vec![0.0, 3.0, 6.0]);
    }

    #[tokio::test]
    async fn test_delete_clip_cascades_phrases() {
        let store = SqliteClipStore::in_memory().unwrap();
        store.upsert_clip(&sample_clip("clip_1")).await.unwrap();
        store
            .replace_phrases("clip_1", &[sample_phrase("clip_1", 0.0, 3.0, "你好")])
            .await
            .unwrap();

        assert!(store.delete_clip("clip_1").await.unwrap());
        assert!(store.get_clip("clip_1").await.unwrap().is_none());
        assert!(store.phrases_by_clip("clip_1").await.unwrap().is_empty());
        assert!(!store.delete_clip("clip_1").await.unwrap());
    }

    #[tokio::test]
    async fn test_bookmarks() {
        let store = SqliteClipStore::in_memory().unwrap();

        let bookmark = Bookmark::new(
            "u_001".to_string(),
            "clip_1".to_string(),
            7.0,
            Some("scared expression".to_string()),
            None,
        );
        store.add_bookmark(&bookmark).await.unwrap();

        let bookmarks = store.bookmarks_by_user("u_001").await.unwrap();
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].seconds, 7.0);

        assert!(store.remove_bookmark(&bookmark.id).await.unwrap());
        assert!(store.bookmarks_by_user("u_001").await.unwrap().is_empty());
        assert!(!store.remove_bookmark(&bookmark.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_reopen_persists_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.db");

        {
            let store = SqliteClipStore::new(&path).unwrap();
            store.upsert_clip(&sample_clip("clip_1")).await.unwrap();
            store
                .replace_phrases("clip_1", &[sample_phrase("clip_1", 0.0, 3.0, "你好")])
                .await
                .unwrap();
        }

        let store = SqliteClipStore::new(&path).unwrap();
        assert_eq!(store.clip_count().await.unwrap(), 1);
        let phrases = store.phrases_by_clip("clip_1").await.unwrap();
        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].source_text, "你好");
    }
}
