//! Bookmark command implementation.

use crate::catalog::{format_timestamp, Bookmark};
use crate::cli::{BookmarkAction, Output};
use crate::config::Settings;
use crate::error::TingliError;
use crate::orchestrator::Orchestrator;
use crate::timeline;
use anyhow::Result;
use uuid::Uuid;

/// Run the bookmark command.
pub async fn run_bookmark(action: &BookmarkAction, settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(&settings)?;
    let store = orchestrator.store();

    match action {
        BookmarkAction::Add {
            clip_id,
            position,
            user,
            note,
        } => {
            if store.get_clip(clip_id).await?.is_none() {
                return Err(TingliError::ClipNotFound(clip_id.clone()).into());
            }

            // Back-reference the phrase under the bookmarked position, if any.
            let phrases = store.phrases_by_clip(clip_id).await?;
            let phrase_id = timeline::locate(*position, &phrases).map(|p| p.id);

            let bookmark = Bookmark::new(
                user.clone(),
                clip_id.clone(),
                *position,
                note.clone(),
                phrase_id,
            );
            store.add_bookmark(&bookmark).await?;

            Output::success(&format!(
                "Bookmarked {} at {} ({})",
                clip_id,
                format_timestamp(*position),
                bookmark.id
            ));
            if phrase_id.is_none() {
                Output::info("No phrase is active at that position.");
            }
        }

        BookmarkAction::List { user } => {
            let bookmarks = store.bookmarks_by_user(user).await?;

            if bookmarks.is_empty() {
                Output::info(&format!("No bookmarks for user '{}'.", user));
                return Ok(());
            }

            Output::header(&format!("Bookmarks for {} ({})", user, bookmarks.len()));
            println!();

            for bookmark in &bookmarks {
                let note = bookmark.note.as_deref().unwrap_or("-");
                Output::list_item(&format!(
                    "{} @ {}  {}  ({})",
                    bookmark.clip_id,
                    format_timestamp(bookmark.seconds),
                    note,
                    bookmark.id
                ));
            }
        }

        BookmarkAction::Remove { bookmark_id } => {
            let id = Uuid::parse_str(bookmark_id)
                .map_err(|_| TingliError::InvalidInput(format!("Not a bookmark ID: {}", bookmark_id)))?;

            if store.remove_bookmark(&id).await? {
                Output::success("Bookmark removed.");
            } else {
                Output::warning("No such bookmark.");
            }
        }
    }

    Ok(())
}
