//! HTTP API server for the browser frontend.
//!
//! Serves the catalog, timeline resolution, bookmarks, quizzes, and the
//! admin script-upload surface over REST.

use crate::auth;
use crate::catalog::{Bookmark, Clip, Phrase};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::TingliError;
use crate::orchestrator::Orchestrator;
use crate::quiz::{build_quiz, QuizQuestion};
use crate::timeline;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

/// Shared application state.
struct AppState {
    orchestrator: Orchestrator,
    settings: Settings,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(&settings)?;

    let state = Arc::new(AppState {
        orchestrator,
        settings,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/clips", get(list_clips))
        .route("/clips/{clip_id}", get(get_clip))
        .route("/clips/{clip_id}/phrases", get(get_phrases))
        .route("/clips/{clip_id}/active", get(get_active_phrase))
        .route("/clips/{clip_id}/quiz", get(get_quiz))
        .route("/clips/{clip_id}/script", post(upload_script))
        .route("/bookmarks", post(add_bookmark))
        .route("/bookmarks/{user_id}", get(list_bookmarks))
        .route("/bookmarks/{bookmark_id}", delete(remove_bookmark))
        .route("/dictionary/vocab/{entry_id}", get(get_vocab_entry))
        .route("/dictionary/grammar/{entry_id}", get(get_grammar_entry))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Tingli API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET    /health");
    Output::kv("List Clips", "GET    /clips");
    Output::kv("Clip Detail", "GET    /clips/:clip_id");
    Output::kv("Phrases", "GET    /clips/:clip_id/phrases");
    Output::kv("Active Phrase", "GET    /clips/:clip_id/active?t=<seconds>");
    Output::kv("Quiz", "GET    /clips/:clip_id/quiz");
    Output::kv("Upload Script", "POST   /clips/:clip_id/script");
    Output::kv("Add Bookmark", "POST   /bookmarks");
    Output::kv("List Bookmarks", "GET    /bookmarks/:user_id");
    Output::kv("Remove Bookmark", "DELETE /bookmarks/:bookmark_id");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Serialize)]
struct ClipListResponse {
    clips: Vec<Clip>,
    total: usize,
}

#[derive(Serialize)]
struct ClipDetailResponse {
    clip: Clip,
    phrases: Vec<Phrase>,
}

#[derive(Deserialize)]
struct ActiveQuery {
    /// Playback position in clip time (seconds).
    t: f64,
}

#[derive(Serialize)]
struct ActiveResponse {
    position: f64,
    /// The active phrase, or null outside every interval.
    phrase: Option<Phrase>,
}

#[derive(Deserialize)]
struct QuizQuery {
    limit: Option<usize>,
}

#[derive(Serialize)]
struct QuizResponse {
    clip_id: String,
    questions: Vec<QuizQuestion>,
}

#[derive(Deserialize)]
struct ScriptUploadRequest {
    username: String,
    password: String,
    script: String,
}

#[derive(Serialize)]
struct ScriptUploadResponse {
    success: bool,
    clip_id: String,
    phrase_count: usize,
    vocab_matches: usize,
    grammar_matches: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Deserialize)]
struct BookmarkRequest {
    user_id: String,
    clip_id: String,
    seconds: f64,
    #[serde(default)]
    note: Option<String>,
}

#[derive(Serialize)]
struct BookmarkListResponse {
    bookmarks: Vec<Bookmark>,
    total: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(e: &TingliError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match e {
        TingliError::ClipNotFound(_) => StatusCode::NOT_FOUND,
        TingliError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        TingliError::NoPhrasesParsed
        | TingliError::TimestampOrdering { .. }
        | TingliError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_clips(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.orchestrator.store().list_clips().await {
        Ok(clips) => Json(ClipListResponse {
            total: clips.len(),
            clips,
        })
        .into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

async fn get_clip(
    State(state): State<Arc<AppState>>,
    Path(clip_id): Path<String>,
) -> impl IntoResponse {
    let store = state.orchestrator.store();

    let clip = match store.get_clip(&clip_id).await {
        Ok(Some(clip)) => clip,
        Ok(None) => {
            return error_response(&TingliError::ClipNotFound(clip_id)).into_response();
        }
        Err(e) => return error_response(&e).into_response(),
    };

    match store.phrases_by_clip(&clip_id).await {
        Ok(phrases) => Json(ClipDetailResponse { clip, phrases }).into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

async fn get_phrases(
    State(state): State<Arc<AppState>>,
    Path(clip_id): Path<String>,
) -> impl IntoResponse {
    match state.orchestrator.store().phrases_by_clip(&clip_id).await {
        Ok(phrases) => Json(phrases).into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

/// Timeline resolution over HTTP: the frontend calls this on each position
/// tick (or runs the same binary search client-side from `/phrases`).
async fn get_active_phrase(
    State(state): State<Arc<AppState>>,
    Path(clip_id): Path<String>,
    Query(query): Query<ActiveQuery>,
) -> impl IntoResponse {
    match state.orchestrator.store().phrases_by_clip(&clip_id).await {
        Ok(phrases) => {
            let phrase = timeline::locate(query.t, &phrases).cloned();
            Json(ActiveResponse {
                position: query.t,
                phrase,
            })
            .into_response()
        }
        Err(e) => error_response(&e).into_response(),
    }
}

async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Path(clip_id): Path<String>,
    Query(query): Query<QuizQuery>,
) -> impl IntoResponse {
    let store = state.orchestrator.store();

    match store.get_clip(&clip_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return error_response(&TingliError::ClipNotFound(clip_id)).into_response();
        }
        Err(e) => return error_response(&e).into_response(),
    }

    match store.phrases_by_clip(&clip_id).await {
        Ok(phrases) => {
            let limit = query.limit.unwrap_or(state.settings.quiz.question_limit);
            let questions = build_quiz(
                &phrases,
                &state.orchestrator.dictionary(),
                limit,
                &mut rand::thread_rng(),
            );
            Json(QuizResponse { clip_id, questions }).into_response()
        }
        Err(e) => error_response(&e).into_response(),
    }
}

async fn upload_script(
    State(state): State<Arc<AppState>>,
    Path(clip_id): Path<String>,
    Json(req): Json<ScriptUploadRequest>,
) -> impl IntoResponse {
    if let Err(e) = auth::require_admin(&state.settings.admin, &req.username, &req.password) {
        return error_response(&e).into_response();
    }

    match state.orchestrator.ingest_script(&clip_id, &req.script).await {
        Ok(result) => Json(ScriptUploadResponse {
            success: true,
            clip_id: result.clip_id,
            phrase_count: result.phrase_count,
            vocab_matches: result.vocab_matches,
            grammar_matches: result.grammar_matches,
            error: None,
        })
        .into_response(),
        Err(e) => {
            let (status, _) = error_response(&e);
            (
                status,
                Json(ScriptUploadResponse {
                    success: false,
                    clip_id,
                    phrase_count: 0,
                    vocab_matches: 0,
                    grammar_matches: 0,
                    error: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}

async fn add_bookmark(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookmarkRequest>,
) -> impl IntoResponse {
    let store = state.orchestrator.store();

    match store.get_clip(&req.clip_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return error_response(&TingliError::ClipNotFound(req.clip_id)).into_response();
        }
        Err(e) => return error_response(&e).into_response(),
    }

    let phrase_id = match store.phrases_by_clip(&req.clip_id).await {
        Ok(phrases) => timeline::locate(req.seconds, &phrases).map(|p| p.id),
        Err(e) => return error_response(&e).into_response(),
    };

    let bookmark = Bookmark::new(req.user_id, req.clip_id, req.seconds, req.note, phrase_id);

    match store.add_bookmark(&bookmark).await {
        Ok(()) => (StatusCode::CREATED, Json(bookmark)).into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

async fn list_bookmarks(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.orchestrator.store().bookmarks_by_user(&user_id).await {
        Ok(bookmarks) => Json(BookmarkListResponse {
            total: bookmarks.len(),
            bookmarks,
        })
        .into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

async fn remove_bookmark(
    State(state): State<Arc<AppState>>,
    Path(bookmark_id): Path<String>,
) -> impl IntoResponse {
    let id = match Uuid::parse_str(&bookmark_id) {
        Ok(id) => id,
        Err(_) => {
            return error_response(&TingliError::InvalidInput(format!(
                "Not a bookmark ID: {}",
                bookmark_id
            )))
            .into_response();
        }
    };

    match state.orchestrator.store().remove_bookmark(&id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Bookmark not found: {}", bookmark_id),
            }),
        )
            .into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

async fn get_vocab_entry(
    State(state): State<Arc<AppState>>,
    Path(entry_id): Path<String>,
) -> impl IntoResponse {
    match state.orchestrator.dictionary().vocab_by_id(&entry_id) {
        Some(entry) => Json(entry.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Vocab entry not found: {}", entry_id),
            }),
        )
            .into_response(),
    }
}

async fn get_grammar_entry(
    State(state): State<Arc<AppState>>,
    Path(entry_id): Path<String>,
) -> impl IntoResponse {
    match state.orchestrator.dictionary().grammar_by_id(&entry_id) {
        Some(entry) => Json(entry.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Grammar entry not found: {}", entry_id),
            }),
        )
            .into_response(),
    }
}
