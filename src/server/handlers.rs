//! Route handlers for the JSON API

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::ApiError;
use super::AppState;
use crate::texts::FetchedText;
use crate::vocab::{StoredItem, Translation};

type ApiResult<T> = Result<T, ApiError>;

fn success() -> Json<Value> {
    Json(json!({ "status": "success" }))
}

#[derive(Deserialize)]
pub struct WordForm {
    pub word: String,
}

#[derive(Deserialize)]
pub struct EditForm {
    pub old_word: String,
    pub new_word: String,
    pub translation: String,
}

#[derive(Deserialize)]
pub struct ReviewForm {
    pub word: String,
    pub quality: String,
}

#[derive(Deserialize)]
pub struct UrlForm {
    pub url: String,
}

// ==================== Texts ====================

pub async fn upload_text(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<Value>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::BadRequest("Upload has no file name".to_string()))?;
        let content = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        state.texts.save(&filename, &content)?;
        return Ok(Json(json!({ "filename": filename })));
    }

    Err(ApiError::BadRequest("Missing 'file' field".to_string()))
}

pub async fn list_texts(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let texts = state.texts.list()?;
    Ok(Json(json!({ "texts": texts })))
}

pub async fn get_text(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> ApiResult<Json<Value>> {
    let content = state.texts.read(&filename)?;
    Ok(Json(json!({ "content": content })))
}

pub async fn load_url(
    State(state): State<Arc<AppState>>,
    Form(form): Form<UrlForm>,
) -> ApiResult<Json<FetchedText>> {
    let fetched = state.texts.fetch_url(&form.url).await?;
    Ok(Json(fetched))
}

// ==================== Vocabulary ====================

pub async fn add_vocab(
    State(state): State<Arc<AppState>>,
    Form(form): Form<WordForm>,
) -> ApiResult<Json<Value>> {
    let reviews = state.reviews();
    reviews.store().add(&form.word, state.dictionary.as_ref())?;
    Ok(success())
}

fn stored_items(state: &AppState) -> Vec<StoredItem> {
    state.reviews().store().load().unwrap_or_else(|e| {
        log::warn!("Reading vocabulary failed, listing nothing: {}", e);
        Vec::new()
    })
}

pub async fn list_vocab(State(state): State<Arc<AppState>>) -> Json<Value> {
    let words: Vec<String> = stored_items(&state)
        .iter()
        .map(|item| item.word().to_string())
        .collect();
    Json(json!({ "vocab": words }))
}

pub async fn all_vocab(State(state): State<Arc<AppState>>) -> Json<Vec<StoredItem>> {
    Json(stored_items(&state))
}

pub async fn delete_vocab(
    State(state): State<Arc<AppState>>,
    Path(word): Path<String>,
) -> ApiResult<Json<Value>> {
    state.reviews().store().remove(&word)?;
    Ok(success())
}

pub async fn edit_vocab(
    State(state): State<Arc<AppState>>,
    Form(form): Form<EditForm>,
) -> ApiResult<Json<Value>> {
    let translation = Translation::from_edit_input(&form.translation);
    let edited = state
        .reviews()
        .store()
        .edit(&form.old_word, &form.new_word, translation)?;
    if edited.is_none() {
        log::info!("Edit ignored, '{}' is not in the vocabulary", form.old_word);
    }
    Ok(success())
}

pub async fn practice_words(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "due_words": state.reviews().practice_words() }))
}

pub async fn translate(
    State(state): State<Arc<AppState>>,
    Path(word): Path<String>,
) -> Response {
    let translations = state.dictionary.lookup(&word);
    if translations.is_empty() {
        let body = json!({
            "success": false,
            "word": word,
            "error": "No translation found",
            "translations": [],
        });
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    }

    Json(json!({
        "success": true,
        "word": word,
        "translations": translations,
    }))
    .into_response()
}

// ==================== Reviews ====================

pub async fn due_reviews(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "due_words": state.reviews().due_reviews(Utc::now()) }))
}

pub async fn submit_review(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ReviewForm>,
) -> ApiResult<Json<Value>> {
    let quality: i64 = form
        .quality
        .trim()
        .parse()
        .map_err(|_| {
            ApiError::BadRequest(format!("Quality must be a number, got {:?}", form.quality))
        })?;
    let entry = state.reviews().submit_review(&form.word, quality)?;
    Ok(Json(json!({ "status": "success", "entry": entry })))
}

pub async fn review_stats(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!(state.reviews().stats()))
}

pub async fn health() -> &'static str {
    "ok"
}
