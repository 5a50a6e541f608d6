//! Embedded HTTP server exposing the vocabulary and review API.

mod error;
mod handlers;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

use crate::config::AppConfig;
use crate::dictionary::{FileDictionary, TranslationLookup};
use crate::review::ReviewService;
use crate::texts::TextLibrary;
use crate::vocab::{JsonFileBackend, VocabStore};

/// Largest accepted text upload
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Server state shared across requests.
pub struct AppState {
    /// Store operations run one at a time within the process.
    reviews: Mutex<ReviewService<JsonFileBackend>>,
    pub dictionary: Box<dyn TranslationLookup>,
    pub texts: TextLibrary,
}

impl AppState {
    pub fn new(
        reviews: ReviewService<JsonFileBackend>,
        dictionary: Box<dyn TranslationLookup>,
        texts: TextLibrary,
    ) -> Self {
        Self {
            reviews: Mutex::new(reviews),
            dictionary,
            texts,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let store = VocabStore::new(JsonFileBackend::new(config.vocab_path()));
        Self::new(
            ReviewService::new(store),
            Box::new(FileDictionary::new(config.dictionary_path.clone())),
            TextLibrary::new(config.texts_dir()),
        )
    }

    pub fn reviews(&self) -> MutexGuard<'_, ReviewService<JsonFileBackend>> {
        self.reviews
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Create the HTTP router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        // Texts
        .route("/upload", post(handlers::upload_text))
        .route("/api/texts", get(handlers::list_texts))
        .route("/text/{filename}", get(handlers::get_text))
        .route("/load-url", post(handlers::load_url))
        // Vocabulary
        .route("/vocab", post(handlers::add_vocab).get(handlers::list_vocab))
        .route("/vocab/{word}", delete(handlers::delete_vocab))
        .route("/api/vocab/all", get(handlers::all_vocab))
        .route("/api/vocab/edit", post(handlers::edit_vocab))
        .route("/api/vocab/practice", get(handlers::practice_words))
        .route("/api/translate/de-en/{word}", get(handlers::translate))
        // Reviews
        .route("/api/review/due", get(handlers::due_reviews))
        .route("/api/review/submit", post(handlers::submit_review))
        .route("/api/review/stats", get(handlers::review_stats))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
}

/// Serve until Ctrl-C
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let app = create_router(state);
    let listener = TcpListener::bind(addr).await?;
    log::info!("Vokabel server started on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("Vokabel server shutting down");
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn translate(word: &str) -> Vec<String> {
        match word {
            "Haus" => vec!["house".to_string()],
            _ => Vec::new(),
        }
    }

    fn create_test_app() -> (Router, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = VocabStore::new(JsonFileBackend::new(
            temp_dir.path().join("vocab").join("vocabulary.json"),
        ));
        let state = AppState::new(
            ReviewService::new(store),
            Box::new(translate),
            TextLibrary::new(temp_dir.path().join("texts")),
        );
        (create_router(state), temp_dir)
    }

    fn form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_stats_on_empty_data_dir() {
        let (app, _temp) = create_test_app();

        let (status, body) = send(&app, get("/api/review/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_words"], 0);
        assert_eq!(body["mastered_words"], 0);
        assert_eq!(body["learning_words"], 0);
        assert_eq!(body["avg_recall"], 0.0);
        assert_eq!(body["words_due_today"], 0);
    }

    #[tokio::test]
    async fn test_add_list_and_review() {
        let (app, _temp) = create_test_app();

        let (status, _) = send(&app, form("/vocab", "word=Haus")).await;
        assert_eq!(status, StatusCode::OK);
        send(&app, form("/vocab", "word=Haus")).await;

        let (_, body) = send(&app, get("/vocab")).await;
        assert_eq!(body["vocab"], serde_json::json!(["Haus"]));

        let (_, body) = send(&app, get("/api/review/due")).await;
        assert_eq!(body["due_words"][0]["translation"], serde_json::json!(["house"]));

        let (status, body) = send(&app, form("/api/review/submit", "word=Haus&quality=5")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["entry"]["repetition_count"], 1);

        let (_, body) = send(&app, get("/api/review/due")).await;
        assert_eq!(body["due_words"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_submit_invalid_quality() {
        let (app, _temp) = create_test_app();
        send(&app, form("/vocab", "word=Haus")).await;

        let (status, body) = send(&app, form("/api/review/submit", "word=Haus&quality=9")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");

        let (status, body) = send(&app, form("/api/review/submit", "word=Haus&quality=good")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().contains("good"));
    }

    #[tokio::test]
    async fn test_unknown_word_is_not_found() {
        let (app, _temp) = create_test_app();

        let (status, _) = send(&app, form("/api/review/submit", "word=Hund&quality=3")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let request = Request::builder()
            .method("DELETE")
            .uri("/vocab/Hund")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_edit_and_export() {
        let (app, _temp) = create_test_app();
        send(&app, form("/vocab", "word=Haus")).await;

        let (status, _) = send(
            &app,
            form("/api/vocab/edit", "old_word=Haus&new_word=Heim&translation=home%2C+house"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, get("/api/vocab/all")).await;
        assert_eq!(body[0]["word"], "Heim");
        assert_eq!(body[0]["translation"], serde_json::json!(["home", "house"]));
    }

    #[tokio::test]
    async fn test_translate() {
        let (app, _temp) = create_test_app();

        let (status, body) = send(&app, get("/api/translate/de-en/Haus")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["translations"], serde_json::json!(["house"]));

        let (status, body) = send(&app, get("/api/translate/de-en/Nichts")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_texts() {
        let (app, temp) = create_test_app();
        std::fs::create_dir_all(temp.path().join("texts")).unwrap();
        std::fs::write(temp.path().join("texts").join("brief.txt"), "Lieber Hans").unwrap();

        let (_, body) = send(&app, get("/api/texts")).await;
        assert_eq!(body["texts"], serde_json::json!(["brief.txt"]));

        let (_, body) = send(&app, get("/text/brief.txt")).await;
        assert_eq!(body["content"], "Lieber Hans");

        let (status, _) = send(&app, get("/text/missing.txt")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upload() {
        let (app, temp) = create_test_app();
        let boundary = "vokabelboundary";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"lied.txt\"\r\nContent-Type: text/plain\r\n\r\nAlle meine Entchen\r\n--{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["filename"], "lied.txt");
        assert_eq!(
            std::fs::read_to_string(temp.path().join("texts").join("lied.txt")).unwrap(),
            "Alle meine Entchen"
        );
    }
}
