use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::texts::TextError;
use crate::vocab::VocabError;

/// Error returned by HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    Vocab(VocabError),
    Text(TextError),
    BadRequest(String),
}

impl From<VocabError> for ApiError {
    fn from(err: VocabError) -> Self {
        Self::Vocab(err)
    }
}

impl From<TextError> for ApiError {
    fn from(err: TextError) -> Self {
        Self::Text(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Vocab(e) => match e {
                VocabError::InvalidQuality(_) | VocabError::EmptyWord => StatusCode::BAD_REQUEST,
                VocabError::NotFound(_) => StatusCode::NOT_FOUND,
                VocabError::DuplicateWord(_) => StatusCode::CONFLICT,
                VocabError::CorruptStore { .. } | VocabError::Io(_) | VocabError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Text(e) => match e {
                TextError::InvalidFilename(_) | TextError::Fetch(_) => StatusCode::BAD_REQUEST,
                TextError::NotFound(_) => StatusCode::NOT_FOUND,
                TextError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Vocab(e) => e.to_string(),
            Self::Text(e) => e.to_string(),
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            log::error!("Request failed: {}", message);
        }

        let body = Json(json!({
            "status": "error",
            "message": message,
        }));
        (status, body).into_response()
    }
}
