use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/**
    Errors that are reported back to API clients.

    The display text of each variant is sent as-is in the response body.
*/
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Please provide an image file or URL")]
    MissingImage,
    #[error("Only image files are allowed!")]
    NotAnImage,
    #[error("File too large. Maximum size is {max_megabytes}MB.")]
    FileTooLarge { max_megabytes: usize },
    #[error("Invalid image URL. Please provide a direct link to an image file.")]
    InvalidImageUrl,
    #[error("{0}")]
    BadRequest(String),
    #[error("Search failed. Please try another image.")]
    SearchFailed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::SearchFailed => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}
