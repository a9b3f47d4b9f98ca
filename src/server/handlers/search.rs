use axum::{
    async_trait,
    extract::{multipart::MultipartError, FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::matcher::{matching_colors, rank_products, Color, ScoredProduct};
use crate::server::{error::ApiError, state::AppState};
use crate::vision::{analyze_or_fallback, parse_image_url, ImageSource};

const FIELD_IMAGE: &str = "image";
const FIELD_IMAGE_URL: &str = "imageUrl";

/**
    An image search request, sent either as a multipart form
    with an `image` file and/or `imageUrl` field, or as JSON.
*/
#[derive(Debug, Default)]
pub struct SearchRequest {
    file: Option<UploadedFile>,
    image_url: Option<String>,
}

#[derive(Debug)]
struct UploadedFile {
    content: Bytes,
    mime_type: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct JsonSearchBody {
    image_url: Option<String>,
}

impl SearchRequest {
    /**
        Picks the image to analyze, preferring an uploaded file over a URL.
    */
    fn into_image_source(self) -> Result<ImageSource, ApiError> {
        if let Some(file) = self.file {
            return Ok(ImageSource::Upload {
                content: file.content,
                mime_type: file.mime_type,
            });
        }
        match self.image_url.filter(|u| !u.is_empty()) {
            None => Err(ApiError::MissingImage),
            Some(url) => parse_image_url(&url)
                .map(ImageSource::Url)
                .ok_or(ApiError::InvalidImageUrl),
        }
    }

    async fn from_multipart(mut multipart: Multipart, state: &AppState) -> Result<Self, ApiError> {
        let max_bytes = state.config.max_upload_bytes;
        let too_large = || ApiError::FileTooLarge {
            max_megabytes: state.config.max_upload_megabytes(),
        };
        let map_err = |e: MultipartError| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                too_large()
            } else {
                ApiError::BadRequest(e.body_text())
            }
        };

        let mut this = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(map_err)? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some(FIELD_IMAGE) => {
                    let mime_type = field.content_type().unwrap_or_default().to_string();
                    if !mime_type.starts_with("image/") {
                        return Err(ApiError::NotAnImage);
                    }
                    let content = field.bytes().await.map_err(map_err)?;
                    if content.len() > max_bytes {
                        return Err(too_large());
                    }
                    this.file.replace(UploadedFile { content, mime_type });
                }
                Some(FIELD_IMAGE_URL) => {
                    this.image_url.replace(field.text().await.map_err(map_err)?);
                }
                _ => debug!("ignoring unknown search form field {name:?}"),
            }
        }
        Ok(this)
    }
}

#[async_trait]
impl FromRequest<AppState> for SearchRequest {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            Self::from_multipart(multipart, state).await
        } else if content_type.starts_with("application/json") {
            let Json(body) = Json::<JsonSearchBody>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            Ok(Self {
                file: None,
                image_url: body.image_url,
            })
        } else {
            Ok(Self::default())
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse<'a> {
    success: bool,
    results: Vec<ScoredProduct<'a>>,
    dominant_colors: &'a [Color],
    uploaded_image: String,
}

pub async fn search(
    State(state): State<AppState>,
    request: SearchRequest,
) -> Result<Response, ApiError> {
    let image = request.into_image_source()?;

    info!("Analyzing uploaded image colors...");
    let uploaded_colors = analyze_or_fallback(state.vision.as_ref(), &image).await;
    debug!("Uploaded image colors: {uploaded_colors:?}");

    let results = rank_products(&uploaded_colors, &state.catalog);
    for (index, result) in results.iter().take(3).enumerate() {
        info!(
            "{}. {} ({}) - Score: {}",
            index + 1,
            result.product.name,
            result.product.category,
            result.display_score()
        );
    }

    let response = SearchResponse {
        success: true,
        results,
        dominant_colors: matching_colors(&uploaded_colors),
        uploaded_image: image.display_uri(),
    };
    let body = serde_json::to_vec(&response).map_err(|e| {
        error!("failed to serialize search response - {e}");
        ApiError::SearchFailed
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
