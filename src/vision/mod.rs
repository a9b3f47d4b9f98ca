use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

mod api;
mod constants;

use api::*;

pub use constants::*;

use crate::matcher::Color;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("vision request failed - {0}")]
    Http(#[from] reqwest::Error),
    #[error("vision api error {code} - {message}")]
    Api { code: i32, message: String },
    #[error("vision api returned no response for the image")]
    MissingResponse,
}

pub type VisionResult<T> = Result<T, VisionError>;

/**
    An image to analyze, either uploaded directly or referenced by URL.
*/
#[derive(Debug, Clone)]
pub enum ImageSource {
    Upload { content: Bytes, mime_type: String },
    Url(ImageUrl),
}

/**
    An image URL that passed validation, kept exactly as it was given.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrl(String);

impl ImageUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ImageSource {
    /**
        A representation of the image that a browser can display directly,
        meaning a `data:` URI for uploads and the URL itself otherwise.
    */
    pub fn display_uri(&self) -> String {
        match self {
            Self::Upload { content, mime_type } => {
                format!("data:{mime_type};base64,{}", STANDARD.encode(content))
            }
            Self::Url(url) => url.as_str().to_string(),
        }
    }

    fn to_payload(&self) -> ImagePayload {
        match self {
            Self::Upload { content, .. } => ImagePayload {
                content: Some(STANDARD.encode(content)),
                source: None,
            },
            Self::Url(url) => ImagePayload {
                content: None,
                source: Some(ImageSourcePayload {
                    image_uri: url.as_str().to_string(),
                }),
            },
        }
    }
}

/**
    Parses an image URL, accepting only hosts we know serve images directly.
*/
pub fn parse_image_url(url: &str) -> Option<ImageUrl> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    ALLOWED_IMAGE_HOSTS
        .iter()
        .any(|allowed| host.contains(allowed))
        .then(|| ImageUrl(url.to_string()))
}

/**
    Client for extracting dominant colors using the Google Cloud Vision API.
*/
#[derive(Debug, Clone)]
pub struct VisionClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl VisionClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: URL_ANNOTATE.to_string(),
        }
    }

    /**
        Creates a client that talks to a different annotate endpoint,
        such as a local emulator.
    */
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /**
        Fetches the dominant colors of an image.

        Returns `Ok(None)` if the image was analyzed but no dominant colors were reported.
    */
    pub async fn dominant_colors(&self, image: &ImageSource) -> VisionResult<Option<Vec<Color>>> {
        let body = AnnotateRequest {
            requests: vec![AnnotateImageRequest::image_properties(image.to_payload())],
        };

        let res = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<AnnotateResponse>()
            .await?;

        let image_res = res
            .responses
            .into_iter()
            .next()
            .ok_or(VisionError::MissingResponse)?;
        if let Some(status) = image_res.error {
            return Err(VisionError::Api {
                code: status.code,
                message: status.message,
            });
        }

        Ok(image_res
            .image_properties_annotation
            .and_then(|props| props.dominant_colors)
            .map(|dominant| dominant.to_colors()))
    }
}

/**
    Analyzes an image, using fixed fallback colors if the analysis is
    unavailable, fails, or reports no dominant colors.

    Never fails, analysis problems are only logged.
*/
pub async fn analyze_or_fallback(client: Option<&VisionClient>, image: &ImageSource) -> Vec<Color> {
    let Some(client) = client else {
        debug!("no vision client configured, using fallback colors");
        return FALLBACK_COLORS.to_vec();
    };
    match client.dominant_colors(image).await {
        Ok(Some(colors)) => colors,
        Ok(None) => {
            warn!("vision api reported no dominant colors, using fallback colors");
            FALLBACK_COLORS.to_vec()
        }
        Err(e) => {
            warn!("{e}, using fallback colors");
            FALLBACK_COLORS.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::net::SocketAddr;

    use axum::{extract::Query, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::*;

    const TEST_KEY: &str = "test-key";
    const TEST_IMAGE_URL: &str = "https://picsum.photos/200";

    async fn annotate_ok(
        Query(query): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> impl IntoResponse {
        let request = &body["requests"][0];
        if query.get("key").map(String::as_str) != Some(TEST_KEY) {
            return (StatusCode::FORBIDDEN, Json(json!({}))).into_response();
        }
        if request["features"] != json!([{ "type": "IMAGE_PROPERTIES" }])
            || request["image"] != json!({ "source": { "imageUri": TEST_IMAGE_URL } })
        {
            return (StatusCode::BAD_REQUEST, Json(json!({}))).into_response();
        }
        Json(json!({
            "responses": [{
                "imagePropertiesAnnotation": {
                    "dominantColors": {
                        "colors": [
                            { "color": { "red": 250, "green": 10.4 }, "score": 0.7 },
                            { "color": { "blue": 90 }, "score": 0.2 }
                        ]
                    }
                }
            }]
        }))
        .into_response()
    }

    async fn annotate_error() -> Json<Value> {
        Json(json!({
            "responses": [{ "error": { "code": 3, "message": "Bad image data." } }]
        }))
    }

    async fn annotate_no_colors() -> Json<Value> {
        Json(json!({ "responses": [{ "imagePropertiesAnnotation": {} }] }))
    }

    async fn spawn_annotate_stub() -> SocketAddr {
        let app = Router::new()
            .route("/ok", post(annotate_ok))
            .route("/error", post(annotate_error))
            .route("/no-colors", post(annotate_no_colors));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve stub") });
        addr
    }

    fn stub_client(addr: SocketAddr, path: &str) -> VisionClient {
        VisionClient::new(TEST_KEY).with_endpoint(format!("http://{addr}{path}"))
    }

    fn test_image() -> ImageSource {
        ImageSource::Url(parse_image_url(TEST_IMAGE_URL).unwrap())
    }

    #[test]
    fn accepts_known_image_hosts_only() {
        assert!(parse_image_url("https://picsum.photos/200/300").is_some());
        assert!(parse_image_url("https://images.unsplash.com/photo-1?w=400").is_some());
        assert!(parse_image_url("http://loremflickr.com/320/240").is_some());
        assert!(parse_image_url("https://example.com/cat.png").is_none());
        assert!(parse_image_url("not a url").is_none());
        assert!(parse_image_url("data:image/png;base64,AAAA").is_none());
    }

    #[test]
    fn upload_display_uri_is_base64_data_uri() {
        let image = ImageSource::Upload {
            content: Bytes::from_static(b"hello"),
            mime_type: "image/png".to_string(),
        };
        assert_eq!(image.display_uri(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn url_display_uri_is_unchanged_input() {
        let image = ImageSource::Url(parse_image_url("https://picsum.photos").unwrap());
        assert_eq!(image.display_uri(), "https://picsum.photos");
    }

    #[tokio::test]
    async fn missing_client_uses_fallback_colors() {
        let image = ImageSource::Url(parse_image_url("https://picsum.photos/200").unwrap());
        assert_eq!(analyze_or_fallback(None, &image).await, FALLBACK_COLORS.to_vec());
    }

    #[tokio::test]
    async fn unreachable_endpoint_uses_fallback_colors() {
        let client = VisionClient::new("key").with_endpoint("http://127.0.0.1:9/annotate");
        let image = ImageSource::Url(parse_image_url("https://picsum.photos/200").unwrap());
        assert_eq!(
            analyze_or_fallback(Some(&client), &image).await,
            FALLBACK_COLORS.to_vec()
        );
    }

    #[tokio::test]
    async fn annotate_round_trip_returns_reported_colors() {
        let addr = spawn_annotate_stub().await;
        let client = stub_client(addr, "/ok");
        let colors = client.dominant_colors(&test_image()).await.unwrap();
        assert_eq!(
            colors,
            Some(vec![Color::new(250, 10, 0, 0.7), Color::new(0, 0, 90, 0.2)])
        );
        assert_eq!(
            analyze_or_fallback(Some(&client), &test_image()).await,
            vec![Color::new(250, 10, 0, 0.7), Color::new(0, 0, 90, 0.2)]
        );
    }

    #[tokio::test]
    async fn wrong_key_is_an_http_error() {
        let addr = spawn_annotate_stub().await;
        let client = VisionClient::new("other-key").with_endpoint(format!("http://{addr}/ok"));
        let err = client.dominant_colors(&test_image()).await.unwrap_err();
        assert!(matches!(err, VisionError::Http(_)));
    }

    #[tokio::test]
    async fn per_image_error_falls_back() {
        let addr = spawn_annotate_stub().await;
        let client = stub_client(addr, "/error");
        let err = client.dominant_colors(&test_image()).await.unwrap_err();
        assert!(matches!(
            err,
            VisionError::Api { code: 3, ref message } if message == "Bad image data."
        ));
        assert_eq!(
            analyze_or_fallback(Some(&client), &test_image()).await,
            FALLBACK_COLORS.to_vec()
        );
    }

    #[tokio::test]
    async fn missing_dominant_colors_is_none_and_falls_back() {
        let addr = spawn_annotate_stub().await;
        let client = stub_client(addr, "/no-colors");
        assert_eq!(client.dominant_colors(&test_image()).await.unwrap(), None);
        assert_eq!(
            analyze_or_fallback(Some(&client), &test_image()).await,
            FALLBACK_COLORS.to_vec()
        );
    }
}
