use serde::{Deserialize, Serialize};

use crate::matcher::{constants::MAX_UPLOADED_COLORS, Color};

use super::constants::FEATURE_IMAGE_PROPERTIES;

#[derive(Debug, Clone, Serialize)]
pub(super) struct AnnotateRequest {
    pub requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct AnnotateImageRequest {
    pub image: ImagePayload,
    pub features: Vec<Feature>,
}

impl AnnotateImageRequest {
    pub fn image_properties(image: ImagePayload) -> Self {
        Self {
            image,
            features: vec![Feature {
                kind: FEATURE_IMAGE_PROPERTIES,
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ImagePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ImageSourcePayload>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ImageSourcePayload {
    pub image_uri: String,
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct AnnotateResponse {
    pub responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(super) struct AnnotateImageResponse {
    pub image_properties_annotation: Option<ImageProperties>,
    pub error: Option<Status>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(super) struct ImageProperties {
    pub dominant_colors: Option<DominantColors>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct DominantColors {
    pub colors: Vec<ColorInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ColorInfo {
    pub color: RgbValue,
    pub score: Option<f64>,
}

/// Channels are floats in `0..=255` and omitted when zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RgbValue {
    pub red: Option<f64>,
    pub green: Option<f64>,
    pub blue: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct Status {
    pub code: i32,
    pub message: String,
}

impl DominantColors {
    /**
        Converts the most prominent reported colors, at most [`MAX_UPLOADED_COLORS`] of them.
    */
    pub fn to_colors(&self) -> Vec<Color> {
        self.colors
            .iter()
            .take(MAX_UPLOADED_COLORS)
            .map(|info| {
                Color::from_channels_lossy(
                    info.color.red.unwrap_or_default(),
                    info.color.green.unwrap_or_default(),
                    info.color.blue.unwrap_or_default(),
                    info.score.unwrap_or_default(),
                )
            })
            .collect()
    }
}
