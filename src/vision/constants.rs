use const_format::concatcp;

use crate::matcher::Color;

pub const URL_VISION_BASE: &str = "https://vision.googleapis.com/v1";
pub const URL_ANNOTATE: &str = concatcp!(URL_VISION_BASE, "/images:annotate");

pub const FEATURE_IMAGE_PROPERTIES: &str = "IMAGE_PROPERTIES";

pub const ENV_API_KEY: &str = "GOOGLE_VISION_API_KEY";

/// Hosts that image URLs may point at, matched as substrings of the URL host.
pub const ALLOWED_IMAGE_HOSTS: &[&str] = &[
    "picsum.photos",
    "images.unsplash.com",
    "source.unsplash.com",
    "via.placeholder.com",
    "loremflickr.com",
];

/// Used in place of an image analysis whenever none is available.
pub const FALLBACK_COLORS: [Color; 3] = [
    Color::new(200, 200, 200, 0.5),
    Color::new(100, 100, 100, 0.3),
    Color::new(50, 50, 50, 0.2),
];
