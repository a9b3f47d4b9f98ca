/// Largest possible RGB distance, `sqrt(255² * 3)`, truncated to two decimals.
/// Used as-is for normalization; recomputing it would shift every score.
pub const MAX_COLOR_DISTANCE: f64 = 441.67;

/// Uploaded colors kept from an image analysis.
pub const MAX_UPLOADED_COLORS: usize = 5;
/// Uploaded colors compared against a product, also the fixed divisor of the color term.
pub const COMPARED_COLORS: usize = 3;
/// Weight for an uploaded color with a missing or zero score.
pub const DEFAULT_COLOR_WEIGHT: f64 = 0.5;

pub const COLOR_TERM_SCALE: f64 = 0.8;
pub const COLOR_TERM_FLOOR: f64 = 0.2;
/// Share of the final score contributed by color similarity.
pub const COLOR_WEIGHT: f64 = 0.4;

pub const PHONE_BONUS: f64 = 0.6;
pub const CLOTHING_BONUS: f64 = 0.6;
pub const ELECTRONICS_BONUS: f64 = 0.4;

/// Scores are clamped below this, a match is never reported as perfect.
pub const MAX_SCORE: f64 = 0.99;

/// Channels strictly below this count as dark.
pub const DARK_CHANNEL_MAX: i32 = 100;
/// Any channel strictly above this counts as a bright spot.
pub const BRIGHT_CHANNEL_MIN: i32 = 150;
/// Reddish tones: red above this ...
pub const WARM_RED_MIN: i32 = 150;
/// ... with green and blue below this.
pub const WARM_OTHER_MAX: i32 = 120;
/// Max difference between neighbouring channels for a near-gray color.
pub const GRAY_TOLERANCE: i32 = 30;
/// Exclusive red bounds of a medium gray tone.
pub const MEDIUM_TONE_MIN: i32 = 100;
pub const MEDIUM_TONE_MAX: i32 = 200;

/// Results returned per search.
pub const MAX_RESULTS: usize = 12;

pub const CATEGORY_ELECTRONICS: &str = "electronics";
pub const CATEGORY_CLOTHING: &str = "clothing";
