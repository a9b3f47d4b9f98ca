use tracing::debug;

use crate::catalog::Product;

use super::color::{color_distance, Color};
use super::constants::*;

/**
    Rough guesses about what an uploaded image depicts,
    derived purely from its dominant colors.

    Each guess is existential - it holds if any single color
    (or pair of colors, for phones) in the list matches.
*/
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageTraits {
    pub phone_like: bool,
    pub clothing_like: bool,
    pub electronics_like: bool,
}

impl ImageTraits {
    pub fn detect(colors: &[Color]) -> Self {
        Self {
            phone_like: colors.iter().any(is_dark) && colors.iter().any(has_bright_spot),
            clothing_like: colors.iter().any(is_warm),
            electronics_like: colors.iter().any(is_medium_gray),
        }
    }

    /**
        Picks the category bonus for a product category.

        Checked in priority order, the first match wins and bonuses never stack.
    */
    pub fn bonus_for(&self, category: &str) -> Option<CategoryBonus> {
        let electronics = category.eq_ignore_ascii_case(CATEGORY_ELECTRONICS);
        let clothing = category.eq_ignore_ascii_case(CATEGORY_CLOTHING);
        if self.phone_like && electronics {
            Some(CategoryBonus::Phone)
        } else if self.clothing_like && clothing {
            Some(CategoryBonus::Clothing)
        } else if self.electronics_like && electronics {
            Some(CategoryBonus::Electronics)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryBonus {
    Phone,
    Clothing,
    Electronics,
}

impl CategoryBonus {
    pub const fn value(self) -> f64 {
        match self {
            Self::Phone => PHONE_BONUS,
            Self::Clothing => CLOTHING_BONUS,
            Self::Electronics => ELECTRONICS_BONUS,
        }
    }
}

fn is_dark(color: &Color) -> bool {
    color.channels().iter().all(|&c| c < DARK_CHANNEL_MAX)
}

fn has_bright_spot(color: &Color) -> bool {
    color.channels().iter().any(|&c| c > BRIGHT_CHANNEL_MIN)
}

fn is_warm(color: &Color) -> bool {
    let [r, g, b] = color.channels();
    r > WARM_RED_MIN && g < WARM_OTHER_MAX && b < WARM_OTHER_MAX
}

fn is_medium_gray(color: &Color) -> bool {
    let [r, g, b] = color.channels();
    (r - g).abs() < GRAY_TOLERANCE
        && (g - b).abs() < GRAY_TOLERANCE
        && r > MEDIUM_TONE_MIN
        && r < MEDIUM_TONE_MAX
}

/**
    The weighted color term of a score, in roughly `0.08..=0.4`.

    Only the first few uploaded colors are compared, and their sum is always
    divided by the full comparison count, so short lists score lower.
    A product without any dominant colors contributes nothing per color.
*/
pub fn color_similarity(uploaded: &[Color], product_colors: &[Color]) -> f64 {
    let total = uploaded
        .iter()
        .take(COMPARED_COLORS)
        .map(|uploaded_color| {
            let best_match = product_colors
                .iter()
                .map(|product_color| color_distance(uploaded_color, product_color))
                .fold(f64::INFINITY, f64::min);
            let color_score = (1.0 - best_match / MAX_COLOR_DISTANCE).max(0.0);
            color_score * uploaded_color.weight()
        })
        .sum::<f64>();

    let term = total / COMPARED_COLORS as f64;
    (term * COLOR_TERM_SCALE + COLOR_TERM_FLOOR).min(1.0) * COLOR_WEIGHT
}

fn score_with_traits(uploaded: &[Color], traits: &ImageTraits, product: &Product) -> f64 {
    let colors = color_similarity(uploaded, &product.dominant_colors);
    let bonus = match traits.bonus_for(&product.category) {
        Some(bonus) => {
            debug!(
                product = %product.name,
                category = %product.category,
                "{bonus:?} image detected, applying category bonus"
            );
            bonus.value()
        }
        None => 0.0,
    };
    (colors + bonus).min(MAX_SCORE)
}

/**
    Scores how well a product matches an uploaded image, in `0.0..=0.99`.

    Combines color similarity with a bonus for product
    categories that the image colors hint towards.
*/
pub fn similarity_score(uploaded: &[Color], product: &Product) -> f64 {
    let traits = ImageTraits::detect(uploaded);
    score_with_traits(uploaded, &traits, product)
}
