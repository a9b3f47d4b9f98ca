use std::cmp::Reverse;

use serde::{Serialize, Serializer};

use crate::catalog::{Catalog, Product};

use super::color::Color;
use super::constants::{COMPARED_COLORS, MAX_RESULTS};
use super::score::similarity_score;

/**
    A product scored against one uploaded image.

    Only lives for the duration of a single search, and borrows
    both the product and the uploaded colors it was scored with.
*/
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProduct<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    #[serde(serialize_with = "serialize_score")]
    pub score: f64,
    pub matching_colors: &'a [Color],
}

impl ScoredProduct<'_> {
    /**
        The score as shown to clients, with two decimals.
    */
    pub fn display_score(&self) -> String {
        format_score(self.score)
    }

    /**
        The score in hundredths, used for ordering so
        that ranking agrees with the scores clients see.
    */
    fn rank_key(&self) -> i64 {
        score_hundredths(self.score)
    }
}

fn score_hundredths(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

pub fn format_score(score: f64) -> String {
    format!("{:.2}", score_hundredths(score) as f64 / 100.0)
}

fn serialize_score<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_score(*score))
}

/**
    The uploaded colors that get compared against products.
*/
pub fn matching_colors(uploaded: &[Color]) -> &[Color] {
    &uploaded[..uploaded.len().min(COMPARED_COLORS)]
}

/**
    Scores every product in the catalog against the uploaded colors
    and returns the best matches, highest score first.

    Products with equal (rounded) scores keep their catalog order.
*/
pub fn rank_products<'a>(uploaded: &'a [Color], catalog: &'a Catalog) -> Vec<ScoredProduct<'a>> {
    let matching = matching_colors(uploaded);

    let mut scored = catalog
        .products()
        .iter()
        .map(|product| ScoredProduct {
            product,
            score: similarity_score(uploaded, product),
            matching_colors: matching,
        })
        .collect::<Vec<_>>();

    scored.sort_by_cached_key(|s| Reverse(s.rank_key()));
    scored.truncate(MAX_RESULTS);
    scored
}
