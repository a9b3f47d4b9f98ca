use const_format::concatcp;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::matcher::Color;

use super::colors::generate_dominant_colors;

const PLACEHOLDER_IMAGE_BASE: &str = "https://picsum.photos/250/200";
const PLACEHOLDER_IMAGE_QUERY: &str = concatcp!(PLACEHOLDER_IMAGE_BASE, "?random=");

const DEFAULT_NAME: &str = "Unnamed Product";
const DEFAULT_CATEGORY: &str = "Uncategorized";
const DEFAULT_PRICE: &str = "0";
const DEFAULT_DESCRIPTION: &str = "No description available";

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Decimal string, `"0"` means unset.
    pub price: String,
    pub image_url: String,
    pub description: String,
    pub dominant_colors: Vec<Color>,
}

/**
    A single row of a product CSV file.

    Every column is optional, missing or empty values
    get defaults when turned into a [`Product`].
*/
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(super) struct ProductRow {
    id: Option<String>,
    name: Option<String>,
    category: Option<String>,
    price: Option<String>,
    image_url: Option<String>,
    description: Option<String>,
}

impl ProductRow {
    /**
        Fills in defaults and assigns synthetic dominant colors.

        The row index is zero-based and only used for the placeholder image.
    */
    pub fn into_product<R: Rng>(self, row_index: usize, rng: &mut R) -> Product {
        let id = non_empty(self.id).unwrap_or_else(|| random_id(rng));
        Product {
            id,
            name: non_empty(self.name).unwrap_or_else(|| DEFAULT_NAME.to_string()),
            category: non_empty(self.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            price: non_empty(self.price).unwrap_or_else(|| DEFAULT_PRICE.to_string()),
            image_url: non_empty(self.image_url)
                .unwrap_or_else(|| placeholder_image_url(row_index + 1)),
            description: non_empty(self.description)
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            dominant_colors: generate_dominant_colors(rng),
        }
    }
}

pub(super) fn placeholder_image_url(n: usize) -> String {
    format!("{PLACEHOLDER_IMAGE_QUERY}{n}")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn random_id<R: Rng>(rng: &mut R) -> String {
    (0..ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect()
}
