use rand::Rng;
use strum::{Display, EnumIter, IntoEnumIterator};

use super::colors::generate_dominant_colors;
use super::product::{placeholder_image_url, Product};

pub const FALLBACK_PRODUCT_COUNT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
enum FallbackCategory {
    Clothing,
    Electronics,
    Home,
    Sports,
}

/**
    Builds a synthetic catalog, used whenever no real product data could be loaded.
*/
pub fn fallback_products<R: Rng>(rng: &mut R) -> Vec<Product> {
    let categories = FallbackCategory::iter().collect::<Vec<_>>();
    (1..=FALLBACK_PRODUCT_COUNT)
        .map(|i| {
            let category = categories[rng.gen_range(0..categories.len())].to_string();
            let price = rng.gen::<f64>() * 1000.0 + 10.0;
            Product {
                id: i.to_string(),
                name: format!("Product {i}"),
                description: format!("This is a sample {} product", category.to_lowercase()),
                category,
                price: format!("{price:.2}"),
                image_url: placeholder_image_url(i),
                dominant_colors: generate_dominant_colors(rng),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn fallback_catalog_shape() {
        let products = fallback_products(&mut StdRng::seed_from_u64(0));
        assert_eq!(products.len(), FALLBACK_PRODUCT_COUNT);

        let first = &products[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.name, "Product 1");
        assert_eq!(first.image_url, "https://picsum.photos/250/200?random=1");
        assert_eq!(
            first.description,
            format!("This is a sample {} product", first.category.to_lowercase())
        );

        for product in &products {
            assert!(["Clothing", "Electronics", "Home", "Sports"].contains(&product.category.as_str()));
            let price = product.price.parse::<f64>().unwrap();
            assert!((10.0..=1010.0).contains(&price));
            assert_eq!(product.dominant_colors.len(), 3);
        }
    }
}
