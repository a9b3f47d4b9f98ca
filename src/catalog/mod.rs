use std::{io, path::Path};

use anyhow::{Context, Result};
use rand::Rng;
use tokio::fs;
use tracing::{error, info, warn};

mod colors;
mod fallback;
mod product;

use product::ProductRow;

pub use colors::*;
pub use fallback::*;
pub use product::Product;

/**
    A read-only snapshot of all products that searches are ranked against.

    Loaded once at startup and then shared, every product
    already has its dominant colors assigned.
*/
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /**
        Parses products from CSV data with a header row.

        Columns are matched by name, unknown columns are ignored and
        missing ones get defaults, see [`Product`] for the fields.
    */
    pub fn from_csv_reader<D, R>(data: D, rng: &mut R) -> Result<Self>
    where
        D: io::Read,
        R: Rng,
    {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);
        let mut products = Vec::new();
        for (index, row) in reader.deserialize::<ProductRow>().enumerate() {
            let row = row.with_context(|| format!("failed to parse product row {}", index + 1))?;
            products.push(row.into_product(index, rng));
        }
        Ok(Self::new(products))
    }

    /**
        Builds a catalog from CSV data, falling back to the synthetic
        catalog if the data could not be parsed or contained no products.
    */
    pub fn from_csv_or_fallback<D, R>(data: D, rng: &mut R) -> Self
    where
        D: io::Read,
        R: Rng,
    {
        match Self::from_csv_reader(data, rng) {
            Ok(catalog) if !catalog.is_empty() => catalog,
            Ok(_) => {
                warn!("product file contained no products, using fallback catalog");
                Self::fallback(rng)
            }
            Err(e) => {
                error!("failed to load products - {e:?}");
                Self::fallback(rng)
            }
        }
    }

    pub fn fallback<R: Rng>(rng: &mut R) -> Self {
        Self::new(fallback_products(rng))
    }

    /**
        Loads the catalog from a CSV file at the given path.

        Never fails - a missing or unreadable file results in the fallback catalog.
    */
    pub async fn load<R: Rng>(path: &Path, rng: &mut R) -> Self {
        let catalog = match fs::read(path).await {
            Ok(bytes) => Self::from_csv_or_fallback(bytes.as_slice(), rng),
            Err(e) => {
                error!("failed to read product file '{}' - {e}", path.display());
                Self::fallback(rng)
            }
        };
        info!("Loaded {} products", catalog.len());
        catalog
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    const CSV: &str = "\
id,name,category,price,imageUrl,description
a1,Red Shirt,Clothing,19.99,https://picsum.photos/250/200?random=9,A red shirt
,Phone,Electronics,,,
";

    #[test]
    fn parses_csv_rows_with_defaults() {
        let mut rng = StdRng::seed_from_u64(1);
        let catalog = Catalog::from_csv_reader(CSV.as_bytes(), &mut rng).unwrap();
        assert_eq!(catalog.len(), 2);

        let shirt = &catalog.products()[0];
        assert_eq!(shirt.id, "a1");
        assert_eq!(shirt.price, "19.99");
        assert_eq!(shirt.dominant_colors.len(), 3);

        let phone = &catalog.products()[1];
        assert_eq!(phone.category, "Electronics");
        assert_eq!(phone.price, "0");
        assert_eq!(phone.image_url, "https://picsum.photos/250/200?random=2");
        assert_eq!(phone.description, "No description available");
    }

    #[test]
    fn missing_columns_get_defaults() {
        let mut rng = StdRng::seed_from_u64(1);
        let catalog = Catalog::from_csv_reader("name\nLamp\n".as_bytes(), &mut rng).unwrap();
        let lamp = &catalog.products()[0];
        assert_eq!(lamp.name, "Lamp");
        assert_eq!(lamp.category, "Uncategorized");
    }

    #[test]
    fn header_only_csv_falls_back() {
        let mut rng = StdRng::seed_from_u64(1);
        let catalog = Catalog::from_csv_or_fallback("id,name\n".as_bytes(), &mut rng);
        assert_eq!(catalog.len(), FALLBACK_PRODUCT_COUNT);
    }

    #[tokio::test]
    async fn missing_file_falls_back() {
        let mut rng = StdRng::seed_from_u64(1);
        let catalog = Catalog::load(Path::new("does/not/exist/products.csv"), &mut rng).await;
        assert_eq!(catalog.len(), FALLBACK_PRODUCT_COUNT);
    }
}
