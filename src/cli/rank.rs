use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use bytes::Bytes;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tokio::fs;
use tracing::info;

use crate::catalog::Catalog;
use crate::matcher::{matching_colors, rank_products, Color, ScoredProduct};
use crate::vision::{analyze_or_fallback, parse_image_url, ImageSource, VisionClient, ENV_API_KEY};

/**
    Runs a single search without starting a server, printing the ranked results as JSON.
*/
#[derive(Debug, Clone, Parser)]
pub struct RankCommand {
    /// Local image file to search with
    #[arg(long, conflicts_with = "url", required_unless_present = "url")]
    image: Option<PathBuf>,
    /// Image URL to search with
    #[arg(long)]
    url: Option<String>,
    #[arg(long, default_value = "products.csv")]
    catalog: PathBuf,
    /// Seed for synthetic catalog colors
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, env = ENV_API_KEY, hide_env_values = true)]
    vision_api_key: Option<String>,
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RankOutput<'a> {
    dominant_colors: &'a [Color],
    results: Vec<ScoredProduct<'a>>,
}

impl RankCommand {
    pub async fn run(self) -> Result<()> {
        let image = match (&self.image, &self.url) {
            (Some(path), _) => read_image_file(path).await?,
            (None, Some(url)) => ImageSource::Url(
                parse_image_url(url).with_context(|| format!("unsupported image url '{url}'"))?,
            ),
            (None, None) => bail!("either an image file or an image url is required"),
        };

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let catalog = Catalog::load(&self.catalog, &mut rng).await;

        let vision = self
            .vision_api_key
            .filter(|k| !k.is_empty())
            .map(VisionClient::new);
        let uploaded_colors = analyze_or_fallback(vision.as_ref(), &image).await;

        let output = RankOutput {
            dominant_colors: matching_colors(&uploaded_colors),
            results: rank_products(&uploaded_colors, &catalog),
        };
        let json = serde_json::to_string_pretty(&output)?;

        match &self.output {
            Some(path) => {
                fs::write(path, json)
                    .await
                    .with_context(|| format!("failed to write '{}'", path.display()))?;
                info!("Wrote {} results to '{}'", output.results.len(), path.display());
            }
            None => println!("{json}"),
        }

        Ok(())
    }
}

async fn read_image_file(path: &Path) -> Result<ImageSource> {
    let mime_type = image_mime_type(path)
        .with_context(|| format!("'{}' is not a supported image file", path.display()))?;
    let content = fs::read(path)
        .await
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    Ok(ImageSource::Upload {
        content: Bytes::from(content),
        mime_type: mime_type.to_string(),
    })
}

fn image_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    Some(match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => return None,
    })
}

#[test]
fn mime_types_from_extensions() {
    assert_eq!(image_mime_type(Path::new("a/b.PNG")), Some("image/png"));
    assert_eq!(image_mime_type(Path::new("photo.jpeg")), Some("image/jpeg"));
    assert_eq!(image_mime_type(Path::new("notes.txt")), None);
    assert_eq!(image_mime_type(Path::new("no_extension")), None);
}
