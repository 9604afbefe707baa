//! Tierlab demo runner
//!
//! Walks the core end to end: instantiates a starter template, then pushes
//! a generated image through the async loader and watches the holder settle.

use tierlab::catalog::TemplateRegistry;
use tierlab::config::Config;
use tierlab::loader::{BytesSource, FileSelection, ImageLoader, LoadEvent};
use tierlab::model::Item;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "tierlab=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Tierlab tier-list core v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load_default();

    demo_templates()?;
    demo_image_load(&config).await?;

    tracing::info!("Demo complete");
    Ok(())
}

fn demo_templates() -> Result<(), Box<dyn std::error::Error>> {
    let registry = TemplateRegistry::builtin();
    tracing::info!("Built-in templates: {}", registry.names().join(", "));

    let mut list = registry.instantiate("TierMaker", 1, "Snacks, ranked", "Office snack shelf")?;
    if let Some(top) = list.tiers.first_mut() {
        top.items.push(Item::new(1, "Dark chocolate", ""));
        top.items.push(Item::new(2, "Trail mix", ""));
    }
    list.validate()?;

    tracing::info!(
        "Instantiated \"{}\": {} tiers, {} items",
        list.name,
        list.tier_count(),
        list.item_count()
    );
    for tier in &list.tiers {
        tracing::info!("  {}", tier);
    }

    let json = serde_json::to_string_pretty(&list)?;
    tracing::info!("Serialized list is {} bytes of JSON", json.len());

    Ok(())
}

async fn demo_image_load(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let loader = ImageLoader::new(config.loader.clone());
    let cell = loader.cell();
    let mut events = cell.subscribe();

    let png = sample_png()?;
    tracing::info!("Loading a generated {}-byte PNG through the async loader", png.len());

    loader.handle_selection(
        FileSelection::single(BytesSource::named("generated.png", png)),
        Some(Box::new(|url| {
            tracing::info!("Callback fired, data URL is {} chars", url.len());
        })),
    );

    loop {
        match events.recv().await? {
            LoadEvent::Started { load_id, .. } => {
                tracing::info!("Load {} started", load_id);
            }
            LoadEvent::Loaded { image, .. } => {
                tracing::info!(
                    "Holder settled: {} ({} bytes) from {:?}",
                    image.mime,
                    image.byte_len,
                    image.source_name
                );
                let head = &image.data_url[..image.data_url.len().min(40)];
                tracing::info!("Data URL head: {}...", head);
                break;
            }
            LoadEvent::Failed { failure, .. } => {
                tracing::warn!("Load failed: {}", failure.message);
                break;
            }
        }
    }

    // A junk pick lands in the failed state instead of clearing the holder
    loader.handle_selection(
        FileSelection::single(BytesSource::named("junk.bin", vec![0, 1, 2, 3])),
        None,
    );
    loop {
        match events.recv().await? {
            LoadEvent::Started { .. } => continue,
            LoadEvent::Loaded { .. } => break,
            LoadEvent::Failed { failure, .. } => {
                tracing::info!(
                    "Second pick rejected: kind={} message={}",
                    failure.kind,
                    failure.message
                );
                break;
            }
        }
    }

    tracing::info!("Holder generation after both picks: {}", cell.generation());
    Ok(())
}

/// Render a tiny in-memory PNG so the demo has something real to load
fn sample_png() -> Result<Vec<u8>, image::ImageError> {
    let img = image::RgbaImage::from_pixel(16, 16, image::Rgba([120, 80, 200, 255]));
    let mut cursor = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img).write_to(&mut cursor, image::ImageFormat::Png)?;
    Ok(cursor.into_inner())
}
