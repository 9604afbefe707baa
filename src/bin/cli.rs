//! Tierlab CLI
//!
//! Command-line interface for Tierlab operations:
//! - List and inspect starter templates
//! - Instantiate templates as tier-list JSON
//! - Encode/decode image data URLs
//! - Probe image files

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tierlab::catalog::TemplateRegistry;
use tierlab::config::Config;
use tierlab::dataurl;
use tierlab::loader::{ImageLoader, PathSource};

#[derive(Parser)]
#[command(name = "tierlab")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tier-list editor core toolbox")]
#[command(long_about = "Tierlab is the framework-independent core of a tier-list editor.\nInspect starter templates, stamp out tier lists, and convert images\nto embeddable data URLs.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the built-in templates
    Templates,

    /// Show one template's tiers and colors
    Show {
        /// Template name (e.g. TierMaker)
        template: String,
    },

    /// Instantiate a template as tier-list JSON
    New {
        /// Template name (e.g. TierMaker)
        template: String,
        /// Id for the new list
        #[arg(long, default_value = "1")]
        id: u32,
        /// Name for the new list (default: the template name)
        #[arg(short, long)]
        name: Option<String>,
        /// Description for the new list
        #[arg(short, long, default_value = "")]
        description: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Encode an image file as a base64 data URL
    Encode {
        /// Path to the image file
        path: PathBuf,
        /// Size limit override (bytes)
        #[arg(long)]
        max_bytes: Option<usize>,
        /// Fully decode the image instead of only sniffing magic bytes
        #[arg(long)]
        strict: bool,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode a data URL back into raw bytes
    Decode {
        /// The data URL itself, or a path to a file containing it
        input: String,
        /// Where to write the decoded bytes (default: summary only)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect an image file without printing the payload
    Probe {
        /// Path to the image file
        path: PathBuf,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Templates => {
            let registry = TemplateRegistry::builtin();

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(registry.all())?);
            } else {
                println!("{:<12} {:<6} {}", "Name", "Tiers", "Colors");
                println!("{}", "-".repeat(50));
                for template in registry.all() {
                    let colors: Vec<&str> =
                        template.tiers.iter().map(|t| t.color_hex.as_str()).collect();
                    println!(
                        "{:<12} {:<6} {}",
                        template.name,
                        template.tier_count(),
                        colors.join(" ")
                    );
                }
            }
        }

        Commands::Show { template } => {
            let registry = TemplateRegistry::builtin();
            let template = match registry.get(&template) {
                Some(t) => t,
                None => {
                    eprintln!("Unknown template: {}", template);
                    eprintln!("Available: {}", registry.names().join(", "));
                    std::process::exit(1);
                }
            };

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(template)?);
            } else {
                println!("{} ({} tiers)", template.name, template.tier_count());
                for tier in &template.tiers {
                    println!("  {:<4} {}", tier.label, tier.color_hex);
                }
            }
        }

        Commands::New {
            template,
            id,
            name,
            description,
            output,
        } => {
            let registry = TemplateRegistry::builtin();
            let list_name = name.unwrap_or_else(|| template.clone());

            let list = match registry.instantiate(&template, id, list_name, description) {
                Ok(list) => list,
                Err(e) => {
                    eprintln!("{}", e);
                    eprintln!("Available: {}", registry.names().join(", "));
                    std::process::exit(1);
                }
            };

            let json = serde_json::to_string_pretty(&list)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &json)?;
                    println!("Wrote {:?}", path);
                }
                None => {
                    println!("{}", json);
                }
            }
        }

        Commands::Encode {
            path,
            max_bytes,
            strict,
            output,
        } => {
            let mut loader_config = Config::load_default().loader;
            if let Some(max) = max_bytes {
                loader_config.max_bytes = max;
            }
            loader_config.strict_decode = strict;

            let loader = ImageLoader::new(loader_config);
            let image = match loader.load(&PathSource::new(&path)).await {
                Ok(image) => image,
                Err(e) => {
                    eprintln!("Failed to encode {:?}: {}", path, e);
                    std::process::exit(1);
                }
            };

            match output {
                Some(out) => {
                    std::fs::write(&out, &image.data_url)?;
                    println!(
                        "Encoded {:?} ({} bytes, {}) to {:?}",
                        path, image.byte_len, image.mime, out
                    );
                }
                None => {
                    println!("{}", image.data_url);
                }
            }
        }

        Commands::Decode { input, output } => {
            // Accept the URL directly or a file holding it
            let url = if dataurl::is_data_url(&input) {
                input
            } else {
                std::fs::read_to_string(&input)?.trim().to_string()
            };

            let payload = match dataurl::decode(&url) {
                Ok(payload) => payload,
                Err(e) => {
                    eprintln!("Failed to decode: {}", e);
                    std::process::exit(1);
                }
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, &payload.bytes)?;
                    println!(
                        "Decoded {} bytes of {} to {:?}",
                        payload.bytes.len(),
                        payload.mime,
                        path
                    );
                }
                None => {
                    println!("{} bytes of {}", payload.bytes.len(), payload.mime);
                }
            }
        }

        Commands::Probe { path } => {
            let loader = ImageLoader::new(Config::load_default().loader);
            let image = match loader.load(&PathSource::new(&path)).await {
                Ok(image) => image,
                Err(e) => {
                    eprintln!("Failed to probe {:?}: {}", path, e);
                    std::process::exit(1);
                }
            };

            if cli.format == "json" {
                let summary = serde_json::json!({
                    "source": image.source_name,
                    "mime": image.mime,
                    "bytes": image.byte_len,
                    "data_url_chars": image.data_url.len(),
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Source:        {}", image.source_name.as_deref().unwrap_or("-"));
                println!("MIME type:     {}", image.mime);
                println!("Raw bytes:     {}", image.byte_len);
                println!("Data URL size: {} chars", image.data_url.len());
            }
        }

        Commands::Config { output } => {
            let config = tierlab::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}
