use clap::{Parser, Subcommand};
use image_attrs::backend::MemoryStore;
use image_attrs::cdn::CdnUrlBuilder;
use image_attrs::transform::{TransformOptions, TransformValue};
use image_attrs::types::AssetId;
use image_attrs::{MediaLibrary, config, logging, output, render};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "image-attrs")]
#[command(about = "Resolve presentation-ready image attributes")]
#[command(long_about = "\
Resolve presentation-ready image attributes

Reads an asset store (JSON) and resolves each image's URL, dimensions,
orientation, focal point, and text fields through the configured delivery
tiers:

  cdn       rewrite the upload URL onto the CDN, with transformations
  resizer   pre-cropped variant for the requested size box
  native    stored rendition for the named size

The first tier that yields a URL with non-zero dimensions wins.

Run 'image-attrs gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Asset store (JSON)
    #[arg(long, default_value = "assets.json", global = true)]
    store: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the attributes of one asset
    Resolve {
        /// Asset id
        id: u64,
        /// Logical size (defaults to images.default_size)
        #[arg(long)]
        size: Option<String>,
        /// Treat the id as an owning record and resolve its featured image
        #[arg(long)]
        featured: bool,
        /// Print the attributes as JSON
        #[arg(long, conflicts_with = "html")]
        json: bool,
        /// Print an <img> tag
        #[arg(long)]
        html: bool,
    },
    /// Rewrite a local upload URL onto the CDN
    Url {
        /// Local upload URL
        local_url: String,
        /// Transformation option, e.g. -t width=100 (repeatable)
        #[arg(short = 't', long = "transform", value_parser = TransformOptions::parse_pair)]
        transforms: Vec<(String, TransformValue)>,
    },
    /// Encode transformation options into a CDN segment
    Encode {
        /// Transformation option, e.g. -t width=100 (repeatable)
        #[arg(short = 't', long = "transform", value_parser = TransformOptions::parse_pair)]
        transforms: Vec<(String, TransformValue)>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json_logs);

    match cli.command {
        Command::Resolve {
            id,
            size,
            featured,
            json,
            html,
        } => {
            let config = config::load_config(&cli.config_dir)?;
            let store = Arc::new(MemoryStore::load(&cli.store)?);
            let library = MediaLibrary::from_config(&config, store);
            tracing::debug!(tiers = ?library.resolver().tiers(), "backend chain");

            let id = AssetId(id);
            let image = if featured {
                let Some(image) = library.featured_image(id) else {
                    return Err(format!("record {id} has no featured image").into());
                };
                image
            } else {
                match size {
                    Some(size) => library.image_sized(id, size),
                    None => library.image(id),
                }
            };

            if image.src().is_none() {
                tracing::warn!(%id, size = image.size(), "no backend produced a usable rendition");
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&image.attributes())?);
            } else if html {
                println!("{}", render::img_tag(&image).into_string());
            } else {
                output::print_attributes(&image.attributes());
            }
        }
        Command::Url {
            local_url,
            transforms,
        } => {
            let config = config::load_config(&cli.config_dir)?;
            let options = if transforms.is_empty() {
                config.cdn.transformations.clone()
            } else {
                cli_options(transforms)
            };
            match CdnUrlBuilder::from_config(&config.cdn) {
                Some(builder) => println!("{}", builder.url_with(&local_url, &options)),
                None => {
                    tracing::warn!("cdn is disabled in config.toml, URL left unchanged");
                    println!("{local_url}");
                }
            }
        }
        Command::Encode { transforms } => {
            println!("{}", cli_options(transforms).encode());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Collect `-t` pairs, warning about names the CDN does not know.
fn cli_options(pairs: Vec<(String, TransformValue)>) -> TransformOptions {
    let options: TransformOptions = pairs.into_iter().collect();
    for name in options.unknown_keys() {
        tracing::warn!(option = name, "unknown transformation option, ignored");
    }
    options
}
