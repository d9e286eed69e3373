use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use manset::logging::configure_logging;
use manset::models::{AddNewsRequest, NewsImageUpload};
use manset::{ApiConfig, NewsApiClient};

/// Command-line probe for the news content API: exercises every reader (and
/// the one write) against the configured origin and prints the JSON result.
#[derive(Parser)]
#[command(name = "manset", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all categories
    Categories,
    /// List one page of a category's news
    News {
        category_id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    /// Fetch one article, always fresh
    Detail { news_id: String },
    /// Load the homepage carousel, falling back to the general listing
    Carousel,
    /// Breaking news listing, or one item with --id
    Breaking {
        #[arg(long)]
        id: Option<String>,
    },
    /// Astrology news listing, or one item with --id
    Astrology {
        #[arg(long)]
        id: Option<String>,
    },
    /// Submit a new article
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        content: String,
        #[arg(long, value_delimiter = ',')]
        keywords: Vec<String>,
        #[arg(long)]
        category_id: String,
        /// Image file, repeatable
        #[arg(long)]
        image: Vec<PathBuf>,
    },
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

fn load_images(paths: &[PathBuf]) -> Result<Vec<NewsImageUpload>> {
    paths
        .iter()
        .map(|path| {
            let bytes = fs::read(path)
                .with_context(|| format!("Failed to read image {}", path.display()))?;
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("image")
                .to_string();
            Ok(NewsImageUpload {
                content_type: content_type_for(path).to_string(),
                file_name,
                bytes,
            })
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();

    let config = ApiConfig::from_env();
    let client = NewsApiClient::new(config);

    match Cli::parse().command {
        Command::Categories => print_json(&client.get_categories().await)?,
        Command::News {
            category_id,
            page,
            page_size,
        } => print_json(
            &client
                .get_news_by_category(&category_id, page, page_size)
                .await,
        )?,
        Command::Detail { news_id } => match client.get_news_detail(&news_id).await? {
            Some(detail) => print_json(&detail)?,
            None => println!("No article with id {}", news_id),
        },
        Command::Carousel => print_json(&client.get_carousel_news().await)?,
        Command::Breaking { id } => match id {
            Some(id) => match client.get_breaking_news_detail(&id).await? {
                Some(detail) => print_json(&detail)?,
                None => println!("No breaking news with id {}", id),
            },
            None => print_json(&client.get_breaking_news().await)?,
        },
        Command::Astrology { id } => match id {
            Some(id) => match client.get_astrology_news_detail(&id).await? {
                Some(detail) => print_json(&detail)?,
                None => println!("No astrology news with id {}", id),
            },
            None => print_json(&client.get_astrology_news().await)?,
        },
        Command::Add {
            title,
            description,
            content,
            keywords,
            category_id,
            image,
        } => {
            let request = AddNewsRequest {
                title,
                short_description: description,
                content,
                keywords,
                published_date: Utc::now(),
                category_id,
                images: load_images(&image)?,
            };
            let created = client.add_news(request).await?;
            print_json(&created)?;
        }
    }

    Ok(())
}
