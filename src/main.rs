use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use ipsum_blog::app::Blog;
use ipsum_blog::config::Config;
use ipsum_blog::seed::SeedSource;
use ipsum_blog::storage::{ArticleField, Database};
use ipsum_blog::template::ArticleTemplate;
use ipsum_blog::view::{AdminView, IndexView};

/// Get the config directory path (~/.config/ipsum-blog/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("ipsum-blog"))
}

#[derive(Parser, Debug)]
#[command(name = "ipsum-blog", about = "Blog articles backed by SQLite")]
struct Args {
    /// Config file (default: ~/.config/ipsum-blog/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Reset database (delete and recreate)
    #[arg(long)]
    reset_db: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the article index page (seeds an empty store first)
    Index,
    /// Render article, author and word statistics
    Stats,
    /// List authors with their word counts
    Authors,
    /// List articles whose field equals a value (title, category, author, authorUrl, publishedOn)
    Find { field: ArticleField, value: String },
    /// Delete one article by id
    Delete { id: i64 },
    /// Delete every article
    Clear,
}

fn open_output(config: &Config) -> Result<Box<dyn Write>> {
    match &config.output_path {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(std::io::BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}

fn load_template(config: &Config) -> Result<ArticleTemplate> {
    match &config.template_path {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read template {}", path.display()))?;
            ArticleTemplate::compile(&source)
                .with_context(|| format!("Failed to compile template {}", path.display()))
        }
        None => ArticleTemplate::builtin().context("Failed to compile built-in template"),
    }
}

fn build_seed(config: &Config) -> Result<SeedSource> {
    if let Some(path) = &config.seed_file {
        return Ok(SeedSource::file(path));
    }

    let client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()
        .context("Failed to build HTTP client")?;
    Ok(SeedSource::http(client, &config.seed_url)?.with_timeout(config.request_timeout()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        tracing::info!(path = %config_dir.display(), "Created config directory");
    }

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let db_path = config.database_path_in(&config_dir);
    if args.reset_db && db_path.exists() {
        std::fs::remove_file(&db_path).context("Failed to delete database")?;
        println!("Database reset.");
    }

    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = Database::open(db_path_str)
        .await
        .context("Failed to open database")?;

    let blog = Blog::new(db, build_seed(&config)?);

    match args.command.unwrap_or(Command::Index) {
        Command::Index => {
            let mut view = IndexView::new(load_template(&config)?, open_output(&config)?)?;
            blog.fetch_all(&mut view).await?;
        }
        Command::Stats => {
            let mut view = AdminView::new(open_output(&config)?)?;
            blog.fetch_all(&mut view).await?;
        }
        Command::Authors => {
            let articles = blog.reload().await?;
            for entry in articles.num_words_by_author() {
                println!("{}\t{}", entry.name, entry.num_words);
            }
        }
        Command::Find { field, value } => {
            for article in blog.db().find_where(field, &value).await? {
                println!(
                    "{}\t{}\t{}",
                    article.id.unwrap_or_default(),
                    article.title.as_deref().unwrap_or_default(),
                    article.author.as_deref().unwrap_or_default()
                );
            }
        }
        Command::Delete { id } => {
            if blog.db().delete_record(id).await? {
                println!("Deleted article {}", id);
            } else {
                println!("No article with id {}", id);
            }
        }
        Command::Clear => {
            let removed = blog.db().clear_table().await?;
            println!("Removed {} articles", removed);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_parses_field_name() {
        let args = Args::try_parse_from(["ipsum-blog", "find", "authorUrl", "https://x"]).unwrap();
        match args.command {
            Some(Command::Find { field, value }) => {
                assert_eq!(field, ArticleField::AuthorUrl);
                assert_eq!(value, "https://x");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_find_rejects_unknown_field() {
        assert!(Args::try_parse_from(["ipsum-blog", "find", "body", "x"]).is_err());
    }
}
