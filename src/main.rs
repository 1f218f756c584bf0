use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use blog_articles::models::Article;
use blog_articles::render::{to_plain_text, ArticleRenderer};
use blog_articles::services::HttpArticleApi;
use blog_articles::{App, AppError, Config, FetchOutcome, Result};

#[derive(Parser)]
#[command(name = "blog-articles")]
#[command(about = "Read and manage the articles of a blog through its API")]
struct Cli {
    /// Config file to use instead of the per-user one
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the articles API, overriding the config
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every article (seeding an empty store) and render it
    List {
        /// Print plain text instead of HTML
        #[arg(long)]
        text: bool,
    },
    /// Create a new article
    Add(ArticleFields),
    /// Change fields of an existing article
    Update {
        article_id: i64,
        #[command(flatten)]
        fields: ArticleFields,
    },
    /// Delete one article
    Delete { article_id: i64 },
    /// Delete every article
    Truncate,
}

#[derive(Args)]
struct ArticleFields {
    #[arg(short, long)]
    title: Option<String>,
    /// Markdown body
    #[arg(short, long)]
    body: Option<String>,
    #[arg(short, long)]
    author: Option<String>,
    #[arg(long)]
    author_url: Option<String>,
    #[arg(short, long)]
    category: Option<String>,
    /// Publication date (YYYY-MM-DD); leave out for a draft
    #[arg(short, long)]
    published_on: Option<String>,
}

impl ArticleFields {
    /// Overwrite the fields given on the command line, keep the rest
    fn apply_to(self, article: &mut Article) {
        let ArticleFields {
            title,
            body,
            author,
            author_url,
            category,
            published_on,
        } = self;
        article.title = title.or(article.title.take());
        article.body = body.or(article.body.take());
        article.author = author.or(article.author.take());
        article.author_url = author_url.or(article.author_url.take());
        article.category = category.or(article.category.take());
        article.published_on = published_on.or(article.published_on.take());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(api_url) = cli.api_url {
        config.api_base_url = api_url;
    }

    let api = HttpArticleApi::new(
        &config.api_base_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    let renderer = match &config.template_path {
        Some(path) => ArticleRenderer::from_template_file(path)?,
        None => ArticleRenderer::new()?,
    };
    let mut app = App::new(
        api,
        renderer,
        config.seed_path.clone(),
        config.seed_concurrency,
    );

    match cli.command {
        Commands::List { text } => {
            match app.fetch_all().await? {
                FetchOutcome::Loaded(count) => tracing::debug!("Loaded {} articles", count),
                FetchOutcome::Seeded(count) => {
                    tracing::info!("Loaded {} articles after seeding", count)
                }
                FetchOutcome::SeedFailed => {
                    eprintln!("No articles stored and seeding failed");
                    return Ok(());
                }
            }

            for html in app.render_all()? {
                if text {
                    println!("{}", to_plain_text(&html, 80)?);
                } else {
                    println!("{}", html);
                }
            }
        }

        Commands::Add(fields) => {
            let mut article = Article::default();
            fields.apply_to(&mut article);
            let ack = app.insert_record(&article).await?;
            println!("{}", ack);
        }

        Commands::Update { article_id, fields } => {
            let mut article = app
                .fetch_stored(article_id)
                .await?
                .ok_or_else(|| AppError::Api(format!("No article with id {}", article_id)))?;
            fields.apply_to(&mut article);
            let ack = app.update_record(&article).await?;
            println!("{}", ack);
        }

        Commands::Delete { article_id } => {
            let article = Article {
                article_id: Some(article_id),
                ..Article::default()
            };
            let ack = app.delete_record(&article).await?;
            println!("{}", ack);
        }

        Commands::Truncate => {
            let ack = app.truncate_table().await?;
            println!("{}", ack);
        }
    }

    Ok(())
}
