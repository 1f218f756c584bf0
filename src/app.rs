use std::path::PathBuf;

use chrono::Utc;
use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{Article, ArticleCollection};
use crate::render::ArticleRenderer;
use crate::seed::load_seed_file;
use crate::services::ArticleApi;

/// What `fetch_all` ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The store already had articles; this many were loaded
    Loaded(usize),
    /// The store was empty and got seeded; this many were loaded afterwards
    Seeded(usize),
    /// Seeding failed and was logged; nothing was loaded
    SeedFailed,
}

pub struct App<A: ArticleApi> {
    api: A,
    collection: ArticleCollection,
    renderer: ArticleRenderer,
    seed_path: PathBuf,
    seed_concurrency: usize,
}

impl<A: ArticleApi> App<A> {
    pub fn new(
        api: A,
        renderer: ArticleRenderer,
        seed_path: PathBuf,
        seed_concurrency: usize,
    ) -> Self {
        Self {
            api,
            collection: ArticleCollection::new(),
            renderer,
            seed_path,
            seed_concurrency: seed_concurrency.max(1),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn articles(&self) -> &[Article] {
        self.collection.list()
    }

    pub fn find(&self, article_id: i64) -> Option<&Article> {
        self.collection.find(article_id)
    }

    /// Load every stored article, seeding the store first when it is empty.
    ///
    /// Seeding runs at most once per call. Seed failures are logged and
    /// reported as [`FetchOutcome::SeedFailed`] rather than returned as errors.
    pub async fn fetch_all(&mut self) -> Result<FetchOutcome> {
        let articles = self.api.list().await?;
        if !articles.is_empty() {
            let count = articles.len();
            self.collection.load_all(articles);
            return Ok(FetchOutcome::Loaded(count));
        }

        tracing::info!("No articles stored, seeding from {}", self.seed_path.display());
        match self.seed().await {
            Ok(count) => tracing::info!("Seeded {} articles", count),
            Err(e) => {
                tracing::error!("Failed to seed articles: {}", e);
                return Ok(FetchOutcome::SeedFailed);
            }
        }

        let articles = self.api.list().await?;
        if articles.is_empty() {
            tracing::warn!("Articles store is still empty after seeding");
        }
        let count = articles.len();
        self.collection.load_all(articles);
        Ok(FetchOutcome::Seeded(count))
    }

    /// Insert every seed article, waiting for all inserts to finish
    async fn seed(&self) -> Result<usize> {
        let articles = load_seed_file(&self.seed_path).await?;
        let api = &self.api;

        let results: Vec<Result<String>> = stream::iter(&articles)
            .map(|article| async move {
                let payload = article.payload();
                api.create(&payload).await
            })
            .buffer_unordered(self.seed_concurrency)
            .collect()
            .await;

        let mut failures = 0;
        for result in &results {
            if let Err(e) = result {
                tracing::debug!("Seed insert failed: {}", e);
                failures += 1;
            }
        }

        if failures > 0 {
            return Err(AppError::Api(format!(
                "{} of {} seed inserts failed",
                failures,
                articles.len()
            )));
        }

        Ok(articles.len())
    }

    /// Look up one stored article without loading or seeding anything
    pub async fn fetch_stored(&self, article_id: i64) -> Result<Option<Article>> {
        let articles = self.api.list().await?;
        Ok(articles
            .into_iter()
            .find(|a| a.article_id == Some(article_id)))
    }

    /// Delete every stored article. Articles already loaded stay loaded.
    pub async fn truncate_table(&self) -> Result<String> {
        self.api.truncate().await
    }

    /// Store `article` as a new record. The id the server assigns is not
    /// read back; fetch again to see it.
    pub async fn insert_record(&self, article: &Article) -> Result<String> {
        self.api.create(&article.payload()).await
    }

    pub async fn update_record(&self, article: &Article) -> Result<String> {
        let article_id = article.article_id.ok_or(AppError::MissingId)?;
        self.api.update(article_id, &article.payload()).await
    }

    /// Delete the stored record. The loaded copy is left in place.
    pub async fn delete_record(&self, article: &Article) -> Result<String> {
        let article_id = article.article_id.ok_or(AppError::MissingId)?;
        self.api.delete(article_id).await
    }

    pub fn render(&self, article: &Article) -> Result<String> {
        self.renderer.render(article, Utc::now())
    }

    pub fn render_all(&self) -> Result<Vec<String>> {
        self.articles()
            .iter()
            .map(|article| self.render(article))
            .collect()
    }
}
