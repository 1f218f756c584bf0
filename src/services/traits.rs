use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Article, ArticlePayload};

/// The remote articles resource.
///
/// Writes resolve to the server's acknowledgment text, which is opaque to us.
#[async_trait]
pub trait ArticleApi: Send + Sync {
    /// `GET /articles`
    async fn list(&self) -> Result<Vec<Article>>;

    /// `POST /articles`
    async fn create(&self, payload: &ArticlePayload<'_>) -> Result<String>;

    /// `PUT /articles/{article_id}`
    async fn update(&self, article_id: i64, payload: &ArticlePayload<'_>) -> Result<String>;

    /// `DELETE /articles/{article_id}`
    async fn delete(&self, article_id: i64) -> Result<String>;

    /// `DELETE /articles`, removing every stored article
    async fn truncate(&self) -> Result<String>;
}
