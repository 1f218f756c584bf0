use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;

use super::ArticleApi;
use crate::error::{AppError, Result};
use crate::models::{Article, ArticlePayload};

const USER_AGENT: &str = "blog-articles/1.0";

pub struct HttpArticleApi {
    client: Client,
    base_url: Url,
}

impl HttpArticleApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let mut base_url = Url::parse(base_url)?;
        // Url::join replaces the last segment unless the path ends in a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    fn collection_url(&self) -> Result<Url> {
        Ok(self.base_url.join("articles")?)
    }

    fn article_url(&self, article_id: i64) -> Result<Url> {
        Ok(self.base_url.join(&format!("articles/{}", article_id))?)
    }

    /// Log the server's acknowledgment and hand it back
    async fn acknowledge(response: Response, action: &str) -> Result<String> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(AppError::Api(format!(
                "{} failed: HTTP {}: {}",
                action, status, text
            )));
        }

        tracing::info!(response = %text, "{}", action);
        Ok(text)
    }
}

#[async_trait]
impl ArticleApi for HttpArticleApi {
    async fn list(&self) -> Result<Vec<Article>> {
        let response = self.client.get(self.collection_url()?).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(AppError::Api(format!(
                "list articles failed: HTTP {}: {}",
                status, error_text
            )));
        }

        let rows: Vec<Value> = response.json().await?;
        let articles: Vec<Article> = rows
            .into_iter()
            .filter_map(|row| match row {
                Value::Object(record) => Some(Article::from_record(record)),
                other => {
                    tracing::warn!("Skipping article row that is not an object: {}", other);
                    None
                }
            })
            .collect();
        tracing::debug!("Listed {} articles", articles.len());
        Ok(articles)
    }

    async fn create(&self, payload: &ArticlePayload<'_>) -> Result<String> {
        let response = self
            .client
            .post(self.collection_url()?)
            .form(payload)
            .send()
            .await?;

        Self::acknowledge(response, "create article").await
    }

    async fn update(&self, article_id: i64, payload: &ArticlePayload<'_>) -> Result<String> {
        let response = self
            .client
            .put(self.article_url(article_id)?)
            .form(payload)
            .send()
            .await?;

        Self::acknowledge(response, "update article").await
    }

    async fn delete(&self, article_id: i64) -> Result<String> {
        let response = self
            .client
            .delete(self.article_url(article_id)?)
            .send()
            .await?;

        Self::acknowledge(response, "delete article").await
    }

    async fn truncate(&self) -> Result<String> {
        let response = self.client.delete(self.collection_url()?).send().await?;

        Self::acknowledge(response, "delete all articles").await
    }
}
