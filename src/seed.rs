use std::path::Path;

use serde_json::{Map, Value};

use crate::error::Result;
use crate::models::Article;

/// Read the bundled seed data: a JSON array of article records
pub async fn load_seed_file(path: &Path) -> Result<Vec<Article>> {
    let content = tokio::fs::read_to_string(path).await?;
    let records: Vec<Map<String, Value>> = serde_json::from_str(&content)?;

    Ok(records.into_iter().map(Article::from_record).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::io::Write;

    #[tokio::test]
    async fn reads_every_record() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r###"[
                {{"title": "One", "publishedOn": "2015-02-10", "author": "Ada"}},
                {{"title": "Two", "body": "## heading"}}
            ]"###
        )
        .unwrap();

        let articles = load_seed_file(file.path()).await.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].author.as_deref(), Some("Ada"));
        assert_eq!(articles[1].body.as_deref(), Some("## heading"));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_seed_file(&dir.path().join("nope.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[tokio::test]
    async fn non_array_document_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"title": "not a list"}}"#).unwrap();

        let err = load_seed_file(file.path()).await.unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[tokio::test]
    async fn bundled_seed_data_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/hackerIpsum.json");
        let articles = load_seed_file(&path).await.unwrap();

        assert!(!articles.is_empty());
        assert!(articles.iter().all(|a| a.article_id.is_none()));
    }
}
