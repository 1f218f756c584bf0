use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// One blog article as exchanged with the articles API.
///
/// Known columns holding a value of the expected JSON type are typed. Every
/// other entry, including `null`s, mistyped known columns and extra columns
/// such as `author_id`, is kept verbatim in `extra`, so a record survives a
/// round trip through this type unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Article {
    pub article_id: Option<i64>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub author: Option<String>,
    pub author_url: Option<String>,
    pub category: Option<String>,
    pub published_on: Option<String>,
    pub extra: Map<String, Value>,
}

/// The fields sent on create and update. `article_id` is assigned by the
/// server and never part of a write body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticlePayload<'a> {
    pub author: &'a str,
    #[serde(rename = "authorUrl")]
    pub author_url: &'a str,
    pub body: &'a str,
    pub category: &'a str,
    #[serde(rename = "publishedOn")]
    pub published_on: &'a str,
    pub title: &'a str,
}

impl Article {
    pub fn from_record(mut record: Map<String, Value>) -> Self {
        Self {
            article_id: take_i64(&mut record, "article_id"),
            title: take_string(&mut record, "title"),
            body: take_string(&mut record, "body"),
            author: take_string(&mut record, "author"),
            author_url: take_string(&mut record, "authorUrl"),
            category: take_string(&mut record, "category"),
            published_on: take_string(&mut record, "publishedOn"),
            extra: record,
        }
    }

    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = self.extra.clone();
        if let Some(article_id) = self.article_id {
            record.insert("article_id".to_string(), Value::from(article_id));
        }

        let columns = [
            ("title", &self.title),
            ("body", &self.body),
            ("author", &self.author),
            ("authorUrl", &self.author_url),
            ("category", &self.category),
            ("publishedOn", &self.published_on),
        ];
        for (key, value) in columns {
            if let Some(value) = value {
                record.insert(key.to_string(), Value::String(value.clone()));
            }
        }
        record
    }

    pub fn payload(&self) -> ArticlePayload<'_> {
        ArticlePayload {
            author: self.author.as_deref().unwrap_or_default(),
            author_url: self.author_url.as_deref().unwrap_or_default(),
            body: self.body.as_deref().unwrap_or_default(),
            category: self.category.as_deref().unwrap_or_default(),
            published_on: self.published_on.as_deref().unwrap_or_default(),
            title: self.title.as_deref().unwrap_or_default(),
        }
    }

    /// Unpublished drafts carry no `publishedOn`, or an empty one
    pub fn is_draft(&self) -> bool {
        self.published_on.as_deref().map_or(true, str::is_empty)
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_on.as_deref().and_then(parse_datetime)
    }
}

fn take_string(record: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !record.get(key).is_some_and(Value::is_string) {
        return None;
    }
    match record.remove(key) {
        Some(Value::String(value)) => Some(value),
        _ => None,
    }
}

fn take_i64(record: &mut Map<String, Value>, key: &str) -> Option<i64> {
    let value = record.get(key).and_then(Value::as_i64)?;
    record.remove(key);
    Some(value)
}

pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    // RFC3339 (e.g., "2015-02-10T08:00:00.000Z")
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // SQL timestamp (e.g., "2015-02-10 08:00:00")
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    // Bare date as found in the seed data (e.g., "2015-02-10")
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}
