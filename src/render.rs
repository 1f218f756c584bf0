//! Article rendering: Markdown body to HTML, then into the article template.
//!
//! Rendering works on a [`RenderContext`] built from the article, so the
//! article itself is never modified and rendering it again gives the same HTML.

use std::path::Path;

use chrono::{DateTime, Utc};
use comrak::{markdown_to_html, Options};
use serde::Serialize;
use serde_json::{Map, Value};
use tera::{Context, Tera};

use crate::error::Result;
use crate::models::Article;

pub const TEMPLATE_NAME: &str = "article.html";

const DEFAULT_TEMPLATE: &str = r##"<article data-category="{{ category | default(value="") }}" data-author="{{ author | default(value="") }}">
  <header>
    <h1>{{ title | default(value="") }}</h1>
    <div class="byline">
      By <address><a href="{{ authorUrl | default(value="") }}">{{ author | default(value="") }}</a></address>
      <span class="publish-status">{{ publishStatus }}</span>
    </div>
  </header>
  <section class="article-body">{{ body | safe }}</section>
  <a href="#" class="read-on">Read on &rarr;</a>
</article>
"##;

/// Everything the template sees: the article's record with `body` converted
/// to HTML, plus the two derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderContext {
    #[serde(flatten)]
    pub record: Map<String, Value>,
    #[serde(rename = "daysAgo")]
    pub days_ago: Option<i64>,
    #[serde(rename = "publishStatus")]
    pub publish_status: String,
}

pub struct ArticleRenderer {
    tera: Tera,
}

impl ArticleRenderer {
    pub fn new() -> Result<Self> {
        Self::with_template(DEFAULT_TEMPLATE)
    }

    pub fn from_template_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::with_template(&source)
    }

    pub fn with_template(source: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, source)?;
        Ok(Self { tera })
    }

    pub fn context_for(&self, article: &Article, now: DateTime<Utc>) -> Result<RenderContext> {
        let mut record = article.to_record();

        let body = markdown_body(article.body.as_deref().unwrap_or_default());
        record.insert("body".to_string(), Value::String(body));

        let days_ago = article.published_at().map(|published| days_ago(published, now));

        Ok(RenderContext {
            record,
            days_ago,
            publish_status: publish_status(article, days_ago),
        })
    }

    pub fn render(&self, article: &Article, now: DateTime<Utc>) -> Result<String> {
        let context = Context::from_serialize(self.context_for(article, now)?)?;
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}

fn markdown_body(source: &str) -> String {
    let mut options = Options::default();
    // Inline HTML in article bodies passes through untouched
    options.render.unsafe_ = true;
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    markdown_to_html(source, &options)
}

/// Whole days elapsed, truncated toward zero. Future dates go negative.
pub fn days_ago(published: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let elapsed_ms = (now - published).num_milliseconds() as f64;
    (elapsed_ms / 60.0 / 60.0 / 24.0 / 1000.0).trunc() as i64
}

/// An unparseable `publishedOn` has no day count; it shows as `NaN`
fn publish_status(article: &Article, days_ago: Option<i64>) -> String {
    if article.is_draft() {
        return "(draft)".to_string();
    }

    match days_ago {
        Some(days) => format!("published {} days ago", days),
        None => "published NaN days ago".to_string(),
    }
}

/// Terminal-friendly view of rendered article HTML
pub fn to_plain_text(html: &str, width: usize) -> Result<String> {
    html2text::from_read(html.as_bytes(), width)
        .map_err(|e| anyhow::anyhow!("Failed to convert HTML to text: {}", e).into())
}
