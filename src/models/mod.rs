mod article;
mod collection;

pub use article::{parse_datetime, Article, ArticlePayload};
pub use collection::ArticleCollection;
