mod articles_api;
mod traits;

pub use articles_api::HttpArticleApi;
pub use traits::ArticleApi;
