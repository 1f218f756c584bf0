use std::cmp::Reverse;

use super::Article;

/// Every article loaded so far, most recently published first within each load.
#[derive(Debug, Clone, Default)]
pub struct ArticleCollection {
    articles: Vec<Article>,
}

impl ArticleCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort `records` newest first and append them.
    ///
    /// The sort is stable. Records without a parseable `publishedOn` go after
    /// every dated record and keep their relative order.
    pub fn load_all(&mut self, mut records: Vec<Article>) {
        records.sort_by_key(|article| Reverse(article.published_at()));
        self.articles.extend(records);
    }

    pub fn append(&mut self, article: Article) {
        self.articles.push(article);
    }

    pub fn list(&self) -> &[Article] {
        &self.articles
    }

    pub fn find(&self, article_id: i64) -> Option<&Article> {
        self.articles
            .iter()
            .find(|a| a.article_id == Some(article_id))
    }

    pub fn clear(&mut self) {
        self.articles.clear();
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, published_on: Option<&str>) -> Article {
        Article {
            title: Some(title.to_string()),
            published_on: published_on.map(str::to_string),
            ..Article::default()
        }
    }

    fn titles(collection: &ArticleCollection) -> Vec<&str> {
        collection
            .list()
            .iter()
            .map(|a| a.title.as_deref().unwrap_or_default())
            .collect()
    }

    #[test]
    fn load_all_sorts_newest_first() {
        let mut collection = ArticleCollection::new();
        collection.load_all(vec![
            article("middle", Some("2015-02-10")),
            article("oldest", Some("2014-11-01T08:00:00.000Z")),
            article("newest", Some("2016-01-03 12:00:00")),
        ]);

        assert_eq!(titles(&collection), vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn load_all_appends_after_existing_articles() {
        let mut collection = ArticleCollection::new();
        collection.append(article("already here", Some("2020-01-01")));

        collection.load_all(vec![
            article("b", Some("2015-01-01")),
            article("a", Some("2016-01-01")),
        ]);

        assert_eq!(collection.len(), 3);
        assert_eq!(titles(&collection), vec!["already here", "a", "b"]);
    }

    #[test]
    fn load_all_with_no_records_changes_nothing() {
        let mut collection = ArticleCollection::new();
        collection.append(article("only", None));

        collection.load_all(Vec::new());

        assert_eq!(titles(&collection), vec!["only"]);
    }

    #[test]
    fn undated_records_sort_last_in_input_order() {
        let mut collection = ArticleCollection::new();
        collection.load_all(vec![
            article("draft one", None),
            article("garbage date", Some("not a date")),
            article("dated", Some("2015-02-10")),
            article("draft two", Some("")),
        ]);

        assert_eq!(
            titles(&collection),
            vec!["dated", "draft one", "garbage date", "draft two"]
        );
    }

    #[test]
    fn find_and_clear() {
        let mut collection = ArticleCollection::new();
        collection.append(Article {
            article_id: Some(9),
            ..article("nine", None)
        });

        assert_eq!(
            collection.find(9).and_then(|a| a.title.as_deref()),
            Some("nine")
        );
        assert!(collection.find(10).is_none());

        collection.clear();
        assert!(collection.is_empty());
    }
}
