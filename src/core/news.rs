//! News abstractions and digest formatting

use super::error::AlertError;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};

/// Articles included in a digest.
pub const DIGEST_ARTICLES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub company: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl NewsQuery {
    /// Headlines published between yesterday and `today`.
    pub fn since_yesterday(company: &str, today: NaiveDate) -> Self {
        NewsQuery {
            company: company.to_string(),
            from: today - Duration::days(1),
            to: today,
        }
    }
}

#[async_trait]
pub trait NewsProvider: Send + Sync {
    async fn fetch_articles(&self, query: &NewsQuery) -> Result<Vec<Article>, AlertError>;
}

/// Formats the first few articles as numbered blocks separated by blank lines.
pub fn digest(articles: &[Article]) -> String {
    articles
        .iter()
        .take(DIGEST_ARTICLES)
        .enumerate()
        .map(|(i, article)| {
            format!(
                "Article {}:\nTitle: {}\nDescription: {}\n{}",
                i + 1,
                article.title,
                article.description.as_deref().unwrap_or_default(),
                article.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(n: usize) -> Article {
        Article {
            title: format!("Headline {n}"),
            description: Some(format!("Summary {n}")),
            url: format!("https://news.example.com/{n}"),
        }
    }

    #[test]
    fn test_digest_takes_first_three() {
        let articles: Vec<Article> = (1..=5).map(article).collect();
        let expected = "Article 1:\nTitle: Headline 1\nDescription: Summary 1\nhttps://news.example.com/1\n\n\
                        Article 2:\nTitle: Headline 2\nDescription: Summary 2\nhttps://news.example.com/2\n\n\
                        Article 3:\nTitle: Headline 3\nDescription: Summary 3\nhttps://news.example.com/3";
        assert_eq!(digest(&articles), expected);
        assert!(!digest(&articles).contains("Headline 4"));
    }

    #[test]
    fn test_digest_empty() {
        assert_eq!(digest(&[]), "");
    }

    #[test]
    fn test_digest_missing_description() {
        let articles = vec![Article {
            title: "Recall announced".to_string(),
            description: None,
            url: "https://news.example.com/recall".to_string(),
        }];
        assert_eq!(
            digest(&articles),
            "Article 1:\nTitle: Recall announced\nDescription: \nhttps://news.example.com/recall"
        );
    }

    #[test]
    fn test_query_since_yesterday() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let query = NewsQuery::since_yesterday("Tesla", today);
        assert_eq!(query.from, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(query.to, today);
        assert_eq!(query.company, "Tesla");
    }
}
