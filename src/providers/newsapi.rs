use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, error, instrument};

use crate::core::config::Credentials;
use crate::core::{AlertError, Article, NewsProvider, NewsQuery};

// NewsApiProvider implementation for NewsProvider
pub struct NewsApiProvider {
    base_url: String,
    api_key: Option<String>,
}

impl NewsApiProvider {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        NewsApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[derive(Deserialize, Debug)]
struct HeadlinesResponse {
    status: String,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Deserialize, Debug)]
struct NewsApiArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    url: String,
}

impl From<NewsApiArticle> for Article {
    fn from(article: NewsApiArticle) -> Self {
        Article {
            title: article.title.unwrap_or_default(),
            description: article.description,
            url: article.url,
        }
    }
}

#[async_trait]
impl NewsProvider for NewsApiProvider {
    #[instrument(
        name = "NewsApiHeadlinesFetch",
        skip(self),
        fields(company = %query.company)
    )]
    async fn fetch_articles(&self, query: &NewsQuery) -> Result<Vec<Article>, AlertError> {
        let api_key = Credentials::require(&self.api_key, Credentials::NEWSAPI_KEY)?;
        let endpoint = format!("headlines for {}", query.company);
        let from = query.from.to_string();
        let to = query.to.to_string();

        let url = Url::parse_with_params(
            &format!("{}/v2/top-headlines", self.base_url),
            &[
                ("language", "en"),
                ("q", query.company.as_str()),
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("apiKey", api_key),
            ],
        )
        .map_err(|e| AlertError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        debug!(
            "Requesting headlines from {}/v2/top-headlines for {} to {}",
            self.base_url, from, to
        );

        let client = reqwest::Client::builder()
            .user_agent("stockalert/1.0")
            .build()?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| AlertError::Transport(e.without_url()))?;

        if !response.status().is_success() {
            return Err(AlertError::Status {
                status: response.status(),
                endpoint,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| AlertError::Transport(e.without_url()))?;

        let data: HeadlinesResponse = match serde_json::from_str(&text) {
            Ok(data) => data,
            Err(e) => {
                error!(error = ?e, response = %text, "Failed to parse headlines response");
                return Err(AlertError::Malformed {
                    endpoint,
                    reason: e.to_string(),
                });
            }
        };

        if data.status != "ok" {
            return Err(AlertError::Api(
                data.message
                    .unwrap_or_else(|| format!("status {}", data.status)),
            ));
        }

        debug!(count = data.articles.len(), "Received headlines");
        Ok(data.articles.into_iter().map(Article::from).collect())
    }
}
