use super::check::describe_failure;
use super::ui;
use crate::core::config::{AppConfig, Credentials};
use crate::core::news::digest;
use crate::core::{NewsProvider, NewsQuery};
use crate::providers::NewsApiProvider;
use anyhow::Result;
use chrono::NaiveDate;

/// Prints the digest for the configured company without alerting.
pub async fn run(config: &AppConfig, credentials: &Credentials, today: NaiveDate) -> Result<()> {
    let provider = NewsApiProvider::new(config.newsapi_url(), credentials.newsapi_key.clone());
    let query = NewsQuery::since_yesterday(&config.company, today);

    let pb = ui::new_spinner(&format!("Fetching headlines for {}", config.company));
    let result = provider.fetch_articles(&query).await;
    pb.finish_and_clear();

    let what = format!("Headlines for {}", config.company);
    let articles = result.map_err(|e| describe_failure(&what, e))?;
    println!(
        "{}",
        ui::style_text(
            &format!("{} headlines, {} to {}", config.company, query.from, query.to),
            ui::StyleType::Title
        )
    );
    if articles.is_empty() {
        println!("{}", ui::style_text("No headlines found.", ui::StyleType::Subtle));
    } else {
        println!("{}", digest(&articles));
    }
    Ok(())
}
