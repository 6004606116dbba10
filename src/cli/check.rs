use super::ui;
use crate::core::config::{AppConfig, Credentials};
use crate::core::{AlertError, AlertOutcome, Notifier, run_alert};
use crate::providers::{AlphaVantageProvider, ConsoleNotifier, NewsApiProvider, SmtpNotifier};
use anyhow::Result;
use chrono::NaiveDate;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Runs the alert pipeline once, writing to stdout.
pub async fn run(
    config: &AppConfig,
    credentials: Credentials,
    dry_run: bool,
    today: NaiveDate,
) -> Result<AlertOutcome> {
    let out = Arc::new(Mutex::new(std::io::stdout()));
    run_to(config, credentials, dry_run, today, out).await
}

/// Runs the alert pipeline once. Below the threshold nothing is written to `out`; when
/// alerting, only the digest is written (or the whole notification on a dry run).
pub async fn run_to<W: Write + Send + 'static>(
    config: &AppConfig,
    credentials: Credentials,
    dry_run: bool,
    today: NaiveDate,
    out: Arc<Mutex<W>>,
) -> Result<AlertOutcome> {
    let quotes =
        AlphaVantageProvider::new(config.alphavantage_url(), credentials.alphavantage_key.clone());
    let news = NewsApiProvider::new(config.newsapi_url(), credentials.newsapi_key.clone());
    let notifier: Box<dyn Notifier> = if dry_run {
        Box::new(ConsoleNotifier::shared(Arc::clone(&out)))
    } else {
        Box::new(SmtpNotifier::new(&config.smtp, credentials))
    };

    let print_digest = |digest: &str| {
        if dry_run {
            return;
        }
        let mut out = out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(out, "{digest}") {
            warn!(error = %e, "Failed to print digest");
        }
    };

    let pb = ui::new_spinner(&format!("Checking {}", config.ticker));
    let result = run_alert(
        config,
        &quotes,
        &news,
        notifier.as_ref(),
        &print_digest,
        today,
    )
    .await;
    pb.finish_and_clear();

    let what = format!("Alert check for {}", config.ticker);
    let outcome = result.map_err(|e| describe_failure(&what, e))?;
    match &outcome {
        AlertOutcome::BelowThreshold { change, .. } => {
            info!(%change, threshold = %config.threshold, "No alert needed");
        }
        AlertOutcome::Notified { notification, .. } => {
            info!(subject = %notification.subject, dry_run, "Alert delivered");
        }
    }
    Ok(outcome)
}

/// Wraps a pipeline error, noting whether a later run could succeed.
pub(crate) fn describe_failure(what: &str, e: AlertError) -> anyhow::Error {
    let kind = if e.is_transient() {
        "transient, try again later"
    } else {
        "permanent"
    };
    warn!(error = %e, kind, "{what} failed");
    anyhow::Error::new(e).context(format!("{what} failed ({kind})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{
        AlphaVantageProviderConfig, NewsApiProviderConfig, ProvidersConfig, SmtpConfig,
    };
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(price: &str, close: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        let quote_response = format!(
            r#"{{"Global Quote": {{"05. price": "{price}", "08. previous close": "{close}"}}}}"#
        );
        let news_response = r#"{
            "status": "ok",
            "articles": [
                {"title": "Tesla shares slide", "description": "Recall widens.", "url": "https://news.example.com/slide"}
            ]
        }"#;

        Mock::given(method("GET"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_string(quote_response))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/top-headlines"))
            .respond_with(ResponseTemplate::new(200).set_body_string(news_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn config(mock_server: &MockServer) -> AppConfig {
        AppConfig {
            providers: ProvidersConfig {
                alphavantage: Some(AlphaVantageProviderConfig {
                    base_url: mock_server.uri(),
                }),
                newsapi: Some(NewsApiProviderConfig {
                    base_url: mock_server.uri(),
                }),
            },
            // Nothing listens here, so a real send always fails
            smtp: SmtpConfig {
                host: "localhost".to_string(),
                port: 1,
            },
            ..AppConfig::default()
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            alphavantage_key: Some("av-test".to_string()),
            newsapi_key: Some("news-test".to_string()),
            from_email: Some("alerts@example.com".to_string()),
            to_email: Some("me@example.com".to_string()),
            app_password: Some("app-password".to_string()),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn written(out: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8(out.lock().unwrap().clone()).unwrap()
    }

    #[tokio::test]
    async fn test_within_threshold_writes_nothing() {
        let mock_server = create_mock_server("102.0000", "100.0000").await;
        let out = Arc::new(Mutex::new(Vec::new()));

        let outcome = run_to(
            &config(&mock_server),
            credentials(),
            false,
            today(),
            Arc::clone(&out),
        )
        .await
        .unwrap();

        assert!(matches!(outcome, AlertOutcome::BelowThreshold { .. }));
        assert_eq!(written(&out), "");
    }

    #[tokio::test]
    async fn test_digest_printed_even_when_mail_fails() {
        let mock_server = create_mock_server("90.0000", "100.0000").await;
        let out = Arc::new(Mutex::new(Vec::new()));

        let result = run_to(
            &config(&mock_server),
            credentials(),
            false,
            today(),
            Arc::clone(&out),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(
            written(&out),
            "Article 1:\nTitle: Tesla shares slide\nDescription: Recall widens.\nhttps://news.example.com/slide\n"
        );
    }

    #[tokio::test]
    async fn test_dry_run_writes_notification_once() {
        let mock_server = create_mock_server("90.0000", "100.0000").await;
        let out = Arc::new(Mutex::new(Vec::new()));

        run_to(
            &config(&mock_server),
            credentials(),
            true,
            today(),
            Arc::clone(&out),
        )
        .await
        .unwrap();

        let written = written(&out);
        assert!(written.starts_with("Subject: TSLA is down: 10% \n\nArticle 1:"));
        assert_eq!(written.matches("Tesla shares slide").count(), 1);
    }
}
