use async_trait::async_trait;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::core::{AlertError, Notification, Notifier};

/// Writes the notification to an output stream instead of mailing it.
pub struct ConsoleNotifier<W: Write + Send + 'static> {
    out: Arc<Mutex<W>>,
}

impl<W: Write + Send + 'static> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self::shared(Arc::new(Mutex::new(out)))
    }

    /// Writes to a stream the caller also writes to.
    pub fn shared(out: Arc<Mutex<W>>) -> Self {
        ConsoleNotifier { out }
    }
}

#[async_trait]
impl<W: Write + Send + 'static> Notifier for ConsoleNotifier<W> {
    async fn send(&self, notification: &Notification) -> Result<(), AlertError> {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(out, "Subject: {}\n\n{}", notification.subject, notification.body)
            .map_err(|e| AlertError::Mail(format!("Failed to write notification: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_writes_subject_and_body() {
        let out = Arc::new(Mutex::new(Vec::new()));
        let notifier = ConsoleNotifier::shared(Arc::clone(&out));
        let notification = Notification {
            subject: "TSLA is down: 4% ".to_string(),
            body: "Article 1:\nTitle: Recall".to_string(),
        };

        notifier.send(&notification).await.unwrap();

        let written = String::from_utf8(out.lock().unwrap().clone()).unwrap();
        assert_eq!(
            written,
            "Subject: TSLA is down: 4% \n\nArticle 1:\nTitle: Recall\n"
        );
    }
}
