use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, instrument};

use crate::core::config::{Credentials, SmtpConfig};
use crate::core::{AlertError, Notification, Notifier};

/// Sends notifications through an authenticated implicit-TLS relay. Credentials are
/// only checked when a message is actually sent.
pub struct SmtpNotifier {
    host: String,
    port: u16,
    credentials: Credentials,
    tls: bool,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig, credentials: Credentials) -> Self {
        SmtpNotifier {
            host: config.host.clone(),
            port: config.port,
            credentials,
            tls: true,
        }
    }

    /// Talks to the relay without TLS. Only for local test relays.
    #[cfg(test)]
    fn plaintext(config: &SmtpConfig, credentials: Credentials) -> Self {
        SmtpNotifier {
            tls: false,
            ..Self::new(config, credentials)
        }
    }

    fn mailbox(address: &str, role: &str) -> Result<Mailbox, AlertError> {
        address
            .parse::<Mailbox>()
            .map_err(|e| AlertError::Mail(format!("Invalid {role} address {address}: {e}")))
    }

    fn build_message(&self, notification: &Notification) -> Result<Message, AlertError> {
        let from = Credentials::require(&self.credentials.from_email, Credentials::FROM_EMAIL)?;
        let to = Credentials::require(&self.credentials.to_email, Credentials::TO_EMAIL)?;

        Message::builder()
            .from(Self::mailbox(from, "sender")?)
            .to(Self::mailbox(to, "recipient")?)
            .subject(notification.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())
            .map_err(|e| AlertError::Mail(format!("Failed to build message: {e}")))
    }

    fn transport(
        &self,
        user: &str,
        password: &str,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, AlertError> {
        let builder = if self.tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host)
                .map_err(|e| AlertError::Mail(format!("Invalid relay {}: {e}", self.host)))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.host)
        };
        Ok(builder
            .port(self.port)
            .credentials(SmtpCredentials::new(user.to_string(), password.to_string()))
            .build())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    #[instrument(name = "SmtpSend", skip_all, fields(host = %self.host, port = self.port))]
    async fn send(&self, notification: &Notification) -> Result<(), AlertError> {
        let message = self.build_message(notification)?;
        let user = Credentials::require(&self.credentials.from_email, Credentials::FROM_EMAIL)?;
        let password =
            Credentials::require(&self.credentials.app_password, Credentials::APP_PASSWORD)?;

        let transport = self.transport(user, password)?;

        debug!("Sending message");
        transport.send(message).await.map_err(|e| {
            AlertError::Mail(format!("Failed to send via {}:{}: {e}", self.host, self.port))
        })?;
        debug!("Relay accepted message");
        Ok(())
    }
}
