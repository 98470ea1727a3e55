use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::MailConfig;

use super::domain::OutboundMessage;

/// Seam in front of the SMTP relay so the service and router can be
/// exercised without a network.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<(), TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid mailbox address: {0}")]
    InvalidAddress(String),
    #[error("{0}")]
    Build(String),
    #[error("{0}")]
    Smtp(String),
}

/// lettre-backed transport. The connection is TLS from the first byte
/// (implicit TLS on 465), not a STARTTLS upgrade.
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    pub fn from_config(config: &MailConfig) -> Result<Self, TransportError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|err| TransportError::Smtp(err.to_string()))?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport })
    }

    fn build_message(message: &OutboundMessage) -> Result<Message, TransportError> {
        let from: Mailbox = message
            .from
            .parse()
            .map_err(|_| TransportError::InvalidAddress(message.from.clone()))?;
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|_| TransportError::InvalidAddress(message.to.clone()))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&message.subject)
            .body(message.text.clone())
            .map_err(|err| TransportError::Build(err.to_string()))
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, message: &OutboundMessage) -> Result<(), TransportError> {
        let email = Self::build_message(message)?;

        self.transport
            .send(email)
            .await
            .map_err(|err| TransportError::Smtp(err.to_string()))?;

        Ok(())
    }
}
