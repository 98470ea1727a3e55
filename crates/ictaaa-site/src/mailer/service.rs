use std::sync::Arc;

use super::domain::{MailRequest, OutboundMessage};
use super::transport::MailTransport;

/// Stateless send path: validate the request, stamp the sender and
/// attribution footer, hand the result to the transport.
pub struct MailerService<T> {
    transport: Arc<T>,
    sender: String,
}

impl<T> MailerService<T>
where
    T: MailTransport,
{
    /// `sender` is the formatted identity from [`crate::config::MailConfig::sender`].
    pub fn new(transport: Arc<T>, sender: impl Into<String>) -> Self {
        Self {
            transport,
            sender: sender.into(),
        }
    }

    pub async fn send(&self, request: MailRequest) -> Result<(), MailerError> {
        if request.missing_required_fields() {
            return Err(MailerError::MissingFields);
        }

        let message = OutboundMessage::compose(&self.sender, request);
        self.transport
            .send(&message)
            .await
            .map_err(|err| MailerError::Dispatch(err.to_string()))
    }
}

/// Outcomes the mailer endpoint distinguishes. Display strings are the wire
/// contract and must not change.
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Failed to send email: {0}")]
    Dispatch(String),
}
