use serde::{Deserialize, Serialize};

/// Footer appended to every outbound body. Appended exactly once, with no
/// trimming of whatever the caller's text ends with.
pub const ATTRIBUTION_SUFFIX: &str = "\n\n--\nMail Sent by <a href=\"https://mailofly.redevs.atmam.org\" target=\"_blank\" rel=\"noopener noreferrer\">Mailofly</a>";

/// Inbound send request. All three fields are required and non-empty;
/// absent fields deserialize to empty strings and fail the same check.
/// Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailRequest {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub text: String,
}

impl MailRequest {
    pub fn missing_required_fields(&self) -> bool {
        self.to.is_empty() || self.subject.is_empty() || self.text.is_empty()
    }
}

/// The message actually handed to the transport. Built fresh per request
/// from a validated [`MailRequest`] and discarded after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl OutboundMessage {
    pub fn compose(sender: &str, request: MailRequest) -> Self {
        Self {
            from: sender.to_string(),
            to: request.to,
            subject: request.subject,
            text: format!("{}{ATTRIBUTION_SUFFIX}", request.text),
        }
    }
}
