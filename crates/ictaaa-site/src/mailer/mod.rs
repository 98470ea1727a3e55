//! Outbound mail endpoint: request validation, attribution footer, SMTP
//! dispatch, and the HTTP error mapping in front of it.

pub mod domain;
pub mod router;
pub mod service;
pub mod transport;

pub use domain::{MailRequest, OutboundMessage, ATTRIBUTION_SUFFIX};
pub use router::{mailer_router, MAILER_PATH};
pub use service::{MailerError, MailerService};
pub use transport::{MailTransport, SmtpMailTransport, TransportError};
