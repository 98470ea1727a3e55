//! Services behind the ICTAAA 2026 conference site: the outbound mailer
//! endpoint and the submission workflows the form pages drive against it.

pub mod config;
pub mod error;
pub mod mailer;
pub mod telemetry;
pub mod workflows;
