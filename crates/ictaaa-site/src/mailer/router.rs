use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use super::domain::MailRequest;
use super::service::{MailerError, MailerService};
use super::transport::MailTransport;

/// Single mail endpoint; the submission workflows post their confirmation
/// emails to the same path.
pub const MAILER_PATH: &str = "/api/mailer";

/// Router builder exposing the outbound mail endpoint.
pub fn mailer_router<T>(service: Arc<MailerService<T>>) -> Router
where
    T: MailTransport + 'static,
{
    Router::new()
        .route(MAILER_PATH, post(send_mail_handler::<T>))
        .with_state(service)
}

pub(crate) async fn send_mail_handler<T>(
    State(service): State<Arc<MailerService<T>>>,
    body: Bytes,
) -> Response
where
    T: MailTransport + 'static,
{
    // An unparseable body takes the dispatch-failure path, not the 400 one.
    // The site has always answered that way and callers match on it.
    let request = match serde_json::from_slice::<MailRequest>(&body) {
        Ok(request) => request,
        Err(err) => {
            let payload = json!({
                "error": format!("Failed to send email: {err}"),
            });
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response();
        }
    };

    match service.send(request).await {
        Ok(()) => {
            let payload = json!({
                "message": "Email sent successfully",
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error @ MailerError::MissingFields) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(error @ MailerError::Dispatch(_)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
