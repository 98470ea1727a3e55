use std::sync::Arc;

use serde_json::json;
use tracing::warn;

use crate::mailer::{MailRequest, MAILER_PATH};

use super::client::{ApiBody, ApiClient, ApiResponse};
use super::state::SubmissionState;
use super::validation::ValidationError;

/// What a confirmation-email failure does to the submission as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationPolicy {
    /// Log it and keep the success (registration page behavior).
    BestEffort,
    /// Surface it as the submission outcome (upload page behavior).
    FailSubmission,
}

/// Gating precondition failure; shown verbatim and short-circuits the
/// whole workflow before validation.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct GuardError {
    pub message: String,
}

impl GuardError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Everything page-specific about one form: gate, schema, endpoint and
/// body, confirmation email, failure wording, reset.
pub trait SubmissionWorkflow: Send + Sync {
    type Fields: Send + Sync;

    fn gate(&self, _fields: &Self::Fields) -> Result<(), GuardError> {
        Ok(())
    }

    fn validate(&self, fields: &Self::Fields) -> Result<(), ValidationError>;

    fn primary_endpoint(&self) -> &'static str;

    fn primary_body(&self, fields: &Self::Fields) -> ApiBody;

    /// Message for a non-success primary response, before the page prefix.
    fn primary_failure(&self, response: &ApiResponse) -> String {
        format!("HTTP error! status: {}", response.status)
    }

    fn confirmation_email(&self, fields: &Self::Fields) -> MailRequest;

    fn confirmation_policy(&self) -> ConfirmationPolicy {
        ConfirmationPolicy::BestEffort
    }

    /// Fixed prefix for generic failures; each page keeps its own wording.
    fn failure_prefix(&self) -> &'static str;

    fn reset(&self, fields: &mut Self::Fields);
}

/// Drives one form instance through gate -> validate -> primary POST ->
/// confirmation email -> terminal state. Owns the field values and the
/// single active [`SubmissionState`].
pub struct SubmissionPipeline<W, C>
where
    W: SubmissionWorkflow,
    C: ApiClient,
{
    workflow: W,
    client: Arc<C>,
    fields: W::Fields,
    state: SubmissionState,
}

impl<W, C> SubmissionPipeline<W, C>
where
    W: SubmissionWorkflow,
    C: ApiClient,
{
    pub fn new(workflow: W, client: Arc<C>, fields: W::Fields) -> Self {
        Self {
            workflow,
            client,
            fields,
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn fields(&self) -> &W::Fields {
        &self.fields
    }

    /// Edit the form between attempts. Failure paths leave the fields
    /// untouched so the user can correct and resubmit.
    pub fn fields_mut(&mut self) -> &mut W::Fields {
        &mut self.fields
    }

    /// Run one full submission attempt. Re-invoking while an attempt is in
    /// flight is a no-op; a fresh attempt restarts from the gate.
    pub async fn submit(&mut self) -> &SubmissionState {
        if self.state.is_in_flight() {
            return &self.state;
        }

        self.state = SubmissionState::Validating;

        if let Err(guard) = self.workflow.gate(&self.fields) {
            self.state = SubmissionState::Failed(guard.message);
            return &self.state;
        }

        if let Err(error) = self.workflow.validate(&self.fields) {
            self.state = SubmissionState::Failed(error.render(self.workflow.failure_prefix()));
            return &self.state;
        }

        self.state = SubmissionState::Submitting;

        let body = self.workflow.primary_body(&self.fields);
        let primary = self.client.post(self.workflow.primary_endpoint(), body).await;
        let response = match primary {
            Ok(response) => response,
            Err(error) => return self.fail(error.to_string()),
        };

        if !response.is_success() {
            let message = self.workflow.primary_failure(&response);
            return self.fail(message);
        }

        // The confirmation email goes out only after the primary submission
        // is confirmed, never concurrently with it.
        let email = self.workflow.confirmation_email(&self.fields);
        let payload = json!({
            "to": email.to,
            "subject": email.subject,
            "text": email.text,
        });
        let failure = match self.client.post(MAILER_PATH, ApiBody::Json(payload)).await {
            Ok(response) if response.is_success() => None,
            Ok(response) => Some(
                response
                    .error_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("HTTP error! status: {}", response.status)),
            ),
            Err(error) => Some(error.to_string()),
        };

        if let Some(message) = failure {
            match self.workflow.confirmation_policy() {
                ConfirmationPolicy::FailSubmission => return self.fail(message),
                ConfirmationPolicy::BestEffort => {
                    warn!(endpoint = MAILER_PATH, %message, "confirmation email failed");
                }
            }
        }

        self.workflow.reset(&mut self.fields);
        self.state = SubmissionState::Succeeded;
        &self.state
    }

    fn fail(&mut self, message: String) -> &SubmissionState {
        self.state =
            SubmissionState::Failed(format!("{}{message}", self.workflow.failure_prefix()));
        &self.state
    }
}
