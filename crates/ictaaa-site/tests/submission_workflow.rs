//! Integration specifications for the submission pipeline driving the
//! registration and paper-upload workflows end to end against a scripted
//! API double, including the confirmation-email sequencing rules.

mod common {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use ictaaa_site::workflows::submission::{
        ApiBody, ApiClient, ApiResponse, ClientError, FileAttachment, PaperUploadForm,
        RegistrationForm,
    };

    type ScriptedResult = Result<ApiResponse, ClientError>;

    /// Replays queued responses in order and records every call. Running
    /// past the script is a transport error so tests stay deterministic.
    #[derive(Default)]
    pub(super) struct ScriptedApiClient {
        responses: Mutex<VecDeque<ScriptedResult>>,
        calls: Mutex<Vec<(String, ApiBody)>>,
    }

    impl ScriptedApiClient {
        pub(super) fn with_script(
            script: impl IntoIterator<Item = ScriptedResult>,
        ) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(script.into_iter().collect()),
                calls: Mutex::new(Vec::new()),
            })
        }

        pub(super) fn calls(&self) -> Vec<(String, ApiBody)> {
            self.calls.lock().expect("call log mutex poisoned").clone()
        }
    }

    #[async_trait]
    impl ApiClient for ScriptedApiClient {
        async fn post(&self, path: &str, body: ApiBody) -> Result<ApiResponse, ClientError> {
            self.calls
                .lock()
                .expect("call log mutex poisoned")
                .push((path.to_string(), body));
            self.responses
                .lock()
                .expect("script mutex poisoned")
                .pop_front()
                .unwrap_or_else(|| Err(ClientError::Transport("script exhausted".to_string())))
        }
    }

    pub(super) fn registration_form() -> RegistrationForm {
        RegistrationForm {
            payment_intent_id: "PAY-123".to_string(),
            full_name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            phone: "1234567890".to_string(),
            affiliation: "ACME Corp".to_string(),
            country: "USA".to_string(),
            category: "Faculty".to_string(),
            days_attending: "Both Days".to_string(),
            presenting_paper: true,
        }
    }

    pub(super) fn upload_form() -> PaperUploadForm {
        PaperUploadForm {
            paper_title: "AI for Sustainable Cities".to_string(),
            paper_abstract: "We explore AI-driven sustainability...".to_string(),
            author_name: "Dr. Ada Lovelace".to_string(),
            author_email: "ada@example.com".to_string(),
            author_affiliation: "Analytical Engines Institute".to_string(),
            author_country: "UK".to_string(),
            uploaded_file: Some(FileAttachment {
                file_name: "paper.docx".to_string(),
                content_type:
                    "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                        .to_string(),
                bytes: b"dummy".to_vec(),
            }),
        }
    }
}

use serde_json::json;

use common::{registration_form, upload_form, ScriptedApiClient};
use ictaaa_site::workflows::submission::{
    ApiBody, ApiResponse, ClientError, PaperUploadWorkflow, RegistrationForm,
    RegistrationWorkflow, SubmissionPipeline, SubmissionState,
};

#[tokio::test]
async fn registration_happy_path_posts_then_mails_then_resets() {
    let client = ScriptedApiClient::with_script([
        Ok(ApiResponse::with_status(200)),
        Ok(ApiResponse::with_status(200)),
    ]);
    let mut pipeline =
        SubmissionPipeline::new(RegistrationWorkflow, client.clone(), registration_form());

    let state = pipeline.submit().await;
    assert_eq!(state, &SubmissionState::Succeeded);

    let calls = client.calls();
    assert_eq!(calls.len(), 2);

    let (endpoint, body) = &calls[0];
    assert_eq!(endpoint, "/api/registration");
    let ApiBody::Json(payload) = body else {
        panic!("registration posts JSON");
    };
    assert_eq!(payload["paymentIntentId"], "PAY-123");
    assert_eq!(payload["fullName"], "John Doe");
    assert_eq!(payload["email"], "john@example.com");
    assert_eq!(payload["phone"], "1234567890");
    assert_eq!(payload["affiliation"], "ACME Corp");
    assert_eq!(payload["country"], "USA");
    assert_eq!(payload["category"], "Faculty");
    assert_eq!(payload["daysAttending"], "Both Days");
    assert_eq!(payload["presentingPaper"], true);

    let (endpoint, body) = &calls[1];
    assert_eq!(endpoint, "/api/mailer");
    let ApiBody::Json(mail) = body else {
        panic!("mailer posts JSON");
    };
    assert_eq!(mail["to"], "john@example.com");
    assert_eq!(mail["subject"], "Registration Confirmation - ICTAAA 2026");
    let text = mail["text"].as_str().expect("text field");
    assert!(text.contains("Dear John Doe"));
    assert!(text.contains("Payment ID: PAY-123"));
    assert!(text.contains("Presenting Paper: Yes"));

    // Every field is back to its initial empty value after success.
    assert_eq!(pipeline.fields(), &RegistrationForm::default());
}

#[tokio::test]
async fn missing_payment_reference_short_circuits_without_network() {
    let client = ScriptedApiClient::with_script([]);
    let mut form = registration_form();
    form.payment_intent_id.clear();
    let mut pipeline = SubmissionPipeline::new(RegistrationWorkflow, client.clone(), form);

    let state = pipeline.submit().await;
    assert_eq!(
        state.message(),
        Some("Please complete the payment first before submitting registration.")
    );
    assert!(client.calls().is_empty());
    // The half-filled form survives for the retry.
    assert_eq!(pipeline.fields().full_name, "John Doe");
}

#[tokio::test]
async fn schema_failure_makes_zero_network_calls() {
    let client = ScriptedApiClient::with_script([]);
    let mut form = registration_form();
    form.email = "not-an-email".to_string();
    form.phone = "abc".to_string();
    let mut pipeline = SubmissionPipeline::new(RegistrationWorkflow, client.clone(), form);

    let state = pipeline.submit().await;
    assert_eq!(
        state.message(),
        Some("Validation error: email: Invalid email, phone: Invalid phone")
    );
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn registration_api_error_stops_before_the_mailer() {
    let client = ScriptedApiClient::with_script([Ok(ApiResponse::with_status(500))]);
    let mut pipeline =
        SubmissionPipeline::new(RegistrationWorkflow, client.clone(), registration_form());

    let state = pipeline.submit().await;
    assert_eq!(state.message(), Some("Error: HTTP error! status: 500"));
    assert_eq!(client.calls().len(), 1);
    // Nothing was reset on the failure path.
    assert_eq!(pipeline.fields().payment_intent_id, "PAY-123");
}

#[tokio::test]
async fn registration_keeps_its_success_when_the_confirmation_email_fails() {
    let client = ScriptedApiClient::with_script([
        Ok(ApiResponse::with_status(200)),
        Ok(ApiResponse::with_status(500)),
    ]);
    let mut pipeline =
        SubmissionPipeline::new(RegistrationWorkflow, client.clone(), registration_form());

    let state = pipeline.submit().await;
    assert_eq!(state, &SubmissionState::Succeeded);
    assert_eq!(client.calls().len(), 2);
    assert_eq!(pipeline.fields(), &RegistrationForm::default());
}

#[tokio::test]
async fn registration_keeps_its_success_when_the_mailer_is_unreachable() {
    let client = ScriptedApiClient::with_script([
        Ok(ApiResponse::with_status(200)),
        Err(ClientError::Transport("mailer down".to_string())),
    ]);
    let mut pipeline =
        SubmissionPipeline::new(RegistrationWorkflow, client.clone(), registration_form());

    let state = pipeline.submit().await;
    assert_eq!(state, &SubmissionState::Succeeded);
}

#[tokio::test]
async fn failed_attempt_can_be_corrected_and_resubmitted() {
    let client = ScriptedApiClient::with_script([
        Ok(ApiResponse::with_status(200)),
        Ok(ApiResponse::with_status(200)),
    ]);
    let mut form = registration_form();
    form.payment_intent_id.clear();
    let mut pipeline = SubmissionPipeline::new(RegistrationWorkflow, client.clone(), form);

    let state = pipeline.submit().await;
    assert_eq!(state.label(), "failed");

    pipeline.fields_mut().payment_intent_id = "PAY-999".to_string();
    let state = pipeline.submit().await;
    assert_eq!(state, &SubmissionState::Succeeded);
    assert_eq!(client.calls().len(), 2);
}

#[tokio::test]
async fn upload_happy_path_posts_multipart_then_mails_then_resets() {
    let client = ScriptedApiClient::with_script([
        Ok(ApiResponse {
            status: 200,
            body: json!({ "ok": true, "id": "upload-123" }),
        }),
        Ok(ApiResponse::with_status(200)),
    ]);
    let mut pipeline = SubmissionPipeline::new(PaperUploadWorkflow, client.clone(), upload_form());

    let state = pipeline.submit().await;
    assert_eq!(state, &SubmissionState::Succeeded);

    let calls = client.calls();
    assert_eq!(calls.len(), 2);

    let (endpoint, body) = &calls[0];
    assert_eq!(endpoint, "/api/paper-upload");
    let ApiBody::Multipart(form) = body else {
        panic!("paper upload posts multipart form data");
    };
    assert_eq!(form.text_value("paperTitle"), Some("AI for Sustainable Cities"));
    assert_eq!(form.text_value("authorEmail"), Some("ada@example.com"));
    assert_eq!(
        form.file_value("uploadedFile")
            .map(|file| file.file_name.as_str()),
        Some("paper.docx")
    );

    let (endpoint, body) = &calls[1];
    assert_eq!(endpoint, "/api/mailer");
    let ApiBody::Json(mail) = body else {
        panic!("mailer posts JSON");
    };
    assert_eq!(mail["to"], "ada@example.com");
    assert_eq!(mail["subject"], "Paper Submission Successful - ICTAAA 2026");
    let text = mail["text"].as_str().expect("text field");
    assert!(text.contains("Dear Dr. Ada Lovelace,"));
    assert!(text.contains("\"AI for Sustainable Cities\""));
    assert!(text.contains("ICTAAA 2026 Committee"));

    assert!(pipeline.fields().uploaded_file.is_none());
    assert!(pipeline.fields().paper_title.is_empty());
}

#[tokio::test]
async fn upload_api_rejection_shows_its_error_and_skips_the_mailer() {
    let client = ScriptedApiClient::with_script([Ok(ApiResponse {
        status: 400,
        body: json!({ "error": "File too large" }),
    })]);
    let mut pipeline = SubmissionPipeline::new(PaperUploadWorkflow, client.clone(), upload_form());

    let state = pipeline.submit().await;
    assert_eq!(state.message(), Some("Submission failed: File too large"));
    assert_eq!(client.calls().len(), 1);
    // The selected file is still there for the retry.
    assert!(pipeline.fields().uploaded_file.is_some());
}

#[tokio::test]
async fn upload_mailer_outage_fails_the_whole_submission() {
    let client = ScriptedApiClient::with_script([
        Ok(ApiResponse::with_status(200)),
        Err(ClientError::Transport("Mailer network down".to_string())),
    ]);
    let mut pipeline = SubmissionPipeline::new(PaperUploadWorkflow, client.clone(), upload_form());

    let state = pipeline.submit().await;
    assert_eq!(
        state.message(),
        Some("Submission failed: Mailer network down")
    );
    assert_eq!(client.calls().len(), 2);
    assert!(pipeline.fields().uploaded_file.is_some());
}

#[tokio::test]
async fn upload_schema_failure_makes_zero_network_calls() {
    let client = ScriptedApiClient::with_script([]);
    let mut form = upload_form();
    form.uploaded_file = None;
    let mut pipeline = SubmissionPipeline::new(PaperUploadWorkflow, client.clone(), form);

    let state = pipeline.submit().await;
    assert_eq!(
        state.message(),
        Some("Validation error: uploadedFile: Required")
    );
    assert!(client.calls().is_empty());
}
