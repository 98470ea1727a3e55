use crate::mailer::MailRequest;

use super::client::{ApiBody, ApiResponse, FileAttachment, MultipartForm};
use super::pipeline::{ConfirmationPolicy, SubmissionWorkflow};
use super::validation::{is_email, require, FieldIssue, ValidationError};

pub const PAPER_UPLOAD_ENDPOINT: &str = "/api/paper-upload";

/// Values collected by the paper-upload form, posted as multipart form
/// data with the attachment under `uploadedFile`.
#[derive(Debug, Clone, Default)]
pub struct PaperUploadForm {
    pub paper_title: String,
    pub paper_abstract: String,
    pub author_name: String,
    pub author_email: String,
    pub author_affiliation: String,
    pub author_country: String,
    pub uploaded_file: Option<FileAttachment>,
}

/// Upload page workflow: schema validation, multipart POST, confirmation
/// email whose failure fails the whole submission.
#[derive(Debug, Default)]
pub struct PaperUploadWorkflow;

impl SubmissionWorkflow for PaperUploadWorkflow {
    type Fields = PaperUploadForm;

    fn validate(&self, fields: &PaperUploadForm) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        require(&mut issues, "paperTitle", &fields.paper_title);
        require(&mut issues, "paperAbstract", &fields.paper_abstract);
        require(&mut issues, "authorName", &fields.author_name);
        if fields.author_email.trim().is_empty() {
            issues.push(FieldIssue::new("authorEmail", "Required"));
        } else if !is_email(&fields.author_email) {
            issues.push(FieldIssue::new("authorEmail", "Invalid email"));
        }
        require(&mut issues, "authorAffiliation", &fields.author_affiliation);
        require(&mut issues, "authorCountry", &fields.author_country);
        match &fields.uploaded_file {
            None => issues.push(FieldIssue::new("uploadedFile", "Required")),
            Some(file) if !file.file_name.to_ascii_lowercase().ends_with(".docx") => {
                issues.push(FieldIssue::new("uploadedFile", "Only DOCX files are accepted"));
            }
            Some(_) => {}
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Issues(issues))
        }
    }

    fn primary_endpoint(&self) -> &'static str {
        PAPER_UPLOAD_ENDPOINT
    }

    fn primary_body(&self, fields: &PaperUploadForm) -> ApiBody {
        let mut form = MultipartForm::default()
            .text("paperTitle", fields.paper_title.clone())
            .text("paperAbstract", fields.paper_abstract.clone())
            .text("authorName", fields.author_name.clone())
            .text("authorEmail", fields.author_email.clone())
            .text("authorAffiliation", fields.author_affiliation.clone())
            .text("authorCountry", fields.author_country.clone());
        if let Some(file) = &fields.uploaded_file {
            form = form.file("uploadedFile", file.clone());
        }
        ApiBody::Multipart(form)
    }

    fn primary_failure(&self, response: &ApiResponse) -> String {
        // The upload API explains rejections in an `error` field; show that
        // wording to the author when it is present.
        response
            .error_message()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP error! status: {}", response.status))
    }

    fn confirmation_email(&self, fields: &PaperUploadForm) -> MailRequest {
        MailRequest {
            to: fields.author_email.clone(),
            subject: "Paper Submission Successful - ICTAAA 2026".to_string(),
            text: confirmation_text(fields),
        }
    }

    fn confirmation_policy(&self) -> ConfirmationPolicy {
        ConfirmationPolicy::FailSubmission
    }

    fn failure_prefix(&self) -> &'static str {
        "Submission failed: "
    }

    fn reset(&self, fields: &mut PaperUploadForm) {
        *fields = PaperUploadForm::default();
    }
}

fn confirmation_text(fields: &PaperUploadForm) -> String {
    format!(
        "Dear {},\n\n\
         We have received your paper \"{}\" for ICTAAA 2026. The program committee will \
         review your submission and contact you at {} with the outcome.\n\n\
         Submission Details:\n\
         Paper Title: {}\n\
         Affiliation: {}\n\
         Country: {}\n\n\
         Best regards,\n\
         ICTAAA 2026 Committee",
        fields.author_name,
        fields.paper_title,
        fields.author_email,
        fields.paper_title,
        fields.author_affiliation,
        fields.author_country,
    )
}
