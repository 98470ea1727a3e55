use serde_json::json;

use crate::mailer::MailRequest;

use super::client::ApiBody;
use super::pipeline::{GuardError, SubmissionWorkflow};
use super::validation::{is_email, require, FieldIssue, ValidationError};

pub const REGISTRATION_ENDPOINT: &str = "/api/registration";

const PAYMENT_GUARD_MESSAGE: &str =
    "Please complete the payment first before submitting registration.";

/// Values collected by the registration form. The primary body serializes
/// them under the camelCase names the registration API expects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub payment_intent_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub affiliation: String,
    pub country: String,
    pub category: String,
    pub days_attending: String,
    pub presenting_paper: bool,
}

/// Registration page workflow: payment gate, schema validation, JSON POST,
/// best-effort confirmation email.
#[derive(Debug, Default)]
pub struct RegistrationWorkflow;

impl SubmissionWorkflow for RegistrationWorkflow {
    type Fields = RegistrationForm;

    fn gate(&self, fields: &RegistrationForm) -> Result<(), GuardError> {
        if fields.payment_intent_id.trim().is_empty() {
            return Err(GuardError::new(PAYMENT_GUARD_MESSAGE));
        }
        Ok(())
    }

    fn validate(&self, fields: &RegistrationForm) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        require(&mut issues, "fullName", &fields.full_name);
        if fields.email.trim().is_empty() {
            issues.push(FieldIssue::new("email", "Required"));
        } else if !is_email(&fields.email) {
            issues.push(FieldIssue::new("email", "Invalid email"));
        }
        if fields.phone.trim().is_empty() {
            issues.push(FieldIssue::new("phone", "Required"));
        } else if !is_phone(&fields.phone) {
            issues.push(FieldIssue::new("phone", "Invalid phone"));
        }
        require(&mut issues, "affiliation", &fields.affiliation);
        require(&mut issues, "country", &fields.country);
        require(&mut issues, "category", &fields.category);
        require(&mut issues, "daysAttending", &fields.days_attending);

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Issues(issues))
        }
    }

    fn primary_endpoint(&self) -> &'static str {
        REGISTRATION_ENDPOINT
    }

    fn primary_body(&self, fields: &RegistrationForm) -> ApiBody {
        ApiBody::Json(json!({
            "paymentIntentId": fields.payment_intent_id,
            "fullName": fields.full_name,
            "email": fields.email,
            "phone": fields.phone,
            "affiliation": fields.affiliation,
            "country": fields.country,
            "category": fields.category,
            "daysAttending": fields.days_attending,
            "presentingPaper": fields.presenting_paper,
        }))
    }

    fn confirmation_email(&self, fields: &RegistrationForm) -> MailRequest {
        MailRequest {
            to: fields.email.clone(),
            subject: "Registration Confirmation - ICTAAA 2026".to_string(),
            text: confirmation_text(fields),
        }
    }

    fn failure_prefix(&self) -> &'static str {
        "Error: "
    }

    fn reset(&self, fields: &mut RegistrationForm) {
        *fields = RegistrationForm::default();
    }
}

fn confirmation_text(fields: &RegistrationForm) -> String {
    let presenting = if fields.presenting_paper { "Yes" } else { "No" };
    format!(
        "Dear {},\n\n\
         Thank you for registering for ICTAAA 2026. Your registration details are below.\n\n\
         Full Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Affiliation: {}\n\
         Country: {}\n\
         Category: {}\n\
         Days Attending: {}\n\
         Presenting Paper: {}\n\
         Payment ID: {}\n\n\
         We look forward to welcoming you to the conference.\n\n\
         Best regards,\n\
         ICTAAA 2026 Committee",
        fields.full_name,
        fields.full_name,
        fields.email,
        fields.phone,
        fields.affiliation,
        fields.country,
        fields.category,
        fields.days_attending,
        presenting,
        fields.payment_intent_id,
    )
}

fn is_phone(value: &str) -> bool {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    digits >= 7
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
}
