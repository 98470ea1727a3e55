//! Validate -> submit -> notify -> finalize sequencing shared by the
//! registration and paper-upload forms, with one pipeline driving both.

pub mod client;
pub mod paper_upload;
pub mod pipeline;
pub mod registration;
pub mod state;
pub mod validation;

pub use client::{
    ApiBody, ApiClient, ApiResponse, ClientError, FileAttachment, MultipartForm, MultipartValue,
    ReqwestApiClient,
};
pub use paper_upload::{PaperUploadForm, PaperUploadWorkflow, PAPER_UPLOAD_ENDPOINT};
pub use pipeline::{ConfirmationPolicy, GuardError, SubmissionPipeline, SubmissionWorkflow};
pub use registration::{RegistrationForm, RegistrationWorkflow, REGISTRATION_ENDPOINT};
pub use state::SubmissionState;
pub use validation::{FieldIssue, ValidationError};
