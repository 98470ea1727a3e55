use clap::Args;
use ictaaa_site::error::AppError;
use ictaaa_site::workflows::submission::{
    FileAttachment, PaperUploadForm, PaperUploadWorkflow, RegistrationForm, RegistrationWorkflow,
    ReqwestApiClient, SubmissionPipeline, SubmissionState,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

#[derive(Args, Debug)]
pub(crate) struct RegistrationArgs {
    /// Base URL of the deployed site
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    pub(crate) base_url: String,
    /// Payment reference issued after completing the bank transfer
    #[arg(long, default_value = "")]
    pub(crate) payment_id: String,
    #[arg(long)]
    pub(crate) full_name: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long)]
    pub(crate) phone: String,
    #[arg(long)]
    pub(crate) affiliation: String,
    #[arg(long)]
    pub(crate) country: String,
    /// Attendee category (e.g. Student, Faculty, Industry)
    #[arg(long)]
    pub(crate) category: String,
    /// Days attending (e.g. "Day 1", "Day 2", "Both Days")
    #[arg(long)]
    pub(crate) days_attending: String,
    /// Set when the attendee is presenting a paper
    #[arg(long)]
    pub(crate) presenting_paper: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PaperArgs {
    /// Base URL of the deployed site
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    pub(crate) base_url: String,
    #[arg(long)]
    pub(crate) title: String,
    /// Abstract text submitted with the paper
    #[arg(long = "abstract")]
    pub(crate) paper_abstract: String,
    #[arg(long)]
    pub(crate) author_name: String,
    #[arg(long)]
    pub(crate) author_email: String,
    #[arg(long)]
    pub(crate) affiliation: String,
    #[arg(long)]
    pub(crate) country: String,
    /// Path to the DOCX manuscript to upload
    #[arg(long)]
    pub(crate) file: PathBuf,
}

pub(crate) async fn run_registration(args: RegistrationArgs) -> Result<(), AppError> {
    let RegistrationArgs {
        base_url,
        payment_id,
        full_name,
        email,
        phone,
        affiliation,
        country,
        category,
        days_attending,
        presenting_paper,
    } = args;

    let form = RegistrationForm {
        payment_intent_id: payment_id,
        full_name,
        email,
        phone,
        affiliation,
        country,
        category,
        days_attending,
        presenting_paper,
    };

    let client = Arc::new(ReqwestApiClient::new(&base_url));
    debug!(base_url = client.base_url(), "submitting registration");
    let mut pipeline = SubmissionPipeline::new(RegistrationWorkflow, client, form);

    finish("Registration", pipeline.submit().await)
}

pub(crate) async fn run_paper(args: PaperArgs) -> Result<(), AppError> {
    let PaperArgs {
        base_url,
        title,
        paper_abstract,
        author_name,
        author_email,
        affiliation,
        country,
        file,
    } = args;

    let bytes = std::fs::read(&file)?;
    let file_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("paper.docx")
        .to_string();
    let content_type = mime_guess::from_path(&file)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    let form = PaperUploadForm {
        paper_title: title,
        paper_abstract,
        author_name,
        author_email,
        author_affiliation: affiliation,
        author_country: country,
        uploaded_file: Some(FileAttachment {
            file_name,
            content_type,
            bytes,
        }),
    };

    let client = Arc::new(ReqwestApiClient::new(&base_url));
    debug!(base_url = client.base_url(), "submitting paper");
    let mut pipeline = SubmissionPipeline::new(PaperUploadWorkflow, client, form);

    finish("Paper", pipeline.submit().await)
}

fn finish(label: &str, state: &SubmissionState) -> Result<(), AppError> {
    match state {
        SubmissionState::Succeeded => {
            println!("{label} submitted successfully");
            Ok(())
        }
        SubmissionState::Failed(message) => {
            println!("{message}");
            Err(AppError::Submission(message.clone()))
        }
        other => Err(AppError::Submission(format!(
            "submission ended in unexpected state: {}",
            other.label()
        ))),
    }
}
