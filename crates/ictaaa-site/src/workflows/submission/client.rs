use async_trait::async_trait;
use serde_json::Value;

/// Body shapes the site posts: JSON for registration and the mailer,
/// multipart form data when a file rides along.
#[derive(Debug, Clone)]
pub enum ApiBody {
    Json(Value),
    Multipart(MultipartForm),
}

#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    fields: Vec<(String, MultipartValue)>,
}

impl MultipartForm {
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields
            .push((name.into(), MultipartValue::Text(value.into())));
        self
    }

    pub fn file(mut self, name: impl Into<String>, attachment: FileAttachment) -> Self {
        self.fields
            .push((name.into(), MultipartValue::File(attachment)));
        self
    }

    pub fn fields(&self) -> &[(String, MultipartValue)] {
        &self.fields
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|(field, value)| match value {
            MultipartValue::Text(text) if field == name => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn file_value(&self, name: &str) -> Option<&FileAttachment> {
        self.fields.iter().find_map(|(field, value)| match value {
            MultipartValue::File(attachment) if field == name => Some(attachment),
            _ => None,
        })
    }
}

#[derive(Debug, Clone)]
pub enum MultipartValue {
    Text(String),
    File(FileAttachment),
}

/// A file selected for upload, held in memory until the form is posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Status plus parsed JSON body (Null when the body is empty or not JSON).
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            body: Value::Null,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `error` field collaborating APIs put in failure bodies.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Transport(String),
    #[error("invalid attachment: {0}")]
    Attachment(String),
}

/// Seam for the two network calls every submission makes, so workflows can
/// run against a scripted double in tests.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn post(&self, path: &str, body: ApiBody) -> Result<ApiResponse, ClientError>;
}

/// reqwest-backed client used when driving a deployed site.
pub struct ReqwestApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ApiClient for ReqwestApiClient {
    async fn post(&self, path: &str, body: ApiBody) -> Result<ApiResponse, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let request = match body {
            ApiBody::Json(value) => self.client.post(&url).json(&value),
            ApiBody::Multipart(form) => {
                let mut multipart = reqwest::multipart::Form::new();
                for (name, value) in form.fields {
                    multipart = match value {
                        MultipartValue::Text(text) => multipart.text(name, text),
                        MultipartValue::File(attachment) => {
                            let part = reqwest::multipart::Part::bytes(attachment.bytes)
                                .file_name(attachment.file_name)
                                .mime_str(&attachment.content_type)
                                .map_err(|err| ClientError::Attachment(err.to_string()))?;
                            multipart.part(name, part)
                        }
                    };
                }
                self.client.post(&url).multipart(multipart)
            }
        };

        let response = request
            .send()
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);

        Ok(ApiResponse { status, body })
    }
}
