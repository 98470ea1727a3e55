/// One field-level problem reported by a schema validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Validator outcome as a tagged variant: structured field issues keep
/// their shape, anything else degrades to a plain message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Issues(Vec<FieldIssue>),
    Other(String),
}

impl ValidationError {
    /// User-facing status line. Field issues share one format across pages;
    /// everything else takes the page's own fallback prefix.
    pub fn render(&self, fallback_prefix: &str) -> String {
        match self {
            ValidationError::Issues(issues) => {
                let joined = issues
                    .iter()
                    .map(|issue| format!("{}: {}", issue.path, issue.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Validation error: {joined}")
            }
            ValidationError::Other(message) => format!("{fallback_prefix}{message}"),
        }
    }
}

pub(crate) fn require(issues: &mut Vec<FieldIssue>, path: &'static str, value: &str) {
    if value.trim().is_empty() {
        issues.push(FieldIssue::new(path, "Required"));
    }
}

pub(crate) fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
