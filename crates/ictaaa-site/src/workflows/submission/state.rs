/// The single active state of one form instance. Transitions are linear;
/// a terminal state only changes when the user starts a fresh submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed(String),
}

impl SubmissionState {
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded => "succeeded",
            SubmissionState::Failed(_) => "failed",
        }
    }

    /// True while steps of an active submission are still running; the UI
    /// keeps its submit affordance disabled for the whole window.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            SubmissionState::Validating | SubmissionState::Submitting
        )
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
