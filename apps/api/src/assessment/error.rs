use thiserror::Error;

/// Errors raised by the assessment core. Both kinds are recoverable by the
/// caller: redo the questionnaire, or retake the assessment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),
}
