use super::poll::PollTimeout;
use std::time::Duration;
use thiserror::Error;

/// Substring the Gemini API uses when the key's project cannot see the model.
const ENTITY_NOT_FOUND: &str = "Requested entity was not found";

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Video generation failed: {0}")]
    Operation(String),
    #[error("No video URI returned from generation.")]
    NoResult,
    #[error("Invalid reference image: {0}")]
    InvalidReferenceImage(String),
    #[error("Video generation did not finish within {0:?}")]
    TimedOut(Duration),
}

impl GenerationError {
    /// Whether the failure means the selected key cannot be used.
    pub fn is_credential_error(&self) -> bool {
        self.to_string().contains(ENTITY_NOT_FOUND)
    }
}

impl From<PollTimeout> for GenerationError {
    fn from(timeout: PollTimeout) -> Self {
        GenerationError::TimedOut(timeout.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_not_found_is_a_credential_error() {
        let err = GenerationError::Api {
            status: 404,
            message: "Requested entity was not found.".to_string(),
        };
        assert!(err.is_credential_error());
    }

    #[test]
    fn other_failures_are_not_credential_errors() {
        let err = GenerationError::Api {
            status: 429,
            message: "Resource has been exhausted".to_string(),
        };
        assert!(!err.is_credential_error());
        assert!(!GenerationError::NoResult.is_credential_error());
    }

    #[test]
    fn api_error_shows_the_service_message_only() {
        let err = GenerationError::Api {
            status: 429,
            message: "Resource has been exhausted".to_string(),
        };
        assert_eq!(err.to_string(), "Resource has been exhausted");
    }
}
