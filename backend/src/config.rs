use crate::veo::{DEFAULT_MODEL, GEMINI_API_BASE, PollPolicy};

#[derive(Clone, Debug)]
pub struct StudioConfig {
    /// Key to start the session with; the UI can select another one later
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub poll: PollPolicy,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: GEMINI_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            poll: PollPolicy::default(),
        }
    }
}
