use serde::{Deserialize, Serialize};

/// Shown when the video service rejects the selected key.
pub const INVALID_KEY_MESSAGE: &str =
    "API Key Invalid or Project Not Found. Please select a valid key.";

/// Credential gate state as seen by the UI
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyStatus {
    /// True until the startup credential check has finished
    pub checking: bool,
    pub has_key: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl Default for KeyStatus {
    fn default() -> Self {
        Self {
            checking: true,
            has_key: false,
            error: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SelectKeyRequest {
    /// `None` or blank when the user dismissed the selection form
    #[serde(default)]
    pub api_key: Option<String>,
}
