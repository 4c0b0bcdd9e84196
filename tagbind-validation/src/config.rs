// Binding pipe configuration

use serde::Deserialize;

/// Settings for [`crate::BindingPipe`].
///
/// Deserializable so applications can keep it in their own config file,
/// e.g. a `[binding]` table:
///
/// ```
/// # use tagbind_validation::BindingConfig;
/// let config: BindingConfig =
///     serde_json::from_str(r#"{"error_status": 400}"#).unwrap();
/// assert_eq!(config.error_status, 400);
/// assert!(config.require_json_content_type);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    /// Status for responses carrying rule failures.
    pub error_status: u16,
    /// Reject bodies whose `Content-Type` is not `application/json`.
    pub require_json_content_type: bool,
    /// Largest body accepted for decoding, in bytes.
    pub max_body_bytes: usize,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            error_status: 422,
            require_json_content_type: true,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl BindingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_status(mut self, status: u16) -> Self {
        self.error_status = status;
        self
    }

    pub fn require_json_content_type(mut self, enable: bool) -> Self {
        self.require_json_content_type = enable;
        self
    }

    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }
}
