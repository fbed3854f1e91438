use thiserror::Error;

/// Unified error type for moblog.
#[derive(Error, Debug)]
pub enum MoblogError {
    #[error("Invalid JSON")]
    InvalidJson,

    #[error("Not found")]
    NotFound,

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl MoblogError {
    /// Map to HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            MoblogError::InvalidJson => 400,
            MoblogError::NotFound => 404,
            MoblogError::PayloadTooLarge => 413,
            _ => 500,
        }
    }

    /// JSON error body in the `{"ok":false,"error":...}` envelope.
    pub fn to_json_body(&self) -> serde_json::Value {
        let msg = match self {
            MoblogError::Config(_) | MoblogError::Io(_) | MoblogError::Serde(_) => {
                "Internal error".to_string()
            }
            other => other.to_string(),
        };
        serde_json::json!({ "ok": false, "error": msg })
    }
}
