use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON body the backend attaches to 4xx/5xx replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{error}")]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorBody;

    #[test]
    fn decodes_backend_error_reply() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"Invalid session type"}"#).expect("decode");
        assert_eq!(body, ErrorBody::new("Invalid session type"));
        assert_eq!(body.to_string(), "Invalid session type");
    }
}
