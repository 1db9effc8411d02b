//! Request and response DTOs for the to-do HTTP surface.

use serde::{Deserialize, Serialize};

/// Form body for `POST /api/todo`.
#[derive(Debug, Deserialize)]
pub struct CreateTodoForm {
    #[serde(default)]
    pub content: String,
}

/// JSON error body shared by every to-do endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_defaults_missing_content_to_empty() {
        let form: CreateTodoForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form.content, "");

        let form: CreateTodoForm = serde_json::from_str(r#"{"content":"buy milk"}"#).unwrap();
        assert_eq!(form.content, "buy milk");
    }

    #[test]
    fn error_response_omits_empty_details() {
        let json = serde_json::to_string(&ErrorResponse::bad_request("nope")).unwrap();
        assert_eq!(json, r#"{"code":"BAD_REQUEST","message":"nope"}"#);
    }
}
