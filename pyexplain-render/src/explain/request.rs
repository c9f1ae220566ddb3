//! Generative-language API payloads
//!
//! Only the JSON bodies live here: building the `generateContent` request and reading the answer
//! back out of a response. Sending the request is left to the caller.
//!
//! Request:
//!
//! ```text
//! {"contents":[{"role":"user","parts":[{"text":"<prompt>"}]}]}
//! ```
//!
//! Response (the part we read):
//!
//! ```text
//! {"candidates":[{"content":{"parts":[{"text":"<markdown explanation>"}]}}]}
//! {"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}
//! ```

use crate::error::ExplainError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROMPT_PREFIX: &str = "Explain this Python error in simple terms:";
pub const DEFAULT_CODE_PROMPT_PREFIX: &str =
    "Explain this Python error with reference to the code provided:";

/// Leading instructions for the two prompt shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    /// Used when only the error message is known
    pub prefix: String,
    /// Used when the failing code is sent along
    pub code_prefix: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PROMPT_PREFIX.to_string(),
            code_prefix: DEFAULT_CODE_PROMPT_PREFIX.to_string(),
        }
    }
}

impl PromptTemplate {
    pub fn prompt(&self, error_message: &str, code: Option<&str>) -> String {
        match code {
            None => format!("{}\n\n{error_message}", self.prefix),
            Some(code) => format!(
                "{}\n\nError:\n{error_message}\n\nCode:\n```python\n{code}\n```",
                self.code_prefix
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<serde_json::Value>,
}

/// Request body asking for an explanation of `error_message`
pub fn build_request(
    error_message: &str,
    code: Option<&str>,
    template: &PromptTemplate,
) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(template.prompt(error_message, code)),
            }],
        }],
    }
}

/// Take the explanation text (`candidates[0].content.parts[0].text`) from a response body
pub fn extract_explanation(response_json: &str) -> Result<String, ExplainError> {
    let response: GenerateContentResponse = serde_json::from_str(response_json)?;

    if let Some(error) = response.error {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(ExplainError::Api(message));
    }

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or(ExplainError::MissingText)
}
