//! Explanation source
//!
//! Decides which Markdown text the renderer gets for an error: the model's answer when a usable
//! API response is available, the canned fallback otherwise. Failures never surface to the caller,
//! they are logged and the fallback is used.

pub mod fallback;
pub mod request;

pub use fallback::fallback_explanation;
pub use request::{build_request, extract_explanation, GenerateContentRequest, PromptTemplate};

use crate::blocks::Document;
use tracing::{debug, warn};

/// Where an explanation's text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Model,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub text: String,
    pub source: Source,
}

impl Explanation {
    pub fn document(&self) -> Document {
        Document::from_markdown(&self.text)
    }
}

/// Resolve the explanation for `error_message` from an optional API response body.
pub fn resolve(error_message: &str, response_json: Option<&str>) -> Explanation {
    if let Some(body) = response_json {
        match extract_explanation(body) {
            Ok(text) => {
                debug!(chars = text.len(), "using model explanation");
                return Explanation {
                    text,
                    source: Source::Model,
                };
            }
            Err(err) => warn!(error = %err, "falling back to canned explanation"),
        }
    }

    Explanation {
        text: fallback_explanation(error_message).into_owned(),
        source: Source::Fallback,
    }
}
