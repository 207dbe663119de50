//! Best-effort extraction of structured feedback from scorer text.

use serde::de::DeserializeOwned;

use crate::feedback::FormFeedback;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("No JSON object found in scorer response")]
    NoJsonObject,

    #[error("Malformed JSON object: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Slice from the first `{` to the last `}`.
///
/// Models often wrap their JSON in prose or code fences; the outermost
/// braces are taken as the object.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse the JSON object embedded in `text`
pub fn parse_embedded<T: DeserializeOwned>(text: &str) -> Result<T, ParseError> {
    let json = extract_json_object(text).ok_or(ParseError::NoJsonObject)?;
    Ok(serde_json::from_str(json)?)
}

pub fn parse_feedback(text: &str) -> Result<FormFeedback, ParseError> {
    parse_embedded(text)
}

/// Parse feedback, falling back to the caller's `default` on failure
pub fn parse_feedback_or(text: &str, default: FormFeedback) -> FormFeedback {
    match parse_feedback(text) {
        Ok(feedback) => feedback,
        Err(e) => {
            tracing::warn!("Using fallback feedback: {}", e);
            default
        }
    }
}
