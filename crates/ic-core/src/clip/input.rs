//! Routing of raw user input.
//!
//! A single text box accepts either a clip code or a URL. The code shape is
//! checked first, so `abcd1` is always a lookup even though it would also be a
//! valid relative path.

use url::Url;

use super::code::{ClipCode, CODE_LENGTH};

/// What a submission asks for.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ClipInput {
    /// Look up an existing clip.
    Code(ClipCode),
    /// Create a clip for this absolute URL (kept exactly as typed).
    Url(String),
    /// Neither a code nor an absolute URL.
    Invalid,
}

impl ClipInput {
    pub fn is_lookup(&self) -> bool {
        matches!(self, ClipInput::Code(_))
    }
}

/// Classify `text` using the published code length.
pub fn classify_input(text: &str) -> ClipInput {
    classify_input_with_length(text, CODE_LENGTH)
}

pub fn classify_input_with_length(text: &str, code_length: usize) -> ClipInput {
    let text = text.trim();

    if let Ok(code) = ClipCode::parse_with_length(text, code_length) {
        return ClipInput::Code(code);
    }

    if is_absolute_url(text) {
        return ClipInput::Url(text.to_string());
    }

    ClipInput::Invalid
}

/// An absolute URL with a host, e.g. `https://lenster.xyz`.
///
/// `mailto:` style URLs parse but have nothing to shorten to, so a host is required.
fn is_absolute_url(text: &str) -> bool {
    if text.is_empty() || text.chars().any(char::is_whitespace) {
        return false;
    }
    match Url::parse(text) {
        Ok(url) => !url.cannot_be_a_base() && url.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}
