//! Deep links into the external messaging channel.

use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Default messaging endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://wa.me";

/// Default shop contact handle.
pub const DEFAULT_CONTACT: &str = "27791002552";

/// Builds `<endpoint>/<contact>?text=<encoded text>` links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffLink {
    endpoint: String,
    contact: String,
}

impl HandoffLink {
    /// Create a link builder, rejecting unusable endpoints and handles.
    pub fn new(endpoint: impl Into<String>, contact: impl Into<String>) -> Result<Self, CommerceError> {
        let endpoint = endpoint.into().trim().trim_end_matches('/').to_string();
        let contact = contact.into().trim().to_string();

        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(CommerceError::InvalidLink(format!(
                "endpoint must be an http(s) URL: {endpoint:?}"
            )));
        }
        if contact.is_empty() || !contact.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CommerceError::InvalidLink(format!(
                "contact must be a non-empty alphanumeric handle: {contact:?}"
            )));
        }

        Ok(Self { endpoint, contact })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Full link carrying `text`.
    pub fn url_for(&self, text: &str) -> String {
        format!(
            "{}/{}?text={}",
            self.endpoint,
            self.contact,
            encode_uri_component(text)
        )
    }
}

impl Default for HandoffLink {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            contact: DEFAULT_CONTACT.to_string(),
        }
    }
}

/// Percent-encode with the browser's `encodeURIComponent` rules.
///
/// Unreserved characters pass through; everything else is encoded as
/// UTF-8 bytes. Space becomes `%20`, never `+`.
pub fn encode_uri_component(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    let mut buf = [0u8; 4];
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' => result.push(c),
            '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')' => result.push(c),
            _ => {
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_matches_browser() {
        assert_eq!(encode_uri_component("Hi! I'd"), "Hi!%20I'd");
        assert_eq!(encode_uri_component("a:b\nc"), "a%3Ab%0Ac");
        assert_eq!(encode_uri_component("x2 - R298.00"), "x2%20-%20R298.00");
        assert_eq!(encode_uri_component("(new)*~_"), "(new)*~_");
        assert_eq!(encode_uri_component("a&b=c?d/e#f+"), "a%26b%3Dc%3Fd%2Fe%23f%2B");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
    }

    #[test]
    fn test_default_link() {
        let link = HandoffLink::default();
        assert_eq!(
            link.url_for("Hi there"),
            "https://wa.me/27791002552?text=Hi%20there"
        );
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let link = HandoffLink::new("https://wa.me/", "27110000000").unwrap();
        assert_eq!(link.url_for("x"), "https://wa.me/27110000000?text=x");
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert!(HandoffLink::new("wa.me", DEFAULT_CONTACT).is_err());
        assert!(HandoffLink::new(DEFAULT_ENDPOINT, "").is_err());
        assert!(HandoffLink::new(DEFAULT_ENDPOINT, "+27 79").is_err());
    }
}
