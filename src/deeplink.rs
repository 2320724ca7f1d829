//! Messaging deep links of the form `https://<service>/<recipient>?text=<message>`.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use thiserror::Error;
use url::Url;

/// Characters left untouched by ECMAScript `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Errors building or reading a deep link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeepLinkError {
    /// The messaging service base URL could not be parsed.
    #[error("Invalid messaging base URL {0:?}: {1}")]
    InvalidBase(String, String),

    /// Only http and https services are accepted.
    #[error("Unsupported scheme {0:?} for messaging base URL")]
    UnsupportedScheme(String),

    /// The recipient is not a phone number.
    #[error("Invalid recipient {0:?}: expected an optional '+' followed by 6-15 digits")]
    InvalidRecipient(String),

    /// The URL carries no `text` query parameter.
    #[error("Deep link has no text parameter")]
    MissingText,

    /// The `text` parameter is not valid UTF-8 once decoded.
    #[error("Deep link text is not valid UTF-8")]
    InvalidEncoding,
}

/// A messaging service plus the number that receives the messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLinkTarget {
    base: String,
    recipient: String,
}

impl DeepLinkTarget {
    /// Build a target from a base URL such as `https://wa.me/` and a
    /// recipient such as `+919675111719`.
    ///
    /// # Errors
    ///
    /// Returns a [`DeepLinkError`] for an unparsable or non-http(s) base, or a
    /// recipient that is not a phone number.
    pub fn new(base_url: &str, recipient: &str) -> Result<Self, DeepLinkError> {
        let url = Url::parse(base_url)
            .map_err(|e| DeepLinkError::InvalidBase(base_url.to_string(), e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DeepLinkError::UnsupportedScheme(url.scheme().to_string()));
        }

        let digits = recipient.strip_prefix('+').unwrap_or(recipient);
        if !(6..=15).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DeepLinkError::InvalidRecipient(recipient.to_string()));
        }

        let mut base = url.as_str().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            base,
            recipient: recipient.to_string(),
        })
    }

    /// The recipient identifier as configured.
    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Produce the deep link carrying `message` as pre-filled text.
    #[must_use]
    pub fn link(&self, message: &str) -> String {
        format!(
            "{}{}?text={}",
            self.base,
            self.recipient,
            encode_component(message)
        )
    }
}

/// Percent-encode text for a URL query component.
#[must_use]
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

/// Recover the pre-filled message from a deep link.
///
/// # Errors
///
/// Returns [`DeepLinkError::MissingText`] when there is no `text` parameter
/// and [`DeepLinkError::InvalidEncoding`] when it does not decode to UTF-8.
pub fn decode_text(link: &str) -> Result<String, DeepLinkError> {
    let query = link
        .split_once('?')
        .map(|(_, q)| q)
        .ok_or(DeepLinkError::MissingText)?;

    let raw = query
        .split('&')
        .find_map(|pair| pair.strip_prefix("text="))
        .ok_or(DeepLinkError::MissingText)?;

    percent_decode_str(raw)
        .decode_utf8()
        .map(|text| text.into_owned())
        .map_err(|_| DeepLinkError::InvalidEncoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(encode_component("a b\nc"), "a%20b%0Ac");
        assert_eq!(encode_component("*Subtotal:* $1"), "*Subtotal%3A*%20%241");
        assert_eq!(encode_component("a+b&c=d"), "a%2Bb%26c%3Dd");
        assert_eq!(encode_component("(it's)~!"), "(it's)~!");
        assert_eq!(encode_component("₹"), "%E2%82%B9");
    }

    #[test]
    fn builds_link_with_recipient() {
        let target = DeepLinkTarget::new("https://wa.me/", "+919675111719").unwrap();
        assert_eq!(
            target.link("Hi there"),
            "https://wa.me/+919675111719?text=Hi%20there"
        );
    }

    #[test]
    fn base_without_trailing_slash_is_normalized() {
        let target = DeepLinkTarget::new("https://api.example.com/send", "8630715936").unwrap();
        assert_eq!(
            target.link("x"),
            "https://api.example.com/send/8630715936?text=x"
        );
    }

    #[test]
    fn rejects_bad_targets() {
        assert!(matches!(
            DeepLinkTarget::new("not a url", "8630715936"),
            Err(DeepLinkError::InvalidBase(..))
        ));
        assert!(matches!(
            DeepLinkTarget::new("ftp://wa.me/", "8630715936"),
            Err(DeepLinkError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            DeepLinkTarget::new("https://wa.me/", "call-me"),
            Err(DeepLinkError::InvalidRecipient(_))
        ));
        assert!(matches!(
            DeepLinkTarget::new("https://wa.me/", "+12"),
            Err(DeepLinkError::InvalidRecipient(_))
        ));
    }

    #[test]
    fn decoding_inverts_encoding() {
        let target = DeepLinkTarget::new("https://wa.me/", "8630715936").unwrap();
        for message in [
            "",
            "plain",
            "Name: Ada\nAddress: 12 Main St, Apt #4 & more",
            "100% sure? a+b=c / ₹1,299 \"quoted\"",
        ] {
            let link = target.link(message);
            assert_eq!(decode_text(&link).unwrap(), message);
        }
    }

    #[test]
    fn decoding_requires_text_parameter() {
        assert_eq!(
            decode_text("https://wa.me/8630715936"),
            Err(DeepLinkError::MissingText)
        );
        assert_eq!(
            decode_text("https://wa.me/8630715936?foo=bar"),
            Err(DeepLinkError::MissingText)
        );
        assert_eq!(
            decode_text("https://wa.me/8630715936?text=%FF"),
            Err(DeepLinkError::InvalidEncoding)
        );
    }
}
