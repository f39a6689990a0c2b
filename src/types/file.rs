//! Base64-encoded file payloads.

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Base64-encoded binary content (images, audio).
///
/// The wrapped string always decodes as standard base64; construction and
/// deserialization both reject anything else with [`Error::InvalidFileEncoding`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Base64File(String);

impl Base64File {
    /// Wrap an already encoded string, validating it.
    pub fn new(encoded: impl Into<String>) -> Result<Self> {
        let encoded = encoded.into();
        base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| Error::InvalidFileEncoding {
                len: encoded.len(),
                reason: e.to_string(),
            })?;
        Ok(Self(encoded))
    }

    /// Encode raw bytes. Always valid.
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self(base64::engine::general_purpose::STANDARD.encode(bytes.as_ref()))
    }

    /// Download `url` through the transport and encode the body.
    pub async fn from_url(transport: &dyn crate::transport::Transport, url: &str) -> Result<Self> {
        let bytes = transport.fetch_bytes(url).await?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Blocking counterpart of [`Base64File::from_url`].
    #[cfg(feature = "blocking")]
    pub fn from_url_blocking(
        transport: &dyn crate::transport::BlockingTransport,
        url: &str,
    ) -> Result<Self> {
        let bytes = transport.fetch_bytes(url)?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Decode back into raw bytes.
    pub fn decode(&self) -> Vec<u8> {
        // Validated on construction.
        base64::engine::general_purpose::STANDARD
            .decode(self.0.as_bytes())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the encoded string.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Base64File {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Base64File> for String {
    fn from(file: Base64File) -> Self {
        file.0
    }
}

impl AsRef<str> for Base64File {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Base64File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_roundtrip() {
        let file = Base64File::from_bytes(b"\x00\x01binary\xff");
        assert_eq!(file.as_str(), "AAFiaW5hcnn/");
        assert_eq!(file.decode(), b"\x00\x01binary\xff");
        assert!(Base64File::new(file.as_str()).is_ok());
    }

    #[test]
    fn test_rejects_non_base64() {
        let err = Base64File::new("not base64!").unwrap_err();
        match err {
            Error::InvalidFileEncoding { len, .. } => assert_eq!(len, 11),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Base64File = serde_json::from_str("\"aGVsbG8=\"").unwrap();
        assert_eq!(ok.decode(), b"hello");
        assert!(serde_json::from_str::<Base64File>("\"%%%\"").is_err());
    }

    #[test]
    fn test_empty_is_valid() {
        let file = Base64File::from_bytes(b"");
        assert!(file.is_empty());
        assert!(Base64File::new("").is_ok());
    }
}
