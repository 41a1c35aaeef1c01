//! Brand asset resolution
//!
//! The brand logo is the one asynchronous step of an export: it is fetched
//! and encoded into an embeddable form before composition. Failure here
//! degrades to "no logo" and never fails the export.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use doc_compose::EncodedImage;
use std::future::Future;
use thiserror::Error;

/// Built-in brand logo, base64-encoded PNG. Replaced at deployment time by
/// the embedding application via a custom [`LogoSource`].
const EMBEDDED_LOGO_PNG: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Errors resolving a brand asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The asset bytes could not be decoded
    #[error("asset decode failed: {0}")]
    Decode(String),

    /// The asset could not be fetched
    #[error("asset fetch failed: {0}")]
    Fetch(String),
}

/// A source for the embeddable brand logo.
///
/// The fetch is awaited exactly once per export/preview call. Network-backed
/// implementations may be subject to an external timeout; the engine imposes
/// none of its own.
pub trait LogoSource {
    fn fetch(&self) -> impl Future<Output = Result<EncodedImage, AssetError>> + Send;
}

/// Default logo source: decodes the built-in PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedLogo;

impl LogoSource for EmbeddedLogo {
    fn fetch(&self) -> impl Future<Output = Result<EncodedImage, AssetError>> + Send {
        std::future::ready(decode_embedded_logo())
    }
}

fn decode_embedded_logo() -> Result<EncodedImage, AssetError> {
    BASE64
        .decode(EMBEDDED_LOGO_PNG)
        .map(|data| EncodedImage::new("image/png", data))
        .map_err(|err| AssetError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedded_logo_decodes() {
        let logo = EmbeddedLogo.fetch().await.unwrap();
        assert_eq!(logo.mime, "image/png");
        // PNG magic bytes.
        assert_eq!(&logo.data[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn test_data_uri_round_trip() {
        let logo = EmbeddedLogo.fetch().await.unwrap();
        assert!(logo.data_uri().starts_with("data:image/png;base64,"));
    }
}
