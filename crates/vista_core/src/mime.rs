//! Supported image mime types.

use serde::{Deserialize, Serialize};

/// Image formats accepted for analysis.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use vista_core::ImageMimeType;
///
/// assert_eq!(ImageMimeType::from_str("image/png").unwrap(), ImageMimeType::Png);
/// assert!(ImageMimeType::from_str("image/gif").is_err());
/// assert_eq!(ImageMimeType::Jpeg.as_ref(), "image/jpeg");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum ImageMimeType {
    /// JPEG image
    #[strum(serialize = "image/jpeg")]
    #[serde(rename = "image/jpeg")]
    Jpeg,
    /// PNG image
    #[strum(serialize = "image/png")]
    #[serde(rename = "image/png")]
    Png,
}

impl ImageMimeType {
    /// Parse a mime type string, returning `None` when unsupported.
    ///
    /// Matching is exact; `image/JPEG` or `image/jpeg; q=1` are not accepted.
    pub fn parse(mime_type: &str) -> Option<Self> {
        mime_type.parse().ok()
    }

    /// All supported mime type strings.
    pub fn supported() -> Vec<&'static str> {
        use strum::IntoEnumIterator;
        Self::iter().map(<&'static str>::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_exact() {
        assert_eq!(ImageMimeType::parse("image/jpeg"), Some(ImageMimeType::Jpeg));
        assert_eq!(ImageMimeType::parse("image/png"), Some(ImageMimeType::Png));
        assert_eq!(ImageMimeType::parse("image/gif"), None);
        assert_eq!(ImageMimeType::parse("IMAGE/PNG"), None);
        assert_eq!(ImageMimeType::parse(""), None);
    }

    #[test]
    fn supported_lists_both_formats() {
        assert_eq!(ImageMimeType::supported(), vec!["image/jpeg", "image/png"]);
    }
}
