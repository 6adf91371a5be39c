//! Request validation.

use vista_core::ImageMimeType;
use vista_error::{ValidationError, ValidationErrorKind};

/// Check an image/prompt pair before it reaches a provider.
///
/// Checks run in a fixed order and stop at the first failure:
/// 1. the image is non-empty
/// 2. the prompt is non-empty
/// 3. the mime type is one of the supported set
///
/// The prompt is accepted as-is; whitespace-only prompts pass.
///
/// # Examples
///
/// ```
/// use vista_core::ImageMimeType;
/// use vista_service::validate;
///
/// assert_eq!(validate(&[1, 2, 3], "image/png", "hi").unwrap(), ImageMimeType::Png);
/// assert!(validate(&[], "image/png", "hi").is_err());
/// ```
pub fn validate(
    image_data: &[u8],
    mime_type: &str,
    prompt: &str,
) -> Result<ImageMimeType, ValidationError> {
    if image_data.is_empty() {
        return Err(ValidationError::new(ValidationErrorKind::NoImage));
    }
    if prompt.is_empty() {
        return Err(ValidationError::new(ValidationErrorKind::NoPrompt));
    }
    ImageMimeType::parse(mime_type).ok_or_else(|| {
        ValidationError::new(ValidationErrorKind::UnsupportedMimeType(
            mime_type.to_string(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_types() {
        assert_eq!(validate(b"x", "image/jpeg", "p").unwrap(), ImageMimeType::Jpeg);
        assert_eq!(validate(b"x", "image/png", "p").unwrap(), ImageMimeType::Png);
    }

    #[test]
    fn empty_image_checked_first() {
        let err = validate(&[], "image/gif", "").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NoImage);
    }

    #[test]
    fn empty_prompt_checked_before_mime() {
        let err = validate(b"x", "image/gif", "").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NoPrompt);
    }

    #[test]
    fn unsupported_mime_echoes_value() {
        let err = validate(b"x", "image/gif", "p").unwrap_err();
        assert_eq!(
            err.kind,
            ValidationErrorKind::UnsupportedMimeType("image/gif".to_string())
        );
        assert_eq!(err.kind.to_string(), "unsupported mime type \"image/gif\"");
    }

    #[test]
    fn mime_match_is_exact() {
        assert!(validate(b"x", "IMAGE/PNG", "p").is_err());
        assert!(validate(b"x", "image/png; charset=binary", "p").is_err());
        assert!(validate(b"x", "", "p").is_err());
    }

    #[test]
    fn whitespace_prompt_is_accepted() {
        assert!(validate(b"x", "image/png", "   ").is_ok());
    }
}
