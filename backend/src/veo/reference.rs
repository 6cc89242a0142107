//! Conversion of character images (data URLs) into request reference images.

use super::GenerationError;
use super::types::{ReferenceImage, ReferenceType};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const FALLBACK_MIME_TYPE: &str = "image/png";

/// Split a `data:image/<subtype>;base64,` header off the payload.
///
/// Returns the media type and the remaining base64 text, or `None` when the
/// string does not start with a recognized header.
fn split_data_url(data: &str) -> Option<(&str, &str)> {
    let rest = data.strip_prefix("data:")?;
    let (mime_type, payload) = rest.split_once(";base64,")?;
    let subtype = mime_type.strip_prefix("image/")?;
    if subtype.is_empty() || !subtype.bytes().all(|b| b.is_ascii_lowercase()) {
        return None;
    }
    Some((mime_type, payload))
}

/// Strip the data URL header, if any
pub fn strip_base64_header(data: &str) -> &str {
    split_data_url(data).map(|(_, payload)| payload).unwrap_or(data)
}

/// Media type named by the data URL header, falling back to `image/png`
pub fn mime_type_of(data: &str) -> &str {
    split_data_url(data)
        .map(|(mime, _)| mime)
        .unwrap_or(FALLBACK_MIME_TYPE)
}

/// Decode one stored character image into an `asset` reference.
pub fn decode_reference_image(data: &str) -> Result<ReferenceImage, GenerationError> {
    let bytes = STANDARD
        .decode(strip_base64_header(data).trim())
        .map_err(|e| GenerationError::InvalidReferenceImage(e.to_string()))?;
    if bytes.is_empty() {
        return Err(GenerationError::InvalidReferenceImage(
            "image is empty".to_string(),
        ));
    }
    Ok(ReferenceImage {
        bytes,
        mime_type: mime_type_of(data).to_string(),
        reference_type: ReferenceType::Asset,
    })
}

/// Encode raw image bytes as a data URL
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_known_header_and_reads_mime_type() {
        let data = "data:image/jpeg;base64,/9j/4AAQ";

        assert_eq!(strip_base64_header(data), "/9j/4AAQ");
        assert_eq!(mime_type_of(data), "image/jpeg");
    }

    #[test]
    fn bare_base64_falls_back_to_png() {
        let data = "iVBORw0KGgo=";

        assert_eq!(strip_base64_header(data), data);
        assert_eq!(mime_type_of(data), "image/png");
    }

    #[test]
    fn unrecognized_header_is_left_alone() {
        // Subtypes with digits or symbols are not recognized
        let data = "data:image/svg+xml;base64,PHN2Zz4=";

        assert_eq!(strip_base64_header(data), data);
        assert_eq!(mime_type_of(data), "image/png");
    }

    #[test]
    fn decodes_payload_into_asset_reference() {
        let url = to_data_url("image/webp", b"RIFF1234");
        let image = decode_reference_image(&url).unwrap();

        assert_eq!(image.bytes, b"RIFF1234");
        assert_eq!(image.mime_type, "image/webp");
        assert_eq!(image.reference_type, ReferenceType::Asset);
    }

    #[test]
    fn rejects_undecodable_payload() {
        let err = decode_reference_image("data:image/png;base64,@@not base64@@").unwrap_err();
        assert!(matches!(err, GenerationError::InvalidReferenceImage(_)));
    }
}
