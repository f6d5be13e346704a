use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};

use crate::error::CaptureError;

/// A still frame captured from the camera, framed as a
/// `data:image/...;base64,...` string the inference layer can embed
/// directly in a vision request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePayload {
    data_uri: String,
}

impl FramePayload {
    /// Validates a data URI produced by the capture layer.
    ///
    /// An empty input means no frame was captured and maps to
    /// [`CaptureError::Unavailable`]; everything else that fails here is
    /// a payload the inference call could not use.
    pub fn from_data_uri(input: &str) -> Result<Self, CaptureError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CaptureError::Unavailable);
        }

        let rest = input
            .strip_prefix("data:")
            .ok_or_else(|| CaptureError::InvalidPayload("not a data URI".to_string()))?;
        let (mime, data) = rest
            .split_once(";base64,")
            .ok_or_else(|| CaptureError::InvalidPayload("missing base64 payload".to_string()))?;

        if !mime.starts_with("image/") {
            return Err(CaptureError::InvalidPayload(format!(
                "unsupported media type: {}",
                mime
            )));
        }

        let bytes = STANDARD
            .decode(data)
            .map_err(|e| CaptureError::InvalidPayload(format!("bad base64: {}", e)))?;
        if bytes.is_empty() {
            return Err(CaptureError::Unavailable);
        }

        image::load_from_memory(&bytes)
            .map_err(|e| CaptureError::InvalidPayload(format!("undecodable image: {}", e)))?;

        Ok(Self {
            data_uri: input.to_string(),
        })
    }

    /// Encodes a captured frame as a JPEG data URI, the format the
    /// original capture surface produces.
    pub fn from_image(frame: &DynamicImage) -> Result<Self, CaptureError> {
        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);

        frame
            .write_to(&mut cursor, ImageFormat::Jpeg)
            .map_err(|e| CaptureError::InvalidPayload(format!("failed to encode frame: {}", e)))?;

        Ok(Self {
            data_uri: format!("data:image/jpeg;base64,{}", STANDARD.encode(&buffer)),
        })
    }

    pub fn as_data_uri(&self) -> &str {
        &self.data_uri
    }
}
