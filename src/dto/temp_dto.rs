use crate::model::temp_image::TempImage;
use bytes::Bytes;
use serde::Serialize;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Image received from a multipart upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub name: String,
    pub content: Bytes,
    pub content_type: String,
}

/// Upload acknowledgement. The binary itself is not echoed back.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TempImageResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub file_type: String,
    pub size: usize,
}

impl From<TempImage> for TempImageResponse {
    fn from(image: TempImage) -> Self {
        TempImageResponse {
            id: image.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: image.name,
            file_type: image.file_type,
            size: image.image.bytes.len(),
        }
    }
}

/// Stored image ready to be written to a response.
#[derive(Debug, Clone)]
pub struct ImageContent {
    pub content: Vec<u8>,
    pub content_type: String,
}
