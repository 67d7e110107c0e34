//! Image selection and data-URI encoding.

use crate::error::{EncodeError, SelectError};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::debug;
use std::path::{Path, PathBuf};

/// Extension to media type table for files the picker accepts.
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("avif", "image/avif"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
];

/// Every extension with a known image media type.
pub fn supported_extensions() -> impl Iterator<Item = &'static str> {
    MEDIA_TYPES.iter().map(|(ext, _)| *ext)
}

/// Resolve the image media type for a path from its extension.
pub fn media_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    MEDIA_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

/// A single locally selected image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Location of the file.
    pub path: PathBuf,
    /// Media type inferred from the extension.
    pub media_type: &'static str,
}

impl ImageRef {
    /// Accept `path` as an image selection.
    ///
    /// The file must exist, be a regular file, and carry one of the
    /// `accepted` extensions (compared case-insensitively).
    pub fn from_path(path: impl AsRef<Path>, accepted: &[String]) -> Result<Self, SelectError> {
        let path = path.as_ref().to_path_buf();
        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(SelectError::NotFound(path));
            }
            Err(source) => return Err(SelectError::Io { path, source }),
        };
        if !metadata.is_file() {
            return Err(SelectError::NotAFile(path));
        }
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        let accepted_ext = ext
            .as_deref()
            .is_some_and(|ext| accepted.iter().any(|a| a.eq_ignore_ascii_case(ext)));
        let Some(media_type) = media_type_for(&path).filter(|_| accepted_ext) else {
            return Err(SelectError::UnsupportedType(path));
        };
        debug!(
            "image selected (path={}, media_type={})",
            path.display(),
            media_type
        );
        Ok(Self { path, media_type })
    }

    /// File name for display, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Build a `data:` URI from raw bytes.
pub fn encode_data_uri(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{media_type};base64,{}", STANDARD.encode(bytes))
}

/// Converts a selected image into a self-contained textual form.
#[async_trait]
pub trait ImageEncoder: Send + Sync {
    /// Produce the data URI for `image`.
    async fn encode(&self, image: &ImageRef) -> Result<String, EncodeError>;
}

/// Encoder that reads the file from disk.
#[derive(Debug, Clone, Default)]
pub struct FileImageEncoder {
    max_bytes: Option<u64>,
}

impl FileImageEncoder {
    /// Create an encoder without a size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject files larger than `max_bytes`.
    pub fn with_max_bytes(mut self, max_bytes: Option<u64>) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

#[async_trait]
impl ImageEncoder for FileImageEncoder {
    async fn encode(&self, image: &ImageRef) -> Result<String, EncodeError> {
        let read_err = |source| EncodeError::Read {
            path: image.path.clone(),
            source,
        };
        if let Some(limit) = self.max_bytes {
            let size = tokio::fs::metadata(&image.path)
                .await
                .map_err(read_err)?
                .len();
            if size > limit {
                return Err(EncodeError::TooLarge {
                    path: image.path.clone(),
                    size,
                    limit,
                });
            }
        }
        let bytes = tokio::fs::read(&image.path).await.map_err(read_err)?;
        debug!(
            "image read (path={}, bytes={})",
            image.path.display(),
            bytes.len()
        );
        Ok(encode_data_uri(image.media_type, &bytes))
    }
}
