use async_trait::async_trait;
use parking_lot::Mutex;
use roster_core::{EncodeError, ImageEncoder, ImageRef};
use std::path::PathBuf;
use std::sync::Arc;

/// Encoder that always returns the same data URI.
#[derive(Debug, Clone)]
pub struct FixedEncoder {
    uri: String,
}

impl FixedEncoder {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

#[async_trait]
impl ImageEncoder for FixedEncoder {
    async fn encode(&self, _image: &ImageRef) -> Result<String, EncodeError> {
        Ok(self.uri.clone())
    }
}

/// Encoder that fails every read.
#[derive(Debug, Clone, Default)]
pub struct FailingEncoder;

#[async_trait]
impl ImageEncoder for FailingEncoder {
    async fn encode(&self, image: &ImageRef) -> Result<String, EncodeError> {
        Err(EncodeError::Read {
            path: image.path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "corrupt image"),
        })
    }
}

/// Encoder that records each path it was asked to encode.
#[derive(Debug, Clone, Default)]
pub struct RecordingEncoder {
    seen: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> Vec<PathBuf> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl ImageEncoder for RecordingEncoder {
    async fn encode(&self, image: &ImageRef) -> Result<String, EncodeError> {
        self.seen.lock().push(image.path.clone());
        Ok(format!("data:{};base64,", image.media_type))
    }
}
