//! Photo capture and JPEG encoding
//!
//! A captured photo arrives in whatever format the camera or library picker
//! produced. Before upload it is re-encoded as JPEG and embedded in a base64
//! data URL.

pub mod encoder;

pub use encoder::{jpeg_data_url, JpegEncoder};

use crate::{Error, Result};
use image::DynamicImage;
use std::path::Path;
use std::sync::Arc;

/// A decoded photo picked or captured by the user.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    image: Arc<DynamicImage>,
}

impl CapturedImage {
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }

    /// Decodes a photo from any format the `image` crate understands.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| Error::Encoding(format!("Could not decode photo: {}", e)))?;
        Ok(Self::from_dynamic(image))
    }

    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        tracing::debug!("Read photo {} ({} bytes)", path.display(), bytes.len());
        Self::from_bytes(&bytes)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }
}
