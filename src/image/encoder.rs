use super::CapturedImage;
use crate::{Error, Result};
use base64::Engine as _;
use image::codecs::jpeg;
use image::imageops::FilterType;
use image::DynamicImage;

/// JPEG settings applied to every photo before upload.
#[derive(Debug, Clone, Copy)]
pub struct JpegEncoder {
    quality: u8,
    max_dimension: Option<u32>,
}

impl JpegEncoder {
    pub fn new(quality: u8) -> Self {
        Self {
            quality,
            max_dimension: None,
        }
    }

    /// Downscale photos whose longer side exceeds `max_dimension`.
    pub fn with_max_dimension(mut self, max_dimension: Option<u32>) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    pub fn encode(&self, image: &CapturedImage) -> Result<Vec<u8>> {
        let source = image.as_dynamic();
        let (width, height) = (source.width(), source.height());
        if width == 0 || height == 0 {
            return Err(Error::Encoding(format!(
                "Could not convert image to JPEG: empty {}x{} bitmap",
                width, height
            )));
        }

        // JPEG has no alpha channel.
        let rgb = match self.max_dimension {
            Some(max) if width.max(height) > max => {
                tracing::debug!(
                    "Downscaling {}x{} photo to fit within {}px",
                    width,
                    height,
                    max
                );
                DynamicImage::ImageRgb8(source.resize(max, max, FilterType::Lanczos3).to_rgb8())
            }
            _ => DynamicImage::ImageRgb8(source.to_rgb8()),
        };

        let mut bytes = Vec::new();
        let encoder = jpeg::JpegEncoder::new_with_quality(&mut bytes, self.quality);
        rgb.write_with_encoder(encoder)
            .map_err(|e| Error::Encoding(format!("Could not convert image to JPEG: {}", e)))?;

        Ok(bytes)
    }
}

pub fn jpeg_data_url(jpeg: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(jpeg);
    format!("data:image/jpeg;base64,{}", encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32) -> CapturedImage {
        CapturedImage::from_dynamic(DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([255, 0, 0, 128]),
        )))
    }

    #[test]
    fn test_encode_produces_jpeg() {
        let bytes = JpegEncoder::new(85).encode(&solid(10, 10)).unwrap();
        assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF]);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 10);
        assert_eq!(decoded.height(), 10);
    }

    #[test]
    fn test_encode_downscales_preserving_aspect_ratio() {
        let bytes = JpegEncoder::new(85)
            .with_max_dimension(Some(100))
            .encode(&solid(400, 200))
            .unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 100);
        assert_eq!(decoded.height(), 50);
    }

    #[test]
    fn test_encode_never_upscales() {
        let bytes = JpegEncoder::new(85)
            .with_max_dimension(Some(1000))
            .encode(&solid(40, 20))
            .unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 40);
    }

    #[test]
    fn test_encode_rejects_empty_bitmap() {
        let err = JpegEncoder::new(85).encode(&solid(0, 0)).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn test_data_url_embeds_source_bytes() {
        let bytes = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        let url = jpeg_data_url(&bytes);

        let payload = url.strip_prefix("data:image/jpeg;base64,").unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .unwrap();
        assert_eq!(decoded, bytes);
    }
}
