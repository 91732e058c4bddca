use serde::{Deserialize, Serialize};

use crate::modes::ImagePixelFormat;

/// Layout of a raw pixel buffer handed to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageGeometry {
    pub width: i32,
    pub height: i32,
    /// Bytes per row, including padding.
    pub stride: i32,
    pub pixel_format: ImagePixelFormat,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ImageGeometryError {
    #[error("invalid image geometry (width={width}, height={height}, stride={stride})")]
    InvalidDimensions { width: i32, height: i32, stride: i32 },

    #[error("image buffer too small (expected at least {expected} bytes, got {got})")]
    BufferTooSmall { expected: usize, got: usize },
}

impl ImageGeometry {
    /// Geometry of a tightly packed buffer (`stride = width * bytes_per_pixel`).
    ///
    /// Sub-byte and planar formats fall back to one byte per pixel column.
    pub fn packed(width: i32, height: i32, pixel_format: ImagePixelFormat) -> Self {
        let bpp = bytes_per_pixel(pixel_format).unwrap_or(1);
        Self {
            width,
            height,
            stride: width.saturating_mul(bpp as i32),
            pixel_format,
        }
    }

    /// Minimum number of bytes a buffer with this geometry must hold.
    pub fn min_buffer_len(&self) -> Result<usize, ImageGeometryError> {
        let invalid = ImageGeometryError::InvalidDimensions {
            width: self.width,
            height: self.height,
            stride: self.stride,
        };
        let (Ok(width), Ok(height), Ok(stride)) = (
            usize::try_from(self.width),
            usize::try_from(self.height),
            usize::try_from(self.stride),
        ) else {
            return Err(invalid);
        };
        if width == 0 || height == 0 {
            return Err(invalid);
        }
        if let Some(bpp) = bytes_per_pixel(self.pixel_format) {
            if stride < width.saturating_mul(bpp) {
                return Err(invalid);
            }
        }
        let plane = stride.checked_mul(height).ok_or(invalid)?;
        Ok(match self.pixel_format {
            // Y plane followed by an interleaved VU plane at half resolution.
            ImagePixelFormat::Nv21 => plane + plane / 2,
            _ => plane,
        })
    }

    /// Check that `len` bytes are enough for this geometry.
    pub fn validate_len(&self, len: usize) -> Result<(), ImageGeometryError> {
        let expected = self.min_buffer_len()?;
        if len < expected {
            return Err(ImageGeometryError::BufferTooSmall { expected, got: len });
        }
        Ok(())
    }
}

/// Bytes per pixel for interleaved formats; `None` for bit-packed and planar ones.
pub fn bytes_per_pixel(format: ImagePixelFormat) -> Option<usize> {
    match format {
        ImagePixelFormat::Grayscaled => Some(1),
        ImagePixelFormat::Rgb565 | ImagePixelFormat::Rgb555 => Some(2),
        ImagePixelFormat::Rgb888 => Some(3),
        ImagePixelFormat::Argb8888 => Some(4),
        ImagePixelFormat::Rgb161616 => Some(6),
        ImagePixelFormat::Argb16161616 => Some(8),
        ImagePixelFormat::Binary
        | ImagePixelFormat::BinaryInverted
        | ImagePixelFormat::Nv21
        | ImagePixelFormat::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_rgb_geometry() {
        let g = ImageGeometry::packed(640, 480, ImagePixelFormat::Rgb888);
        assert_eq!(g.stride, 1920);
        assert_eq!(g.min_buffer_len(), Ok(1920 * 480));
        assert!(g.validate_len(1920 * 480).is_ok());
        assert_eq!(
            g.validate_len(10),
            Err(ImageGeometryError::BufferTooSmall {
                expected: 1920 * 480,
                got: 10
            })
        );
    }

    #[test]
    fn nv21_needs_chroma_plane() {
        let g = ImageGeometry {
            width: 4,
            height: 4,
            stride: 4,
            pixel_format: ImagePixelFormat::Nv21,
        };
        assert_eq!(g.min_buffer_len(), Ok(24));
    }

    #[test]
    fn rejects_short_stride_and_empty_images() {
        let g = ImageGeometry {
            width: 10,
            height: 2,
            stride: 20,
            pixel_format: ImagePixelFormat::Rgb888,
        };
        assert!(g.min_buffer_len().is_err());
        let empty = ImageGeometry::packed(0, 10, ImagePixelFormat::Grayscaled);
        assert!(empty.min_buffer_len().is_err());
    }
}
