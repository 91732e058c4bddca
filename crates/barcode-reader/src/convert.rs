//! Conversions from `image` crate types into engine buffers.

use barcode_reader_core::{ImageGeometry, ImagePixelFormat};

use crate::BarcodeReaderError;

/// Pack `image` as tightly strided RGB_888 pixels.
pub fn rgb_buffer(
    image: &::image::DynamicImage,
) -> Result<(Vec<u8>, ImageGeometry), BarcodeReaderError> {
    let rgb = image.to_rgb8();
    let geometry = geometry_for(rgb.width(), rgb.height(), ImagePixelFormat::Rgb888)?;
    Ok((rgb.into_raw(), geometry))
}

/// Pack `image` as 8-bit grayscale pixels.
pub fn gray_buffer(
    image: &::image::DynamicImage,
) -> Result<(Vec<u8>, ImageGeometry), BarcodeReaderError> {
    let gray = image.to_luma8();
    let geometry = geometry_for(gray.width(), gray.height(), ImagePixelFormat::Grayscaled)?;
    Ok((gray.into_raw(), geometry))
}

fn geometry_for(
    width: u32,
    height: u32,
    format: ImagePixelFormat,
) -> Result<ImageGeometry, BarcodeReaderError> {
    match (i32::try_from(width), i32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok(ImageGeometry::packed(w, h, format)),
        _ => Err(BarcodeReaderError::InvalidGeometry {
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
            stride: 0,
        }),
    }
}
