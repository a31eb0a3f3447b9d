use std::io::Cursor;

use image::metadata::Orientation;
use image::{DynamicImage, GrayImage, ImageDecoder, ImageReader, Luma};

use super::error::ExtractionError;

/// One preprocessing step applied to an image before OCR.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageStage {
    /// Rotate/flip according to the EXIF orientation tag.
    Orient,
    Grayscale,
    /// Stretch contrast around the mean gray level by the given factor.
    Contrast(f32),
}

/// Fixed preprocessing order for phone-camera photos.
pub const OCR_STAGES: [ImageStage; 3] = [
    ImageStage::Orient,
    ImageStage::Grayscale,
    ImageStage::Contrast(2.0),
];

/// A decoded bitmap together with the orientation its metadata asks for.
pub struct DecodedImage {
    pub image: DynamicImage,
    pub orientation: Orientation,
}

pub fn decode(bytes: &[u8]) -> Result<DecodedImage, ExtractionError> {
    let decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ExtractionError::OcrFailed(e.to_string()))?
        .into_decoder()
        .map_err(|e| ExtractionError::OcrFailed(e.to_string()))?;
    decode_with(decoder)
}

fn decode_with(mut decoder: impl ImageDecoder) -> Result<DecodedImage, ExtractionError> {
    let orientation = decoder
        .orientation()
        .unwrap_or(Orientation::NoTransforms);
    let image =
        DynamicImage::from_decoder(decoder).map_err(|e| ExtractionError::OcrFailed(e.to_string()))?;
    Ok(DecodedImage { image, orientation })
}

/// Run [`OCR_STAGES`] in order, reporting each stage to `observer` once it
/// has been applied.
pub fn prepare_for_ocr(
    decoded: DecodedImage,
    observer: &mut dyn FnMut(ImageStage, &DynamicImage),
) -> GrayImage {
    let DecodedImage {
        mut image,
        orientation,
    } = decoded;

    for stage in OCR_STAGES {
        image = apply_stage(stage, image, orientation);
        observer(stage, &image);
    }

    image.into_luma8()
}

fn apply_stage(stage: ImageStage, mut image: DynamicImage, orientation: Orientation) -> DynamicImage {
    match stage {
        ImageStage::Orient => {
            image.apply_orientation(orientation);
            image
        }
        ImageStage::Grayscale => DynamicImage::ImageLuma8(to_luma_601(&image)),
        ImageStage::Contrast(factor) => {
            DynamicImage::ImageLuma8(enhance_contrast(&image.to_luma8(), factor))
        }
    }
}

/// Grayscale with ITU-R 601-2 luma weights (299/587/114), rounded to nearest.
pub fn to_luma_601(image: &DynamicImage) -> GrayImage {
    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let luma = (r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16;
        Luma([luma as u8])
    })
}

/// Blend every pixel away from the image's mean gray level.
///
/// `out = mean + factor * (in - mean)`, truncated and clamped to `0..=255`.
/// A factor of 1.0 leaves the image unchanged.
pub fn enhance_contrast(image: &GrayImage, factor: f32) -> GrayImage {
    let pixel_count = (image.width() as u64) * (image.height() as u64);
    if pixel_count == 0 {
        return image.clone();
    }

    let sum: u64 = image.pixels().map(|p| p.0[0] as u64).sum();
    let mean = (sum as f64 / pixel_count as f64 + 0.5) as i32 as f32;

    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let value = mean + factor * (pixel.0[0] as f32 - mean);
        pixel.0[0] = (value as i32).clamp(0, 255) as u8;
    }
    out
}
