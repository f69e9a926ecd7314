//! Image enhancement for scanned invoices.

use image::{DynamicImage, GrayImage, Luma};
use tracing::debug;

/// Contrast multiplier applied before grayscale conversion.
const CONTRAST_FACTOR: f32 = 2.0;

/// Enhance a scanned image for OCR: double the contrast around the
/// image's mean brightness, convert to grayscale, then stretch the
/// result to the full 0..255 range (autocontrast).
pub fn enhance(image: &DynamicImage) -> DynamicImage {
    let gray = image.to_luma8();
    let mean = mean_luma(&gray);

    let mut contrasted = GrayImage::new(gray.width(), gray.height());
    for (x, y, pixel) in gray.enumerate_pixels() {
        let value = mean + (pixel[0] as f32 - mean) * CONTRAST_FACTOR;
        contrasted.put_pixel(x, y, Luma([value.clamp(0.0, 255.0) as u8]));
    }

    let stretched = autocontrast(&contrasted);
    debug!(
        "enhanced {}x{} image (mean luma {mean:.1})",
        gray.width(),
        gray.height()
    );
    DynamicImage::ImageLuma8(stretched)
}

fn mean_luma(image: &GrayImage) -> f32 {
    let pixels = image.pixels().count();
    if pixels == 0 {
        return 0.0;
    }
    let sum: u64 = image.pixels().map(|p| p[0] as u64).sum();
    sum as f32 / pixels as f32
}

/// Linear stretch so the darkest pixel maps to 0 and the brightest to
/// 255. A flat image is left as-is.
fn autocontrast(image: &GrayImage) -> GrayImage {
    let (mut min, mut max) = (u8::MAX, u8::MIN);
    for pixel in image.pixels() {
        min = min.min(pixel[0]);
        max = max.max(pixel[0]);
    }
    if min >= max {
        return image.clone();
    }

    let range = (max - min) as f32;
    let mut stretched = GrayImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let value = (pixel[0] - min) as f32 / range * 255.0;
        stretched.put_pixel(x, y, Luma([value.round() as u8]));
    }
    stretched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_image(values: &[u8], width: u32) -> GrayImage {
        let height = values.len() as u32 / width;
        GrayImage::from_raw(width, height, values.to_vec()).unwrap()
    }

    #[test]
    fn test_enhance_produces_grayscale_of_same_size() {
        let image = DynamicImage::new_rgb8(6, 4);
        let enhanced = enhance(&image);
        assert_eq!((enhanced.width(), enhanced.height()), (6, 4));
        assert!(matches!(enhanced, DynamicImage::ImageLuma8(_)));
    }

    #[test]
    fn test_autocontrast_stretches_to_full_range() {
        let stretched = autocontrast(&gray_image(&[100, 150, 200, 150], 2));
        let values: Vec<u8> = stretched.pixels().map(|p| p[0]).collect();
        assert_eq!(values, vec![0, 128, 255, 128]);
    }

    #[test]
    fn test_autocontrast_leaves_flat_image_alone() {
        let flat = gray_image(&[77, 77, 77, 77], 2);
        assert_eq!(autocontrast(&flat), flat);
    }

    #[test]
    fn test_enhance_widens_contrast() {
        // Two mid-gray values end up at the extremes after the contrast
        // multiply and the stretch.
        let image = DynamicImage::ImageLuma8(gray_image(&[110, 140, 110, 140], 2));
        let enhanced = enhance(&image).to_luma8();
        let values: Vec<u8> = enhanced.pixels().map(|p| p[0]).collect();
        assert_eq!(values, vec![0, 255, 0, 255]);
    }
}
