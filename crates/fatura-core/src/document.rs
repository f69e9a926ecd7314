//! Document decoding: uploaded bytes to OCR-ready content.
//!
//! JPG/PNG bytes decode straight to an image. PDFs are analyzed first:
//! a text-based PDF yields its embedded text directly (no OCR round
//! trip), an image-based PDF yields its first embedded image for the
//! OCR collaborator. Anything else is a per-document decode error.

use image::{DynamicImage, ImageBuffer, Rgba};
use lopdf::{Document, Object};
use tracing::debug;

use crate::error::DecodeError;

/// Minimum embedded-text length for a PDF to count as text-based.
/// Shorter extractions are usually artifacts of a scanned page.
const MIN_PDF_TEXT_LEN: usize = 50;

/// Decoded content of one uploaded document.
#[derive(Debug, Clone)]
pub enum DocumentContent {
    /// Text extracted directly from a text-based PDF; skips OCR.
    Text(String),
    /// A decoded image that still needs OCR.
    Image(DynamicImage),
}

/// Decode one document's bytes. `name` is the original filename; its
/// extension selects the decoder.
pub fn decode(bytes: &[u8], name: &str) -> Result<DocumentContent, DecodeError> {
    let extension = name
        .rsplit('.')
        .next()
        .filter(|ext| ext.len() < name.len())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => decode_pdf(bytes),
        "png" | "jpg" | "jpeg" => {
            let image = image::load_from_memory(bytes)?;
            debug!("decoded {extension} image {}x{}", image.width(), image.height());
            Ok(DocumentContent::Image(image))
        }
        _ => Err(DecodeError::UnsupportedFormat(extension)),
    }
}

fn decode_pdf(bytes: &[u8]) -> Result<DocumentContent, DecodeError> {
    let mut doc = Document::load_mem(bytes).map_err(|e| DecodeError::Pdf(e.to_string()))?;

    // PDFs encrypted with an empty password are still readable.
    let raw = if doc.is_encrypted() {
        if doc.decrypt("").is_err() {
            return Err(DecodeError::Encrypted);
        }
        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted)
            .map_err(|e| DecodeError::Pdf(e.to_string()))?;
        decrypted
    } else {
        bytes.to_vec()
    };

    if doc.get_pages().is_empty() {
        return Err(DecodeError::NoPages);
    }

    let text = pdf_extract::extract_text_from_mem(&raw).unwrap_or_default();
    if text.trim().len() > MIN_PDF_TEXT_LEN {
        debug!("PDF is text-based ({} chars), skipping OCR", text.len());
        return Ok(DocumentContent::Text(text));
    }

    if let Some(image) = first_embedded_image(&doc) {
        debug!(
            "PDF is image-based, extracted {}x{} embedded image",
            image.width(),
            image.height()
        );
        return Ok(DocumentContent::Image(image));
    }

    if !text.trim().is_empty() {
        return Ok(DocumentContent::Text(text));
    }
    Err(DecodeError::EmptyPdf)
}

/// Scan the document's objects for the first decodable image XObject.
fn first_embedded_image(doc: &Document) -> Option<DynamicImage> {
    doc.objects
        .values()
        .find_map(|object| image_from_object(doc, object))
}

fn image_from_object(doc: &Document, object: &Object) -> Option<DynamicImage> {
    let Object::Stream(stream) = object else {
        return None;
    };
    let dict = &stream.dict;

    if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
        return None;
    }
    let width = dict.get(b"Width").ok()?.as_i64().ok()? as u32;
    let height = dict.get(b"Height").ok()?.as_i64().ok()? as u32;

    // JPEG streams carry their own encoding; hand them to the image
    // decoder whole. Other filters (JPX, CCITT, JBIG2) are not worth
    // supporting for scanned invoices.
    let filter = dict.get(b"Filter").ok().and_then(|f| match f {
        Object::Name(name) => Some(name.as_slice()),
        Object::Array(array) => array.first().and_then(|o| o.as_name().ok()),
        _ => None,
    });
    match filter {
        Some(b"DCTDecode") => {
            return image::load_from_memory_with_format(&stream.content, image::ImageFormat::Jpeg)
                .ok();
        }
        Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => return None,
        _ => {}
    }

    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());

    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .unwrap_or(8);
    if bits != 8 {
        return None;
    }

    let color_space = dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|o| match o {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(array) => array.first().and_then(|o| o.as_name().ok()),
            Object::Reference(r) => doc.get_object(*r).ok().and_then(|o| o.as_name().ok()),
            _ => None,
        })
        .unwrap_or(b"DeviceRGB");

    raw_pixels_to_image(&data, width, height, color_space)
}

fn raw_pixels_to_image(
    data: &[u8],
    width: u32,
    height: u32,
    color_space: &[u8],
) -> Option<DynamicImage> {
    let pixel_count = (width * height) as usize;
    let mut rgba = Vec::with_capacity(pixel_count * 4);

    match color_space {
        b"DeviceRGB" | b"RGB" if data.len() >= pixel_count * 3 => {
            for chunk in data[..pixel_count * 3].chunks_exact(3) {
                rgba.extend_from_slice(&[chunk[0], chunk[1], chunk[2], 255]);
            }
        }
        b"DeviceGray" | b"G" if data.len() >= pixel_count => {
            for &gray in &data[..pixel_count] {
                rgba.extend_from_slice(&[gray, gray, gray, 255]);
            }
        }
        _ => return None,
    }

    ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, rgba).map(DynamicImage::ImageRgba8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let image = DynamicImage::new_rgb8(4, 4);
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_png_decodes_to_image() {
        let content = decode(&png_bytes(), "scan.png").unwrap();
        assert!(matches!(content, DocumentContent::Image(_)));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(decode(&png_bytes(), "SCAN.PNG").is_ok());
    }

    #[test]
    fn test_unsupported_extension() {
        let result = decode(b"plain text", "notes.txt");
        assert!(matches!(result, Err(DecodeError::UnsupportedFormat(ext)) if ext == "txt"));
    }

    #[test]
    fn test_missing_extension() {
        assert!(matches!(
            decode(b"??", "noextension"),
            Err(DecodeError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_corrupt_image_bytes() {
        let result = decode(b"not an image", "scan.jpg");
        assert!(matches!(result, Err(DecodeError::Image(_))));
    }

    #[test]
    fn test_corrupt_pdf_bytes() {
        let result = decode(b"%PDF-garbage", "invoice.pdf");
        assert!(matches!(result, Err(DecodeError::Pdf(_))));
    }

    #[test]
    fn test_raw_rgb_pixels() {
        let data = vec![128u8; 2 * 2 * 3];
        let image = raw_pixels_to_image(&data, 2, 2, b"DeviceRGB").unwrap();
        assert_eq!((image.width(), image.height()), (2, 2));
    }

    #[test]
    fn test_raw_gray_pixels() {
        let data = vec![200u8; 3 * 3];
        let image = raw_pixels_to_image(&data, 3, 3, b"DeviceGray").unwrap();
        assert_eq!((image.width(), image.height()), (3, 3));
    }

    #[test]
    fn test_truncated_pixel_data() {
        assert!(raw_pixels_to_image(&[1, 2, 3], 2, 2, b"DeviceRGB").is_none());
    }
}
