use crate::render::error::RenderError;
use image::codecs::png::PngEncoder;
use image::{imageops, ColorType, ImageEncoder, Rgb, RgbImage};

/// Bounding box `(x, y, width, height)` of every pixel that differs from
/// `background`, grown by `pad` pixels and clipped to the image.
///
/// Returns `None` for an image that is entirely background.
pub(crate) fn content_bounds(image: &RgbImage, background: Rgb<u8>, pad: u32) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if *pixel == background {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }

    bounds.map(|(min_x, min_y, max_x, max_y)| {
        let left = min_x.saturating_sub(pad);
        let top = min_y.saturating_sub(pad);
        let right = (max_x + pad).min(image.width() - 1);
        let bottom = (max_y + pad).min(image.height() - 1);
        (left, top, right - left + 1, bottom - top + 1)
    })
}

/// Encodes a raw RGB buffer as PNG, optionally cropped to its content.
pub(crate) fn encode_png(
    buffer: Vec<u8>,
    (width, height): (u32, u32),
    crop_pad: Option<u32>,
) -> Result<Vec<u8>, RenderError> {
    let image = RgbImage::from_raw(width, height, buffer)
        .ok_or(RenderError::InvalidCanvas { width, height })?;

    let image = match crop_pad.and_then(|pad| content_bounds(&image, Rgb([255, 255, 255]), pad)) {
        Some((x, y, w, h)) => imageops::crop_imm(&image, x, y, w, h).to_image(),
        None => image,
    };

    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgb8,
    )?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas_with_dot(size: u32, dot: (u32, u32)) -> RgbImage {
        let mut image = RgbImage::from_pixel(size, size, Rgb([255, 255, 255]));
        image.put_pixel(dot.0, dot.1, Rgb([0, 0, 0]));
        image
    }

    #[test]
    fn bounds_wrap_content_with_padding() {
        let image = canvas_with_dot(100, (40, 60));
        assert_eq!(
            content_bounds(&image, Rgb([255, 255, 255]), 5),
            Some((35, 55, 11, 11))
        );
    }

    #[test]
    fn padding_is_clipped_at_the_edges() {
        let image = canvas_with_dot(10, (0, 9));
        assert_eq!(
            content_bounds(&image, Rgb([255, 255, 255]), 3),
            Some((0, 6, 4, 4))
        );
    }

    #[test]
    fn blank_images_have_no_bounds() {
        let image = RgbImage::from_pixel(8, 8, Rgb([255, 255, 255]));
        assert_eq!(content_bounds(&image, Rgb([255, 255, 255]), 1), None);
    }

    #[test]
    fn encoded_png_is_cropped() -> Result<(), Box<dyn std::error::Error>> {
        let image = canvas_with_dot(64, (32, 32));
        let bytes = encode_png(image.into_raw(), (64, 64), Some(2))?;
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&bytes)?;
        assert_eq!((decoded.width(), decoded.height()), (5, 5));

        let uncropped = encode_png(canvas_with_dot(64, (1, 1)).into_raw(), (64, 64), None)?;
        let decoded = image::load_from_memory(&uncropped)?;
        assert_eq!((decoded.width(), decoded.height()), (64, 64));
        Ok(())
    }

    #[test]
    fn mismatched_buffers_are_rejected() {
        assert!(matches!(
            encode_png(vec![0; 10], (4, 4), None),
            Err(RenderError::InvalidCanvas { width: 4, height: 4 })
        ));
    }
}
