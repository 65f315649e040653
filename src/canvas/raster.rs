//! Raster helpers: stroke rendering, PNG codec, data-URI wrapping.

use anyhow::{anyhow, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

use super::stroke::{Point, Stroke};

pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// A blank surface layer: fully transparent.
pub fn blank(width: u32, height: u32) -> RgbaImage {
    RgbaImage::new(width, height)
}

pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage> {
    let img = image::load_from_memory(bytes).map_err(|e| anyhow!("Invalid image data: {}", e))?;
    Ok(img.to_rgba8())
}

/// Wrap PNG bytes as a `data:image/png;base64,` URI.
pub fn to_data_uri(png: &[u8]) -> String {
    format!("{}{}", DATA_URI_PREFIX, BASE64.encode(png))
}

/// Extract image bytes from a base64 data URI. Accepts any image media type
/// in the prefix; the payload is validated by the decoder, not here.
pub fn from_data_uri(uri: &str) -> Result<Vec<u8>> {
    let payload = uri
        .split_once("base64,")
        .map(|(_, p)| p)
        .ok_or_else(|| anyhow!("Not a base64 data URI"))?;
    BASE64
        .decode(payload.trim())
        .map_err(|e| anyhow!("Invalid base64 payload: {}", e))
}

/// Render a committed stroke: discs stamped along each segment at sub-radius
/// spacing. Purely a function of the stroke, so replaying a history always
/// reproduces the same raster.
pub fn draw_stroke(img: &mut RgbaImage, stroke: &Stroke) {
    let color = Rgba(stroke.color.rgba());
    let radius = stroke.width.px() as f32 / 2.0;

    match stroke.points.as_slice() {
        [] => {}
        [p] => fill_disc(img, *p, radius, color),
        points => {
            for pair in points.windows(2) {
                draw_segment(img, pair[0], pair[1], radius, color);
            }
        }
    }
}

/// Stamp discs from `a` to `b` inclusive.
pub fn draw_segment(img: &mut RgbaImage, a: Point, b: Point, radius: f32, color: Rgba<u8>) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dist = (dx * dx + dy * dy).sqrt();

    let spacing = (radius / 2.0).max(0.5);
    let steps = (dist / spacing).ceil() as u32;

    for i in 0..=steps {
        let t = if steps == 0 { 0.0 } else { i as f32 / steps as f32 };
        let center = Point::new(a.x + dx * t, a.y + dy * t);
        fill_disc(img, center, radius, color);
    }
}

fn fill_disc(img: &mut RgbaImage, center: Point, radius: f32, color: Rgba<u8>) {
    // Half-pixel floor so the finest brush still marks its pixel
    let r = radius.max(0.5);
    let min_x = (center.x - r).floor().max(0.0) as u32;
    let min_y = (center.y - r).floor().max(0.0) as u32;
    let max_x = ((center.x + r).ceil() as u32).min(img.width().saturating_sub(1));
    let max_y = ((center.y + r).ceil() as u32).min(img.height().saturating_sub(1));

    if img.width() == 0 || img.height() == 0 {
        return;
    }

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - center.x;
            let dy = y as f32 + 0.5 - center.y;
            if dx * dx + dy * dy <= r * r {
                img.put_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::stroke::{BrushColor, BrushWidth};

    #[test]
    fn test_png_roundtrip_preserves_pixels() {
        let mut img = blank(8, 8);
        img.put_pixel(3, 4, Rgba([0xFF, 0x00, 0x00, 0xFF]));

        let png = encode_png(&img).unwrap();
        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_data_uri_roundtrip() {
        let png = encode_png(&blank(4, 4)).unwrap();
        let uri = to_data_uri(&png);
        assert!(uri.starts_with(DATA_URI_PREFIX));
        assert_eq!(from_data_uri(&uri).unwrap(), png);
    }

    #[test]
    fn test_from_data_uri_rejects_plain_text() {
        assert!(from_data_uri("not a uri").is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_image(b"garbage bytes").is_err());
    }

    #[test]
    fn test_stroke_marks_its_path() {
        let mut img = blank(32, 32);
        let stroke = Stroke {
            color: BrushColor::Black,
            width: BrushWidth::Thin,
            points: vec![Point::new(4.0, 16.0), Point::new(28.0, 16.0)],
        };
        draw_stroke(&mut img, &stroke);

        let black = Rgba(BrushColor::Black.rgba());
        assert_eq!(*img.get_pixel(16, 16), black);
        // Far from the path stays blank
        assert_eq!(*img.get_pixel(16, 2), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_single_point_stroke_is_a_dot() {
        let mut img = blank(16, 16);
        let stroke = Stroke::new(BrushColor::Red, BrushWidth::Fine, Point::new(8.0, 8.0));
        draw_stroke(&mut img, &stroke);
        assert_eq!(*img.get_pixel(8, 8), Rgba(BrushColor::Red.rgba()));
    }

    #[test]
    fn test_disc_clipped_at_bounds() {
        let mut img = blank(8, 8);
        let stroke = Stroke::new(BrushColor::Blue, BrushWidth::Heavy, Point::new(0.0, 0.0));
        // Must not panic at the corner
        draw_stroke(&mut img, &stroke);
        assert_eq!(*img.get_pixel(0, 0), Rgba(BrushColor::Blue.rgba()));
    }
}
