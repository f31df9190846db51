// Standalone luminance-gray conversion. Shares no state with the quantizer
// and is exposed as its own host-callable operation, the way the reference
// implementation keeps it as a separate code path.

use crate::pixel_buffer::PixelBuffer;

pub fn to_grayscale(pixels: &PixelBuffer) -> PixelBuffer {
    let mut out = Vec::with_capacity(4 * pixels.pixel_count());
    for (r, g, b, a) in pixels.pixels() {
        let lum = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
        let v = lum.round().clamp(0.0, 255.0) as u8;
        out.push(v);
        out.push(v);
        out.push(v);
        out.push(a);
    }
    PixelBuffer::from_raw(pixels.width(), pixels.height(), out)
        .expect("grayscale conversion preserves pixel count")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_documented_scenario() {
        let buf = PixelBuffer::from_raw(1, 1, vec![100, 200, 50, 255]).unwrap();
        let gray = to_grayscale(&buf);
        // 0.299*100 + 0.587*200 + 0.114*50 = 153
        assert_eq!(gray.as_bytes(), &[153, 153, 153, 255]);
    }

    #[test]
    fn preserves_alpha() {
        let buf = PixelBuffer::from_raw(1, 1, vec![0, 0, 0, 42]).unwrap();
        let gray = to_grayscale(&buf);
        assert_eq!(gray.as_bytes()[3], 42);
    }
}
