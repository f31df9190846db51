// Palette + per-pixel indices, expandable back into a full RGBA image.

use log::warn;

use crate::index_map::IndexMap;
use crate::pixel_buffer::PixelBuffer;

pub struct ColorMap {
    width: u32,
    height: u32,
    palette: Vec<(u8, u8, u8, u8)>,
    indices: IndexMap,
}

impl ColorMap {
    pub fn new(width: u32, height: u32, palette: Vec<(u8, u8, u8, u8)>, indices: IndexMap) -> Self {
        Self {
            width,
            height,
            palette,
            indices,
        }
    }

    pub fn palette(&self) -> &[(u8, u8, u8, u8)] {
        &self.palette
    }

    pub fn indices(&self) -> &IndexMap {
        &self.indices
    }

    /// Expands the index map back into a full RGBA pixel buffer. An index
    /// beyond the palette is an invariant violation the core never produces
    /// itself; it is logged and rendered as opaque black rather than
    /// panicking.
    pub fn render(&self) -> PixelBuffer {
        let mut out = Vec::with_capacity(4 * self.width as usize * self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = self.indices.get(x, y) as usize;
                match self.palette.get(idx) {
                    Some(&(r, g, b, a)) => {
                        out.push(r);
                        out.push(g);
                        out.push(b);
                        out.push(a);
                    }
                    None => {
                        warn!("color map index {idx} out of range for palette of size {}", self.palette.len());
                        out.extend_from_slice(&[0, 0, 0, 255]);
                    }
                }
            }
        }
        PixelBuffer::from_raw(self.width, self.height, out)
            .expect("render always produces width*height*4 bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_out_of_range_index_is_opaque_black() {
        let mut indices = IndexMap::new(1, 1);
        indices.set(0, 0, 5);
        let map = ColorMap::new(1, 1, vec![(1, 2, 3, 255)], indices);
        let rendered = map.render();
        assert_eq!(rendered.as_bytes(), &[0, 0, 0, 255]);
    }

    #[test]
    fn render_expands_palette_entries() {
        let mut indices = IndexMap::new(2, 1);
        indices.set(0, 0, 0);
        indices.set(1, 0, 1);
        let map = ColorMap::new(2, 1, vec![(10, 20, 30, 255), (40, 50, 60, 255)], indices);
        let rendered = map.render();
        assert_eq!(rendered.as_bytes(), &[10, 20, 30, 255, 40, 50, 60, 255]);
    }
}
