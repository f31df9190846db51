// Five parallel dense 3-D moment tables over the reduced color space:
// pixel weight, per-channel sum, and sum of squared magnitude. Sampling
// writes a raw histogram; `integrate` turns each table into a 3-D prefix sum
// so any axis-aligned box can be aggregated with eight lookups.

use crate::color_box::{Axis, ColorBox};
use crate::config::ColorSpace;
use crate::pixel_buffer::PixelBuffer;

pub struct MomentTables {
    side_size: usize,
    weight: Vec<f64>,
    mr: Vec<f64>,
    mg: Vec<f64>,
    mb: Vec<f64>,
    m2: Vec<f64>,
}

impl MomentTables {
    pub fn new(color_space: ColorSpace) -> Self {
        let side_size = color_space.side_size();
        let len = side_size * side_size * side_size;
        Self {
            side_size,
            weight: vec![0.0; len],
            mr: vec![0.0; len],
            mg: vec![0.0; len],
            mb: vec![0.0; len],
            m2: vec![0.0; len],
        }
    }

    fn idx(&self, r: usize, g: usize, b: usize) -> usize {
        (r * self.side_size + g) * self.side_size + b
    }

    /// Bins every pixel of `pixels` into the reduced color space. Alpha is
    /// ignored for clustering purposes (see the quantizer's remap step for
    /// where alpha re-enters).
    pub fn sample(&mut self, pixels: &PixelBuffer, color_space: ColorSpace) {
        for (r, g, b, _a) in pixels.pixels() {
            let ir = color_space.reduce(r);
            let ig = color_space.reduce(g);
            let ib = color_space.reduce(b);
            let i = self.idx(ir, ig, ib);
            let (rf, gf, bf) = (r as f64, g as f64, b as f64);
            self.weight[i] += 1.0;
            self.mr[i] += rf;
            self.mg[i] += gf;
            self.mb[i] += bf;
            self.m2[i] += rf * rf + gf * gf + bf * bf;
        }
    }

    /// Converts every table from a raw per-cell histogram into a 3-D prefix
    /// sum via repeated inclusion-exclusion. Must be called exactly once,
    /// after all sampling and before any box query.
    pub fn integrate(&mut self) {
        let n = self.side_size;
        for table in [
            &mut self.weight,
            &mut self.mr,
            &mut self.mg,
            &mut self.mb,
            &mut self.m2,
        ] {
            for r in 1..n {
                for g in 1..n {
                    for b in 1..n {
                        let i = |r: usize, g: usize, b: usize| (r * n + g) * n + b;
                        table[i(r, g, b)] += table[i(r - 1, g, b)] + table[i(r, g - 1, b)]
                            + table[i(r, g, b - 1)]
                            - table[i(r - 1, g - 1, b)]
                            - table[i(r - 1, g, b - 1)]
                            - table[i(r, g - 1, b - 1)]
                            + table[i(r - 1, g - 1, b - 1)];
                    }
                }
            }
        }
    }

    fn table(&self, which: Table) -> &[f64] {
        match which {
            Table::Weight => &self.weight,
            Table::R => &self.mr,
            Table::G => &self.mg,
            Table::B => &self.mb,
            Table::Sq => &self.m2,
        }
    }

    /// Signed eight-corner sum over the half-open box `(min..max]` on every
    /// axis. Valid on the post-`integrate` prefix-summed tables.
    pub fn volume(&self, b: &ColorBox, which: Table) -> f64 {
        let t = self.table(which);
        let at = |r: usize, g: usize, bl: usize| t[self.idx(r, g, bl)];
        at(b.r_max, b.g_max, b.b_max) - at(b.r_max, b.g_max, b.b_min)
            - at(b.r_max, b.g_min, b.b_max)
            + at(b.r_max, b.g_min, b.b_min)
            - at(b.r_min, b.g_max, b.b_max)
            + at(b.r_min, b.g_max, b.b_min)
            + at(b.r_min, b.g_min, b.b_max)
            - at(b.r_min, b.g_min, b.b_min)
    }

    /// Contribution of the slab at position `p` on `axis`, with the other two
    /// axes ranging over `b`.
    pub fn top(&self, b: &ColorBox, axis: Axis, p: usize, which: Table) -> f64 {
        let t = self.table(which);
        let at = |r: usize, g: usize, bl: usize| t[self.idx(r, g, bl)];
        match axis {
            Axis::Red => {
                at(p, b.g_max, b.b_max) - at(p, b.g_max, b.b_min) - at(p, b.g_min, b.b_max)
                    + at(p, b.g_min, b.b_min)
            }
            Axis::Green => {
                at(b.r_max, p, b.b_max) - at(b.r_max, p, b.b_min) - at(b.r_min, p, b.b_max)
                    + at(b.r_min, p, b.b_min)
            }
            Axis::Blue => {
                at(b.r_max, b.g_max, p) - at(b.r_max, b.g_min, p) - at(b.r_min, b.g_max, p)
                    + at(b.r_min, b.g_min, p)
            }
        }
    }

    /// Contribution of the `min` slab on `axis`, the complement of `top`.
    pub fn bottom(&self, b: &ColorBox, axis: Axis, which: Table) -> f64 {
        let t = self.table(which);
        let at = |r: usize, g: usize, bl: usize| t[self.idx(r, g, bl)];
        match axis {
            Axis::Red => {
                -at(b.r_min, b.g_max, b.b_max) + at(b.r_min, b.g_max, b.b_min)
                    + at(b.r_min, b.g_min, b.b_max)
                    - at(b.r_min, b.g_min, b.b_min)
            }
            Axis::Green => {
                -at(b.r_max, b.g_min, b.b_max) + at(b.r_max, b.g_min, b.b_min)
                    + at(b.r_min, b.g_min, b.b_max)
                    - at(b.r_min, b.g_min, b.b_min)
            }
            Axis::Blue => {
                -at(b.r_max, b.g_max, b.b_min) + at(b.r_max, b.g_min, b.b_min)
                    + at(b.r_min, b.g_max, b.b_min)
                    - at(b.r_min, b.g_min, b.b_min)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Weight,
    R,
    G,
    B,
    Sq,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integration_total_matches_pixel_count() {
        let cs = ColorSpace::default();
        let pixels = PixelBuffer::from_raw(
            2,
            1,
            vec![255, 0, 0, 255, 0, 255, 0, 255],
        )
        .unwrap();
        let mut tables = MomentTables::new(cs);
        tables.sample(&pixels, cs);
        tables.integrate();
        let whole = ColorBox::full(cs.max_side_index());
        assert_eq!(tables.volume(&whole, Table::Weight), 2.0);
    }

    #[test]
    fn mean_red_matches_input() {
        let cs = ColorSpace::default();
        let pixels = PixelBuffer::from_raw(
            2,
            1,
            vec![255, 0, 0, 255, 0, 0, 0, 255],
        )
        .unwrap();
        let mut tables = MomentTables::new(cs);
        tables.sample(&pixels, cs);
        tables.integrate();
        let whole = ColorBox::full(cs.max_side_index());
        let w = tables.volume(&whole, Table::Weight);
        let r_sum = tables.volume(&whole, Table::R);
        assert!((r_sum / w - 127.5).abs() < 1.0);
    }
}
