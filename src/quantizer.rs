// Greedy variance-maximizing box splitting and nearest-color remapping.
//
// Ports the statistical quantizer's `cut`/`maximize`/`calculateVariance` loop.
// Boxes live in a flat `Vec` and are referenced by index rather than by
// reference — an arena, since the splitter only ever needs to grow one box
// into two and nothing is ever freed mid-run.

use log::{debug, warn};

use crate::color_box::{Axis, ColorBox};
use crate::color_map::ColorMap;
use crate::config::{ColorSpace, QuantizeConfig};
use crate::index_map::IndexMap;
use crate::moments::{MomentTables, Table};
use crate::pixel_buffer::PixelBuffer;

pub struct Quantizer {
    config: QuantizeConfig,
    pixels: PixelBuffer,
    tables: MomentTables,
    boxes: Vec<ColorBox>,
    active: usize,
}

impl Quantizer {
    /// Clones `pixels` so the caller's buffer is left untouched, and samples
    /// the full histogram immediately.
    pub fn new(pixels: &PixelBuffer, config: QuantizeConfig) -> Self {
        let color_space = config.color_space();
        let mut tables = MomentTables::new(color_space);
        tables.sample(pixels, color_space);
        tables.integrate();

        // K+1 boxes, matching the reference constructor's `make([]*ColorCube,
        // colors+1)` — the splitting loop below never indexes past `k-1`,
        // but the allocation itself mirrors the source's sizing exactly.
        let max_colors = config.max_colors() as usize;
        let mut boxes = vec![ColorBox::empty(); max_colors + 1];
        boxes[0] = ColorBox::full(color_space.max_side_index());

        Self {
            config,
            pixels: pixels.clone(),
            tables,
            boxes,
            active: 1,
        }
    }

    /// Greedily splits boxes by variance until `max_colors` boxes exist or no
    /// further split is possible, then returns the synthesized palette.
    pub fn build_palette(&mut self) -> Vec<(u8, u8, u8, u8)> {
        let k = self.config.max_colors() as usize;
        let mut scores = vec![0.0f64; self.boxes.len()];
        scores[0] = self.variance(0);

        let mut effective = 1;
        'splitting: for i in 1..k {
            let next = Self::argmax(&scores[..effective]);
            if scores[next] <= 0.0 {
                break 'splitting;
            }
            let (low, high) = (next, i);
            if self.cut(low, high) {
                scores[low] = self.variance(low);
                scores[high] = self.variance(high);
                effective = i + 1;
                debug!("split box {low} -> {low},{high}; effective boxes = {effective}");
            } else {
                scores[next] = 0.0;
            }
        }
        self.active = effective;
        self.synthesize_palette()
    }

    fn variance(&self, idx: usize) -> f64 {
        let b = &self.boxes[idx];
        if b.volume <= 1 {
            return 0.0;
        }
        // Unguarded division to match the source's behavior: an empty-region
        // box of nonzero volume yields NaN here, which then loses every
        // subsequent `>` comparison in `argmax`, silently dropping the box.
        let w = self.tables.volume(b, Table::Weight);
        let dr = self.tables.volume(b, Table::R);
        let dg = self.tables.volume(b, Table::G);
        let db = self.tables.volume(b, Table::B);
        let dsq = self.tables.volume(b, Table::Sq);
        dsq - (dr * dr + dg * dg + db * db) / w
    }

    fn argmax(scores: &[f64]) -> usize {
        let mut best = 0;
        for (i, &s) in scores.iter().enumerate().skip(1) {
            if s > scores[best] {
                best = i;
            }
        }
        best
    }

    /// Attempts to split box `low` into itself (retaining the low half) and
    /// `high` (the high half). Returns `false` if no axis admits a cut.
    fn cut(&mut self, low: usize, high: usize) -> bool {
        let a = self.boxes[low];
        let whole_r = self.tables.volume(&a, Table::R);
        let whole_g = self.tables.volume(&a, Table::G);
        let whole_b = self.tables.volume(&a, Table::B);
        let whole_w = self.tables.volume(&a, Table::Weight);

        let mut best_score = -1.0f64;
        let mut best_axis = Axis::Red;
        let mut best_pos: Option<usize> = None;

        for &axis in Axis::ALL.iter() {
            let (score, pos) = self.maximize(&a, axis, whole_r, whole_g, whole_b, whole_w);
            if let Some(p) = pos {
                if axis == Axis::Blue {
                    // Source quirk: the BLUE axis's score can only displace
                    // the running best axis, it never becomes the new
                    // reference value for subsequent comparisons. Reproduced
                    // verbatim; see the open-question note in DESIGN.md.
                    if score > best_score {
                        best_axis = axis;
                        best_pos = Some(p);
                    }
                } else if score > best_score {
                    best_score = score;
                    best_axis = axis;
                    best_pos = Some(p);
                }
            }
        }

        let Some(cut_pos) = best_pos else {
            return false;
        };

        let mut b = a;
        b.set_min(best_axis, cut_pos);
        self.boxes[low].set_max(best_axis, cut_pos);
        self.boxes[low].update_volume();
        b.update_volume();
        self.boxes[high] = b;
        true
    }

    /// Scans every interior split position on `axis` and returns the best
    /// combined variance score together with its position.
    fn maximize(
        &self,
        b: &ColorBox,
        axis: Axis,
        whole_r: f64,
        whole_g: f64,
        whole_b: f64,
        whole_w: f64,
    ) -> (f64, Option<usize>) {
        let lo = b.min(axis) + 1;
        let hi = b.max(axis);
        let bottom_r = self.tables.bottom(b, axis, Table::R);
        let bottom_g = self.tables.bottom(b, axis, Table::G);
        let bottom_b = self.tables.bottom(b, axis, Table::B);
        let bottom_w = self.tables.bottom(b, axis, Table::Weight);

        let mut best_score = -1.0f64;
        let mut best_pos = None;

        if lo >= hi {
            return (best_score, best_pos);
        }

        for p in lo..hi {
            let half_r = bottom_r + self.tables.top(b, axis, p, Table::R);
            let half_g = bottom_g + self.tables.top(b, axis, p, Table::G);
            let half_b = bottom_b + self.tables.top(b, axis, p, Table::B);
            let half_w = bottom_w + self.tables.top(b, axis, p, Table::Weight);

            if half_w == 0.0 {
                continue;
            }
            let half_dist = (half_r * half_r + half_g * half_g + half_b * half_b) / half_w;

            let rem_w = whole_w - half_w;
            if rem_w == 0.0 {
                continue;
            }
            let rem_r = whole_r - half_r;
            let rem_g = whole_g - half_g;
            let rem_b = whole_b - half_b;
            let rem_dist = (rem_r * rem_r + rem_g * rem_g + rem_b * rem_b) / rem_w;

            let score = half_dist + rem_dist;
            if score > best_score {
                best_score = score;
                best_pos = Some(p);
            }
        }

        (best_score, best_pos)
    }

    fn synthesize_palette(&self) -> Vec<(u8, u8, u8, u8)> {
        let mut palette = Vec::with_capacity(self.active);
        for idx in 0..self.active {
            let b = &self.boxes[idx];
            let w = self.tables.volume(b, Table::Weight);
            if w <= 0.0 {
                continue;
            }
            let r = (self.tables.volume(b, Table::R) / w).round().clamp(0.0, 255.0) as u8;
            let g = (self.tables.volume(b, Table::G) / w).round().clamp(0.0, 255.0) as u8;
            let bl = (self.tables.volume(b, Table::B) / w).round().clamp(0.0, 255.0) as u8;
            palette.push((r, g, bl, 255));
        }
        palette
    }

    /// Maps every input pixel to the nearest palette entry by 4-component
    /// squared distance (alpha included, even though clustering ignored it).
    pub fn remap(&self, palette: &[(u8, u8, u8, u8)]) -> ColorMap {
        let width = self.pixels.width();
        let height = self.pixels.height();
        let mut indices = IndexMap::new(width, height);

        if palette.is_empty() {
            if self.pixels.pixel_count() > 0 {
                warn!("quantizer produced an empty palette for a non-empty image");
            }
            return ColorMap::new(width, height, Vec::new(), indices);
        }

        for (i, (r, g, b, a)) in self.pixels.pixels().enumerate() {
            let mut best = 0usize;
            let mut best_dist = i64::MAX;
            for (pi, &(pr, pg, pb, pa)) in palette.iter().enumerate() {
                let dr = r as i64 - pr as i64;
                let dg = g as i64 - pg as i64;
                let db = b as i64 - pb as i64;
                let da = a as i64 - pa as i64;
                let dist = dr * dr + dg * dg + db * db + da * da;
                if dist < best_dist {
                    best_dist = dist;
                    best = pi;
                }
            }
            indices.set_by_index(i, best as u8);
        }

        ColorMap::new(width, height, palette.to_vec(), indices)
    }

    pub fn color_space(&self) -> ColorSpace {
        self.config.color_space()
    }
}
