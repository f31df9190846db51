// Configuration surface for the quantizer: how much of the 8-bit channel range
// is kept when building the reduced color space, and how many palette entries
// to aim for.

use crate::error::{QuantizeError, Result};

/// Governs the resolution of the reduced color space the histogram is built in.
/// The reference quantizer hard-codes 5 significant bits per channel; this is
/// kept as the default but made a runtime value per the external configuration
/// surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSpace {
    significant_bits: u8,
}

impl ColorSpace {
    pub fn new(significant_bits: u8) -> Result<Self> {
        if significant_bits == 0 || significant_bits > 8 {
            return Err(QuantizeError::InvalidSignificantBits(significant_bits));
        }
        Ok(Self { significant_bits })
    }

    pub fn significant_bits(&self) -> u8 {
        self.significant_bits
    }

    /// Number of quantized levels per channel, plus the index-0 sentinel row
    /// the integral-moment recurrence needs as its zero base.
    pub fn side_size(&self) -> usize {
        (1usize << self.significant_bits) + 1
    }

    pub fn max_side_index(&self) -> usize {
        1usize << self.significant_bits
    }

    /// Right-shift applied to an 8-bit channel value before it is placed in
    /// the reduced grid.
    pub fn shift(&self) -> u32 {
        8 - self.significant_bits as u32
    }

    /// Maps a raw 8-bit channel value to its reduced-space cell, already
    /// offset by the sentinel row (`+1`).
    pub fn reduce(&self, channel: u8) -> usize {
        (channel as usize >> self.shift()) + 1
    }
}

impl Default for ColorSpace {
    fn default() -> Self {
        Self { significant_bits: 5 }
    }
}

/// Caps and validates the requested palette size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizeConfig {
    max_colors: u16,
    color_space: ColorSpace,
}

const MAX_COLORS: u32 = 256;

impl QuantizeConfig {
    /// `max_colors` above 256 is silently clamped, matching the reference
    /// quantizer's constructor (`if colors > MAX_COLOR { colors = MAX_COLOR }`)
    /// rather than rejected — a caller asking for K=1000 still gets a usable
    /// 256-color palette. Only `max_colors == 0` is a genuine error: there is
    /// no sensible clamp for "zero colors requested".
    pub fn new(max_colors: u32, color_space: ColorSpace) -> Result<Self> {
        if max_colors == 0 {
            return Err(QuantizeError::InvalidColorCount(max_colors));
        }
        Ok(Self {
            max_colors: max_colors.min(MAX_COLORS) as u16,
            color_space,
        })
    }

    pub fn max_colors(&self) -> u16 {
        self.max_colors
    }

    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }
}

impl Default for QuantizeConfig {
    fn default() -> Self {
        Self {
            max_colors: 256,
            color_space: ColorSpace::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_color_space_matches_reference_constants() {
        let cs = ColorSpace::default();
        assert_eq!(cs.side_size(), 33);
        assert_eq!(cs.max_side_index(), 32);
        assert_eq!(cs.shift(), 3);
    }

    #[test]
    fn reduce_offsets_by_one() {
        let cs = ColorSpace::default();
        assert_eq!(cs.reduce(0), 1);
        assert_eq!(cs.reduce(255), 32);
    }

    #[test]
    fn rejects_zero_significant_bits() {
        assert!(ColorSpace::new(0).is_err());
    }

    #[test]
    fn rejects_zero_color_count() {
        assert!(QuantizeConfig::new(0, ColorSpace::default()).is_err());
    }

    #[test]
    fn clamps_oversized_color_count_instead_of_erroring() {
        let config = QuantizeConfig::new(1000, ColorSpace::default()).unwrap();
        assert_eq!(config.max_colors(), 256);
    }
}
