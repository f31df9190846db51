// Statistical color quantizer: histogram a raster image into a reduced
// color space, greedily split it into a palette of at most K colors, and
// remap every pixel to its nearest palette entry. The core of an in-browser
// paint-by-numbers pipeline; this crate is the non-browser half of it.

#![allow(clippy::too_many_arguments)]

pub mod color_box;
pub mod color_map;
pub mod config;
pub mod error;
pub mod ffi;
pub mod grayscale;
pub mod host;
pub mod index_map;
pub mod moments;
pub mod pixel_buffer;
pub mod quantizer;

pub use color_map::ColorMap;
pub use config::{ColorSpace, QuantizeConfig};
pub use error::{HostError, QuantizeError, Result};
pub use ffi::{process_grayscale, process_image, process_image_args, HostArg};
pub use host::{FileBridge, HostBridge, LoggingBridge};
pub use index_map::IndexMap;
pub use pixel_buffer::PixelBuffer;
pub use quantizer::Quantizer;

// UniFFI-facing wrappers. The scaffolding calls these two free functions;
// everything else above is reachable from a native Rust consumer directly.

pub fn process_image_simple(
    data: Vec<u8>,
    width: u32,
    height: u32,
    max_colors: u32,
) -> Option<Vec<u8>> {
    let bridge = LoggingBridge;
    process_image(&bridge, data, width, height, max_colors)
}

pub fn process_grayscale_simple(data: Vec<u8>, width: u32, height: u32) -> Option<Vec<u8>> {
    let bridge = LoggingBridge;
    process_grayscale(&bridge, data, width, height)
}

uniffi::include_scaffolding!("pbn_quantizer");
