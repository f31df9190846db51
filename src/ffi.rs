// Host-facing entry points. Two shapes, mirroring the reference's own split
// between a typed call (what a UniFFI consumer makes) and the arity-checked
// `args`-slice call the original JS bridge exposed.

use crate::config::{ColorSpace, QuantizeConfig};
use crate::error::{HostError, QuantizeError};
use crate::grayscale::to_grayscale;
use crate::host::HostBridge;
use crate::pixel_buffer::PixelBuffer;
use crate::quantizer::Quantizer;

/// Runs the full quantize-and-remap pipeline and returns the remapped RGBA
/// buffer, or `None` (with the error reported on `bridge`) on a shape error.
pub fn process_image(
    bridge: &dyn HostBridge,
    data: Vec<u8>,
    width: u32,
    height: u32,
    max_colors: u32,
) -> Option<Vec<u8>> {
    match process_image_inner(data, width, height, max_colors) {
        Ok(buffer) => {
            bridge.resolve(&buffer);
            Some(buffer)
        }
        Err(e) => {
            bridge.report_error(&e.to_string());
            bridge.reject(&e.to_string());
            None
        }
    }
}

fn process_image_inner(
    data: Vec<u8>,
    width: u32,
    height: u32,
    max_colors: u32,
) -> Result<Vec<u8>, QuantizeError> {
    let pixels = PixelBuffer::from_raw(width, height, data)?;
    let config = QuantizeConfig::new(max_colors, ColorSpace::default())?;
    let mut quantizer = Quantizer::new(&pixels, config);
    let palette = quantizer.build_palette();
    let map = quantizer.remap(&palette);
    Ok(map.render().into_bytes())
}

/// Converts an image to grayscale, preserving alpha.
pub fn process_grayscale(
    bridge: &dyn HostBridge,
    data: Vec<u8>,
    width: u32,
    height: u32,
) -> Option<Vec<u8>> {
    match PixelBuffer::from_raw(width, height, data) {
        Ok(pixels) => {
            let gray = to_grayscale(&pixels);
            let bytes = gray.into_bytes();
            bridge.resolve(&bytes);
            Some(bytes)
        }
        Err(e) => {
            bridge.report_error(&e.to_string());
            bridge.reject(&e.to_string());
            None
        }
    }
}

/// A single dynamically-typed host argument, standing in for the original
/// `args []js.Value` contract.
pub enum HostArg {
    Bytes(Vec<u8>),
    UInt(u32),
}

/// Reproduces the exact arity-checked entry point: fewer than 3 arguments
/// fails with the documented message before anything else is inspected.
pub fn process_image_args(bridge: &dyn HostBridge, args: Vec<HostArg>) -> Option<Vec<u8>> {
    if args.len() < 3 {
        let err = HostError::MissingArguments;
        bridge.report_error(&err.to_string());
        bridge.reject(&err.to_string());
        return None;
    }

    let mut iter = args.into_iter();
    let data = match iter.next() {
        Some(HostArg::Bytes(b)) => b,
        _ => {
            let err = HostError::MissingArguments;
            bridge.report_error(&err.to_string());
            bridge.reject(&err.to_string());
            return None;
        }
    };
    let width = match iter.next() {
        Some(HostArg::UInt(w)) => w,
        _ => {
            let err = HostError::MissingArguments;
            bridge.report_error(&err.to_string());
            bridge.reject(&err.to_string());
            return None;
        }
    };
    let height = match iter.next() {
        Some(HostArg::UInt(h)) => h,
        _ => {
            let err = HostError::MissingArguments;
            bridge.report_error(&err.to_string());
            bridge.reject(&err.to_string());
            return None;
        }
    };

    process_grayscale(bridge, data, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::LoggingBridge;

    #[test]
    fn missing_arguments_reports_exact_message() {
        let bridge = LoggingBridge;
        let result = process_image_args(&bridge, vec![HostArg::Bytes(vec![1, 2, 3, 4])]);
        assert!(result.is_none());
    }

    #[test]
    fn single_red_pixel_through_process_image() {
        let bridge = LoggingBridge;
        let out = process_image(&bridge, vec![255, 0, 0, 255], 1, 1, 4).unwrap();
        assert_eq!(out, vec![255, 0, 0, 255]);
    }

    #[test]
    fn buffer_length_mismatch_returns_none() {
        let bridge = LoggingBridge;
        let out = process_image(&bridge, vec![0, 0, 0], 1, 1, 4);
        assert!(out.is_none());
    }
}
