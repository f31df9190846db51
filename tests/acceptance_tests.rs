// Acceptance tests pinning the documented end-to-end scenarios and boundary
// cases for the quantizer and grayscale host-facing operations.

use pbn_quantizer::{process_grayscale, process_image, process_image_args, HostArg, LoggingBridge};

#[test]
fn scenario_single_red_pixel_k4() {
    let bridge = LoggingBridge;
    let out = process_image(&bridge, vec![255, 0, 0, 255], 1, 1, 4).unwrap();
    assert_eq!(out, vec![255, 0, 0, 255]);
}

#[test]
fn scenario_black_and_white_k2() {
    let bridge = LoggingBridge;
    let input = vec![0, 0, 0, 255, 255, 255, 255, 255];
    let out = process_image(&bridge, input.clone(), 2, 1, 2).unwrap();
    assert_eq!(out, input);
}

#[test]
fn scenario_four_tone_gradient_k2() {
    let bridge = LoggingBridge;
    let input = vec![
        0, 0, 0, 255, 85, 85, 85, 255, 170, 170, 170, 255, 255, 255, 255, 255,
    ];
    let out = process_image(&bridge, input, 4, 1, 2).unwrap();
    assert_eq!(out.len(), 16);
}

#[test]
fn scenario_grayscale_single_pixel() {
    let bridge = LoggingBridge;
    let out = process_grayscale(&bridge, vec![100, 200, 50, 255], 1, 1).unwrap();
    assert_eq!(out, vec![153, 153, 153, 255]);
}

#[test]
fn scenario_argument_shape_error_returns_none() {
    let bridge = LoggingBridge;
    let out = process_image_args(&bridge, vec![HostArg::Bytes(vec![1, 2, 3, 4])]);
    assert!(out.is_none());
}

#[test]
fn scenario_large_k_saturation() {
    let bridge = LoggingBridge;
    let mut input = Vec::new();
    for i in 0..256u32 {
        input.push((i % 256) as u8);
        input.push(((i * 7) % 256) as u8);
        input.push(((i * 13) % 256) as u8);
        input.push(255);
    }
    // K=1000 exceeds the 256-color cap; the call must still succeed, clamping
    // internally rather than rejecting the request.
    let out = process_image(&bridge, input, 16, 16, 1000).unwrap();
    assert_eq!(out.len(), 16 * 16 * 4);
}

#[test]
fn k_equal_one_yields_mean_color() {
    let bridge = LoggingBridge;
    let input = vec![0, 0, 0, 255, 255, 255, 255, 255];
    let out = process_image(&bridge, input, 2, 1, 1).unwrap();
    // both pixels collapse to the single palette entry
    assert_eq!(&out[0..4], &out[4..8]);
}

#[test]
fn zero_size_image_yields_empty_output() {
    let bridge = LoggingBridge;
    let out = process_image(&bridge, Vec::new(), 0, 0, 4).unwrap();
    assert!(out.is_empty());
}

#[test]
fn buffer_length_mismatch_is_reported_and_returns_none() {
    let bridge = LoggingBridge;
    let out = process_image(&bridge, vec![0, 0, 0], 1, 1, 4);
    assert!(out.is_none());
}
