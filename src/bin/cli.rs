// Native, file-backed host for the quantizer core. Exists so the host
// boundary has a realistic caller outside of a browser/WASM embedding, and
// so the crate is demonstrably runnable end to end.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use image::{ImageBuffer, Rgba};
use log::info;

use pbn_quantizer::{ColorSpace, FileBridge, HostBridge, QuantizeConfig, Quantizer};

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    Quantize,
    Grayscale,
}

#[derive(Parser)]
#[command(about = "Paint-by-numbers color quantizer CLI")]
struct Args {
    /// Input PNG path
    input: String,

    /// Output PNG path
    output: String,

    #[arg(value_enum, default_value_t = Mode::Quantize)]
    mode: Mode,

    /// Maximum palette size (quantize mode only)
    #[arg(short, long, default_value_t = 16)]
    colors: u32,

    /// Significant bits per channel in the reduced color space
    #[arg(long, default_value_t = 5)]
    significant_bits: u8,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let img = image::open(&args.input)
        .with_context(|| format!("failed to decode {}", args.input))?
        .into_rgba8();
    let (width, height) = img.dimensions();
    let raw = img.into_raw();

    // The bridge demonstrates the file-backed HostBridge capability
    // independently of the PNG encode below: it persists the raw RGBA
    // payload to a sidecar path, the way a production embedder's bridge
    // would hand the resolved buffer back across the host boundary.
    let bridge = FileBridge::new(format!("{}.bridge", args.output));

    let rendered = match args.mode {
        Mode::Quantize => {
            let pixels = pbn_quantizer::PixelBuffer::from_raw(width, height, raw)?;
            let color_space = ColorSpace::new(args.significant_bits)?;
            let config = QuantizeConfig::new(args.colors, color_space)?;
            let mut quantizer = Quantizer::new(&pixels, config);
            let palette = quantizer.build_palette();
            info!("built palette of {} colors", palette.len());
            let map = quantizer.remap(&palette);
            map.render().into_bytes()
        }
        Mode::Grayscale => {
            let pixels = pbn_quantizer::PixelBuffer::from_raw(width, height, raw)?;
            pbn_quantizer::grayscale::to_grayscale(&pixels).into_bytes()
        }
    };

    bridge.resolve(&rendered);

    let out_image: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, rendered).context("rendered buffer has wrong shape")?;
    out_image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output))?;

    Ok(())
}
