// Error taxonomy for the quantizer core and the host boundary.

/// Errors the quantizer core itself can produce. Never raised from caller-supplied
/// pixel data alone once a `PixelBuffer` has been constructed successfully; the
/// constructor is the one place buffer-shape violations are caught.
#[derive(Debug, thiserror::Error)]
pub enum QuantizeError {
    #[error("buffer length {actual} does not match width*height*4 ({expected})")]
    BufferLengthMismatch { expected: usize, actual: usize },

    #[error("color count must be between 1 and 256, got {0}")]
    InvalidColorCount(u32),

    #[error("significant_bits must be between 1 and 8, got {0}")]
    InvalidSignificantBits(u8),
}

pub type Result<T> = std::result::Result<T, QuantizeError>;

/// Errors surfaced across the host boundary. `MissingArguments` carries the exact
/// message the embedding runtime expects when the caller passes the wrong arity.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("processImage requires 3 arguments: data, width, height")]
    MissingArguments,

    #[error(transparent)]
    Quantize(#[from] QuantizeError),
}
