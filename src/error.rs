use thiserror::Error;

/// Errors returned by the compression entry points.
///
/// All of them describe invalid arguments and are raised before any block is encoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CompressError {
    /// The pixel slice does not hold exactly `width * height` texels.
    #[error("expected {expected} pixels for a {width}x{height} image, got {actual}")]
    PixelCountMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// The raw RGBA8 byte slice ends before the last row of the image.
    #[error("RGBA data too small: {required} bytes required, got {actual}")]
    RgbaDataTooSmall { required: usize, actual: usize },

    /// The row stride is smaller than a tightly packed row.
    #[error("stride of {stride} bytes is smaller than a packed row of {required} bytes")]
    StrideTooSmall { stride: usize, required: usize },

    /// The destination buffer cannot hold all compressed blocks.
    #[error("blocks buffer size ({actual}) is too small to hold compressed blocks, required size: {required}")]
    BlocksBufferTooSmall { required: usize, actual: usize },

    /// The image dimensions overflow the address space.
    #[error("image dimensions {width}x{height} are too large")]
    DimensionOverflow { width: u32, height: u32 },
}
