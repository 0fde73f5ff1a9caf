//! CPU based encoding.

mod alpha;
mod analyze;
mod block;
mod color;
mod dither;
mod endpoints;
mod matcher;
mod refine;

pub use block::{Block, Rgba8};

use crate::{
    encode::{alpha::compress_alpha_block, block::SourceImage, color::compress_color_block},
    CodecTables, CompressError, CompressionVariant, Settings,
};

/// Encodes single 4x4 blocks with a fixed table context and settings.
#[derive(Copy, Clone, Debug)]
pub struct BlockEncoder<'a> {
    tables: &'a CodecTables,
    settings: Settings,
}

impl<'a> BlockEncoder<'a> {
    pub const fn new(tables: &'a CodecTables, settings: Settings) -> Self {
        Self { tables, settings }
    }

    pub const fn settings(&self) -> Settings {
        self.settings
    }

    /// Encodes the RGB channels of a block into an 8 byte BC1 color block.
    ///
    /// Alpha is not encoded, but it takes part in the flat block check.
    pub fn encode_bc1(&self, block: &Block) -> [u8; 8] {
        compress_color_block(self.tables, block, self.settings).data
    }

    /// Encodes the alpha channel of a block into an 8 byte BC3 alpha block.
    pub fn encode_alpha(&self, block: &Block) -> [u8; 8] {
        compress_alpha_block(block)
    }

    /// Encodes a block into a 16 byte BC3 block: the alpha block followed by the color block of
    /// the opaque texels.
    pub fn encode_bc3(&self, block: &Block) -> [u8; 16] {
        let mut data = [0; 16];
        data[..8].copy_from_slice(&self.encode_alpha(block));

        let opaque = block.map(Rgba8::opaque);
        data[8..].copy_from_slice(&self.encode_bc1(&opaque));

        data
    }

    fn encode_into(&self, variant: CompressionVariant, block: &Block, dest: &mut [u8]) {
        match variant {
            CompressionVariant::BC1 => dest.copy_from_slice(&self.encode_bc1(block)),
            CompressionVariant::BC3 => dest.copy_from_slice(&self.encode_bc3(block)),
        }
    }
}

/// Compresses an RGBA8 image into a raw stream of BC1 or BC3 blocks.
///
/// `pixels` holds `width * height` texels in row-major order. Tiles are emitted row by row,
/// left to right, starting with the first row of `pixels`. Tiles crossing the right or bottom
/// edge repeat the last column or row of the image.
///
/// The returned buffer holds exactly [`CompressionVariant::blocks_byte_size()`] bytes.
///
/// # Example
/// ```
/// use dxt_encode::{compress, CompressionVariant, Rgba8, Settings};
///
/// let pixels = vec![Rgba8::new(255, 0, 0, 128); 4 * 4];
/// let blocks = compress(4, 4, &pixels, CompressionVariant::BC3, Settings::fast()).unwrap();
///
/// assert_eq!(blocks.len(), 16);
/// assert_eq!(&blocks[..2], &[128, 128]);
/// ```
pub fn compress(
    width: u32,
    height: u32,
    pixels: &[Rgba8],
    variant: CompressionVariant,
    settings: Settings,
) -> Result<Vec<u8>, CompressError> {
    compress_with_tables(CodecTables::get(), width, height, pixels, variant, settings)
}

/// Same as [`compress()`], using the given lookup tables instead of the shared ones.
pub fn compress_with_tables(
    tables: &CodecTables,
    width: u32,
    height: u32,
    pixels: &[Rgba8],
    variant: CompressionVariant,
    settings: Settings,
) -> Result<Vec<u8>, CompressError> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .ok_or(CompressError::DimensionOverflow { width, height })?;

    if pixels.len() != expected {
        return Err(CompressError::PixelCountMismatch {
            width,
            height,
            expected,
            actual: pixels.len(),
        });
    }

    let stride = width
        .checked_mul(4)
        .ok_or(CompressError::DimensionOverflow { width, height })?;

    let mut blocks_buffer = vec![0; variant.blocks_byte_size(width, height)];

    compress_rgba8_with_tables(
        tables,
        variant,
        bytemuck::cast_slice(pixels),
        &mut blocks_buffer,
        width,
        height,
        stride,
        settings,
    )?;

    Ok(blocks_buffer)
}

/// Compresses raw RGBA8 data into BC1 or BC3 block compressed format.
///
/// # Data Layout Requirements
/// The input data must be in RGBA8 format (8 bits per channel, 32 bits per pixel). The data is
/// expected to be in row-major order, with optional stride for padding between rows.
///
/// # Buffer Requirements
/// The destination buffer must have sufficient capacity to store the compressed blocks.
/// The required size can be calculated using [`CompressionVariant::blocks_byte_size()`].
/// Bytes past the required size are left untouched.
///
/// # Arguments
/// * `variant` - The block compression format to use
/// * `rgba_data` - Source RGBA8 pixel data
/// * `blocks_buffer` - Destination buffer for the compressed blocks
/// * `width` - Width of the image in pixels
/// * `height` - Height of the image in pixels
/// * `stride` - Number of bytes per row in the source data (for padding).
///   Must be at least `width * 4`.
/// * `settings` - Dithering and refinement settings of the color encoder
///
/// Width and height don't need to be multiples of 4.
///
/// # Example
/// ```
/// use dxt_encode::{compress_rgba8, CompressionVariant, Settings};
///
/// let rgba_data = vec![0u8; 256 * 256 * 4]; // Your RGBA data
/// let width = 256;
/// let height = 256;
/// let stride = width * 4; // Tightly packed rows
/// let variant = CompressionVariant::BC1;
///
/// let mut blocks_buffer = vec![0u8; variant.blocks_byte_size(width, height)];
///
/// compress_rgba8(
///     variant,
///     &rgba_data,
///     &mut blocks_buffer,
///     width,
///     height,
///     stride,
///     Settings::default(),
/// )
/// .unwrap();
/// ```
pub fn compress_rgba8(
    variant: CompressionVariant,
    rgba_data: &[u8],
    blocks_buffer: &mut [u8],
    width: u32,
    height: u32,
    stride: u32,
    settings: Settings,
) -> Result<(), CompressError> {
    compress_rgba8_with_tables(
        CodecTables::get(),
        variant,
        rgba_data,
        blocks_buffer,
        width,
        height,
        stride,
        settings,
    )
}

#[allow(clippy::too_many_arguments)]
fn compress_rgba8_with_tables(
    tables: &CodecTables,
    variant: CompressionVariant,
    rgba_data: &[u8],
    blocks_buffer: &mut [u8],
    width: u32,
    height: u32,
    stride: u32,
    settings: Settings,
) -> Result<(), CompressError> {
    let overflow = CompressError::DimensionOverflow { width, height };

    let row_size = (width as usize).checked_mul(4).ok_or(overflow.clone())?;
    let stride = stride as usize;

    if stride < row_size {
        return Err(CompressError::StrideTooSmall {
            stride,
            required: row_size,
        });
    }

    let required_data = match height as usize {
        0 => 0,
        height => (height - 1)
            .checked_mul(stride)
            .and_then(|size| size.checked_add(row_size))
            .ok_or(overflow)?,
    };

    if rgba_data.len() < required_data {
        return Err(CompressError::RgbaDataTooSmall {
            required: required_data,
            actual: rgba_data.len(),
        });
    }

    let required_size = variant.blocks_byte_size(width, height);

    if blocks_buffer.len() < required_size {
        return Err(CompressError::BlocksBufferTooSmall {
            required: required_size,
            actual: blocks_buffer.len(),
        });
    }

    let block_width = (width as usize).div_ceil(4);
    let block_height = (height as usize).div_ceil(4);

    tracing::debug!(
        width,
        height,
        variant = variant.name(),
        mode = settings.mode(),
        blocks = block_width * block_height,
        "compressing image"
    );

    if required_size == 0 {
        return Ok(());
    }

    let image = SourceImage::new(rgba_data, width as usize, height as usize, stride);
    let encoder = BlockEncoder::new(tables, settings);
    let blocks_buffer = &mut blocks_buffer[..required_size];

    #[cfg(not(feature = "rayon"))]
    compress_blocks(&encoder, variant, &image, blocks_buffer, block_width, block_height);

    #[cfg(feature = "rayon")]
    compress_blocks_parallel(&encoder, variant, &image, blocks_buffer, block_width);

    Ok(())
}

#[cfg_attr(feature = "rayon", allow(dead_code))]
fn compress_blocks(
    encoder: &BlockEncoder,
    variant: CompressionVariant,
    image: &SourceImage,
    blocks_buffer: &mut [u8],
    block_width: usize,
    block_height: usize,
) {
    let block_size = variant.block_byte_size() as usize;

    for yy in 0..block_height {
        for xx in 0..block_width {
            let block = image.load_block_interleaved_rgba(xx, yy);
            let offset = (yy * block_width + xx) * block_size;

            encoder.encode_into(variant, &block, &mut blocks_buffer[offset..offset + block_size]);
        }
    }
}

#[cfg(feature = "rayon")]
fn compress_blocks_parallel(
    encoder: &BlockEncoder,
    variant: CompressionVariant,
    image: &SourceImage,
    blocks_buffer: &mut [u8],
    block_width: usize,
) {
    use rayon::prelude::*;
    use strength_reduce::StrengthReducedUsize;

    let block_size = variant.block_byte_size() as usize;
    let block_width = StrengthReducedUsize::new(block_width);

    blocks_buffer
        .par_chunks_mut(block_size)
        .enumerate()
        .for_each(|(index, dest)| {
            let (yy, xx) = StrengthReducedUsize::div_rem(index, block_width);
            let block = image.load_block_interleaved_rgba(xx, yy);

            encoder.encode_into(variant, &block, dest);
        });
}
