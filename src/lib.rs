//! # dxt_encode
//!
//! Bit-exact DXT1/DXT5 texture block encoder running on the CPU.
//!
//! The encoder turns an RGBA8 image into a raw stream of 4x4 compressed blocks. It fits the two
//! color endpoints of each block along the principal axis of its colors, optionally dithers,
//! and refines the endpoints with a least squares solve. Output is deterministic and identical
//! on every platform.
//!
//! ## Supported block compressions
//!
//!  * BC1 (DXT1, RGB)
//!  * BC3 (DXT5, RGB with smooth alpha)
//!
//! The output carries no container header. Wrapping the blocks into a DDS file or similar is up
//! to the caller, see the `compressor` tool in this workspace.
//!
//! ## Example
//!
//! ```
//! use dxt_encode::{compress, CompressionVariant, Rgba8, Settings};
//!
//! let pixels = vec![Rgba8::new(200, 100, 50, 255); 6 * 5];
//! let blocks = compress(6, 5, &pixels, CompressionVariant::BC1, Settings::fast()).unwrap();
//!
//! assert_eq!(blocks.len(), CompressionVariant::BC1.blocks_byte_size(6, 5));
//! ```
mod encode;
mod error;
mod settings;
mod tables;

pub use encode::{compress, compress_rgba8, compress_with_tables, Block, BlockEncoder, Rgba8};
pub use error::CompressError;
pub use settings::Settings;
pub use tables::CodecTables;

/// Compression variants supported by this crate.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub enum CompressionVariant {
    /// BC1 compression (RGB)
    BC1,
    /// BC3 compression with smooth alpha (RGBA)
    BC3,
}

impl CompressionVariant {
    /// Returns [`CompressionVariant::BC3`] if an alpha block is requested, otherwise
    /// [`CompressionVariant::BC1`].
    pub const fn from_alpha(has_alpha: bool) -> Self {
        if has_alpha {
            CompressionVariant::BC3
        } else {
            CompressionVariant::BC1
        }
    }

    /// Returns `true` if every block starts with an alpha block.
    pub const fn has_alpha(self) -> bool {
        matches!(self, CompressionVariant::BC3)
    }

    /// Returns the bytes per row for the given width.
    ///
    /// The width is used to calculate how many blocks are needed per row,
    /// which is then multiplied by the block size.
    /// Width is rounded up to the nearest multiple of 4.
    pub const fn bytes_per_row(self, width: u32) -> u32 {
        width.div_ceil(4) * self.block_byte_size()
    }

    /// Returns the byte size required for storing compressed blocks for the given dimensions.
    ///
    /// The size is calculated based on the block compression format and rounded up dimensions.
    /// Width and height are rounded up to the nearest multiple of 4.
    pub const fn blocks_byte_size(self, width: u32, height: u32) -> usize {
        let block_width = (width as usize).div_ceil(4);
        let block_height = (height as usize).div_ceil(4);
        let block_count = block_width * block_height;
        let block_size = self.block_byte_size() as usize;
        block_count * block_size
    }

    /// Returns the size of a single compressed 4x4 block in bytes.
    pub const fn block_byte_size(self) -> u32 {
        match self {
            CompressionVariant::BC1 => 8,
            CompressionVariant::BC3 => 16,
        }
    }

    /// Short lower case name of the variant.
    pub const fn name(self) -> &'static str {
        match self {
            CompressionVariant::BC1 => "bc1",
            CompressionVariant::BC3 => "bc3",
        }
    }
}
