/// Encoding settings for the color block encoder.
///
/// The settings map onto a two bit mode word: bit 0 enables dithering, bit 1 runs the endpoint
/// refinement twice instead of once.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Settings {
    /// Dither the block before fitting the endpoints and diffuse the index error while matching.
    pub dither: bool,
    /// Run up to two refinement passes instead of one.
    pub double_refine: bool,
}

impl Settings {
    const DITHER_BIT: u32 = 1;
    const DOUBLE_REFINE_BIT: u32 = 2;

    /// Single refinement pass, no dithering.
    pub const fn fast() -> Self {
        Self {
            dither: false,
            double_refine: false,
        }
    }

    /// Single refinement pass with dithering.
    pub const fn dithered() -> Self {
        Self {
            dither: true,
            double_refine: false,
        }
    }

    /// Two refinement passes, no dithering.
    pub const fn high_quality() -> Self {
        Self {
            dither: false,
            double_refine: true,
        }
    }

    /// Two refinement passes with dithering.
    pub const fn dithered_high_quality() -> Self {
        Self {
            dither: true,
            double_refine: true,
        }
    }

    /// Decodes a mode word. Bits other than the lowest two are ignored.
    pub const fn from_mode(mode: u32) -> Self {
        Self {
            dither: mode & Self::DITHER_BIT != 0,
            double_refine: mode & Self::DOUBLE_REFINE_BIT != 0,
        }
    }

    /// Encodes the settings back into a mode word.
    pub const fn mode(self) -> u32 {
        let mut mode = 0;
        if self.dither {
            mode |= Self::DITHER_BIT;
        }
        if self.double_refine {
            mode |= Self::DOUBLE_REFINE_BIT;
        }
        mode
    }

    /// Upper bound of refinement passes per color block.
    pub const fn refine_count(self) -> usize {
        if self.double_refine {
            2
        } else {
            1
        }
    }
}
