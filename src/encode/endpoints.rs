use crate::tables::{lerp13, CodecTables};

/// Four palette colors of a color block, 8 bits per channel: both endpoints followed by the
/// colors one third and two thirds of the way from `max16` to `min16`.
pub(crate) type Palette = [[i32; 3]; 4];

/// The two RGB565 endpoints of a color block.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Endpoints {
    pub(crate) max16: u16,
    pub(crate) min16: u16,
}

impl Endpoints {
    pub(crate) fn is_distinct(self) -> bool {
        self.max16 != self.min16
    }

    pub(crate) fn palette(self, tables: &CodecTables) -> Palette {
        let c0 = tables.from_16bit(self.max16);
        let c1 = tables.from_16bit(self.min16);

        let mut c2 = [0; 3];
        let mut c3 = [0; 3];
        for ch in 0..3 {
            c2[ch] = lerp13(c0[ch], c1[ch]);
            c3[ch] = lerp13(c1[ch], c0[ch]);
        }

        [c0, c1, c2, c3]
    }

    /// Packs the endpoints and the index mask into a BC1 color block.
    ///
    /// BC1 only selects the four color mode if the first endpoint is the larger one, so the
    /// endpoints are swapped if needed and the indices remapped to keep their colors.
    pub(crate) fn store(self, mask: u32) -> [u8; 8] {
        let (mut max16, mut min16, mut mask) = (self.max16, self.min16, mask);

        if max16 < min16 {
            std::mem::swap(&mut max16, &mut min16);
            mask ^= 0x5555_5555;
        }

        let mut data = [0; 8];
        data[0..2].copy_from_slice(&max16.to_le_bytes());
        data[2..4].copy_from_slice(&min16.to_le_bytes());
        data[4..8].copy_from_slice(&mask.to_le_bytes());
        data
    }
}

impl From<(u16, u16)> for Endpoints {
    fn from((max16, min16): (u16, u16)) -> Self {
        Self { max16, min16 }
    }
}
