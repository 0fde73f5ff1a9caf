use super::{
    analyze::optimize_colors_block, block::Block, dither::dither_block, endpoints::Endpoints,
    matcher::match_colors_block, refine::refine_block,
};
use crate::{tables::CodecTables, Settings};

/// Index mask of a flat block: every texel uses the 2:1 interpolated color the single color
/// tables are optimized for.
const FLAT_MASK: u32 = 0xAAAA_AAAA;

/// A compressed BC1 color block and the number of refinement passes spent on it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct ColorBlock {
    pub(crate) data: [u8; 8],
    pub(crate) refine_passes: usize,
}

pub(crate) fn compress_color_block(
    tables: &CodecTables,
    block: &Block,
    settings: Settings,
) -> ColorBlock {
    let mut refine_passes = 0;

    let (endpoints, mask) = if block.iter().all(|texel| *texel == block[0]) {
        let texel = block[0];
        let endpoints: Endpoints = tables.optimal_single_color(texel.r, texel.g, texel.b).into();
        (endpoints, FLAT_MASK)
    } else {
        let dithered;
        let fit_source = if settings.dither {
            dithered = dither_block(tables, block);
            &dithered
        } else {
            block
        };

        let mut endpoints = optimize_colors_block(fit_source);
        if !endpoints.is_distinct() {
            // A single 565 color has nothing left to fit: every texel takes index 0.
            return ColorBlock {
                data: endpoints.store(0),
                refine_passes,
            };
        }

        let mut mask = match_colors_block(block, &endpoints.palette(tables), settings.dither);

        for _ in 0..settings.refine_count() {
            let last_mask = mask;
            refine_passes += 1;

            if refine_block(tables, fit_source, &mut endpoints, mask) {
                if endpoints.is_distinct() {
                    mask = match_colors_block(block, &endpoints.palette(tables), settings.dither);
                } else {
                    mask = 0;
                    break;
                }
            }

            if mask == last_mask {
                break;
            }
        }

        (endpoints, mask)
    };

    ColorBlock {
        data: endpoints.store(mask),
        refine_passes,
    }
}
