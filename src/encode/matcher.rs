use super::{block::Block, dither::diffused_error, endpoints::Palette};

/// Decision points along the line from `palette[1]` to `palette[0]`, scaled by two.
#[derive(Copy, Clone, Debug)]
struct Thresholds {
    c0_point: i32,
    half_point: i32,
    c3_point: i32,
}

impl Thresholds {
    fn new(stops: &[i32; 4]) -> Self {
        Self {
            c0_point: stops[1] + stops[3],
            half_point: stops[3] + stops[2],
            c3_point: stops[2] + stops[0],
        }
    }

    fn scaled(self, factor: i32) -> Self {
        Self {
            c0_point: self.c0_point * factor,
            half_point: self.half_point * factor,
            c3_point: self.c3_point * factor,
        }
    }

    /// Maps a projected value onto the palette index whose stop is closest.
    #[inline(always)]
    fn select(&self, dot: i32) -> u32 {
        if dot < self.half_point {
            if dot < self.c0_point {
                1
            } else {
                3
            }
        } else if dot < self.c3_point {
            2
        } else {
            0
        }
    }
}

/// Assigns every texel the palette entry nearest to it along the endpoint axis and returns the
/// packed 2 bit indices, texel 0 in the lowest bits.
///
/// With `dither` set the projection error of each texel is diffused to its unprocessed
/// neighbours.
pub(crate) fn match_colors_block(block: &Block, color: &Palette, dither: bool) -> u32 {
    let dir = [
        color[0][0] - color[1][0],
        color[0][1] - color[1][1],
        color[0][2] - color[1][2],
    ];

    let mut dots = [0; 16];
    for (dot, texel) in dots.iter_mut().zip(block) {
        let [r, g, b] = texel.rgb();
        *dot = r * dir[0] + g * dir[1] + b * dir[2];
    }

    let mut stops = [0; 4];
    for (stop, c) in stops.iter_mut().zip(color) {
        *stop = c[0] * dir[0] + c[1] * dir[1] + c[2] * dir[2];
    }

    let thresholds = Thresholds::new(&stops);

    if !dither {
        let mut mask = 0u32;
        for &dot in dots.iter().rev() {
            mask <<= 2;
            mask |= thresholds.select(dot * 2);
        }
        return mask;
    }

    // Dots are scaled by 16 to keep the fractional part of the diffused error.
    let thresholds = thresholds.scaled(8);
    let mut current = [0; 4];
    let mut previous = [0; 4];
    let mut mask = 0u32;

    for (y, row) in dots.chunks_exact(4).enumerate() {
        let mut row_mask = 0u32;

        for (x, &dot) in row.iter().enumerate() {
            let dithered = dot * 16 + diffused_error(x, &current, &previous);
            let step = thresholds.select(dithered);

            current[x] = dot - stops[step as usize];
            row_mask |= step << (x * 2);
        }

        mask |= row_mask << (y * 8);
        std::mem::swap(&mut current, &mut previous);
    }

    mask
}
