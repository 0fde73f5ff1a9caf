use std::sync::OnceLock;

/// Upper bucket boundaries of the 5 bit channel quantizer, normalized to `0.0..=1.0`.
///
/// Entry `i` is the midpoint between the expanded values of `i` and `i + 1`.
const MIDPOINTS5: [f32; 32] = [
    0.015686, 0.047059, 0.078431, 0.111765, 0.145098, 0.176471, 0.207843, 0.241176, 0.274510,
    0.305882, 0.337255, 0.370588, 0.403922, 0.435294, 0.466667, 0.500000, 0.533333, 0.564706,
    0.596078, 0.629412, 0.662745, 0.694118, 0.725490, 0.758824, 0.792157, 0.823529, 0.854902,
    0.888235, 0.921569, 0.952941, 0.984314, 1.000000,
];

/// Upper bucket boundaries of the 6 bit channel quantizer, normalized to `0.0..=1.0`.
const MIDPOINTS6: [f32; 64] = [
    0.007843, 0.023529, 0.039216, 0.054902, 0.070588, 0.086275, 0.101961, 0.117647, 0.133333,
    0.149020, 0.164706, 0.180392, 0.196078, 0.211765, 0.227451, 0.245098, 0.262745, 0.278431,
    0.294118, 0.309804, 0.325490, 0.341176, 0.356863, 0.372549, 0.388235, 0.403922, 0.419608,
    0.435294, 0.450980, 0.466667, 0.482353, 0.500000, 0.517647, 0.533333, 0.549020, 0.564706,
    0.580392, 0.596078, 0.611765, 0.627451, 0.643137, 0.658824, 0.674510, 0.690196, 0.705882,
    0.721569, 0.737255, 0.754902, 0.772549, 0.788235, 0.803922, 0.819608, 0.835294, 0.850980,
    0.866667, 0.882353, 0.898039, 0.913725, 0.929412, 0.945098, 0.960784, 0.976471, 0.992157,
    1.000000,
];

/// Offset of the dithering quantization tables. Index `v + QUANT_BIAS` looks up value `v`,
/// which leaves room for diffused error on both ends of the byte range.
pub(crate) const QUANT_BIAS: usize = 8;

const QUANT_TABLE_SIZE: usize = 256 + 2 * QUANT_BIAS;

/// 8 bit fixed point approximation of `a * b / 255` with rounding.
#[inline(always)]
pub(crate) const fn mul8bit(a: i32, b: i32) -> i32 {
    let t = a * b + 128;
    (t + (t >> 8)) >> 8
}

/// Interpolates the color at one third of the way from `a` to `b`.
#[inline(always)]
pub(crate) const fn lerp13(a: i32, b: i32) -> i32 {
    (2 * a + b) / 3
}

/// Packs an 8 bit RGB color into RGB565.
#[inline(always)]
pub(crate) const fn as_16bit(r: u8, g: u8, b: u8) -> u16 {
    ((mul8bit(r as i32, 31) << 11) + (mul8bit(g as i32, 63) << 5) + mul8bit(b as i32, 31)) as u16
}

/// Quantizes a normalized channel value to 5 bits, rounding to the nearest expanded level.
#[inline(always)]
pub(crate) fn quantize5(x: f32) -> u16 {
    let x = x.clamp(0.0, 1.0);
    let q = (x * 31.0) as usize;
    (q + (x > MIDPOINTS5[q]) as usize) as u16
}

/// Quantizes a normalized channel value to 6 bits, rounding to the nearest expanded level.
#[inline(always)]
pub(crate) fn quantize6(x: f32) -> u16 {
    let x = x.clamp(0.0, 1.0);
    let q = (x * 63.0) as usize;
    (q + (x > MIDPOINTS6[q]) as usize) as u16
}

/// Constant lookup tables shared by all encoders.
///
/// The tables depend on nothing but fixed formulas. [`CodecTables::get`] hands out a process
/// wide instance which is built on first use; [`CodecTables::new`] builds a private one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecTables {
    expand5: [u8; 32],
    expand6: [u8; 64],
    quant_rb: [u8; QUANT_TABLE_SIZE],
    quant_g: [u8; QUANT_TABLE_SIZE],
    omatch5: [[u8; 2]; 256],
    omatch6: [[u8; 2]; 256],
}

impl CodecTables {
    /// Computes all tables.
    pub fn new() -> Self {
        let mut expand5 = [0; 32];
        for (i, value) in expand5.iter_mut().enumerate() {
            *value = ((i << 3) | (i >> 2)) as u8;
        }

        let mut expand6 = [0; 64];
        for (i, value) in expand6.iter_mut().enumerate() {
            *value = ((i << 2) | (i >> 4)) as u8;
        }

        let mut quant_rb = [0; QUANT_TABLE_SIZE];
        let mut quant_g = [0; QUANT_TABLE_SIZE];
        for i in 0..QUANT_TABLE_SIZE {
            let v = (i as i32 - QUANT_BIAS as i32).clamp(0, 255);
            quant_rb[i] = expand5[mul8bit(v, 31) as usize];
            quant_g[i] = expand6[mul8bit(v, 63) as usize];
        }

        let omatch5 = Self::prepare_opt_table(&expand5);
        let omatch6 = Self::prepare_opt_table(&expand6);

        Self {
            expand5,
            expand6,
            quant_rb,
            quant_g,
            omatch5,
            omatch6,
        }
    }

    /// Returns the shared tables, building them exactly once per process.
    pub fn get() -> &'static CodecTables {
        static TABLES: OnceLock<CodecTables> = OnceLock::new();

        TABLES.get_or_init(|| {
            tracing::trace!("building DXT lookup tables");
            CodecTables::new()
        })
    }

    /// For every target byte finds the `[max, min]` endpoint pair whose one third
    /// interpolation reproduces it best. Wide endpoint spreads are penalized by 3% of their
    /// distance, the interpolation tolerance hardware is allowed to have.
    fn prepare_opt_table(expand: &[u8]) -> [[u8; 2]; 256] {
        let mut table = [[0; 2]; 256];

        for (i, entry) in table.iter_mut().enumerate() {
            let mut best_err = 256;

            for (mn, &mine) in expand.iter().enumerate() {
                for (mx, &maxe) in expand.iter().enumerate() {
                    let (mine, maxe) = (mine as i32, maxe as i32);

                    let mut err = (lerp13(maxe, mine) - i as i32).abs();
                    err += (maxe - mine).abs() * 3 / 100;

                    if err < best_err {
                        *entry = [mx as u8, mn as u8];
                        best_err = err;
                    }
                }
            }
        }

        table
    }

    /// 5 bit to 8 bit channel expansion.
    pub fn expand5(&self) -> &[u8; 32] {
        &self.expand5
    }

    /// 6 bit to 8 bit channel expansion.
    pub fn expand6(&self) -> &[u8; 64] {
        &self.expand6
    }

    /// Dithering quantization table for red and blue, indexed by `value + 8`.
    pub fn quant_rb(&self) -> &[u8; 272] {
        &self.quant_rb
    }

    /// Dithering quantization table for green, indexed by `value + 8`.
    pub fn quant_g(&self) -> &[u8; 272] {
        &self.quant_g
    }

    /// Optimal `[max, min]` 5 bit endpoints for every flat byte value.
    pub fn omatch5(&self) -> &[[u8; 2]; 256] {
        &self.omatch5
    }

    /// Optimal `[max, min]` 6 bit endpoints for every flat byte value.
    pub fn omatch6(&self) -> &[[u8; 2]; 256] {
        &self.omatch6
    }

    /// Expands an RGB565 color to 8 bit channels.
    #[inline]
    pub(crate) fn from_16bit(&self, v: u16) -> [i32; 3] {
        let rv = ((v & 0xF800) >> 11) as usize;
        let gv = ((v & 0x07E0) >> 5) as usize;
        let bv = (v & 0x001F) as usize;

        [
            self.expand5[rv] as i32,
            self.expand6[gv] as i32,
            self.expand5[bv] as i32,
        ]
    }

    /// Returns the `(max16, min16)` endpoints reproducing the flat color `r, g, b`.
    #[inline]
    pub(crate) fn optimal_single_color(&self, r: u8, g: u8, b: u8) -> (u16, u16) {
        let [r_max, r_min] = self.omatch5[r as usize];
        let [g_max, g_min] = self.omatch6[g as usize];
        let [b_max, b_min] = self.omatch5[b as usize];

        let max16 = ((r_max as u16) << 11) | ((g_max as u16) << 5) | b_max as u16;
        let min16 = ((r_min as u16) << 11) | ((g_min as u16) << 5) | b_min as u16;

        (max16, min16)
    }
}

impl Default for CodecTables {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul8bit_matches_division() {
        for a in 0..256 {
            let exact = (a as f64 * 31.0 / 255.0).round() as i32;
            assert!((mul8bit(a, 31) - exact).abs() <= 1);
        }
        assert_eq!(mul8bit(255, 31), 31);
        assert_eq!(mul8bit(255, 63), 63);
        assert_eq!(mul8bit(0, 63), 0);
    }

    #[test]
    fn expansion_tables() {
        let tables = CodecTables::new();

        assert_eq!(tables.expand5()[0], 0);
        assert_eq!(tables.expand5()[1], 8);
        assert_eq!(tables.expand5()[4], 33);
        assert_eq!(tables.expand5()[31], 255);
        assert_eq!(tables.expand6()[1], 4);
        assert_eq!(tables.expand6()[63], 255);
    }

    #[test]
    fn quant_tables_clamp_biased_range() {
        let tables = CodecTables::new();

        assert!(tables.quant_rb()[..QUANT_BIAS + 1].iter().all(|&v| v == 0));
        assert!(tables.quant_rb()[256 + QUANT_BIAS - 1..]
            .iter()
            .all(|&v| v == 255));
        assert_eq!(tables.quant_rb()[QUANT_BIAS + 5], 8);
        assert_eq!(tables.quant_g()[QUANT_BIAS + 3], 4);
        assert_eq!(tables.quant_g()[QUANT_BIAS + 2], 0);
    }

    #[test]
    fn omatch_tables() {
        let tables = CodecTables::new();

        assert_eq!(tables.omatch5()[0], [0, 0]);
        assert_eq!(tables.omatch5()[128], [15, 17]);
        assert_eq!(tables.omatch5()[255], [31, 31]);
        assert_eq!(tables.omatch6()[1], [0, 1]);
        assert_eq!(tables.omatch6()[128], [34, 27]);
        assert_eq!(tables.omatch6()[255], [63, 63]);
    }

    #[test]
    fn omatch_reproduces_flat_values_closely() {
        let tables = CodecTables::new();

        for i in 0..256 {
            let [mx, mn] = tables.omatch5()[i];
            let max = tables.expand5()[mx as usize] as i32;
            let min = tables.expand5()[mn as usize] as i32;
            assert!((lerp13(max, min) - i as i32).abs() <= 1, "value {i}");

            let [mx, mn] = tables.omatch6()[i];
            let max = tables.expand6()[mx as usize] as i32;
            let min = tables.expand6()[mn as usize] as i32;
            assert!((lerp13(max, min) - i as i32).abs() <= 1, "value {i}");
        }
    }

    #[test]
    fn quantize_rounds_to_nearest_level() {
        assert_eq!(quantize5(-1.0), 0);
        assert_eq!(quantize5(0.0), 0);
        assert_eq!(quantize5(0.015), 0);
        assert_eq!(quantize5(0.016), 1);
        assert_eq!(quantize5(1.0), 31);
        assert_eq!(quantize5(7.0), 31);
        assert_eq!(quantize6(0.5), 31);
        assert_eq!(quantize6(0.501), 32);
        assert_eq!(quantize6(1.0), 63);
    }

    #[test]
    fn shared_tables_are_built_once() {
        let first = CodecTables::get();
        let second = CodecTables::get();

        assert!(std::ptr::eq(first, second));
        assert_eq!(first, &CodecTables::new());
    }

    #[test]
    fn as_16bit_packs_channels() {
        assert_eq!(as_16bit(255, 255, 255), 0xFFFF);
        assert_eq!(as_16bit(255, 0, 0), 0xF800);
        assert_eq!(as_16bit(0, 255, 0), 0x07E0);
        assert_eq!(as_16bit(0, 0, 255), 0x001F);
    }
}
