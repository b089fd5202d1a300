//! Synthetic test images
//!
//! Regression tests build their inputs here instead of loading binary
//! fixtures, so every expected value can be derived by hand.

use crate::TestResult;
use multiotsu_core::{Pix, PixMut, PixelDepth, color};

/// 8 bpp image whose left half is `low` and right half is `high`.
///
/// `width` should be even for an exact 50/50 split.
pub fn bimodal_gray(width: u32, height: u32, low: u8, high: u8) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit8)?;
    for y in 0..height {
        for x in 0..width {
            let v = if x < width / 2 { low } else { high };
            pm.set_pixel_unchecked(x, y, u32::from(v));
        }
    }
    Ok(pm.into())
}

/// 8 bpp image cycling through `levels` in raster order.
///
/// With `width * height` a multiple of `levels.len()`, every level gets the
/// same pixel count.
pub fn cycle_gray(width: u32, height: u32, levels: &[u8]) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit8)?;
    if levels.is_empty() {
        return Ok(pm.into());
    }
    let mut i = 0usize;
    for y in 0..height {
        for x in 0..width {
            pm.set_pixel_unchecked(x, y, u32::from(levels[i % levels.len()]));
            i += 1;
        }
    }
    Ok(pm.into())
}

/// 8 bpp horizontal ramp, value `x % 256` in every row.
pub fn ramp_gray(width: u32, height: u32) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit8)?;
    for y in 0..height {
        for x in 0..width {
            pm.set_pixel_unchecked(x, y, x % 256);
        }
    }
    Ok(pm.into())
}

/// 32 bpp image with R = G = B = the gray value of `gray`.
pub fn gray_to_rgb(gray: &Pix) -> TestResult<Pix> {
    let mut pm = PixMut::new(gray.width(), gray.height(), PixelDepth::Bit32)?;
    for y in 0..gray.height() {
        for x in 0..gray.width() {
            let v = gray.get_pixel_unchecked(x, y) as u8;
            pm.set_pixel_unchecked(x, y, color::compose_rgb(v, v, v));
        }
    }
    Ok(pm.into())
}

/// Count pixels of a 32 bpp image equal to `pixel`.
pub fn count_color(pix: &Pix, pixel: u32) -> u64 {
    let mut n = 0;
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            if pix.get_pixel_unchecked(x, y) == pixel {
                n += 1;
            }
        }
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bimodal_split() {
        let pix = bimodal_gray(10, 4, 10, 240).unwrap();
        let counts = pix.gray_counts(1).unwrap();
        assert_eq!(counts[10], 20);
        assert_eq!(counts[240], 20);
    }

    #[test]
    fn test_cycle_equal_counts() {
        let pix = cycle_gray(6, 4, &[1, 2, 3]).unwrap();
        let counts = pix.gray_counts(1).unwrap();
        assert_eq!((counts[1], counts[2], counts[3]), (8, 8, 8));
    }

    #[test]
    fn test_gray_to_rgb_and_count() {
        let gray = bimodal_gray(4, 2, 0, 255).unwrap();
        let rgb = gray_to_rgb(&gray).unwrap();
        assert_eq!(rgb.depth(), PixelDepth::Bit32);
        assert_eq!(count_color(&rgb, color::WHITE), 4);
        assert_eq!(count_color(&rgb, color::BLACK), 4);
    }
}
