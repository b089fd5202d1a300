//! Pixel depth conversion functions
//!
//! RGB to intensity uses the fixed luma weights `0.299 R + 0.587 G + 0.114 B`
//! and truncates toward zero; no other color transform is offered.

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

const RED_WEIGHT: f64 = 0.299;
const GREEN_WEIGHT: f64 = 0.587;
const BLUE_WEIGHT: f64 = 0.114;

/// Convert one RGB sample to an 8-bit intensity.
///
/// The weighted sum is truncated, so `(1, 1, 1)` maps to 0 because the sum
/// evaluates to slightly less than 1.0 in floating point.
#[inline]
pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    let gray = RED_WEIGHT * f64::from(r) + GREEN_WEIGHT * f64::from(g) + BLUE_WEIGHT * f64::from(b);
    gray.clamp(0.0, 255.0) as u8
}

impl Pix {
    /// Convert 32 bpp RGB to 8 bpp grayscale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 32 bpp.
    pub fn convert_rgb_to_gray(&self) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let w = self.width();
        let h = self.height();
        let mut result = PixMut::new(w, h, PixelDepth::Bit8)?;
        result.copy_resolution_from(self);
        result.set_informat(self.informat());

        for y in 0..h {
            for x in 0..w {
                let (r, g, b) = color::extract_rgb(self.get_pixel_unchecked(x, y));
                result.set_pixel_unchecked(x, y, u32::from(rgb_to_gray(r, g, b)));
            }
        }

        Ok(result.into())
    }

    /// Get an 8 bpp intensity image.
    ///
    /// 8 bpp input is returned as a shared clone; 32 bpp input is converted.
    pub fn convert_to_gray(&self) -> Result<Pix> {
        match self.depth() {
            PixelDepth::Bit8 => Ok(self.clone()),
            PixelDepth::Bit32 => self.convert_rgb_to_gray(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_gray_weights() {
        assert_eq!(rgb_to_gray(0, 0, 0), 0);
        assert_eq!(rgb_to_gray(255, 255, 255), 255);
        assert_eq!(rgb_to_gray(10, 10, 10), 10);
        assert_eq!(rgb_to_gray(240, 240, 240), 240);
        // 29.9 + 88.05 + 22.8 = 140.75
        assert_eq!(rgb_to_gray(100, 150, 200), 140);
    }

    #[test]
    fn test_rgb_to_gray_truncates() {
        // 0.299 + 0.587 + 0.114 sums to just under 1.0
        assert_eq!(rgb_to_gray(1, 1, 1), 0);
        assert_eq!(rgb_to_gray(255, 0, 0), 76);
        assert_eq!(rgb_to_gray(0, 0, 255), 29);
    }

    #[test]
    fn test_convert_rgb_to_gray() {
        let mut pm = PixMut::new(3, 1, PixelDepth::Bit32).unwrap();
        pm.set_rgb(0, 0, 255, 255, 255).unwrap();
        pm.set_rgb(1, 0, 100, 150, 200).unwrap();
        pm.set_resolution(72, 72);
        let pix: Pix = pm.into();

        let gray = pix.convert_rgb_to_gray().unwrap();
        assert_eq!(gray.depth(), PixelDepth::Bit8);
        assert_eq!(gray.get_pixel(0, 0), Some(255));
        assert_eq!(gray.get_pixel(1, 0), Some(140));
        assert_eq!(gray.get_pixel(2, 0), Some(0));
        assert_eq!(gray.xres(), 72);
    }

    #[test]
    fn test_convert_rejects_gray_input() {
        let pix = Pix::new(2, 2, PixelDepth::Bit8).unwrap();
        assert!(pix.convert_rgb_to_gray().is_err());
        // but convert_to_gray passes it through
        let same = pix.convert_to_gray().unwrap();
        assert_eq!(same.depth(), PixelDepth::Bit8);
    }
}
