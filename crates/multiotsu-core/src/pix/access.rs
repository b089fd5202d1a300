//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//!
//! # Pixel packing
//!
//! 8 bpp pixels are packed MSB-to-LSB within each 32-bit word, so pixel 0
//! of a row occupies bits 31..24 of the first word.

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height` or `x` lies past the end of the row.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        read_word(self.row_data(y), x, self.depth())
    }

    /// Get RGB values at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgb)
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        read_word(self.row_data(y), x, self.depth())
    }

    /// Set a pixel value at (x, y).
    ///
    /// For 8 bpp images the value is masked to its low byte.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height` or `x` lies past the end of the row.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth();
        let line = self.row_data_mut(y);
        match depth {
            PixelDepth::Bit8 => set_data_byte(line, x, val),
            PixelDepth::Bit32 => line[x as usize] = val,
        }
    }

    /// Set an RGB pixel at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }
}

#[inline]
fn read_word(line: &[u32], x: u32, depth: PixelDepth) -> u32 {
    match depth {
        PixelDepth::Bit8 => get_data_byte(line, x),
        PixelDepth::Bit32 => line[x as usize],
    }
}

/// Get an 8-bit pixel value from a packed row.
#[inline]
pub fn get_data_byte(line: &[u32], x: u32) -> u32 {
    let shift = 24 - 8 * (x & 3);
    (line[(x >> 2) as usize] >> shift) & 0xff
}

/// Set an 8-bit pixel value in a packed row.
#[inline]
pub fn set_data_byte(line: &mut [u32], x: u32, val: u32) {
    let shift = 24 - 8 * (x & 3);
    let word = &mut line[(x >> 2) as usize];
    *word = (*word & !(0xff << shift)) | ((val & 0xff) << shift);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_packing_msb_first() {
        let mut line = [0u32; 2];
        set_data_byte(&mut line, 0, 0xaa);
        set_data_byte(&mut line, 3, 0x11);
        set_data_byte(&mut line, 4, 0x7f);
        assert_eq!(line[0], 0xaa00_0011);
        assert_eq!(line[1], 0x7f00_0000);
        assert_eq!(get_data_byte(&line, 0), 0xaa);
        assert_eq!(get_data_byte(&line, 3), 0x11);
        assert_eq!(get_data_byte(&line, 4), 0x7f);

        // overwrite keeps neighbours
        set_data_byte(&mut line, 0, 0x01);
        assert_eq!(line[0], 0x0100_0011);
    }

    #[test]
    fn test_set_get_8bpp() {
        let mut pm = PixMut::new(7, 3, PixelDepth::Bit8).unwrap();
        for y in 0..3 {
            for x in 0..7 {
                pm.set_pixel(x, y, x * 30 + y).unwrap();
            }
        }
        let pix: Pix = pm.into();
        assert_eq!(pix.get_pixel(6, 2), Some(182));
        assert_eq!(pix.get_pixel(0, 0), Some(0));
        assert_eq!(pix.get_pixel(7, 0), None);
    }

    #[test]
    fn test_set_pixel_masks_8bpp() {
        let mut pm = PixMut::new(2, 1, PixelDepth::Bit8).unwrap();
        pm.set_pixel(0, 0, 0x1ff).unwrap();
        assert_eq!(pm.get_pixel(0, 0), Some(0xff));
        assert_eq!(pm.get_pixel(1, 0), Some(0));
    }

    #[test]
    fn test_set_rgb() {
        let mut pm = PixMut::new(2, 2, PixelDepth::Bit32).unwrap();
        pm.set_rgb(1, 1, 10, 20, 30).unwrap();
        let pix: Pix = pm.into();
        assert_eq!(pix.get_rgb(1, 1), Some((10, 20, 30)));
        assert_eq!(pix.get_rgb(0, 0), Some((0, 0, 0)));
    }

    #[test]
    fn test_set_rgb_rejects_gray() {
        let mut pm = PixMut::new(2, 2, PixelDepth::Bit8).unwrap();
        assert!(pm.set_rgb(0, 0, 1, 2, 3).is_err());
    }

    #[test]
    fn test_out_of_bounds() {
        let mut pm = PixMut::new(2, 2, PixelDepth::Bit8).unwrap();
        assert!(pm.set_pixel(2, 0, 1).is_err());
        assert!(pm.set_pixel(0, 2, 1).is_err());
    }
}
