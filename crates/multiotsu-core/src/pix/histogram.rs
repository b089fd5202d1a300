//! Histogram generation for Pix images

use super::{Pix, PixelDepth};
use crate::error::{Error, Result};
use crate::histogram::{Histogram, LEVELS};

impl Pix {
    /// Count the occurrences of each intensity in an 8 bpp image.
    ///
    /// # Arguments
    ///
    /// * `factor` - Subsampling factor. Use 1 to count all pixels,
    ///   2 to count every other pixel in each direction, etc.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is not 8 bpp or the factor is 0.
    pub fn gray_counts(&self, factor: u32) -> Result<[u64; LEVELS]> {
        if factor == 0 {
            return Err(Error::InvalidParameter("factor must be >= 1".to_string()));
        }
        if self.depth() != PixelDepth::Bit8 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let mut counts = [0u64; LEVELS];
        for y in (0..self.height()).step_by(factor as usize) {
            let line = self.row_data(y);
            for x in (0..self.width()).step_by(factor as usize) {
                counts[super::get_data_byte(line, x) as usize] += 1;
            }
        }
        Ok(counts)
    }

    /// Get the normalized intensity histogram of an 8 bpp image.
    ///
    /// # Example
    ///
    /// ```
    /// use multiotsu_core::{Pix, PixelDepth};
    ///
    /// let pix = Pix::new(10, 10, PixelDepth::Bit8).unwrap();
    /// let hist = pix.gray_histogram(1).unwrap();
    /// assert_eq!(hist.mass(0), 1.0);
    /// ```
    pub fn gray_histogram(&self, factor: u32) -> Result<Histogram> {
        Histogram::from_counts(&self.gray_counts(factor)?)
    }
}
