//! Segmentation rendering
//!
//! Recolors every pixel with the representative color of its region. The
//! level-to-color mapping is computed once as a 256-entry table with
//! [`region_of`](crate::region_of), then applied per pixel.

use crate::region::{RegionCount, Segmentation, Thresholds};
use crate::{ThresholdError, ThresholdResult};
use multiotsu_core::{Pix, PixMut, PixelDepth, color};

/// Black, white
pub const PALETTE_TWO: [u32; 2] = [color::BLACK, color::WHITE];

/// Black, mid gray, white
pub const PALETTE_THREE: [u32; 3] = [color::BLACK, color::MID_GRAY, color::WHITE];

/// Black, red, green, blue
pub const PALETTE_FOUR: [u32; 4] = [color::BLACK, color::RED, color::GREEN, color::BLUE];

/// Default colors for each region, darkest region first
pub fn default_palette(count: RegionCount) -> &'static [u32] {
    match count {
        RegionCount::Two => &PALETTE_TWO,
        RegionCount::Three => &PALETTE_THREE,
        RegionCount::Four => &PALETTE_FOUR,
    }
}

/// Render `pix` with the default palette for the segmentation's region count.
///
/// `pix` may be 8 bpp intensities or 32 bpp RGB, which is converted to
/// intensities first. The result is 32 bpp RGB with the same size and
/// resolution.
pub fn render_segmentation(pix: &Pix, segmentation: &Segmentation) -> ThresholdResult<Pix> {
    render_with_palette(
        pix,
        &segmentation.thresholds,
        default_palette(segmentation.region_count),
    )
}

/// Render `pix` with one color per region.
///
/// # Errors
///
/// Returns [`ThresholdError::UnsupportedRegionCount`] if the palette does
/// not hold exactly one color per region.
pub fn render_with_palette(
    pix: &Pix,
    thresholds: &Thresholds,
    palette: &[u32],
) -> ThresholdResult<Pix> {
    let regions = thresholds.region_count().regions();
    if palette.len() != regions {
        return Err(ThresholdError::UnsupportedRegionCount(format!(
            "palette has {} colors for {} regions",
            palette.len(),
            regions
        )));
    }

    let gray = pix.convert_to_gray()?;

    let mut lut = [0u32; 256];
    for (level, entry) in lut.iter_mut().enumerate() {
        *entry = palette[thresholds.region_of(level as u8)];
    }

    let w = gray.width();
    let h = gray.height();
    let mut out = PixMut::new(w, h, PixelDepth::Bit32)?;
    out.copy_resolution_from(pix);

    for y in 0..h {
        for x in 0..w {
            let level = gray.get_pixel_unchecked(x, y) as usize;
            out.set_pixel_unchecked(x, y, lut[level]);
        }
    }

    Ok(out.into())
}
