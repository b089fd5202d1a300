//! multiotsu-core - Basic data structures for tonal segmentation
//!
//! This crate provides the data structures shared by the rest of the
//! workspace:
//!
//! - [`Pix`] / [`PixMut`] - The image container (immutable / mutable)
//! - [`Histogram`] - Normalized 256-level intensity distribution
//! - [`PixelDepth`] / [`ImageFormat`] - Raster and file metadata
//!
//! Only two pixel depths are supported: 8 bpp grayscale (the intensity
//! grid that thresholds are computed on) and 32 bpp RGB (decoded input and
//! rendered output).

pub mod error;
pub mod histogram;
pub mod pix;

pub use error::{Error, Result};
pub use histogram::{Histogram, LEVELS};
pub use pix::{ImageFormat, Pix, PixMut, PixelDepth, rgb_to_gray};

/// Color channel helpers for 32-bit RGB pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Opaque black.
    pub const BLACK: u32 = 0x0000_00ff;
    /// Opaque white.
    pub const WHITE: u32 = 0xffff_ffff;
    /// Opaque mid gray (128, 128, 128).
    pub const MID_GRAY: u32 = 0x8080_80ff;
    pub const RED: u32 = 0xff00_00ff;
    pub const GREEN: u32 = 0x00ff_00ff;
    pub const BLUE: u32 = 0x0000_ffff;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | (255 << ALPHA_SHIFT)
    }

    /// Compose a 32-bit RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

}
