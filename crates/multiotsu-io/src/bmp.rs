//! BMP image format support
//!
//! Reads uncompressed Windows Bitmap files with 1, 4, 8, 24, or 32 bits per
//! pixel. Palettized images whose palette is entirely gray decode to 8 bpp;
//! all others decode to 32 bpp RGB. Writes 8 bpp as 8-bit with a gray
//! palette and 32 bpp as 24-bit.

use crate::{IoError, IoResult};
use multiotsu_core::{ImageFormat, Pix, PixMut, PixelDepth, color};
use std::io::{Read, Write};

/// BMP file header size
const BMP_FILE_HEADER_SIZE: usize = 14;

/// BMP info header size (BITMAPINFOHEADER)
const BMP_INFO_HEADER_SIZE: u32 = 40;

/// BI_RGB
const COMPRESSION_NONE: u32 = 0;

/// BI_BITFIELDS (accepted for 32-bit BGRA files)
const COMPRESSION_BITFIELDS: u32 = 3;

#[inline]
fn le_u16(b: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([b[at], b[at + 1]])
}

#[inline]
fn le_u32(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

#[inline]
fn le_i32(b: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

/// Discard `n` bytes without buffering them; header fields are untrusted.
fn skip<R: Read>(reader: &mut R, n: u64) -> IoResult<()> {
    let copied = std::io::copy(&mut reader.by_ref().take(n), &mut std::io::sink())?;
    if copied < n {
        return Err(IoError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("BMP ended after {} of {} skipped bytes", copied, n),
        )));
    }
    Ok(())
}

/// Read a BMP image
pub fn read_bmp<R: Read>(mut reader: R) -> IoResult<Pix> {
    let mut file_header = [0u8; BMP_FILE_HEADER_SIZE];
    reader.read_exact(&mut file_header)?;

    if &file_header[0..2] != b"BM" {
        return Err(IoError::InvalidData("not a BMP file".to_string()));
    }

    let pixel_offset = le_u32(&file_header, 10) as usize;

    // Read info header (minimum 40 bytes)
    let mut info_header = [0u8; BMP_INFO_HEADER_SIZE as usize];
    reader.read_exact(&mut info_header)?;

    let header_size = le_u32(&info_header, 0);
    if header_size < BMP_INFO_HEADER_SIZE {
        return Err(IoError::InvalidData(format!(
            "unsupported BMP header size: {}",
            header_size
        )));
    }

    let width = le_i32(&info_header, 4);
    let height = le_i32(&info_header, 8);

    let planes = le_u16(&info_header, 12);
    if planes != 1 {
        return Err(IoError::InvalidData(format!(
            "unsupported number of planes: {}",
            planes
        )));
    }

    let bits_per_pixel = le_u16(&info_header, 14);
    let compression = le_u32(&info_header, 16);
    let colors_used = le_u32(&info_header, 32) as usize;

    if compression != COMPRESSION_NONE && compression != COMPRESSION_BITFIELDS {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP compression: {}",
            compression
        )));
    }
    if width <= 0 || height == 0 {
        return Err(IoError::InvalidData(format!(
            "invalid BMP dimensions: {}x{}",
            width, height
        )));
    }

    let width = width.unsigned_abs();
    let top_down = height < 0;
    let height = height.unsigned_abs();

    if !matches!(bits_per_pixel, 1 | 4 | 8 | 24 | 32) {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP bit depth: {}",
            bits_per_pixel
        )));
    }

    skip(&mut reader, u64::from(header_size - BMP_INFO_HEADER_SIZE))?;

    // Palette for 1, 4, 8 bit images, stored as BGRX quads
    let palette: Vec<u32> = if bits_per_pixel <= 8 {
        let max_colors = 1usize << bits_per_pixel;
        let num_colors = if colors_used == 0 {
            max_colors
        } else {
            colors_used.min(max_colors)
        };
        let mut raw = vec![0u8; num_colors * 4];
        reader.read_exact(&mut raw)?;
        raw.chunks_exact(4)
            .map(|q| color::compose_rgb(q[2], q[1], q[0]))
            .collect()
    } else {
        Vec::new()
    };

    // Skip to pixel data (covers BI_BITFIELDS masks and gaps)
    let current_pos = BMP_FILE_HEADER_SIZE + header_size as usize + palette.len() * 4;
    if pixel_offset > current_pos {
        skip(&mut reader, (pixel_offset - current_pos) as u64)?;
    }

    let gray_palette = !palette.is_empty()
        && palette.iter().all(|&p| {
            let (r, g, b) = color::extract_rgb(p);
            r == g && g == b
        });
    let depth = if gray_palette {
        PixelDepth::Bit8
    } else {
        PixelDepth::Bit32
    };

    let mut pix_mut = PixMut::new(width, height, depth)?;
    pix_mut.set_informat(ImageFormat::Bmp);

    let lookup = |index: u32| -> IoResult<u32> {
        let entry = palette.get(index as usize).copied().ok_or_else(|| {
            IoError::InvalidData(format!(
                "palette index {} out of range ({} colors)",
                index,
                palette.len()
            ))
        })?;
        Ok(if gray_palette {
            u32::from(color::red(entry))
        } else {
            entry
        })
    };

    // BMP rows are 4-byte aligned
    let row_stride = (width as usize * bits_per_pixel as usize).div_ceil(32) * 4;
    let mut row_buffer = vec![0u8; row_stride];

    for row in 0..height {
        reader.read_exact(&mut row_buffer)?;

        let y = if top_down { row } else { height - 1 - row };

        match bits_per_pixel {
            1 => {
                for x in 0..width {
                    let val = (row_buffer[(x / 8) as usize] >> (7 - (x % 8))) & 1;
                    pix_mut.set_pixel_unchecked(x, y, lookup(u32::from(val))?);
                }
            }
            4 => {
                for x in 0..width {
                    let byte = row_buffer[(x / 2) as usize];
                    let val = if x % 2 == 0 { byte >> 4 } else { byte & 0xF };
                    pix_mut.set_pixel_unchecked(x, y, lookup(u32::from(val))?);
                }
            }
            8 => {
                for x in 0..width {
                    let val = row_buffer[x as usize];
                    pix_mut.set_pixel_unchecked(x, y, lookup(u32::from(val))?);
                }
            }
            24 | 32 => {
                let bytes = (bits_per_pixel / 8) as usize;
                for x in 0..width {
                    let idx = x as usize * bytes;
                    let b = row_buffer[idx];
                    let g = row_buffer[idx + 1];
                    let r = row_buffer[idx + 2];
                    pix_mut.set_pixel_unchecked(x, y, color::compose_rgb(r, g, b));
                }
            }
            _ => unreachable!(),
        }
    }

    Ok(pix_mut.into())
}

/// Write a BMP image
pub fn write_bmp<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();
    let depth = pix.depth();

    let bits_per_pixel: u16 = match depth {
        PixelDepth::Bit8 => 8,
        PixelDepth::Bit32 => 24,
    };

    let row_stride = (width as usize * bits_per_pixel as usize).div_ceil(32) * 4;
    let pixel_data_size = row_stride * height as usize;
    let colormap_size = if depth == PixelDepth::Bit8 { 256 * 4 } else { 0 };

    let pixel_offset = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE as usize + colormap_size;
    let file_size = u32::try_from(pixel_offset + pixel_data_size).map_err(|_| {
        IoError::EncodeError(format!("image too large for BMP: {}x{}", width, height))
    })?;

    // File header
    writer.write_all(b"BM")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(&[0u8; 4])?; // Reserved
    writer.write_all(&(pixel_offset as u32).to_le_bytes())?;

    // Info header
    writer.write_all(&BMP_INFO_HEADER_SIZE.to_le_bytes())?;
    writer.write_all(&(width as i32).to_le_bytes())?;
    writer.write_all(&(height as i32).to_le_bytes())?; // Bottom-up
    writer.write_all(&1u16.to_le_bytes())?; // Planes
    writer.write_all(&bits_per_pixel.to_le_bytes())?;
    writer.write_all(&COMPRESSION_NONE.to_le_bytes())?;
    writer.write_all(&(pixel_data_size as u32).to_le_bytes())?;
    writer.write_all(&0i32.to_le_bytes())?; // X pixels per meter
    writer.write_all(&0i32.to_le_bytes())?; // Y pixels per meter
    writer.write_all(&0u32.to_le_bytes())?; // Colors used
    writer.write_all(&0u32.to_le_bytes())?; // Important colors

    if depth == PixelDepth::Bit8 {
        for i in 0..=255u8 {
            writer.write_all(&[i, i, i, 0])?;
        }
    }

    // Pixel data (bottom-up)
    let mut row_buffer = vec![0u8; row_stride];

    for row in 0..height {
        let y = height - 1 - row;

        match depth {
            PixelDepth::Bit8 => {
                for x in 0..width {
                    row_buffer[x as usize] = pix.get_pixel_unchecked(x, y) as u8;
                }
            }
            PixelDepth::Bit32 => {
                for x in 0..width {
                    let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
                    let idx = (x as usize) * 3;
                    row_buffer[idx] = b;
                    row_buffer[idx + 1] = g;
                    row_buffer[idx + 2] = r;
                }
            }
        }

        writer.write_all(&row_buffer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_bmp_roundtrip_8bit() {
        let mut pix_mut = PixMut::new(10, 10, PixelDepth::Bit8).unwrap();
        for y in 0..10 {
            for x in 0..10 {
                pix_mut.set_pixel(x, y, (x + y) * 10).unwrap();
            }
        }
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_bmp(&pix, &mut buffer).unwrap();
        let pix2 = read_bmp(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.width(), 10);
        assert_eq!(pix2.height(), 10);
        assert_eq!(pix2.depth(), PixelDepth::Bit8);
        assert_eq!(pix2.informat(), ImageFormat::Bmp);
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(pix2.get_pixel(x, y), pix.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn test_bmp_roundtrip_32bit() {
        // odd width exercises row padding
        let mut pix_mut = PixMut::new(5, 3, PixelDepth::Bit32).unwrap();
        pix_mut.set_rgb(0, 0, 255, 0, 0).unwrap();
        pix_mut.set_rgb(1, 1, 0, 255, 0).unwrap();
        pix_mut.set_rgb(4, 2, 0, 0, 255).unwrap();
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_bmp(&pix, &mut buffer).unwrap();
        let pix2 = read_bmp(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.get_rgb(0, 0), Some((255, 0, 0)));
        assert_eq!(pix2.get_rgb(1, 1), Some((0, 255, 0)));
        assert_eq!(pix2.get_rgb(4, 2), Some((0, 0, 255)));
        assert_eq!(pix2.get_rgb(3, 2), Some((0, 0, 0)));
    }

    /// Hand-built 2x2 top-down 8-bit BMP with a two-color non-gray palette.
    fn color_palette_bmp() -> Vec<u8> {
        let mut v = Vec::new();
        let offset: u32 = 14 + 40 + 2 * 4;
        let row_stride = 4u32;
        v.extend_from_slice(b"BM");
        v.extend_from_slice(&(offset + 2 * row_stride).to_le_bytes());
        v.extend_from_slice(&[0; 4]);
        v.extend_from_slice(&offset.to_le_bytes());
        v.extend_from_slice(&40u32.to_le_bytes());
        v.extend_from_slice(&2i32.to_le_bytes());
        v.extend_from_slice(&(-2i32).to_le_bytes());
        v.extend_from_slice(&1u16.to_le_bytes());
        v.extend_from_slice(&8u16.to_le_bytes());
        v.extend_from_slice(&0u32.to_le_bytes());
        v.extend_from_slice(&(2 * row_stride).to_le_bytes());
        v.extend_from_slice(&[0; 8]);
        v.extend_from_slice(&2u32.to_le_bytes()); // colors used
        v.extend_from_slice(&[0; 4]);
        v.extend_from_slice(&[0, 0, 255, 0]); // red (BGRX)
        v.extend_from_slice(&[255, 0, 0, 0]); // blue
        v.extend_from_slice(&[0, 1, 0, 0]);
        v.extend_from_slice(&[1, 1, 0, 0]);
        v
    }

    #[test]
    fn test_bmp_read_color_palette_top_down() {
        let pix = read_bmp(Cursor::new(color_palette_bmp())).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit32);
        assert_eq!(pix.get_rgb(0, 0), Some((255, 0, 0)));
        assert_eq!(pix.get_rgb(1, 0), Some((0, 0, 255)));
        assert_eq!(pix.get_rgb(0, 1), Some((0, 0, 255)));
        assert_eq!(pix.get_rgb(1, 1), Some((0, 0, 255)));
    }

    #[test]
    fn test_bmp_rejects_bad_magic() {
        let mut data = color_palette_bmp();
        data[0] = b'X';
        assert!(matches!(
            read_bmp(Cursor::new(data)),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_bmp_rejects_palette_index_out_of_range() {
        let mut data = color_palette_bmp();
        let first_pixel = 14 + 40 + 8;
        data[first_pixel] = 7;
        assert!(read_bmp(Cursor::new(data)).is_err());
    }

    #[test]
    fn test_bmp_truncated() {
        let mut buffer = Vec::new();
        let pix = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
        write_bmp(&pix, &mut buffer).unwrap();
        buffer.truncate(buffer.len() - 5);
        assert!(matches!(
            read_bmp(Cursor::new(buffer)),
            Err(IoError::Io(_))
        ));
    }

    #[test]
    fn test_bmp_huge_offsets_fail_without_allocating() {
        let mut data = color_palette_bmp();
        data[10..14].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            read_bmp(Cursor::new(data)),
            Err(IoError::Io(_))
        ));

        let mut data = color_palette_bmp();
        data[14..18].copy_from_slice(&(u32::MAX - 8).to_le_bytes());
        assert!(matches!(
            read_bmp(Cursor::new(data)),
            Err(IoError::Io(_))
        ));
    }
}
