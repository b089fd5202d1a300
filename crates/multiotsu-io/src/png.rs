//! PNG image format support
//!
//! Every PNG variant is normalized to 8 bits per channel on read: gray
//! images become 8 bpp, everything else (palette, gray+alpha, RGB, RGBA)
//! becomes 32 bpp.

use crate::{IoError, IoResult};
use multiotsu_core::{ImageFormat, Pix, PixMut, PixelDepth, color};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }

    let (pix_depth, spp, samples) = match color_type {
        ColorType::Grayscale => (PixelDepth::Bit8, 1, 1),
        ColorType::GrayscaleAlpha => (PixelDepth::Bit32, 4, 2),
        ColorType::Rgb => (PixelDepth::Bit32, 3, 3),
        ColorType::Rgba => (PixelDepth::Bit32, 4, 4),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let mut pix_mut = PixMut::new(width, height, pix_depth)?;
    pix_mut.set_spp(spp);
    pix_mut.set_informat(ImageFormat::Png);

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..][..width as usize * samples];
        for (x, px) in (0..width).zip(row.chunks_exact(samples)) {
            let pixel = match px {
                [g] => u32::from(*g),
                [g, a] => color::compose_rgba(*g, *g, *g, *a),
                [r, g, b] => color::compose_rgb(*r, *g, *b),
                [r, g, b, a] => color::compose_rgba(*r, *g, *b, *a),
                _ => unreachable!(),
            };
            pix_mut.set_pixel_unchecked(x, y, pixel);
        }
    }

    Ok(pix_mut.into())
}

/// Write a PNG image
///
/// 8 bpp is written as 8-bit grayscale; 32 bpp as RGB, or RGBA when the
/// image carries four samples per pixel.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, samples) = match pix.depth() {
        PixelDepth::Bit8 => (ColorType::Grayscale, 1usize),
        PixelDepth::Bit32 if pix.spp() == 4 => (ColorType::Rgba, 4),
        PixelDepth::Bit32 => (ColorType::Rgb, 3),
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let bytes_per_row = width as usize * samples;
    let mut data = vec![0u8; bytes_per_row * height as usize];

    for (y, row) in (0..height).zip(data.chunks_exact_mut(bytes_per_row)) {
        for (x, out) in (0..width).zip(row.chunks_exact_mut(samples)) {
            let pixel = pix.get_pixel_unchecked(x, y);
            match out {
                [g] => *g = pixel as u8,
                [r, g, b] => (*r, *g, *b) = color::extract_rgb(pixel),
                [r, g, b, a] => {
                    (*r, *g, *b) = color::extract_rgb(pixel);
                    *a = color::alpha(pixel);
                }
                _ => unreachable!(),
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
