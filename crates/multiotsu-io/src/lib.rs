//! multiotsu-io - Image I/O for the multiotsu workspace
//!
//! Reads BMP and PNG files into [`Pix`] images and writes segmentation
//! results back out. Formats are detected from the file header on read and
//! chosen explicitly (or from the path extension) on write.
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Feature      |
//! |--------|------|-------|--------------|
//! | BMP    | yes  | yes   | `bmp`        |
//! | PNG    | yes  | yes   | `png-format` |

mod error;
pub mod format;

#[cfg(feature = "bmp")]
pub mod bmp;

#[cfg(feature = "png-format")]
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes, format_from_path};
pub use multiotsu_core::ImageFormat;

use multiotsu_core::Pix;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;

/// Read an image from a file
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::new(file);

    let mut header = [0u8; 8];
    let n = reader.read(&mut header)?;
    reader.rewind()?;
    let format = detect_format_from_bytes(&header[..n])?;

    read_image_format(reader, format)
}

/// Read an image from bytes
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

/// Read an image with a specific format
#[allow(unused_variables)]
pub fn read_image_format<R: Read + Seek + std::io::BufRead>(
    reader: R,
    format: ImageFormat,
) -> IoResult<Pix> {
    match format {
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::read_bmp(reader),

        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),

        _ => Err(IoError::UnsupportedFormat(format!(
            "format {:?} is not enabled",
            format
        ))),
    }
}

/// Write an image to a file
///
/// [`ImageFormat::Unknown`] picks the format from the path extension and
/// falls back to BMP.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let format = match format {
        ImageFormat::Unknown => match format_from_path(path) {
            ImageFormat::Unknown => ImageFormat::Bmp,
            f => f,
        },
        f => f,
    };

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_image_format(pix, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Write an image to bytes
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_format(pix, &mut buffer, format)?;
    Ok(buffer)
}

/// Write an image with a specific format
#[allow(unused_variables)]
pub fn write_image_format<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::write_bmp(pix, writer),

        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),

        _ => Err(IoError::UnsupportedFormat(format!(
            "format {:?} is not enabled",
            format
        ))),
    }
}
