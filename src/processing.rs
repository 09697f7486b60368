use crate::constants::{
    HIGH_QUALITY_THRESHOLD, LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL, MAX_PALETTE_COLORS,
    OXIPNG_PRESET, ZOPFLI_ITERATIONS, ZOPFLI_QUALITY_THRESHOLD,
};
use crate::error::{CompressionError, Result};
use crate::job::{validate_quality, CompressionStats};
use crate::palette::{quantize, IndexedImage};
use crate::verbose;
use image::{DynamicImage, ImageReader};
use oxipng::{Deflaters, Options};
use std::fs;
use std::io::{self, Write};
use std::num::NonZeroU8;
use std::path::Path;
use tempfile::NamedTempFile;

/// Converts one PNG into a palette-quantized, size-optimized PNG.
///
/// The pipeline is decode -> quantize to at most 256 colors -> encode as an
/// 8-bit indexed PNG -> lossless optimization pass -> write. `quality` only
/// selects how hard the optimization pass works; pixels are never affected
/// by it.
///
/// # Returns
/// * `Ok(stats)` - Sizes of the source and the written output
/// * `Err(CompressionError::InvalidQuality)` - If `quality` is outside `1..=100`
/// * `Err(CompressionError::Codec)` - Any decode, encode or write failure
///
/// # Example
/// ```
/// use std::path::Path;
/// use png_squeeze::{compress_one, CompressionError};
///
/// let result = compress_one(Path::new("missing.png"), Path::new("out.png"), 85);
/// assert!(matches!(result, Err(CompressionError::Codec { .. })));
/// ```
pub fn compress_one(source: &Path, destination: &Path, quality: u8) -> Result<CompressionStats> {
    validate_quality(quality)?;

    convert(source, destination, quality).map_err(|e| match e {
        err @ CompressionError::Codec { .. } => err,
        other => CompressionError::codec(source, other),
    })
}

fn convert(source: &Path, destination: &Path, quality: u8) -> Result<CompressionStats> {
    let (img, original_size) = load_image(source)?;

    let indexed = quantize(&img.to_rgba8(), MAX_PALETTE_COLORS);
    verbose!(
        "{}: {}x{} quantized to {} colors",
        source.display(),
        indexed.width,
        indexed.height,
        indexed.palette.len()
    );

    let encoded = encode_indexed_png(&indexed)?;
    let optimized = optimize_png(&encoded, quality)?;
    verbose!(
        "{}: encoded {} bytes, optimized to {} bytes",
        source.display(),
        encoded.len(),
        optimized.len()
    );

    let permissions = fs::metadata(source)?.permissions();
    write_output(destination, &optimized, permissions)?;

    Ok(CompressionStats {
        original_size,
        compressed_size: optimized.len() as u64,
        palette_len: indexed.palette.len(),
    })
}

/// Loads an image file and returns it along with its size on disk.
pub fn load_image(source: &Path) -> Result<(DynamicImage, u64)> {
    let file_size = fs::metadata(source)?.len();
    let img = ImageReader::open(source)?.with_guessed_format()?.decode()?;
    Ok((img, file_size))
}

/// Encodes an indexed image as an 8-bit palette PNG.
///
/// A `tRNS` chunk is written only when some palette entry is not opaque.
pub fn encode_indexed_png(indexed: &IndexedImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, indexed.width, indexed.height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(indexed.palette_rgb());
        if let Some(alpha) = indexed.palette_alpha() {
            encoder.set_trns(alpha);
        }

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&indexed.indices)?;
        writer.finish()?;
    }
    Ok(buffer)
}

/// Runs the lossless oxipng pass over an encoded PNG.
pub fn optimize_png(data: &[u8], quality: u8) -> Result<Vec<u8>> {
    oxipng::optimize_from_memory(data, &optimization_options(quality))
        .map_err(|e| CompressionError::PngOptimization(e.to_string()))
}

pub fn optimization_options(quality: u8) -> Options {
    let mut options = Options::from_preset(OXIPNG_PRESET);
    options.deflate = deflater_for_quality(quality);
    options
}

// 根据质量设置调整压缩级别
pub fn deflater_for_quality(quality: u8) -> Deflaters {
    if quality >= ZOPFLI_QUALITY_THRESHOLD {
        Deflaters::Zopfli {
            iterations: NonZeroU8::new(ZOPFLI_ITERATIONS).unwrap_or(NonZeroU8::MIN),
        }
    } else if quality >= HIGH_QUALITY_THRESHOLD {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_HIGH_LEVEL,
        }
    } else {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_LOW_LEVEL,
        }
    }
}

/// Writes `data` to a temporary file next to `destination`, then renames it
/// into place. A failed write never leaves a partial file at `destination`.
fn write_output(destination: &Path, data: &[u8], permissions: fs::Permissions) -> Result<()> {
    let parent = match destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|source| {
                CompressionError::DirectoryCreationFailed {
                    path: parent.to_path_buf(),
                    source,
                }
            })?;
            parent
        }
        None => Path::new("."),
    };

    let write_failed = |e: io::Error| {
        CompressionError::codec(destination, format!("failed to write output: {}", e))
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(write_failed)?;
    temp.write_all(data).map_err(write_failed)?;
    temp.as_file().set_permissions(permissions).map_err(write_failed)?;
    // the temp file is removed when the PersistError is dropped
    temp.persist(destination).map_err(|e| write_failed(e.error))?;
    Ok(())
}
