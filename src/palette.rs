//! Adaptive palette quantization.
//!
//! Images that already use at most `max_colors` distinct RGBA values get an
//! exact palette, so flat graphics and screenshots pass through without any
//! color change. Everything else is reduced with NeuQuant, which trains the
//! palette on the image's own pixels.

use crate::constants::{MAX_PALETTE_COLORS, NEUQUANT_SAMPLE_FACTOR};
use color_quant::NeuQuant;
use image::RgbaImage;
use std::collections::HashMap;

/// An 8-bit indexed image: one palette index per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    pub width: u32,
    pub height: u32,
    pub palette: Vec<[u8; 4]>,
    pub indices: Vec<u8>,
}

impl IndexedImage {
    /// Palette as packed RGB triples, the layout of a PNG `PLTE` chunk.
    pub fn palette_rgb(&self) -> Vec<u8> {
        self.palette
            .iter()
            .flat_map(|[r, g, b, _]| [*r, *g, *b])
            .collect()
    }

    /// Alpha value per palette entry, the layout of a PNG `tRNS` chunk.
    ///
    /// Trailing opaque entries are dropped; `None` means fully opaque.
    pub fn palette_alpha(&self) -> Option<Vec<u8>> {
        let mut alpha: Vec<u8> = self.palette.iter().map(|entry| entry[3]).collect();
        while alpha.last() == Some(&u8::MAX) {
            alpha.pop();
        }
        if alpha.is_empty() {
            None
        } else {
            Some(alpha)
        }
    }
}

/// Reduces `image` to a palette of at most `max_colors` entries.
///
/// `max_colors` is clamped to `1..=256`.
pub fn quantize(image: &RgbaImage, max_colors: usize) -> IndexedImage {
    let max_colors = max_colors.clamp(1, MAX_PALETTE_COLORS);
    exact_palette(image, max_colors).unwrap_or_else(|| neuquant_palette(image, max_colors))
}

fn exact_palette(image: &RgbaImage, max_colors: usize) -> Option<IndexedImage> {
    let mut lookup: HashMap<[u8; 4], u8> = HashMap::new();
    let mut palette: Vec<[u8; 4]> = Vec::new();
    let mut indices = Vec::with_capacity(image.as_raw().len() / 4);

    for pixel in image.pixels() {
        let index = match lookup.get(&pixel.0) {
            Some(&index) => index,
            None => {
                if palette.len() == max_colors {
                    return None;
                }
                // palette.len() < max_colors <= 256, so the index fits in a u8
                let index = palette.len() as u8;
                palette.push(pixel.0);
                lookup.insert(pixel.0, index);
                index
            }
        };
        indices.push(index);
    }

    Some(IndexedImage {
        width: image.width(),
        height: image.height(),
        palette,
        indices,
    })
}

fn neuquant_palette(image: &RgbaImage, max_colors: usize) -> IndexedImage {
    let quantizer = NeuQuant::new(NEUQUANT_SAMPLE_FACTOR, max_colors, image.as_raw());

    let palette = quantizer
        .color_map_rgba()
        .chunks_exact(4)
        .map(|c| [c[0], c[1], c[2], c[3]])
        .collect();

    let indices = image
        .pixels()
        .map(|pixel| quantizer.index_of(&pixel.0) as u8)
        .collect();

    IndexedImage {
        width: image.width(),
        height: image.height(),
        palette,
        indices,
    }
}
