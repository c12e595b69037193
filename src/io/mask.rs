//! Loading label masks from TIFF and PNG files
//!
//! The integer width of the file is preserved: 8-bit masks load as `u8`,
//! 16-bit as `u16` and 32-bit as `u32`, so neighbor tables carry the same
//! identifier type as the mask they came from. Signed TIFF masks are accepted
//! as long as no pixel is negative.

use crate::io::configuration::MASK_EXTENSIONS;
use crate::io::error::{NeighborError, Result, WithPath};
use crate::spatial::mask::{Label, LabelMask};
use image::DynamicImage;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult, Limits};

/// A label mask in the integer width it was stored with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskImage {
    /// 8-bit identifiers
    U8(LabelMask<u8>),
    /// 16-bit identifiers
    U16(LabelMask<u16>),
    /// 32-bit identifiers
    U32(LabelMask<u32>),
}

impl MaskImage {
    /// Image dimensions as (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        match self {
            Self::U8(mask) => mask.dim(),
            Self::U16(mask) => mask.dim(),
            Self::U32(mask) => mask.dim(),
        }
    }

    /// Name of the identifier type
    pub const fn dtype(&self) -> &'static str {
        match self {
            Self::U8(_) => "uint8",
            Self::U16(_) => "uint16",
            Self::U32(_) => "uint32",
        }
    }
}

/// Whether a path has a recognized mask extension
pub fn is_mask_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MASK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Load a label mask from a TIFF or PNG file
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The extension is not a recognized mask format
/// - Pixels are not unsigned integers (`UnsupportedMaskFormat`)
/// - The image has more than one sample per pixel (`InvalidMaskShape`)
pub fn load_mask(path: &Path) -> Result<MaskImage> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "tif" | "tiff" => load_tiff(path),
        "png" => load_png(path),
        _ => Err(NeighborError::UnsupportedMaskFormat {
            path: path.to_path_buf(),
            reason: format!("unrecognized extension '{extension}'"),
        }),
    }
}

fn load_tiff(path: &Path) -> Result<MaskImage> {
    let file = File::open(path).map_err(|e| NeighborError::FileSystem {
        path: path.to_path_buf(),
        operation: "open mask",
        source: e,
    })?;
    let mut decoder = Decoder::new(BufReader::new(file))
        .with_path(path)?
        .with_limits(Limits::unlimited());
    let (width, height) = decoder.dimensions().with_path(path)?;
    let shape = (height as usize, width as usize);
    let image_data = decoder.read_image().with_path(path)?;

    let mask = match image_data {
        DecodingResult::U8(data) => MaskImage::U8(samples_to_mask(shape, data)?),
        DecodingResult::U16(data) => MaskImage::U16(samples_to_mask(shape, data)?),
        DecodingResult::U32(data) => MaskImage::U32(samples_to_mask(shape, data)?),
        DecodingResult::I8(data) => MaskImage::U8(samples_to_mask(shape, unsigned(path, data)?)?),
        DecodingResult::I16(data) => {
            MaskImage::U16(samples_to_mask(shape, unsigned(path, data)?)?)
        }
        DecodingResult::I32(data) => {
            MaskImage::U32(samples_to_mask(shape, unsigned(path, data)?)?)
        }
        _ => {
            return Err(NeighborError::UnsupportedMaskFormat {
                path: path.to_path_buf(),
                reason: "only 8, 16 and 32-bit integer TIFF masks are supported".to_string(),
            });
        }
    };

    Ok(mask)
}

fn load_png(path: &Path) -> Result<MaskImage> {
    let img = image::open(path).map_err(|e| NeighborError::MaskLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    let shape = (img.height() as usize, img.width() as usize);

    match img {
        DynamicImage::ImageLuma8(buffer) => {
            Ok(MaskImage::U8(samples_to_mask(shape, buffer.into_raw())?))
        }
        DynamicImage::ImageLuma16(buffer) => {
            Ok(MaskImage::U16(samples_to_mask(shape, buffer.into_raw())?))
        }
        other => Err(NeighborError::InvalidMaskShape {
            shape: vec![shape.0, shape.1, usize::from(other.color().channel_count())],
        }),
    }
}

// Samples are interleaved per pixel; anything but one sample is not a 2D mask
fn samples_to_mask<L: Label>(shape: (usize, usize), data: Vec<L>) -> Result<LabelMask<L>> {
    let (rows, cols) = shape;
    let samples = data.len().checked_div(rows * cols).unwrap_or(1);
    if samples != 1 {
        return Err(NeighborError::InvalidMaskShape {
            shape: vec![rows, cols, samples],
        });
    }
    LabelMask::from_shape_vec(rows, cols, data)
}

fn unsigned<S, U>(path: &Path, data: Vec<S>) -> Result<Vec<U>>
where
    S: Copy + std::fmt::Display,
    U: TryFrom<S>,
{
    data.into_iter()
        .map(|v| {
            U::try_from(v).map_err(|_negative| NeighborError::UnsupportedMaskFormat {
                path: path.to_path_buf(),
                reason: format!("negative label {v}"),
            })
        })
        .collect()
}
