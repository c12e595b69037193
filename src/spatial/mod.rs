//! Label masks and the objects they contain
//!
//! This module contains:
//! - The label mask type and its integer pixel trait
//! - Object extraction (identifiers, pixels, centroids, extents)
//! - Local pixel windows used to bound per-object computations

/// Label masks and object extraction
pub mod mask;
/// Rectangular pixel windows clamped to the image
pub mod window;

pub use mask::{Label, LabelMask, MaskObject, ObjectSet};
pub use window::PixelWindow;
