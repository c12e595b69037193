//! Label masks and extraction of the objects they contain
//!
//! A mask is a 2D grid of unsigned integers where each pixel holds the
//! identifier of the object it belongs to, or 0 for background. Identifiers
//! need not be contiguous. Objects are always enumerated in ascending
//! identifier order so that downstream tables are deterministic.

use crate::io::error::{NeighborError, Result};
use ndarray::{Array2, ArrayD, ArrayView2, Axis, Ix2};
use num_traits::{PrimInt, Unsigned};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::Hash;

/// Unsigned integer pixel type usable as an object identifier
///
/// Zero is reserved for background.
pub trait Label:
    PrimInt
    + Unsigned
    + Hash
    + fmt::Debug
    + fmt::Display
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Whether this pixel belongs to some object
    fn is_object(self) -> bool {
        self != Self::zero()
    }
}

impl<T> Label for T where
    T: PrimInt
        + Unsigned
        + Hash
        + fmt::Debug
        + fmt::Display
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static
{
}

/// Inclusive pixel extent of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    /// Minimum (row, col), inclusive
    pub min: [usize; 2],
    /// Maximum (row, col), inclusive
    pub max: [usize; 2],
}

impl Extent {
    const fn point(pos: [usize; 2]) -> Self {
        Self { min: pos, max: pos }
    }

    fn include(&mut self, pos: [usize; 2]) {
        self.min = [self.min[0].min(pos[0]), self.min[1].min(pos[1])];
        self.max = [self.max[0].max(pos[0]), self.max[1].max(pos[1])];
    }

    /// Check if a pixel lies within the extent
    pub const fn contains(&self, pos: [usize; 2]) -> bool {
        pos[0] >= self.min[0]
            && pos[0] <= self.max[0]
            && pos[1] >= self.min[1]
            && pos[1] <= self.max[1]
    }
}

/// One segmented object: every pixel sharing an identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskObject<L> {
    /// Object identifier
    pub label: L,
    /// Member pixels as (row, col), in row-major discovery order
    pub pixels: Vec<[usize; 2]>,
    /// Bounding pixels of the object
    pub extent: Extent,
}

impl<L: Label> MaskObject<L> {
    /// Number of member pixels
    pub const fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Mean (row, col) of the member pixels
    pub fn centroid(&self) -> [f64; 2] {
        let n = self.pixels.len().max(1) as f64;
        let (rows, cols) = self
            .pixels
            .iter()
            .fold((0.0, 0.0), |(r, c), p| (r + p[0] as f64, c + p[1] as f64));
        [rows / n, cols / n]
    }
}

/// Objects of a mask in ascending identifier order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSet<L> {
    objects: Vec<MaskObject<L>>,
}

impl<L: Label> ObjectSet<L> {
    /// Number of objects
    pub const fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the mask held no objects
    pub const fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate objects in ascending identifier order
    pub fn iter(&self) -> std::slice::Iter<'_, MaskObject<L>> {
        self.objects.iter()
    }

    /// Object identifiers in ascending order
    pub fn labels(&self) -> Vec<L> {
        self.objects.iter().map(|o| o.label).collect()
    }

    /// Centroids aligned with [`Self::labels`]
    pub fn centroids(&self) -> Vec<[f64; 2]> {
        self.objects.iter().map(MaskObject::centroid).collect()
    }

    /// Look up an object by identifier
    pub fn get(&self, label: L) -> Option<&MaskObject<L>> {
        self.objects
            .binary_search_by(|o| o.label.cmp(&label))
            .ok()
            .and_then(|i| self.objects.get(i))
    }
}

impl<'a, L: Label> IntoIterator for &'a ObjectSet<L> {
    type Item = &'a MaskObject<L>;
    type IntoIter = std::slice::Iter<'a, MaskObject<L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Read-only 2D label image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMask<L> {
    data: Array2<L>,
}

impl<L: Label> LabelMask<L> {
    /// Wrap a 2D label array
    pub const fn new(data: Array2<L>) -> Self {
        Self { data }
    }

    /// Build a mask from row-major pixel values
    ///
    /// # Errors
    ///
    /// Returns `InvalidMaskShape` if `data` does not hold `rows * cols` values
    pub fn from_shape_vec(rows: usize, cols: usize, data: Vec<L>) -> Result<Self> {
        let len = data.len();
        Array2::from_shape_vec((rows, cols), data)
            .map(Self::new)
            .map_err(|_shape_error| NeighborError::InvalidMaskShape { shape: vec![len] })
    }

    /// Build a mask from an array of any dimensionality
    ///
    /// Singleton axes are dropped (leading first) while more than two axes
    /// remain, so `(1, 1, H, W)` becomes `(H, W)` but `(1, W)` stays as is.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMaskShape` if the array is not two-dimensional after squeezing
    pub fn from_dyn(data: ArrayD<L>) -> Result<Self> {
        let mut array = data;
        while array.ndim() > 2 {
            match array.shape().iter().position(|&n| n == 1) {
                Some(axis) => array = array.remove_axis(Axis(axis)),
                None => break,
            }
        }

        let shape = array.shape().to_vec();
        array
            .into_dimensionality::<Ix2>()
            .map(Self::new)
            .map_err(|_shape_error| NeighborError::InvalidMaskShape { shape })
    }

    /// Borrow the underlying label array
    pub fn view(&self) -> ArrayView2<'_, L> {
        self.data.view()
    }

    /// Image dimensions as (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Label at a pixel, if inside the image
    pub fn get(&self, pos: [usize; 2]) -> Option<L> {
        self.data.get(pos).copied()
    }

    /// Consume the mask and return its label array
    pub fn into_inner(self) -> Array2<L> {
        self.data
    }

    /// Distinct non-zero identifiers in ascending order
    pub fn labels(&self) -> Vec<L> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_object())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Extract every object with its pixels, extent and centroid
    pub fn extract_objects(&self) -> ObjectSet<L> {
        let mut by_label: BTreeMap<L, MaskObject<L>> = BTreeMap::new();

        for (index, &label) in self.data.indexed_iter() {
            if !label.is_object() {
                continue;
            }
            let pos: [usize; 2] = index.into();
            by_label
                .entry(label)
                .and_modify(|object| {
                    object.pixels.push(pos);
                    object.extent.include(pos);
                })
                .or_insert_with(|| MaskObject {
                    label,
                    pixels: vec![pos],
                    extent: Extent::point(pos),
                });
        }

        ObjectSet {
            objects: by_label.into_values().collect(),
        }
    }
}
