//! Rectangular pixel windows used to bound per-object computations

use crate::spatial::mask::Extent;
use ndarray::{ArrayView2, Axis, Slice};
use std::ops::Range;

/// Half-open rectangular region of an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelWindow {
    /// Row span
    pub rows: Range<usize>,
    /// Column span
    pub cols: Range<usize>,
}

impl PixelWindow {
    /// Window covering a whole image of the given (rows, cols)
    pub const fn full(dim: (usize, usize)) -> Self {
        Self {
            rows: 0..dim.0,
            cols: 0..dim.1,
        }
    }

    /// Window around an extent, grown by `padding` on every side and clamped to the image
    pub fn around(extent: &Extent, padding: usize, dim: (usize, usize)) -> Self {
        let row_end = extent.max[0].saturating_add(padding).saturating_add(1);
        let col_end = extent.max[1].saturating_add(padding).saturating_add(1);
        Self {
            rows: extent.min[0].saturating_sub(padding)..row_end.min(dim.0),
            cols: extent.min[1].saturating_sub(padding)..col_end.min(dim.1),
        }
    }

    /// Restrict an image view to this window
    pub fn slice<'a, T>(&self, image: ArrayView2<'a, T>) -> ArrayView2<'a, T> {
        let mut view = image;
        view.slice_axis_inplace(Axis(0), Slice::from(self.rows.clone()));
        view.slice_axis_inplace(Axis(1), Slice::from(self.cols.clone()));
        view
    }
}
