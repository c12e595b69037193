//! Tests for padded pixel windows

#[cfg(test)]
mod tests {
    use cellnbr::spatial::mask::Extent;
    use cellnbr::spatial::window::PixelWindow;
    use ndarray::{Array2, array};

    // Tests padding grows the extent on every side
    // Verified by padding only the maximum corner
    #[test]
    fn test_around_pads_extent() {
        let extent = Extent {
            min: [2, 3],
            max: [4, 5],
        };
        let window = PixelWindow::around(&extent, 2, (10, 10));
        assert_eq!(window.rows, 0..7);
        assert_eq!(window.cols, 1..8);
    }

    // Tests padding is clamped to the image
    // Verified by removing the clamp at the far edge
    #[test]
    fn test_around_clamps_to_image() {
        let extent = Extent {
            min: [0, 1],
            max: [1, 2],
        };
        let window = PixelWindow::around(&extent, 5, (4, 3));
        assert_eq!(window, PixelWindow::full((4, 3)));
    }

    // Tests slicing returns the window contents
    // Verified by offsetting the slice by one column
    #[test]
    fn test_slice_window() {
        let image = Array2::from_shape_fn((4, 4), |(r, c)| r * 4 + c);
        let window = PixelWindow {
            rows: 1..3,
            cols: 2..4,
        };

        assert_eq!(window.slice(image.view()), array![[6, 7], [10, 11]]);
    }

    // Tests degenerate and full windows slice to the expected shapes
    // Verified by slicing rows with the column range
    #[test]
    fn test_slice_edge_windows() {
        let image = Array2::from_shape_fn((3, 5), |(r, c)| r * 5 + c);

        let row = PixelWindow {
            rows: 2..3,
            cols: 1..5,
        };
        assert_eq!(row.slice(image.view()), array![[11, 12, 13, 14]]);

        let empty = PixelWindow {
            rows: 1..1,
            cols: 0..5,
        };
        assert_eq!(empty.slice(image.view()).dim(), (0, 5));

        let full = PixelWindow::full((3, 5));
        assert_eq!(full.slice(image.view()), image.view());
    }
}
