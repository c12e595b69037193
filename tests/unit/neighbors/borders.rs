//! Tests for Euclidean border distance neighborhoods

#[cfg(test)]
mod tests {
    use cellnbr::math::metric::Metric;
    use cellnbr::neighbors::borders::{
        BorderWindow, border_distance_table, measure_border_neighbors,
    };
    use cellnbr::{LabelMask, NeighborEdge, NeighborError, NeighborhoodConfig};
    use ndarray::{Array2, array};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn two_objects() -> LabelMask<u8> {
        LabelMask::new(array![[1u8, 1, 0], [0, 0, 0], [0, 2, 2]])
    }

    // Random rectangles, later ones drawn over earlier ones
    fn random_mask(rng: &mut StdRng, side: usize, objects: u16) -> LabelMask<u16> {
        let mut data = Array2::<u16>::zeros((side, side));
        for label in 1..=objects {
            let r0 = rng.random_range(0..side);
            let c0 = rng.random_range(0..side);
            let h = rng.random_range(1..=4);
            let w = rng.random_range(1..=4);
            for r in r0..(r0 + h).min(side) {
                for c in c0..(c0 + w).min(side) {
                    data[[r, c]] = label;
                }
            }
        }
        LabelMask::new(data)
    }

    // Tests the minimum pixel-to-pixel distance is reported in both directions
    // Verified by measuring between centroids
    #[test]
    fn test_borders_two_objects() {
        let config = NeighborhoodConfig::new();
        let table = measure_border_neighbors(&two_objects(), &config).unwrap();
        assert_eq!(
            table.edges(),
            &[
                NeighborEdge::new(1, 2, Some(2.0)),
                NeighborEdge::new(2, 1, Some(2.0)),
            ]
        );
    }

    // Tests dmax keeps only borders within range, inclusive
    // Verified by using a strict comparison
    #[test]
    fn test_borders_dmax() {
        let config = NeighborhoodConfig::new().with_dmax(2.0);
        let table = measure_border_neighbors(&two_objects(), &config).unwrap();
        assert_eq!(table.len(), 2);

        let config = NeighborhoodConfig::new().with_dmax(1.5);
        let table = measure_border_neighbors(&two_objects(), &config).unwrap();
        assert!(table.is_empty());
    }

    // Tests kmax keeps the nearest border per object
    // Verified by keeping the first neighbor by identifier
    #[test]
    fn test_borders_kmax() {
        let mask = LabelMask::new(array![[1u8, 0, 2, 0, 0, 0, 3]]);
        let config = NeighborhoodConfig::new().with_kmax(1);
        let table = measure_border_neighbors(&mask, &config).unwrap();

        assert_eq!(
            table.edges(),
            &[
                NeighborEdge::new(1, 2, Some(2.0)),
                NeighborEdge::new(2, 1, Some(2.0)),
                NeighborEdge::new(3, 2, Some(4.0)),
            ]
        );
    }

    // Tests edges are never symmetrized
    // Verified by adding the reverse of every edge
    #[test]
    fn test_borders_directed_under_kmax() {
        let mask = LabelMask::new(array![[1u8, 0, 0, 2, 0, 3]]);
        let config = NeighborhoodConfig::new().with_kmax(1).with_dmax(10.0);
        let table = measure_border_neighbors(&mask, &config).unwrap();

        assert_eq!(
            table.edges(),
            &[
                NeighborEdge::new(1, 2, Some(3.0)),
                NeighborEdge::new(2, 3, Some(2.0)),
                NeighborEdge::new(3, 2, Some(2.0)),
            ]
        );
        assert!(!table.is_symmetric());
    }

    // Tests only Euclidean distance is accepted
    // Verified by silently using the requested metric
    #[test]
    fn test_borders_rejects_metric() {
        let config = NeighborhoodConfig::new().with_metric(Metric::Cityblock);
        assert!(matches!(
            measure_border_neighbors(&two_objects(), &config),
            Err(NeighborError::UnsupportedMetric {
                neighborhood: "borders",
                ..
            })
        ));

        let config = NeighborhoodConfig::new().with_metric(Metric::Euclidean);
        assert!(measure_border_neighbors(&two_objects(), &config).is_ok());
    }

    // Tests touching objects are at distance one
    // Verified by measuring the gap between objects
    #[test]
    fn test_borders_touching() {
        let mask = LabelMask::new(array![[1u8, 2], [1, 2]]);
        let table = border_distance_table(&mask, None, None, BorderWindow::Full);
        assert_eq!(table.outgoing(1).next().and_then(|e| e.distance), Some(1.0));
    }

    // Tests the padded window gives exactly the full-image edges on random masks
    // Verified by padding with floor(dmax) instead of ceil(dmax)
    #[test]
    fn test_borders_window_matches_full() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..40 {
            let mask = random_mask(&mut rng, 24, 10);
            let dmax = [0.0, 1.0, 1.5, 2.9, 4.2, 7.0][rng.random_range(0..6)];
            let kmax = [None, Some(1), Some(3)][rng.random_range(0..3)];

            let windowed = border_distance_table(&mask, Some(dmax), kmax, BorderWindow::Auto);
            let full = border_distance_table(&mask, Some(dmax), kmax, BorderWindow::Full);
            assert_eq!(windowed, full, "dmax = {dmax}, kmax = {kmax:?}");
        }
    }

    // Tests objects without other objects produce no edges
    // Verified by emitting infinite distances
    #[test]
    fn test_borders_single_object() {
        let config = NeighborhoodConfig::new();
        let mask = LabelMask::new(array![[0u8, 9, 9], [0, 0, 0]]);
        let table = measure_border_neighbors(&mask, &config).unwrap();
        assert!(table.is_empty());

        let empty = LabelMask::new(Array2::<u8>::zeros((2, 2)));
        let table = measure_border_neighbors(&empty, &config).unwrap();
        assert!(table.is_empty());
    }
}
