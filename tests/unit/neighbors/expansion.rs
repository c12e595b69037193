//! Tests for adjacency after Euclidean pixel expansion

#[cfg(test)]
mod tests {
    use cellnbr::math::metric::Metric;
    use cellnbr::neighbors::expansion::{expand_mask, measure_expansion_neighbors};
    use cellnbr::{LabelMask, NeighborEdge, NeighborError, NeighborhoodConfig};
    use ndarray::array;

    fn two_objects() -> LabelMask<u8> {
        LabelMask::new(array![[1u8, 1, 0], [0, 0, 0], [0, 2, 2]])
    }

    // Tests background pixels take the label of their nearest object pixel
    // Verified by breaking ties towards the lower object
    #[test]
    fn test_expand_mask() {
        let expanded = expand_mask(&two_objects(), 1.0);
        assert_eq!(
            expanded.into_inner(),
            array![[1u8, 1, 1], [1, 1, 2], [2, 2, 2]]
        );
    }

    // Tests expansion stops at dmax and leaves object pixels untouched
    // Verified by comparing squared distances with dmax
    #[test]
    fn test_expand_mask_limit() {
        let mask = LabelMask::new(array![[3u16, 0, 0, 0, 0, 0, 0]]);
        let expanded = expand_mask(&mask, 2.0);
        assert_eq!(expanded.into_inner(), array![[3u16, 3, 3, 0, 0, 0, 0]]);

        let unchanged = expand_mask(&two_objects(), 0.0);
        assert_eq!(unchanged, two_objects());
    }

    // Tests objects whose expansions touch are neighbors without a distance
    // Verified by keeping border distances in the output
    #[test]
    fn test_expansion_neighbors() {
        let config = NeighborhoodConfig::new().with_dmax(1.0);
        let table = measure_expansion_neighbors(&two_objects(), &config).unwrap();
        assert_eq!(
            table.edges(),
            &[NeighborEdge::new(1, 2, None), NeighborEdge::new(2, 1, None)]
        );
    }

    // Tests a one-pixel background gap keeps expanded objects apart
    // Verified by treating a gap of one pixel as touching
    #[test]
    fn test_expansion_gap() {
        let mask = LabelMask::new(array![[1u8, 0, 0, 0, 0, 0, 0, 0, 2]]);

        let config = NeighborhoodConfig::new().with_dmax(3.0);
        let table = measure_expansion_neighbors(&mask, &config).unwrap();
        assert!(table.is_empty());

        let config = NeighborhoodConfig::new().with_dmax(4.0);
        let table = measure_expansion_neighbors(&mask, &config).unwrap();
        assert_eq!(table.len(), 2);
    }

    // Tests the parameter checks and their precedence
    // Verified by checking kmax before the metric
    #[test]
    fn test_expansion_parameters() {
        let config = NeighborhoodConfig::new()
            .with_metric(Metric::Chebyshev)
            .with_kmax(2);
        assert!(matches!(
            measure_expansion_neighbors(&two_objects(), &config),
            Err(NeighborError::UnsupportedMetric { .. })
        ));

        let config = NeighborhoodConfig::new().with_dmax(1.0).with_kmax(2);
        assert!(matches!(
            measure_expansion_neighbors(&two_objects(), &config),
            Err(NeighborError::UnsupportedParameterCombination {
                parameter: "kmax",
                ..
            })
        ));

        assert!(matches!(
            measure_expansion_neighbors(&two_objects(), &NeighborhoodConfig::new()),
            Err(NeighborError::MissingRequiredParameter {
                neighborhood: "expansion",
                parameter: "dmax",
            })
        ));

        let config = NeighborhoodConfig::new().with_dmax(f64::NAN);
        assert!(matches!(
            measure_expansion_neighbors(&two_objects(), &config),
            Err(NeighborError::InvalidParameter { .. })
        ));
    }
}
