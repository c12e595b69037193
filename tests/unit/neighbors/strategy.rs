//! Tests for strategy dispatch and the shared configuration

#[cfg(test)]
mod tests {
    use cellnbr::math::metric::Metric;
    use cellnbr::neighbors::borders::measure_border_neighbors;
    use cellnbr::neighbors::centroids::measure_centroid_neighbors;
    use cellnbr::neighbors::expansion::measure_expansion_neighbors;
    use cellnbr::{
        LabelMask, NeighborError, NeighborhoodConfig, NeighborhoodType, measure_neighbors,
    };
    use ndarray::array;

    fn mask() -> LabelMask<u32> {
        LabelMask::new(array![[1u32, 0, 0, 2], [0, 0, 0, 2], [3, 3, 0, 0]])
    }

    // Tests each tag dispatches to its strategy
    // Verified by routing expansion to the border strategy
    #[test]
    fn test_dispatch() {
        let config = NeighborhoodConfig::new().with_dmax(3.0);
        let mask = mask();

        assert_eq!(
            NeighborhoodType::Centroids.measure(&mask, &config).unwrap(),
            measure_centroid_neighbors(&mask, &config).unwrap()
        );
        assert_eq!(
            NeighborhoodType::Borders.measure(&mask, &config).unwrap(),
            measure_border_neighbors(&mask, &config).unwrap()
        );
        assert_eq!(
            measure_neighbors(&mask, NeighborhoodType::Expansion, &config).unwrap(),
            measure_expansion_neighbors(&mask, &config).unwrap()
        );
    }

    // Tests names, display and parsing agree
    // Verified by parsing case-sensitively
    #[test]
    fn test_neighborhood_names() {
        for tag in [
            NeighborhoodType::Centroids,
            NeighborhoodType::Borders,
            NeighborhoodType::Expansion,
        ] {
            assert_eq!(tag.to_string(), tag.name());
            assert_eq!(tag.name().parse::<NeighborhoodType>().unwrap(), tag);
        }
        assert_eq!(
            "Borders".parse::<NeighborhoodType>().unwrap(),
            NeighborhoodType::Borders
        );
        assert!(matches!(
            "delaunay".parse::<NeighborhoodType>(),
            Err(NeighborError::InvalidParameter { parameter: "type", .. })
        ));
    }

    // Tests builders and the metric fallback
    // Verified by ignoring the default metric
    #[test]
    fn test_config_builders() {
        let config = NeighborhoodConfig::default();
        assert_eq!(config.effective_metric(), Metric::Euclidean);
        assert_eq!(config.dmax, None);
        assert_eq!(config.kmax, None);

        let config = config
            .with_metric(Metric::Chebyshev)
            .with_dmax(2.5)
            .with_kmax(4);
        assert_eq!(config.effective_metric(), Metric::Chebyshev);
        assert_eq!(config.dmax, Some(2.5));
        assert_eq!(config.kmax, Some(4));

        let config = NeighborhoodConfig {
            default_metric: Metric::Cityblock,
            ..NeighborhoodConfig::new()
        };
        assert_eq!(config.effective_metric(), Metric::Cityblock);
    }

    // Tests value validation independent of strategy
    // Verified by accepting infinite dmax
    #[test]
    fn test_config_validate() {
        let config = NeighborhoodConfig::new();
        assert!(config.validate().is_ok());
        assert!(config.with_dmax(0.0).validate().is_ok());
        assert!(config.with_dmax(-0.5).validate().is_err());
        assert!(config.with_dmax(f64::INFINITY).validate().is_err());
        assert!(config.with_dmax(f64::NAN).validate().is_err());
        assert!(config.with_kmax(0).validate().is_err());
        assert!(config.with_kmax(1).validate().is_ok());
    }
}
