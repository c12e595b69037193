//! Tests for measurement constants

#[cfg(test)]
mod tests {
    use cellnbr::io::configuration::{
        DEFAULT_DEST_DIR, DEFAULT_METRIC, EXPANSION_ADJACENCY_DMAX, GRAPH_EXTENSION,
        MASK_EXTENSIONS, OBJECT_COLUMN, TABLE_EXTENSION, TABLE_HEADER,
    };
    use cellnbr::math::metric::Metric;

    // Tests defaults used by the strategies
    // Verified by changing the default metric
    #[test]
    fn test_strategy_defaults() {
        assert_eq!(DEFAULT_METRIC, Metric::Euclidean);
        assert_eq!(EXPANSION_ADJACENCY_DMAX, 1.0);
    }

    // Tests output naming constants are consistent
    // Verified by renaming the object column of attribute tables
    #[test]
    fn test_output_constants() {
        assert_eq!(TABLE_HEADER, ["Object", "Neighbor", "Distance"]);
        assert_eq!(TABLE_HEADER.first(), Some(&OBJECT_COLUMN));
        assert_ne!(TABLE_EXTENSION, GRAPH_EXTENSION);
        assert!(!DEFAULT_DEST_DIR.is_empty());
        assert!(
            MASK_EXTENSIONS
                .iter()
                .all(|ext| ext.chars().all(|c| c.is_ascii_lowercase()))
        );
    }
}
