//! Tests for neighbor and attribute table serialization

#[cfg(test)]
mod tests {
    use cellnbr::io::table::{
        read_attributes, read_table, read_table_from_path, write_table, write_table_to_path,
    };
    use cellnbr::{NeighborEdge, NeighborError, NeighborTable};
    use tempfile::TempDir;

    fn table() -> NeighborTable<u32> {
        [
            NeighborEdge::new(1, 2, Some(2.0)),
            NeighborEdge::new(2, 1, Some(1.25)),
            NeighborEdge::new(7, 70_000, None),
        ]
        .into_iter()
        .collect()
    }

    // Tests the exact CSV layout, including empty null distances
    // Verified by writing nulls as NaN
    #[test]
    fn test_write_table_layout() {
        let mut buffer = Vec::new();
        write_table(&table(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(
            text,
            "Object,Neighbor,Distance\n1,2,2.0\n2,1,1.25\n7,70000,\n"
        );
    }

    // Tests an empty table still writes its header
    // Verified by deriving the header from the first record
    #[test]
    fn test_write_empty_table() {
        let mut buffer = Vec::new();
        write_table(&NeighborTable::<u8>::new(), &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Object,Neighbor,Distance\n"
        );
    }

    // Tests triples survive a round trip through a file
    // Verified by reading the distance column as text
    #[test]
    fn test_table_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("mask.csv");

        write_table_to_path(&table(), &path).unwrap();
        let read: NeighborTable<u32> = read_table_from_path(&path).unwrap();
        assert_eq!(read, table());
    }

    // Tests NaN and empty fields both read as missing distances
    // Verified by only accepting empty fields
    #[test]
    fn test_read_table_nulls() {
        let csv = "Object,Neighbor,Distance\n1,2,NaN\n2,1,\n3,1,0.5\n";
        let read: NeighborTable<u16> = read_table(csv.as_bytes()).unwrap();

        assert_eq!(
            read.edges(),
            &[
                NeighborEdge::new(1, 2, None),
                NeighborEdge::new(2, 1, None),
                NeighborEdge::new(3, 1, Some(0.5)),
            ]
        );
    }

    // Tests identifiers that do not fit the label type are rejected
    // Verified by truncating identifiers
    #[test]
    fn test_read_table_overflow() {
        let csv = "Object,Neighbor,Distance\n1,300,1.0\n";
        assert!(read_table::<u8, _>(csv.as_bytes()).is_err());
    }

    // Tests a missing file reports the path
    // Verified by discarding the path from the error
    #[test]
    fn test_read_table_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.csv");
        match read_table_from_path::<u8>(&path) {
            Err(NeighborError::FileSystem { path: p, .. }) => assert_eq!(p, path),
            other => unreachable!("Expected FileSystem error, got {other:?}"),
        }
    }

    // Tests attribute tables keyed by object with empty cells as NaN
    // Verified by keying rows by position
    #[test]
    fn test_read_attributes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mask.csv");
        std::fs::write(&path, "Object,CD3,area\n4,0.5,10\n9,,22.5\n").unwrap();

        let attributes = read_attributes::<u16>(&path).unwrap();
        assert_eq!(attributes.columns, vec!["CD3", "area"]);
        assert_eq!(attributes.get(4), Some(vec![("CD3", 0.5), ("area", 10.0)]));

        let nine = attributes.get(9).unwrap();
        assert!(nine.first().is_some_and(|&(_, v)| v.is_nan()));
        assert_eq!(nine.get(1), Some(&("area", 22.5)));
        assert_eq!(attributes.get(1), None);
    }

    // Tests attribute tables must start with the object column
    // Verified by accepting any first column
    #[test]
    fn test_read_attributes_rejects_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mask.csv");
        std::fs::write(&path, "Cell,CD3\n4,0.5\n").unwrap();
        assert!(matches!(
            read_attributes::<u16>(&path),
            Err(NeighborError::InvalidParameter { parameter: "attributes", .. })
        ));

        std::fs::write(&path, "Object,CD3\n4,high\n").unwrap();
        assert!(read_attributes::<u16>(&path).is_err());
    }
}
