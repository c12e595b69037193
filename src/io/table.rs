//! CSV serialization of neighbor tables and per-object attribute tables
//!
//! Neighbor tables always carry the header `Object,Neighbor,Distance`. A
//! missing distance is written as an empty field; on reading, an empty field
//! or a `NaN` token both become `None`.

use crate::io::configuration::{OBJECT_COLUMN, TABLE_HEADER};
use crate::io::error::{NeighborError, Result, invalid_parameter};
use crate::neighbors::table::{NeighborEdge, NeighborTable};
use crate::spatial::mask::Label;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct NeighborRecord<L> {
    #[serde(rename = "Object")]
    object: L,
    #[serde(rename = "Neighbor")]
    neighbor: L,
    #[serde(rename = "Distance")]
    distance: Option<f64>,
}

impl<L> NeighborRecord<L> {
    fn into_edge(self) -> NeighborEdge<L> {
        NeighborEdge {
            object: self.object,
            neighbor: self.neighbor,
            distance: self.distance.filter(|d| !d.is_nan()),
        }
    }
}

/// Write a neighbor table as CSV
///
/// # Errors
///
/// Returns the underlying CSV error if writing fails
pub fn write_table<L: Label, W: std::io::Write>(
    table: &NeighborTable<L>,
    writer: W,
) -> std::result::Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(TABLE_HEADER)?;
    for edge in table {
        csv_writer.serialize(NeighborRecord {
            object: edge.object,
            neighbor: edge.neighbor,
            distance: edge.distance,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a neighbor table to a CSV file, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The file cannot be created or written
pub fn write_table_to_path<L: Label>(table: &NeighborTable<L>, path: &Path) -> Result<()> {
    create_parent_dir(path)?;
    let file = std::fs::File::create(path).map_err(|e| NeighborError::FileSystem {
        path: path.to_path_buf(),
        operation: "create table",
        source: e,
    })?;
    write_table(table, file).map_err(|e| NeighborError::TableExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read a neighbor table from CSV
///
/// # Errors
///
/// Returns the underlying CSV error if a row is malformed or the header is missing
pub fn read_table<L: Label, R: std::io::Read>(
    reader: R,
) -> std::result::Result<NeighborTable<L>, csv::Error> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<NeighborRecord<L>>()
        .map(|record| record.map(NeighborRecord::into_edge))
        .collect()
}

/// Read a neighbor table from a CSV file
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed
pub fn read_table_from_path<L: Label>(path: &Path) -> Result<NeighborTable<L>> {
    let file = std::fs::File::open(path).map_err(|e| NeighborError::FileSystem {
        path: path.to_path_buf(),
        operation: "open table",
        source: e,
    })?;
    read_table(file).map_err(|e| NeighborError::TableImport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Numeric per-object measurements keyed by object identifier
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectAttributes<L> {
    /// Attribute names, in column order
    pub columns: Vec<String>,
    /// Attribute values per object, aligned with `columns`
    pub values: BTreeMap<L, Vec<f64>>,
}

impl<L: Label> ObjectAttributes<L> {
    /// Attribute `(name, value)` pairs for one object
    pub fn get(&self, object: L) -> Option<Vec<(&str, f64)>> {
        self.values.get(&object).map(|row| {
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.iter().copied())
                .collect()
        })
    }
}

/// Read a per-object attribute table (first column `Object`, remaining numeric)
///
/// Empty cells become `NaN`.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or parsed as CSV
/// - The first column is not `Object`
/// - An object identifier or value cannot be parsed
pub fn read_attributes<L: Label>(path: &Path) -> Result<ObjectAttributes<L>> {
    let import_error = |e| NeighborError::TableImport {
        path: path.to_path_buf(),
        source: e,
    };
    let mut reader = csv::Reader::from_path(path).map_err(import_error)?;

    let header = reader.headers().map_err(import_error)?.clone();
    let mut fields = header.iter();
    if fields.next() != Some(OBJECT_COLUMN) {
        return Err(invalid_parameter(
            "attributes",
            &path.display(),
            &format!("first column must be '{OBJECT_COLUMN}'"),
        ));
    }
    let columns: Vec<String> = fields.map(str::to_string).collect();

    let mut values = BTreeMap::new();
    for record in reader.records() {
        let record = record.map_err(import_error)?;
        let mut cells = record.iter();
        let id = cells.next().unwrap_or_default().trim();
        let object = L::from_str_radix(id, 10).map_err(|_parse_error| {
            invalid_parameter(
                "attributes",
                &id,
                &"object identifier is not an unsigned integer",
            )
        })?;
        let row = cells
            .map(|cell| match cell.trim() {
                "" => Ok(f64::NAN),
                text => text.parse::<f64>().map_err(|_parse_error| {
                    invalid_parameter("attributes", &text, &"value is not a number")
                }),
            })
            .collect::<Result<Vec<f64>>>()?;
        values.insert(object, row);
    }

    Ok(ObjectAttributes { columns, values })
}

fn create_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| NeighborError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })
        }
        _ => Ok(()),
    }
}

pub(crate) fn write_text_to_path(text: &str, path: &Path) -> Result<()> {
    create_parent_dir(path)?;
    std::fs::write(path, text).map_err(|e| NeighborError::FileSystem {
        path: path.to_path_buf(),
        operation: "write file",
        source: e,
    })
}
