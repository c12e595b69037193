//! Batch measurement over mask files on disk
//!
//! Masks are loaded and measured one at a time through a lazy iterator. A mask
//! that cannot be read or measured is logged with its path and skipped, so one
//! bad file never aborts the batch.

use crate::analysis::graph::NeighborGraph;
use crate::io::error::{Result, io_error};
use crate::io::mask::{MaskImage, is_mask_file, load_mask};
use crate::io::table::{read_attributes, write_table_to_path, write_text_to_path};
use crate::neighbors::strategy::{NeighborhoodConfig, NeighborhoodType};
use crate::neighbors::table::NeighborTable;
use crate::spatial::mask::{Label, LabelMask};
use std::path::{Path, PathBuf};

/// A mask together with its measured neighbor table
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement<L> {
    /// The measured mask
    pub mask: LabelMask<L>,
    /// Its neighbor table
    pub table: NeighborTable<L>,
}

impl<L: Label> Measurement<L> {
    fn export_graph(&self, path: &Path, attributes: Option<&Path>) -> Result<()> {
        let attributes = attributes.map(read_attributes::<L>).transpose()?;
        let objects = self.mask.labels();
        let graph =
            NeighborGraph::from_table(&self.table, Some(objects.as_slice()), attributes.as_ref());
        write_text_to_path(&graph.to_dot(), path)
    }
}

/// Measurement in the identifier width of the source file
#[derive(Debug, Clone, PartialEq)]
pub enum MeasuredMask {
    /// 8-bit identifiers
    U8(Measurement<u8>),
    /// 16-bit identifiers
    U16(Measurement<u16>),
    /// 32-bit identifiers
    U32(Measurement<u32>),
}

impl MeasuredMask {
    /// Number of edges in the neighbor table
    pub fn edge_count(&self) -> usize {
        match self {
            Self::U8(m) => m.table.len(),
            Self::U16(m) => m.table.len(),
            Self::U32(m) => m.table.len(),
        }
    }

    /// Number of objects in the mask
    pub fn object_count(&self) -> usize {
        match self {
            Self::U8(m) => m.mask.labels().len(),
            Self::U16(m) => m.mask.labels().len(),
            Self::U32(m) => m.mask.labels().len(),
        }
    }

    /// Write the neighbor table as CSV
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its directory cannot be written
    pub fn write_table(&self, path: &Path) -> Result<()> {
        match self {
            Self::U8(m) => write_table_to_path(&m.table, path),
            Self::U16(m) => write_table_to_path(&m.table, path),
            Self::U32(m) => write_table_to_path(&m.table, path),
        }
    }

    /// Write the neighbor graph as Graphviz DOT
    ///
    /// Every object of the mask becomes a node, isolated ones included. When
    /// `attributes` names a per-object CSV, its columns become node attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute table cannot be read or the graph
    /// file cannot be written
    pub fn write_graph(&self, path: &Path, attributes: Option<&Path>) -> Result<()> {
        match self {
            Self::U8(m) => m.export_graph(path, attributes),
            Self::U16(m) => m.export_graph(path, attributes),
            Self::U32(m) => m.export_graph(path, attributes),
        }
    }
}

/// Resolve a target into the mask files it names
///
/// A file is returned as is; a directory yields its mask files sorted by path.
///
/// # Errors
///
/// Returns an error if:
/// - The target is a file without a mask extension
/// - The target does not exist
/// - The directory cannot be listed
pub fn collect_mask_files(target: &Path) -> Result<Vec<PathBuf>> {
    if target.is_file() {
        if is_mask_file(target) {
            Ok(vec![target.to_path_buf()])
        } else {
            Err(io_error(target, "target file must be a TIFF or PNG mask"))
        }
    } else if target.is_dir() {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(target)? {
            let path = entry?.path();
            if path.is_file() && is_mask_file(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    } else {
        Err(io_error(target, "target must be a mask file or directory"))
    }
}

/// Output file for a mask: `<dest>/<mask stem>.<extension>`
pub fn output_path(mask_path: &Path, dest: &Path, extension: &str) -> PathBuf {
    let stem = mask_path.file_stem().unwrap_or_default();
    dest.join(format!("{}.{extension}", stem.to_string_lossy()))
}

/// Load one mask and measure its neighbors
///
/// # Errors
///
/// Returns an error if the mask cannot be loaded or the configuration is
/// invalid for `neighborhood`
pub fn measure_file(
    path: &Path,
    neighborhood: NeighborhoodType,
    config: &NeighborhoodConfig,
) -> Result<MeasuredMask> {
    let image = load_mask(path)?;
    let (rows, cols) = image.dim();
    log::debug!("{}: {rows}x{cols} {} mask", path.display(), image.dtype());

    Ok(match image {
        MaskImage::U8(mask) => MeasuredMask::U8(measure(mask, neighborhood, config)?),
        MaskImage::U16(mask) => MeasuredMask::U16(measure(mask, neighborhood, config)?),
        MaskImage::U32(mask) => MeasuredMask::U32(measure(mask, neighborhood, config)?),
    })
}

fn measure<L: Label>(
    mask: LabelMask<L>,
    neighborhood: NeighborhoodType,
    config: &NeighborhoodConfig,
) -> Result<Measurement<L>> {
    let table = neighborhood.measure(&mask, config)?;
    Ok(Measurement { mask, table })
}

/// Measure masks lazily, logging and skipping those that fail
///
/// Each yielded item is a mask path with its measurement; failed masks are
/// reported through `log::error!` and do not appear in the output.
pub fn try_measure_from_disk<I>(
    files: I,
    neighborhood: NeighborhoodType,
    config: &NeighborhoodConfig,
) -> impl Iterator<Item = (PathBuf, MeasuredMask)> + use<I>
where
    I: IntoIterator<Item = PathBuf>,
{
    let config = *config;
    files
        .into_iter()
        .filter_map(move |path| measure_logged(path, neighborhood, &config))
}

fn measure_logged(
    path: PathBuf,
    neighborhood: NeighborhoodType,
    config: &NeighborhoodConfig,
) -> Option<(PathBuf, MeasuredMask)> {
    match measure_file(&path, neighborhood, config) {
        Ok(measured) => {
            log::debug!(
                "{}: {} objects, {} edges",
                path.display(),
                measured.object_count(),
                measured.edge_count()
            );
            Some((path, measured))
        }
        Err(error) => {
            log::error!("Skipping {}: {error}", path.display());
            None
        }
    }
}
