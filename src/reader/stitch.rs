use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{read_table, ReaderConfig, ReaderError};
use crate::table::SampleTable;

/// Order in which input files are concatenated.
///
/// Directory listings carry no ordering guarantee, so the caller picks one
/// explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StitchOrder {
    /// Keep the order the paths were supplied in
    #[default]
    AsGiven,
    /// Sort by file name, then by full path
    FileName,
}

impl StitchOrder {
    /// Return the paths in this order
    pub fn apply(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        let mut ordered = paths.to_vec();
        if let StitchOrder::FileName = self {
            ordered.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));
        }
        ordered
    }
}

/// Which inputs participate in a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSelection {
    /// Ordering applied before anything else
    pub order: StitchOrder,
    /// Only stitch files whose name contains this text (e.g. `_GCPL_`)
    pub name_filter: Option<String>,
    /// Stitch all selected files; otherwise use only the first
    pub stitch: bool,
}

impl InputSelection {
    /// Pick the inputs to load, in load order.
    ///
    /// With stitching enabled, every file matching the name filter is used
    /// (all files when there is no filter). If stitching is disabled or no
    /// file matches, only the first file in order is used.
    pub fn select(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        let ordered = self.order.apply(paths);

        if self.stitch {
            let matching: Vec<PathBuf> = ordered
                .iter()
                .filter(|p| self.matches(p))
                .cloned()
                .collect();
            if !matching.is_empty() {
                return matching;
            }
            if let Some(filter) = &self.name_filter {
                warn!("No input matches filter {:?}; using the first input only", filter);
            }
        } else if ordered.len() > 1 {
            warn!(
                "Stitching disabled; using {} and ignoring {} other input(s)",
                ordered[0].display(),
                ordered.len() - 1
            );
        }

        ordered.into_iter().take(1).collect()
    }

    fn matches(&self, path: &Path) -> bool {
        match &self.name_filter {
            Some(filter) => path
                .file_name()
                .map(|name| name.to_string_lossy().contains(filter.as_str()))
                .unwrap_or(false),
            None => true,
        }
    }
}

/// Load each path and concatenate the rows in the order given
pub fn read_stitched<P: AsRef<Path>>(paths: &[P], config: &ReaderConfig) -> Result<SampleTable, ReaderError> {
    if paths.is_empty() {
        return Err(ReaderError::NoInputs);
    }

    let mut tables = Vec::with_capacity(paths.len());
    for path in paths {
        let table = read_table(path, config)?;
        info!("Loaded {} rows from {}", table.len(), path.as_ref().display());
        tables.push(table);
    }

    let stitched = SampleTable::stitch(tables);
    if paths.len() > 1 {
        info!("Stitched {} files into {} rows", paths.len(), stitched.len());
    }
    // Re-run validation over the joined rows so index regressions across files are reported
    Ok(SampleTable::from_samples(stitched.into_samples())?)
}
