use anyhow::{bail, Context, Result};
use log::{error, info};
use std::path::{Path, PathBuf};

use super::analyze::{default_output_dir, process};
use super::Settings;

/// Analyze every export in a directory independently.
///
/// Each file `<dir>/<stem>.<ext>` is written to `<dir>/<stem>/`.
pub fn run(dir: PathBuf, extension: String, settings: Settings) -> Result<()> {
    if !dir.is_dir() {
        bail!("Not a directory: {}", dir.display());
    }

    let files = matching_files(&dir, &extension)?;
    if files.is_empty() {
        bail!("No .{} files found in {}", extension, dir.display());
    }
    info!("Found {} file(s) in {}", files.len(), dir.display());

    let mut failed = 0usize;
    for file in &files {
        let output = default_output_dir(file);
        match process(std::slice::from_ref(file), &output, &settings.analysis, &settings.reader) {
            Ok(summary) => println!(
                "{}: {} half-cycles -> {}",
                file.display(),
                summary.half_cycles,
                output.display()
            ),
            Err(e) => {
                error!("{}: {:#}", file.display(), e);
                failed += 1;
            }
        }
    }

    println!("Processed {}/{} file(s)", files.len() - failed, files.len());
    if failed > 0 {
        bail!("{} file(s) failed", failed);
    }
    Ok(())
}

/// Files in `dir` with the given extension (case-insensitive), sorted by name
fn matching_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let wanted = extension.trim_start_matches('.');
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))? {
        let path = entry?.path();
        let matches = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted))
            .unwrap_or(false);
        if path.is_file() && matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.TXT", "c.csv", "notes.md"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("d.txt")).unwrap();

        let files = matching_files(dir.path(), ".txt").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.TXT", "b.txt"]);
    }
}
