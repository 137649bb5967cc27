//! Archive analysis
//!
//! Opens a zip of log files and folds every top-level text file into one set
//! of [`ArchiveStats`]. Archives are read straight into memory by default;
//! [`ExtractMode::ToDisk`] unpacks next to the archive first (`WITH.zip` into
//! `WITH/`) and analyzes that directory instead.
//!
//! Only direct entries count: directories and files nested below them are
//! skipped. Entries are processed in name order.

use std::fs::{self, File};
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zip::ZipArchive;

use crate::error::AnalysisError;
use crate::patterns::PatternSet;
use crate::scan::scan_reader;
use crate::stats::{ArchiveStats, Tally};

/// How archive contents reach the scanner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractMode {
    /// Decompress entries directly into memory
    #[default]
    InMemory,
    /// Extract to the directory named after the archive, then analyze it
    ToDisk,
}

/// Analyze one archive
pub fn analyze_archive(
    patterns: &PatternSet,
    path: &Path,
    mode: ExtractMode,
) -> Result<ArchiveStats, AnalysisError> {
    let tally = match mode {
        ExtractMode::InMemory => tally_archive(patterns, path)?,
        ExtractMode::ToDisk => {
            let dest = extract_archive(path)?;
            tally_dir(patterns, &dest)?
        }
    };

    let stats = ArchiveStats::from_tally(tally);
    info!(
        "Analyzed {}: {} files, {} attacks, {} spells, {} breaths",
        path.display(),
        stats.files_analyzed,
        stats.total_attacks,
        stats.total_spells,
        stats.breath_count
    );
    Ok(stats)
}

/// Analyze the regular files directly inside an already extracted directory
pub fn analyze_dir(patterns: &PatternSet, dir: &Path) -> Result<ArchiveStats, AnalysisError> {
    Ok(ArchiveStats::from_tally(tally_dir(patterns, dir)?))
}

/// Directory an archive extracts into: its path without the extension
pub fn extraction_dir(path: &Path) -> Result<PathBuf, AnalysisError> {
    if path.extension().is_none() {
        return Err(AnalysisError::NoExtractionDir {
            path: path.to_path_buf(),
        });
    }
    Ok(path.with_extension(""))
}

/// Extract the whole archive to [`extraction_dir`] and return that directory
///
/// Extracted files stay on disk after the run.
pub fn extract_archive(path: &Path) -> Result<PathBuf, AnalysisError> {
    let dest = extraction_dir(path)?;
    let mut archive = open_archive(path)?;

    archive
        .extract(&dest)
        .map_err(|source| AnalysisError::Extract {
            path: path.to_path_buf(),
            dest: dest.clone(),
            source,
        })?;

    debug!("Extracted {} into {}", path.display(), dest.display());
    Ok(dest)
}

fn open_archive(path: &Path) -> Result<ZipArchive<BufReader<File>>, AnalysisError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            AnalysisError::ArchiveNotFound {
                path: path.to_path_buf(),
            }
        } else {
            AnalysisError::ArchiveCorrupt {
                path: path.to_path_buf(),
                source: e.into(),
            }
        }
    })?;

    ZipArchive::new(BufReader::new(file)).map_err(|source| AnalysisError::ArchiveCorrupt {
        path: path.to_path_buf(),
        source,
    })
}

fn tally_archive(patterns: &PatternSet, path: &Path) -> Result<Tally, AnalysisError> {
    let corrupt = |source| AnalysisError::ArchiveCorrupt {
        path: path.to_path_buf(),
        source,
    };

    let mut archive = open_archive(path)?;

    // Collect top-level file entries first so they can be visited in name order
    let mut entries: Vec<(String, usize)> = Vec::new();
    for index in 0..archive.len() {
        let entry = archive.by_index(index).map_err(corrupt)?;
        if entry.is_dir() {
            debug!("Skipping directory entry {}", entry.name());
            continue;
        }
        match entry.enclosed_name() {
            Some(name) if name.components().count() == 1 => {
                entries.push((entry.name().to_string(), index));
            }
            _ => debug!("Skipping nested entry {}", entry.name()),
        }
    }
    entries.sort();

    let mut tally = Tally::default();
    for (name, index) in entries {
        let entry = archive.by_index(index).map_err(corrupt)?;
        let counts = scan_reader(patterns, &name, BufReader::new(entry))?;
        tally.absorb(counts);
    }

    Ok(tally)
}

fn tally_dir(patterns: &PatternSet, dir: &Path) -> Result<Tally, AnalysisError> {
    let list_err = |source| AnalysisError::ListDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let path = entry.map_err(list_err)?.path();
        if path.is_file() {
            files.push(path);
        } else {
            debug!("Skipping non-file entry {}", path.display());
        }
    }
    files.sort();

    let mut tally = Tally::default();
    for path in files {
        let name = path.display().to_string();
        let file = File::open(&path).map_err(|source| AnalysisError::FileRead {
            entry: name.clone(),
            source,
        })?;
        let counts = scan_reader(patterns, &name, BufReader::new(file))?;
        tally.absorb(counts);
    }

    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_dir_strips_extension() {
        assert_eq!(
            extraction_dir(Path::new("WITH.zip")).unwrap(),
            PathBuf::from("WITH")
        );
        assert_eq!(
            extraction_dir(Path::new("logs/WITHOUT.zip")).unwrap(),
            PathBuf::from("logs/WITHOUT")
        );
    }

    #[test]
    fn test_extraction_dir_requires_extension() {
        let err = extraction_dir(Path::new("WITH")).unwrap_err();
        assert!(matches!(err, AnalysisError::NoExtractionDir { .. }));
    }

    #[test]
    fn test_missing_archive() {
        let patterns = PatternSet::new().unwrap();
        let err = analyze_archive(
            &patterns,
            Path::new("definitely/not/here.zip"),
            ExtractMode::InMemory,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::ArchiveNotFound { .. }));
    }
}
