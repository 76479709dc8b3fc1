//! Offline materialization of notebooks into plain source files.
//!
//! `convert_tree` always overwrites converted files; `convert_one` refuses
//! to replace an existing file unless asked to.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{ImportError, Result};
use crate::extract::SourceExtractor;
use crate::types::{expand_home, PackageRoot};

#[derive(Debug, Default, Serialize)]
pub struct ConversionReport {
    pub package: String,
    pub directories: usize,
    pub converted: Vec<PathBuf>,
    pub markers: Vec<PathBuf>,
}

/// Convert one notebook into `dest_dir` (default: next to the notebook).
///
/// Returns the path written. Fails with [`ImportError::DestinationExists`]
/// before touching anything when the target exists and `overwrite` is false.
pub fn convert_one(
    document: &Path,
    dest_dir: Option<&Path>,
    overwrite: bool,
    extractor: &SourceExtractor,
) -> Result<PathBuf> {
    let conventions = extractor.conventions();
    let document = expand_home(document);
    if !conventions.is_document(&document) {
        return Err(ImportError::NotADocument { path: document });
    }

    let dir = match dest_dir {
        Some(dir) => expand_home(dir),
        None => document
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    let stem = document
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dest = dir.join(conventions.source_file(&stem));

    if !overwrite && dest.exists() {
        return Err(ImportError::DestinationExists { path: dest });
    }

    let source = extractor.extract_from_file(&document)?;
    atomic_write(&dest, &source)?;
    tracing::debug!(from = %document.display(), to = %dest.display(), "converted notebook");

    Ok(dest)
}

/// Mirror the notebook tree under `source` into a package tree under `dest`
/// (default: in place).
///
/// Every visited directory gets one source file per notebook and an empty
/// package marker, replacing any marker already there. Hidden directories,
/// reserved-prefix directories and the destination itself are not descended
/// into.
pub fn convert_tree(
    source: &Path,
    dest: Option<&Path>,
    extractor: &SourceExtractor,
) -> Result<ConversionReport> {
    let conventions = extractor.conventions();
    let root = PackageRoot::new(source)?;
    let source = root.path().to_path_buf();
    let dest = dest.map(expand_home).unwrap_or_else(|| source.clone());
    fs::create_dir_all(&dest).map_err(|e| ImportError::WriteFailed {
        path: dest.clone(),
        source: e,
    })?;
    let skip = dest.canonicalize().ok();

    let mut report = ConversionReport {
        package: root.name().to_string(),
        ..Default::default()
    };

    let walker = WalkDir::new(&source)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            e.file_type().is_dir()
                && !conventions.is_hidden(&name)
                && !conventions.is_reserved(&name)
                && (skip.is_none() || e.path().canonicalize().ok() != skip)
        });

    for entry in walker {
        let entry = entry.map_err(|e| ImportError::UnreadableSource {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| source.clone()),
            source: io::Error::from(e),
        })?;

        let relative = entry.path().strip_prefix(&source).unwrap_or(Path::new(""));
        let out_dir = dest.join(relative);
        fs::create_dir_all(&out_dir).map_err(|e| ImportError::WriteFailed {
            path: out_dir.clone(),
            source: e,
        })?;

        for document in list_documents(entry.path(), extractor)? {
            let written = convert_one(&document, Some(&out_dir), true, extractor)?;
            report.converted.push(written);
        }

        let marker = out_dir.join(&conventions.marker_file);
        fs::write(&marker, "").map_err(|e| ImportError::WriteFailed {
            path: marker.clone(),
            source: e,
        })?;
        report.markers.push(marker);

        report.directories += 1;
    }

    tracing::debug!(
        package = %report.package,
        converted = report.converted.len(),
        "converted notebook tree"
    );
    Ok(report)
}

/// Notebooks directly inside `dir`, sorted, excluding hidden ones and the entry point.
fn list_documents(dir: &Path, extractor: &SourceExtractor) -> Result<Vec<PathBuf>> {
    let conventions = extractor.conventions();
    let entries = fs::read_dir(dir).map_err(|e| ImportError::UnreadableSource {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut documents: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            !conventions.is_hidden(&name) && name != conventions.entry_point
        })
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && conventions.is_document(path))
        .collect();
    documents.sort();

    Ok(documents)
}

/// Write through a hidden sibling file and rename, so readers never see a partial file.
fn atomic_write(dest: &Path, content: &str) -> Result<()> {
    let write_failed = |source| ImportError::WriteFailed {
        path: dest.to_path_buf(),
        source,
    };

    let file_name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = dest.with_file_name(format!(".{}.tmp", file_name));

    let written = fs::write(&temp_path, content).and_then(|()| fs::rename(&temp_path, dest));
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(write_failed(e));
    }

    Ok(())
}
