use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::error::{PosterError, PosterResult};

/// Source image paths grouped by region directory name.
///
/// Produced once by [`RegionCatalog::scan`] and passed explicitly to the build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionCatalog {
    regions: BTreeMap<String, Vec<PathBuf>>,
}

impl RegionCatalog {
    /// Scan `root/<region>/*.<extension>` for each requested region.
    ///
    /// With no regions requested every sub-directory of `root` is a region.
    /// Requested regions whose directory is missing are skipped.
    pub fn scan(root: &Path, regions: &[String], extension: &str) -> PosterResult<Self> {
        let names = if regions.is_empty() {
            list_subdirs(root)?
        } else {
            regions.to_vec()
        };

        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        let mut out = BTreeMap::new();
        for name in names {
            let dir = root.join(&name);
            if !dir.is_dir() {
                tracing::warn!(region = %name, dir = %dir.display(), "region folder not found");
                continue;
            }
            let paths = list_files_with_ext(&dir, &ext)?;
            tracing::debug!(region = %name, count = paths.len(), "scanned region");
            out.insert(name, paths);
        }
        Ok(Self { regions: out })
    }

    pub fn from_map(regions: BTreeMap<String, Vec<PathBuf>>) -> Self {
        Self { regions }
    }

    pub fn region(&self, name: &str) -> Option<&[PathBuf]> {
        self.regions.get(name).map(Vec::as_slice)
    }

    pub fn regions(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.regions.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.regions.values().map(Vec::len).sum()
    }

    /// Every path across all regions, ordered by file name.
    pub fn all_paths(&self) -> Vec<PathBuf> {
        let mut all: Vec<PathBuf> = self.regions.values().flatten().cloned().collect();
        all.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));
        all
    }
}

fn list_subdirs(root: &Path) -> PosterResult<Vec<String>> {
    let rd = std::fs::read_dir(root)
        .with_context(|| format!("read image root '{}'", root.display()))?;
    let mut names = Vec::new();
    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

fn list_files_with_ext(dir: &Path, ext: &str) -> PosterResult<Vec<PathBuf>> {
    let rd = std::fs::read_dir(dir)
        .with_context(|| format!("read region folder '{}'", dir.display()))?;
    let mut out = Vec::new();
    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        if file_ext.to_ascii_lowercase() == ext {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

/// Display label for a source path: file stem with `+`/`_` turned into spaces
/// and each word capitalized ("united+states.png" -> "United States").
pub fn derive_label(path: &Path) -> PosterResult<String> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| PosterError::image_load(path, "path has no UTF-8 file stem"))?;

    let words: Vec<String> = stem
        .split(['+', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect();
    Ok(words.join(" "))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/catalog.rs"]
mod tests;
