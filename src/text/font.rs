use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    foundation::error::{PosterError, PosterResult},
    text::raster::{ParleyRasterizer, TextRasterizer},
};

const BOLD: u16 = 700;

/// Font bytes resolved for one face.
#[derive(Clone)]
pub struct LoadedFont {
    /// Family name as reported by the font database (or the file stem).
    pub family: String,
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a collection file.
    pub index: u32,
    pub weight: u16,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("family", &self.family)
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .field("weight", &self.weight)
            .finish()
    }
}

/// One entry of [`FontResolver::faces`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceListing {
    pub family: String,
    pub post_script_name: String,
    pub weight: u16,
    pub path: Option<PathBuf>,
}

/// Source of measurable, renderable fonts by family name or file path.
pub trait FontProvider: Send + Sync {
    fn rasterizer(&self, family_or_path: &str) -> PosterResult<Arc<dyn TextRasterizer>>;
}

/// Resolves family names against system fonts plus extra font directories.
pub struct FontResolver {
    db: usvg::fontdb::Database,
}

impl FontResolver {
    /// System fonts plus every `ttf`/`otf`/`ttc` file directly inside `extra_dirs`.
    pub fn new(extra_dirs: &[PathBuf]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in extra_dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.len(), "font database loaded");
        Self { db }
    }

    /// A resolver that only knows about fonts in `dirs`.
    pub fn from_dirs(dirs: &[PathBuf]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        for dir in dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        Self { db }
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Every known face, sorted by family then PostScript name.
    pub fn faces(&self) -> Vec<FaceListing> {
        let mut out: Vec<FaceListing> = self
            .db
            .faces()
            .map(|face| FaceListing {
                family: face
                    .families
                    .first()
                    .map(|(name, _)| name.clone())
                    .unwrap_or_default(),
                post_script_name: face.post_script_name.clone(),
                weight: face.weight.0,
                path: face_path(&face.source),
            })
            .collect();
        out.sort_by(|a, b| {
            a.family
                .cmp(&b.family)
                .then_with(|| a.post_script_name.cmp(&b.post_script_name))
        });
        out
    }

    /// Resolve `family_or_path` to font bytes.
    ///
    /// Order: an existing font file; then `"<family>-Bold"`, `"<family> Bold"`,
    /// `"<family>"` and the family without spaces, matched against family,
    /// PostScript and file names with bold preferred; then the generic
    /// sans-serif family; then any face at all.
    pub fn resolve(&self, family_or_path: &str) -> PosterResult<LoadedFont> {
        let requested = family_or_path.trim();
        if requested.is_empty() {
            return Err(PosterError::config("font family must be non-empty"));
        }

        let as_path = Path::new(requested);
        if as_path.is_file() {
            return load_font_file(as_path);
        }

        for variant in name_variants(requested) {
            if let Some(id) = self.best_match(&variant) {
                return self.load_face(id);
            }
        }

        let families = [usvg::fontdb::Family::SansSerif];
        let query = usvg::fontdb::Query {
            families: &families,
            weight: usvg::fontdb::Weight(BOLD),
            stretch: usvg::fontdb::Stretch::Normal,
            style: usvg::fontdb::Style::Normal,
        };
        let fallback = self
            .db
            .query(&query)
            .or_else(|| self.db.faces().next().map(|f| f.id));
        match fallback {
            Some(id) => {
                let font = self.load_face(id)?;
                tracing::warn!(
                    requested,
                    fallback = %font.family,
                    "font not found, using fallback"
                );
                Ok(font)
            }
            None => Err(PosterError::font(format!(
                "no font face available for '{requested}'"
            ))),
        }
    }

    fn best_match(&self, name: &str) -> Option<usvg::fontdb::ID> {
        self.db
            .faces()
            .filter(|face| {
                face.families
                    .iter()
                    .any(|(family, _)| family.eq_ignore_ascii_case(name))
                    || face.post_script_name.eq_ignore_ascii_case(name)
                    || face_path(&face.source)
                        .as_deref()
                        .and_then(|p| p.file_stem())
                        .and_then(|s| s.to_str())
                        .is_some_and(|stem| stem.eq_ignore_ascii_case(name))
            })
            .min_by_key(|face| {
                let italic = face.style != usvg::fontdb::Style::Normal;
                (italic, face.weight.0.abs_diff(BOLD), face.index)
            })
            .map(|face| face.id)
    }

    fn load_face(&self, id: usvg::fontdb::ID) -> PosterResult<LoadedFont> {
        let face = self
            .db
            .face(id)
            .ok_or_else(|| PosterError::font("font database lost a face id"))?;
        let family = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| face.post_script_name.clone());
        let weight = face.weight.0;
        let (bytes, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| PosterError::font(format!("font data for '{family}' is unreadable")))?;
        Ok(LoadedFont {
            family,
            bytes: Arc::new(bytes),
            index,
            weight,
        })
    }
}

impl FontProvider for FontResolver {
    fn rasterizer(&self, family_or_path: &str) -> PosterResult<Arc<dyn TextRasterizer>> {
        let font = self.resolve(family_or_path)?;
        Ok(Arc::new(ParleyRasterizer::new(font)?))
    }
}

/// Provider that hands out one rasterizer for every requested family.
#[derive(Clone)]
pub struct FixedFont(pub Arc<dyn TextRasterizer>);

impl FontProvider for FixedFont {
    fn rasterizer(&self, _family_or_path: &str) -> PosterResult<Arc<dyn TextRasterizer>> {
        Ok(Arc::clone(&self.0))
    }
}

/// Read a single font file (face 0).
pub fn load_font_file(path: &Path) -> PosterResult<LoadedFont> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read font file '{}'", path.display()))?;
    let family = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("font")
        .to_string();
    Ok(LoadedFont {
        family,
        bytes: Arc::new(bytes),
        index: 0,
        weight: 400,
    })
}

fn name_variants(family: &str) -> Vec<String> {
    let compact = family.replace(' ', "");
    let mut out = vec![
        format!("{family}-Bold"),
        format!("{family} Bold"),
        family.to_string(),
        compact.clone(),
        format!("{compact}-Regular"),
    ];
    out.dedup();
    out
}

fn face_path(source: &usvg::fontdb::Source) -> Option<PathBuf> {
    match source {
        usvg::fontdb::Source::File(path) => Some(path.clone()),
        usvg::fontdb::Source::SharedFile(path, _) => Some(path.clone()),
        usvg::fontdb::Source::Binary(_) => None,
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::debug!(dir = %dir.display(), "font directory not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        let _ = db.load_font_file(&path);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
