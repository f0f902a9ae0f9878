use std::{path::Path, sync::Arc};

use usvg::fontdb;

/// Font faces available to text rendering.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    db: Arc<fontdb::Database>,
}

/// Face picked for one text element.
#[derive(Clone, Debug)]
pub struct ResolvedFace {
    /// Family name reported by the face.
    pub family: String,
    /// Raw font file bytes.
    pub data: Arc<Vec<u8>>,
    /// Face index within a collection.
    pub index: u32,
    /// `true` when the requested family itself was found.
    pub exact: bool,
}

impl FontBook {
    /// Book with no faces. Text is skipped when nothing can be resolved.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Book seeded from the system font directories.
    pub fn system() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Self { db: Arc::new(db) }
    }

    /// Add every `.ttf`, `.otf` and `.ttc` file found directly under `dir`.
    pub fn with_font_dir(mut self, dir: &Path) -> Self {
        load_fonts_from_dir(Arc::make_mut(&mut self.db), dir);
        self
    }

    /// Add one in-memory font file.
    pub fn with_font_data(mut self, bytes: Vec<u8>) -> Self {
        Arc::make_mut(&mut self.db).load_font_data(bytes);
        self
    }

    /// Number of loaded faces.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Resolve `requested`, then each of `fallbacks`, then generic sans-serif, then any face.
    pub fn resolve(&self, requested: Option<&str>, fallbacks: &[String]) -> Option<ResolvedFace> {
        let requested = requested.map(str::trim).filter(|s| !s.is_empty());

        let mut families = Vec::<fontdb::Family<'_>>::new();
        if let Some(name) = requested {
            families.push(fontdb::Family::Name(name));
        }
        families.extend(fallbacks.iter().map(|f| fontdb::Family::Name(f.as_str())));
        families.push(fontdb::Family::SansSerif);

        for (i, family) in families.iter().enumerate() {
            let query = fontdb::Query {
                families: std::slice::from_ref(family),
                weight: fontdb::Weight::NORMAL,
                stretch: fontdb::Stretch::Normal,
                style: fontdb::Style::Normal,
            };
            if let Some(id) = self.db.query(&query) {
                return self.load(id, requested.is_some() && i == 0);
            }
        }

        let id = self.db.faces().next()?.id;
        self.load(id, false)
    }

    fn load(&self, id: fontdb::ID, exact: bool) -> Option<ResolvedFace> {
        let family = self
            .db
            .face(id)
            .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_default();
        let (data, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))?;
        Some(ResolvedFace {
            family,
            data: Arc::new(data),
            index,
            exact,
        })
    }
}

fn load_fonts_from_dir(db: &mut fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
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
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
