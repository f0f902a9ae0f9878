use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    assets::decode::{decode_raster, looks_like_svg, parse_svg, svg_size_px},
    foundation::error::{AdLayoutError, AdLayoutResult},
};

/// Decoded logo, ready to be fitted into a box.
#[derive(Clone, Debug)]
pub enum LogoSource {
    /// Straight-alpha raster image.
    Raster(Arc<image::RgbaImage>),
    /// Parsed SVG, rasterized at the fitted size.
    Svg(Arc<usvg::Tree>),
}

impl LogoSource {
    /// Intrinsic size in pixels.
    pub fn size_px(&self) -> (u32, u32) {
        match self {
            LogoSource::Raster(img) => img.dimensions(),
            LogoSource::Svg(tree) => svg_size_px(tree),
        }
    }
}

/// Logo images referenced by template elements.
///
/// References are looked up among in-memory registrations first, then resolved as normalized
/// relative paths under the asset root. Decoded logos are cached by reference.
#[derive(Clone, Debug, Default)]
pub struct BrandAssets {
    root: Option<PathBuf>,
    cache: HashMap<String, LogoSource>,
}

impl BrandAssets {
    /// In-memory store without a filesystem root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store resolving references under `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            cache: HashMap::new(),
        }
    }

    /// Filesystem root, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Register a decoded raster logo under `key`.
    pub fn insert_image(&mut self, key: impl Into<String>, img: image::RgbaImage) {
        self.cache
            .insert(key.into(), LogoSource::Raster(Arc::new(img)));
    }

    /// Decode and register encoded logo bytes (PNG, JPEG, SVG, ...) under `key`.
    pub fn insert_encoded(&mut self, key: impl Into<String>, bytes: &[u8]) -> AdLayoutResult<()> {
        let key = key.into();
        let src = decode_logo(&key, bytes, None).map_err(|e| {
            AdLayoutError::compositing(&key, format!("undecodable logo '{key}': {e:#}"))
        })?;
        self.cache.insert(key, src);
        Ok(())
    }

    /// `true` when `key` is already registered or cached.
    pub fn contains(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    /// Resolve the logo `reference` used by element `element_id`.
    pub fn logo(&mut self, element_id: &str, reference: &str) -> AdLayoutResult<LogoSource> {
        if let Some(src) = self.cache.get(reference) {
            return Ok(src.clone());
        }

        let Some(root) = self.root() else {
            return Err(AdLayoutError::compositing(
                element_id,
                format!("logo '{reference}' is not registered"),
            ));
        };
        let norm = normalize_rel_path(reference)
            .map_err(|reason| AdLayoutError::compositing(element_id, reason))?;
        let path = root.join(Path::new(&norm));
        let bytes = std::fs::read(&path).map_err(|e| {
            AdLayoutError::compositing(
                element_id,
                format!("missing logo '{}': {e}", path.display()),
            )
        })?;
        let src = decode_logo(&norm, &bytes, path.parent()).map_err(|e| {
            AdLayoutError::compositing(
                element_id,
                format!("undecodable logo '{}': {e:#}", path.display()),
            )
        })?;

        tracing::debug!(element = element_id, path = %path.display(), "loaded logo");
        self.cache.insert(reference.to_string(), src.clone());
        Ok(src)
    }
}

fn decode_logo(
    reference: &str,
    bytes: &[u8],
    resources_dir: Option<&Path>,
) -> anyhow::Result<LogoSource> {
    if looks_like_svg(reference, bytes) {
        Ok(LogoSource::Svg(Arc::new(parse_svg(bytes, resources_dir)?)))
    } else {
        Ok(LogoSource::Raster(Arc::new(decode_raster(bytes)?)))
    }
}

/// Normalize and validate root-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> Result<String, String> {
    let s = source.trim().replace('\\', "/");
    if s.starts_with('/') || s.get(1..2) == Some(":") {
        return Err("asset paths must be relative".to_string());
    }
    if s.is_empty() {
        return Err("asset path must be non-empty".to_string());
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err("asset paths must not contain '..'".to_string());
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err("asset path must contain a file name".to_string());
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
