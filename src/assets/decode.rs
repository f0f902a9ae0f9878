use std::path::Path;

use anyhow::Context;

use crate::foundation::math::premultiply_rgba8_in_place;

/// Largest side an SVG logo may be rasterized at.
const MAX_SVG_DIM: u32 = 16_384;

/// `true` when the reference or the bytes look like an SVG document.
pub(crate) fn looks_like_svg(reference: &str, bytes: &[u8]) -> bool {
    let by_ext = Path::new(reference)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if by_ext {
        return true;
    }
    let head = &bytes[..bytes.len().min(256)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

/// Decode a raster logo into straight-alpha RGBA8.
pub(crate) fn decode_raster(bytes: &[u8]) -> anyhow::Result<image::RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        anyhow::bail!("decoded image is empty");
    }
    Ok(rgba)
}

/// Parse an SVG logo, resolving relative resources against `resources_dir`.
pub(crate) fn parse_svg(bytes: &[u8], resources_dir: Option<&Path>) -> anyhow::Result<usvg::Tree> {
    let opts = usvg::Options {
        resources_dir: resources_dir.map(Path::to_path_buf),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    let size = tree.size();
    if !(size.width().is_finite() && size.height().is_finite())
        || size.width() <= 0.0
        || size.height() <= 0.0
    {
        anyhow::bail!("svg has invalid width/height");
    }
    Ok(tree)
}

/// Intrinsic SVG size rounded up to whole pixels.
pub(crate) fn svg_size_px(tree: &usvg::Tree) -> (u32, u32) {
    let size = tree.size();
    (
        (size.width().ceil() as u32).max(1),
        (size.height().ceil() as u32).max(1),
    )
}

/// Rasterize an SVG tree to exactly `width`x`height` premultiplied RGBA8.
pub(crate) fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> anyhow::Result<Vec<u8>> {
    if width > MAX_SVG_DIM || height > MAX_SVG_DIM {
        anyhow::bail!("svg raster size too large: {width}x{height} (max {MAX_SVG_DIM})");
    }
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .context("failed to allocate svg pixmap")?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

/// Resize a straight-alpha image to `width`x`height` and return premultiplied bytes.
pub(crate) fn resize_to_premul_rgba8(img: &image::RgbaImage, width: u32, height: u32) -> Vec<u8> {
    let mut bytes = if img.dimensions() == (width, height) {
        img.as_raw().clone()
    } else {
        image::imageops::resize(img, width, height, image::imageops::FilterType::Lanczos3)
            .into_raw()
    };
    premultiply_rgba8_in_place(&mut bytes);
    bytes
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
