use vello_cpu::kurbo::Shape as _;

use crate::{
    assets::{
        decode::{rasterize_svg_to_premul_rgba8, resize_to_premul_rgba8},
        fonts::FontBook,
        store::{BrandAssets, LogoSource},
    },
    foundation::{
        color::{ColorScheme, Rgba8},
        core::ResolvedBox,
        error::{AdLayoutError, AdLayoutResult, TEMPLATE_SCOPE},
        math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
    },
    render::{
        composite::{image_paint_from_premul, over_in_place},
        text::{FitBox, TextLayoutEngine, draw_centered},
    },
    template::{
        model::{Element, ElementKind},
        vars::drawable,
    },
};

const PROMO_KEYWORDS: [&str; 7] = ["sale", "off", "%", "discount", "deal", "special", "limited"];

/// Render-time knobs for [`compose`].
#[derive(Clone, Debug)]
pub struct ComposeOpts {
    /// Palette used when elements carry no color hint. `None` uses the template's scheme when
    /// rendering a template, [`ColorScheme::BRAND`] otherwise.
    pub scheme: Option<ColorScheme>,
    /// Smallest font size shrink-to-fit may reach.
    pub min_font_px: f32,
    /// Width of the dark outline drawn behind free-standing text. `0` disables it.
    pub outline_px: f32,
    /// Outline color.
    pub outline_color: Rgba8,
    /// CTA corner radius when the element has none.
    pub cta_radius_px: f32,
    /// Multiplier applied to every font size, e.g. the pixel scale of a resized template.
    pub font_scale: f32,
    /// Families tried, in order, when an element's font hint is unavailable.
    pub fallback_families: Vec<String>,
}

impl Default for ComposeOpts {
    fn default() -> Self {
        Self {
            scheme: None,
            min_font_px: 12.0,
            outline_px: 2.0,
            outline_color: Rgba8 {
                r: 0,
                g: 0,
                b: 0,
                a: 200,
            },
            cta_radius_px: 10.0,
            font_scale: 1.0,
            fallback_families: ["Arial", "Helvetica", "DejaVu Sans", "Liberation Sans"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Font size used for a kind when the element has no usable hint.
pub fn default_font_px(kind: ElementKind) -> f32 {
    match kind {
        ElementKind::Title => 60.0,
        ElementKind::Tagline => 30.0,
        ElementKind::Content => 40.0,
        ElementKind::Cta | ElementKind::Logo => 35.0,
    }
}

/// `true` when `text` reads like a promotion (sale, discount, percentages, ...).
pub fn is_promotional(text: &str) -> bool {
    let lower = text.to_lowercase();
    PROMO_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Draw `items` over a copy of `background`, in order, and return the new image.
///
/// Each element's content must already be resolved. Text whose content is blank or still an
/// unresolved `{{placeholder}}` is skipped, as are logos without a reference.
#[tracing::instrument(skip_all, fields(elements = items.len()))]
pub fn compose(
    background: &image::RgbaImage,
    items: &[(Element, ResolvedBox)],
    assets: &mut BrandAssets,
    fonts: &FontBook,
    opts: &ComposeOpts,
) -> AdLayoutResult<image::RgbaImage> {
    let (width, height) = background.dimensions();
    if width == 0 || height == 0 {
        return Err(AdLayoutError::compositing(
            TEMPLATE_SCOPE,
            "background image is empty",
        ));
    }
    let too_large = || {
        AdLayoutError::compositing(
            TEMPLATE_SCOPE,
            format!("canvas {width}x{height} exceeds the 65535 px rasterizer limit"),
        )
    };
    let w16: u16 = width.try_into().map_err(|_| too_large())?;
    let h16: u16 = height.try_into().map_err(|_| too_large())?;

    let canvas = crate::foundation::core::Canvas { width, height };
    if let Some((el, b)) = items.iter().find(|(_, b)| !b.fits(canvas)) {
        return Err(AdLayoutError::invalid_geometry(
            &el.id,
            format!(
                "box ({}, {}) {}x{} is outside canvas {canvas}",
                b.x, b.y, b.width, b.height
            ),
        ));
    }

    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    let mut engine = TextLayoutEngine::new();
    let scheme = opts.scheme.unwrap_or_default();

    for (el, bbox) in items {
        if bbox.width == 0 || bbox.height == 0 {
            tracing::debug!(element = %el.id, "empty box, skipping");
            continue;
        }
        let content = drawable(&el.content);
        match el.kind {
            ElementKind::Logo => {
                let Some(content) = content else {
                    tracing::debug!(element = %el.id, "no logo supplied, skipping");
                    continue;
                };
                draw_logo(&mut ctx, assets, el, content, *bbox)?;
            }
            ElementKind::Cta => {
                draw_cta(&mut ctx, opts.cta_radius_px, &scheme, el, *bbox);
                if let Some(content) = content {
                    let color = Rgba8::from_hint_or(el.style.text_color.as_deref(), Rgba8::WHITE);
                    draw_text(&mut ctx, &mut engine, fonts, opts, el, content, *bbox, color, false);
                }
            }
            ElementKind::Title | ElementKind::Tagline | ElementKind::Content => {
                let Some(content) = content else {
                    tracing::debug!(element = %el.id, "unresolved text content, skipping");
                    continue;
                };
                let color = Rgba8::from_hint_or(
                    el.style.color.as_deref(),
                    default_text_color(el.kind, content, &scheme),
                );
                draw_text(&mut ctx, &mut engine, fonts, opts, el, content, *bbox, color, true);
            }
        }
    }

    ctx.flush();
    let mut overlay = vello_cpu::Pixmap::new(w16, h16);
    ctx.render_to_pixmap(&mut overlay);

    let mut out = background.as_raw().clone();
    premultiply_rgba8_in_place(&mut out);
    over_in_place(&mut out, overlay.data_as_u8_slice(), 1.0)?;
    unpremultiply_rgba8_in_place(&mut out);

    image::RgbaImage::from_raw(width, height, out).ok_or_else(|| {
        AdLayoutError::compositing(TEMPLATE_SCOPE, "composited buffer has the wrong size")
    })
}

fn default_text_color(kind: ElementKind, text: &str, scheme: &ColorScheme) -> Rgba8 {
    match kind {
        ElementKind::Tagline => scheme.secondary,
        ElementKind::Content if is_promotional(text) => scheme.accent,
        _ => scheme.primary,
    }
}

fn draw_logo(
    ctx: &mut vello_cpu::RenderContext,
    assets: &mut BrandAssets,
    el: &Element,
    reference: &str,
    bbox: ResolvedBox,
) -> AdLayoutResult<()> {
    let src = assets.logo(&el.id, reference)?;
    let (lw, lh) = src.size_px();
    if lw == 0 || lh == 0 {
        return Err(AdLayoutError::compositing(&el.id, "logo image is empty"));
    }
    let s = (f64::from(bbox.width) / f64::from(lw)).min(f64::from(bbox.height) / f64::from(lh));
    let fw = ((f64::from(lw) * s).round() as u32).clamp(1, bbox.width);
    let fh = ((f64::from(lh) * s).round() as u32).clamp(1, bbox.height);
    let ox = bbox.x + (bbox.width - fw) / 2;
    let oy = bbox.y + (bbox.height - fh) / 2;

    let premul = match &src {
        LogoSource::Raster(img) => resize_to_premul_rgba8(img, fw, fh),
        LogoSource::Svg(tree) => rasterize_svg_to_premul_rgba8(tree, fw, fh)
            .map_err(|e| AdLayoutError::compositing(&el.id, format!("{e:#}")))?,
    };
    let paint = image_paint_from_premul(&el.id, &premul, fw, fh)?;

    let opacity = match el.style.opacity {
        Some(o) if o.is_finite() => o.clamp(0.0, 1.0),
        Some(_) => {
            tracing::warn!(element = %el.id, "non-finite logo opacity, using 1");
            1.0
        }
        None => 1.0,
    };

    tracing::debug!(element = %el.id, x = ox, y = oy, w = fw, h = fh, "draw logo");
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        f64::from(ox),
        f64::from(oy),
    )));
    ctx.set_paint(paint);
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity);
    }
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(fw), f64::from(fh)));
    if opacity < 1.0 {
        ctx.pop_layer();
    }
    Ok(())
}

fn rect_to_cpu(r: kurbo::Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn draw_cta(
    ctx: &mut vello_cpu::RenderContext,
    default_radius: f32,
    scheme: &ColorScheme,
    el: &Element,
    bbox: ResolvedBox,
) {
    let fill = Rgba8::from_hint_or(el.style.bg_color.as_deref(), scheme.cta_bg);
    let max_radius = f64::from(bbox.width.min(bbox.height)) / 2.0;
    let radius = match el.style.border_radius {
        Some(r) if r.is_finite() => f64::from(r),
        _ => f64::from(default_radius),
    }
    .clamp(0.0, max_radius);

    let rect = rect_to_cpu(bbox.to_rect());
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        fill.r, fill.g, fill.b, fill.a,
    ));
    if radius <= 0.0 {
        ctx.fill_rect(&rect);
    } else {
        let rounded = vello_cpu::kurbo::RoundedRect::from_rect(rect, radius);
        ctx.fill_path(&rounded.to_path(0.1));
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    engine: &mut TextLayoutEngine,
    fonts: &FontBook,
    opts: &ComposeOpts,
    el: &Element,
    text: &str,
    bbox: ResolvedBox,
    color: Rgba8,
    outline: bool,
) {
    let requested = el.style.font_family.as_deref();
    let Some(face) = fonts.resolve(requested, &opts.fallback_families) else {
        tracing::warn!(element = %el.id, "no font face available, skipping text");
        return;
    };
    if let Some(req) = requested
        && !face.exact
    {
        tracing::warn!(
            element = %el.id,
            requested = req,
            using = %face.family,
            "font hint unavailable"
        );
    }

    let base = match el.style.font_size {
        Some(s) if s.is_finite() && s > 0.0 => s,
        Some(s) => {
            tracing::warn!(element = %el.id, size = s, "invalid font size hint");
            default_font_px(el.kind)
        }
        None => default_font_px(el.kind),
    };
    let scale = if opts.font_scale.is_finite() && opts.font_scale > 0.0 {
        opts.font_scale
    } else {
        1.0
    };

    let pad = if el.kind == ElementKind::Cta { 8.0 } else { 0.0 };
    let box_w = (bbox.width as f32 - 2.0 * pad).max(1.0);
    let box_h = (bbox.height as f32 - 2.0 * pad).max(1.0);
    let fitted = match engine.fit(
        text,
        &face,
        FitBox {
            size_px: base * scale,
            min_px: opts.min_font_px,
            brush: color,
            width: box_w,
            height: box_h,
        },
    ) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(element = %el.id, error = %e, "text layout failed, skipping text");
            return;
        }
    };

    let ox = f64::from(bbox.x) + f64::from(pad);
    let oy = f64::from(bbox.y)
        + f64::from(pad)
        + f64::from(((box_h - fitted.layout.height()) / 2.0).max(0.0));
    tracing::debug!(element = %el.id, size = fitted.size_px, "draw text");

    let o = f64::from(opts.outline_px.max(0.0));
    if outline && o > 0.0 {
        for (dx, dy) in [
            (-o, -o),
            (0.0, -o),
            (o, -o),
            (-o, 0.0),
            (o, 0.0),
            (-o, o),
            (0.0, o),
            (o, o),
        ] {
            draw_centered(ctx, &fitted, (ox + dx, oy + dy), box_w, Some(opts.outline_color));
        }
    }
    draw_centered(ctx, &fitted, (ox, oy), box_w, None);
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
