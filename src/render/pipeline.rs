use image::RgbaImage;

use crate::{
    assets::{fonts::FontBook, store::BrandAssets},
    foundation::{
        color::ColorScheme,
        core::Canvas,
        error::AdLayoutResult,
    },
    layout::resolver::{LayoutWarning, pixel_scale, resolve_layout},
    prompt::background::background_prompt,
    render::compose::{ComposeOpts, compose},
    template::{
        model::{Element, PositioningMode, Template},
        vars::ContentVars,
    },
};

/// External image generator producing a background from a text prompt.
///
/// Errors are opaque and propagated unchanged; retries belong to the implementation.
pub trait BackgroundGenerator {
    /// Produce a background for `canvas` from `prompt`.
    fn generate(&self, prompt: &str, canvas: Canvas) -> anyhow::Result<RgbaImage>;
}

impl<F> BackgroundGenerator for F
where
    F: Fn(&str, Canvas) -> anyhow::Result<RgbaImage>,
{
    fn generate(&self, prompt: &str, canvas: Canvas) -> anyhow::Result<RgbaImage> {
        self(prompt, canvas)
    }
}

/// Composited image plus the non-fatal warnings collected while laying it out.
#[derive(Clone, Debug)]
pub struct RenderOutput {
    /// Final image, sized to the render target.
    pub image: RgbaImage,
    /// Clamping warnings, in z-order.
    pub warnings: Vec<LayoutWarning>,
}

/// Resolve `template` for `target` and draw its elements over `background`.
///
/// Placeholders are substituted from `vars` first. A background of the wrong size is resized to
/// `target`; the caller's image is never modified.
///
/// Pipeline:
/// 1. [`resolve_layout`]
/// 2. placeholder substitution
/// 3. [`compose`]
#[tracing::instrument(skip_all, fields(template = template.name(), target = %target))]
pub fn render_template(
    template: &Template,
    target: Canvas,
    background: &RgbaImage,
    vars: &ContentVars,
    assets: &mut BrandAssets,
    fonts: &FontBook,
    opts: &ComposeOpts,
) -> AdLayoutResult<RenderOutput> {
    target.validate()?;
    let layout = resolve_layout(template, target)?;

    let items: Vec<(Element, _)> = layout
        .pairs(template)
        .map(|(el, bbox)| {
            let mut el = el.clone();
            // Unresolved placeholders become blank so compose skips them.
            el.content = vars.resolve(&el.content).unwrap_or_default();
            (el, bbox)
        })
        .collect();

    let mut opts = opts.clone();
    if opts.scheme.is_none() {
        opts.scheme = Some(ColorScheme::named(
            &template.def().background_style.color_scheme,
        ));
    }
    if template.mode() == PositioningMode::Pixel {
        opts.font_scale *= pixel_scale(target, template.canvas()) as f32;
    }

    let image = if background.dimensions() == (target.width, target.height) {
        compose(background, &items, assets, fonts, &opts)?
    } else {
        tracing::warn!(
            got = %format!("{}x{}", background.width(), background.height()),
            "background size differs from target, resizing"
        );
        let resized = image::imageops::resize(
            background,
            target.width,
            target.height,
            image::imageops::FilterType::Lanczos3,
        );
        compose(&resized, &items, assets, fonts, &opts)?
    };

    Ok(RenderOutput {
        image,
        warnings: layout.warnings,
    })
}

/// Build the background prompt, ask `generator` for a background, then [`render_template`].
#[allow(clippy::too_many_arguments)]
#[tracing::instrument(skip_all, fields(template = template.name(), target = %target))]
pub fn generate_and_render(
    template: &Template,
    target: Canvas,
    content_prompt: &str,
    vars: &ContentVars,
    assets: &mut BrandAssets,
    fonts: &FontBook,
    opts: &ComposeOpts,
    generator: &dyn BackgroundGenerator,
) -> AdLayoutResult<RenderOutput> {
    target.validate()?;
    // Geometry problems surface before the generator is called.
    resolve_layout(template, target)?;

    let prompt = background_prompt(template, content_prompt)?;
    tracing::debug!(chars = prompt.len(), "requesting background");
    let background = generator.generate(&prompt, target)?;
    render_template(template, target, &background, vars, assets, fonts, opts)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
