use std::collections::HashMap;

use crate::{
    assets::fonts::ResolvedFace,
    foundation::color::Rgba8,
};

/// Shrink step applied while a layout overflows its box.
const SHRINK_FACTOR: f32 = 0.8;

/// Sizing request for [`TextLayoutEngine::fit`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct FitBox {
    pub(crate) size_px: f32,
    pub(crate) min_px: f32,
    pub(crate) brush: Rgba8,
    pub(crate) width: f32,
    pub(crate) height: f32,
}

/// Text shaped for one box, with the size it ended up at.
pub(crate) struct FittedText {
    pub(crate) layout: parley::Layout<Rgba8>,
    pub(crate) font: vello_cpu::peniko::FontData,
    pub(crate) size_px: f32,
}

/// Stateful helper for building Parley layouts from resolved faces.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    families: HashMap<(String, u32), String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    fn family_for(&mut self, face: &ResolvedFace) -> anyhow::Result<String> {
        let key = (face.family.clone(), face.index);
        if let Some(name) = self.families.get(&key) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.data.as_ref().clone()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| anyhow::anyhow!("no font families registered from font bytes"))?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| anyhow::anyhow!("registered font family has no name"))?
            .to_string();

        self.families.insert(key, name.clone());
        Ok(name)
    }

    /// Shape `text` wrapped at `max_width_px`.
    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        face: &ResolvedFace,
        size_px: f32,
        brush: Rgba8,
        max_width_px: f32,
    ) -> anyhow::Result<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            anyhow::bail!("text size must be finite and > 0");
        }
        let family_name = self.family_for(face)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(Some(max_width_px));
        layout.align(
            Some(max_width_px),
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }

    /// Lay out `text` inside the box, shrinking by 20% steps down to `min_px`.
    pub(crate) fn fit(
        &mut self,
        text: &str,
        face: &ResolvedFace,
        req: FitBox,
    ) -> anyhow::Result<FittedText> {
        let min_px = req.min_px.max(1.0);
        let mut size = req.size_px.max(min_px);
        loop {
            let layout = self.layout_plain(text, face, size, req.brush, req.width)?;
            let overflows = layout.height() > req.height || layout.width() > req.width;
            if !overflows || size <= min_px {
                let font = vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(face.data.as_ref().clone()),
                    face.index,
                );
                return Ok(FittedText {
                    layout,
                    font,
                    size_px: size,
                });
            }
            size = (size * SHRINK_FACTOR).max(min_px);
        }
    }
}

/// Fill every glyph of `text` with its line centered in `box_width`, offset by `origin`.
///
/// `color` overrides the layout brush, e.g. for outline passes.
pub(crate) fn draw_centered(
    ctx: &mut vello_cpu::RenderContext,
    text: &FittedText,
    origin: (f64, f64),
    box_width: f32,
    color: Option<Rgba8>,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::translate(origin));
    for line in text.layout.lines() {
        let shift = ((box_width - line.metrics().advance) / 2.0).max(0.0);
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let c = color.unwrap_or(run.style().brush);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x + shift,
                y: g.y,
            });
            ctx.glyph_run(&text.font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
