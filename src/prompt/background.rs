use std::fmt::Write as _;

use crate::{
    foundation::error::AdLayoutResult,
    prompt::zone::synthesize_zone_guidance,
    template::model::{PositioningMode, Position, Template},
};

const DEFAULT_SCENE: &str = "A professional advertisement background";

/// Full background-generation instruction for `template`.
///
/// Zone templates describe where overlays will land and how the scene should receive them.
/// Pixel templates list the reserved areas that must stay clean. Both forbid rendered text.
pub fn background_prompt(template: &Template, content_prompt: &str) -> AdLayoutResult<String> {
    let def = template.def();
    let theme = match content_prompt.trim() {
        "" => DEFAULT_SCENE,
        s => s,
    };

    let mut out = String::new();
    out.push_str(theme);
    out.push_str("\n\n");
    if let Some(extra) = def.background_prompt.as_deref().map(str::trim)
        && !extra.is_empty()
    {
        out.push_str(extra);
        out.push_str("\n\n");
    }

    match template.mode() {
        PositioningMode::Zone => zone_section(template, &mut out)?,
        PositioningMode::Pixel => pixel_section(template, &mut out),
    }

    out.push_str("\nCONTENT RESTRICTIONS:\n");
    out.push_str("- Do not render any readable text, letters, or typography\n");
    out.push_str("- Do not render logos, brand names, prices or percentages\n");
    out.push_str("- All brand elements are overlaid after generation\n");

    if !def.design_rules.is_empty() {
        out.push_str("\nDESIGN RULES:\n");
        for rule in &def.design_rules {
            let _ = writeln!(out, "- {}", rule.trim());
        }
    }

    Ok(out.trim_end().to_string())
}

fn zone_section(template: &Template, out: &mut String) -> AdLayoutResult<()> {
    let def = template.def();
    out.push_str("COMPOSITION GUIDELINES:\n");
    let _ = writeln!(out, "- Canvas: {} pixels", def.canvas);
    let _ = writeln!(
        out,
        "- Style: {}, {} color scheme",
        def.background_style.style, def.background_style.color_scheme
    );

    let guidance = synthesize_zone_guidance(template.elements())?;
    if guidance.is_empty() {
        out.push_str(
            "- Keep visual elements balanced and not overly busy; overlays are added later\n",
        );
        return Ok(());
    }
    let _ = writeln!(out, "- Overlay placement: {guidance}");
    out.push_str("- Use softer colors or gentle blur inside those zones for readability\n");
    out.push_str("- Place the main visual interest away from the overlay zones\n");
    out.push_str("- Add scene lighting that would plausibly illuminate the overlays\n");
    Ok(())
}

fn pixel_section(template: &Template, out: &mut String) {
    let def = template.def();
    out.push_str("DESIGN REQUIREMENTS:\n");
    let _ = writeln!(out, "- Dimensions: {} pixels", def.canvas);
    let _ = writeln!(
        out,
        "- Style: {}, {} color scheme",
        def.background_style.style, def.background_style.color_scheme
    );
    out.push_str("- Create depth with gradients and lighting effects\n");
    out.push_str("\nRESERVED AREAS (keep visually clean for overlay):\n");
    for el in template.elements() {
        if let Position::Pixel { x, y } = el.position {
            let _ = writeln!(
                out,
                "- {} area: {}x{} pixels at ({x}, {y})",
                el.kind.as_str(),
                el.size.width,
                el.size.height
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/prompt/background.rs"]
mod tests;
