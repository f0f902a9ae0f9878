use crate::{
    foundation::error::{AdLayoutError, AdLayoutResult},
    template::model::{Element, Position},
};

/// Separator placed between per-element clauses.
pub const CLAUSE_CONNECTIVE: &str = "; ";

/// Instruction appended after the clauses.
pub const CLOSING_INSTRUCTION: &str = "Keep every declared zone visually uncluttered so the \
    overlaid elements stay legible, and match lighting and depth across all zones so the \
    overlays read as part of one coherent scene.";

/// Placement clause for one zone element.
pub fn zone_clause(element: &Element) -> AdLayoutResult<String> {
    let Position::Zone {
        zone,
        style,
        integration,
    } = &element.position
    else {
        return Err(AdLayoutError::invalid_geometry(
            &element.id,
            "zone guidance requires a zone position",
        ));
    };
    Ok(format!(
        "{} in {} (style: {}) ({})",
        element.kind.as_str(),
        zone,
        non_blank(style.as_deref()).unwrap_or("default"),
        non_blank(integration.as_deref()).unwrap_or("standard overlay"),
    ))
}

/// Guidance text for the background generator, built from zone elements in z-order.
///
/// Empty input yields an empty string. Output depends only on the input order and content.
pub fn synthesize_zone_guidance(elements: &[Element]) -> AdLayoutResult<String> {
    if elements.is_empty() {
        return Ok(String::new());
    }
    let clauses = elements
        .iter()
        .map(zone_clause)
        .collect::<AdLayoutResult<Vec<_>>>()?;
    Ok(format!(
        "{}. {CLOSING_INSTRUCTION}",
        clauses.join(CLAUSE_CONNECTIVE)
    ))
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "../../tests/unit/prompt/zone.rs"]
mod tests;
