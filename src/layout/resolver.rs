use crate::{
    foundation::{
        core::{Canvas, ResolvedBox, Size},
        error::{AdLayoutError, AdLayoutResult},
        math::scale_px,
    },
    template::model::{Element, Position, Template, Zone},
};

/// Non-fatal layout problem surfaced next to a resolved box.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LayoutWarning {
    /// Element id.
    pub element: String,
    /// Size the element declared.
    pub declared: Size,
    /// Canvas it was resolved against.
    pub canvas: Canvas,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layout warning for '{}': {}", self.element, self.message)
    }
}

/// Resolved box for one element, plus an optional warning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// In-bounds box.
    pub bbox: ResolvedBox,
    /// Set when the declared geometry had to be clamped.
    pub warning: Option<LayoutWarning>,
}

/// Boxes for every element of a template, index-aligned with [`Template::elements`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedLayout {
    /// Canvas the boxes were resolved against.
    pub canvas: Canvas,
    /// One box per element, in z-order.
    pub boxes: Vec<ResolvedBox>,
    /// Clamping warnings, in z-order.
    pub warnings: Vec<LayoutWarning>,
}

impl ResolvedLayout {
    /// Pair each element of `template` with its box.
    pub fn pairs<'a>(
        &'a self,
        template: &'a Template,
    ) -> impl Iterator<Item = (&'a Element, ResolvedBox)> + 'a {
        template.elements().iter().zip(self.boxes.iter().copied())
    }
}

/// Horizontal/vertical anchor of a zone, as a fraction of the free space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Anchor {
    Start,
    Center,
    End,
}

impl Anchor {
    fn offset(self, container: u32, content: u32) -> u32 {
        let free = container.saturating_sub(content);
        match self {
            Anchor::Start => 0,
            Anchor::Center => free / 2,
            Anchor::End => free,
        }
    }
}

fn zone_anchors(zone: Zone) -> (Anchor, Anchor) {
    use Anchor::*;
    match zone {
        Zone::TopLeft => (Start, Start),
        Zone::TopCenter => (Center, Start),
        Zone::TopRight => (End, Start),
        Zone::CenterLeft => (Start, Center),
        Zone::Center => (Center, Center),
        Zone::CenterRight => (End, Center),
        Zone::BottomLeft => (Start, End),
        Zone::BottomCenter => (Center, End),
        Zone::BottomRight => (End, End),
    }
}

/// Resolve one element declared against `nominal` onto the `target` canvas.
pub fn resolve_element(
    target: Canvas,
    nominal: Canvas,
    element: &Element,
) -> AdLayoutResult<Placement> {
    target.validate()?;
    match &element.position {
        Position::Pixel { x, y } => {
            resolve_pixel(target, nominal, &element.id, *x, *y, element.size).map(|bbox| {
                Placement {
                    bbox,
                    warning: None,
                }
            })
        }
        Position::Zone { zone, .. } => Ok(resolve_zone(target, &element.id, *zone, element.size)),
    }
}

/// Pixel mode: identity on the nominal canvas, uniform `target.width / nominal.width` scale
/// otherwise. Out-of-bounds results on the target are errors, never clamped.
pub fn resolve_pixel(
    target: Canvas,
    nominal: Canvas,
    id: &str,
    x: i64,
    y: i64,
    size: Size,
) -> AdLayoutResult<ResolvedBox> {
    nominal.validate()?;
    if x < 0 || y < 0 {
        return Err(AdLayoutError::invalid_geometry(
            id,
            format!("negative offset ({x}, {y})"),
        ));
    }
    if size.width == 0 || size.height == 0 {
        return Err(AdLayoutError::invalid_geometry(id, "empty size"));
    }

    let too_far = || AdLayoutError::invalid_geometry(id, "offset does not fit in 32 bits");
    let edge = |start: i64, len: u32| {
        start
            .checked_add(i64::from(len))
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(too_far)
    };
    let right = edge(x, size.width)?;
    let bottom = edge(y, size.height)?;
    let (x, y) = (x as u32, y as u32);

    let (x0, y0, x1, y1) = if target.width == nominal.width {
        (
            i64::from(x),
            i64::from(y),
            i64::from(right),
            i64::from(bottom),
        )
    } else {
        let s = pixel_scale(target, nominal);
        let (x0, y0) = (scale_px(x, s), scale_px(y, s));
        (
            x0,
            y0,
            scale_px(right, s).max(x0 + 1),
            scale_px(bottom, s).max(y0 + 1),
        )
    };

    if x1 > i64::from(target.width) || y1 > i64::from(target.height) {
        return Err(AdLayoutError::invalid_geometry(
            id,
            format!(
                "box ({x0}, {y0})-({x1}, {y1}) extends past target canvas {target} \
                 (nominal {nominal})"
            ),
        ));
    }

    // All four values are in [0, target] here.
    Ok(ResolvedBox {
        x: x0 as u32,
        y: y0 as u32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    })
}

/// Zone mode: `anchor * (canvas - element)` per axis, clamped into the canvas.
///
/// Elements larger than the canvas are shrunk to the canvas and reported with a warning.
pub fn resolve_zone(target: Canvas, id: &str, zone: Zone, size: Size) -> Placement {
    let (ax, ay) = zone_anchors(zone);
    let width = size.width.min(target.width);
    let height = size.height.min(target.height);
    let bbox = ResolvedBox {
        x: ax.offset(target.width, width),
        y: ay.offset(target.height, height),
        width,
        height,
    };

    let warning = (width != size.width || height != size.height).then(|| {
        let message = format!(
            "declared {}x{} exceeds canvas {target}; clamped to {width}x{height}",
            size.width, size.height
        );
        tracing::warn!(element = id, %zone, "{message}");
        LayoutWarning {
            element: id.to_string(),
            declared: size,
            canvas: target,
            message,
        }
    });

    Placement { bbox, warning }
}

/// Resolve every element of `template` for the `target` canvas.
#[tracing::instrument(skip_all, fields(template = template.name(), target = %target))]
pub fn resolve_layout(template: &Template, target: Canvas) -> AdLayoutResult<ResolvedLayout> {
    let mut boxes = Vec::with_capacity(template.elements().len());
    let mut warnings = Vec::new();
    for el in template.elements() {
        let placed = resolve_element(target, template.canvas(), el)?;
        tracing::debug!(
            element = %el.id,
            x = placed.bbox.x,
            y = placed.bbox.y,
            w = placed.bbox.width,
            h = placed.bbox.height,
            "placed"
        );
        boxes.push(placed.bbox);
        warnings.extend(placed.warning);
    }
    Ok(ResolvedLayout {
        canvas: target,
        boxes,
        warnings,
    })
}

/// Uniform pixel scale between a nominal and a target canvas.
pub(crate) fn pixel_scale(target: Canvas, nominal: Canvas) -> f64 {
    f64::from(target.width) / f64::from(nominal.width.max(1))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/resolver.rs"]
mod tests;
