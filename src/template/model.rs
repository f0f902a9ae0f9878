use std::{collections::HashSet, fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::foundation::{
    core::{Canvas, Size},
    error::{AdLayoutError, AdLayoutResult, TEMPLATE_SCOPE},
};

/// How every element of a template declares its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositioningMode {
    /// Absolute `{x, y}` offsets.
    Pixel,
    /// Semantic nine-zone placement.
    Zone,
}

impl PositioningMode {
    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pixel => "pixel",
            Self::Zone => "zone",
        }
    }
}

/// Kind of brand element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    /// Raster or SVG logo.
    Logo,
    /// Headline, usually the brand or client name.
    Title,
    /// Short supporting line.
    Tagline,
    /// Main message body.
    #[serde(alias = "content-text")]
    Content,
    /// Call-to-action button.
    Cta,
}

impl ElementKind {
    /// Stable name used in prompts and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::Title => "title",
            Self::Tagline => "tagline",
            Self::Content => "content",
            Self::Cta => "cta",
        }
    }

    /// `true` for kinds rendered as text (including the CTA label).
    pub fn is_text(self) -> bool {
        !matches!(self, Self::Logo)
    }
}

/// One of the nine semantic canvas regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Zone {
    /// Top row, left column.
    TopLeft,
    /// Top row, middle column.
    TopCenter,
    /// Top row, right column.
    TopRight,
    /// Middle row, left column.
    CenterLeft,
    /// Canvas center.
    Center,
    /// Middle row, right column.
    CenterRight,
    /// Bottom row, left column.
    BottomLeft,
    /// Bottom row, middle column.
    BottomCenter,
    /// Bottom row, right column.
    BottomRight,
}

impl Zone {
    /// All zones in row-major order.
    pub const ALL: [Zone; 9] = [
        Zone::TopLeft,
        Zone::TopCenter,
        Zone::TopRight,
        Zone::CenterLeft,
        Zone::Center,
        Zone::CenterRight,
        Zone::BottomLeft,
        Zone::BottomCenter,
        Zone::BottomRight,
    ];

    /// Stable kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Zone::TopLeft => "top-left",
            Zone::TopCenter => "top-center",
            Zone::TopRight => "top-right",
            Zone::CenterLeft => "center-left",
            Zone::Center => "center",
            Zone::CenterRight => "center-right",
            Zone::BottomLeft => "bottom-left",
            Zone::BottomCenter => "bottom-center",
            Zone::BottomRight => "bottom-right",
        }
    }

    /// Parse a kebab-case zone name.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|z| z.as_str() == name)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared element position; the variant must match the template's mode.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "PositionRepr", into = "PositionRepr")]
pub enum Position {
    /// Absolute top-left offset in nominal canvas pixels.
    Pixel {
        /// Left edge.
        x: i64,
        /// Top edge.
        y: i64,
    },
    /// Semantic zone with prompt-only hints.
    Zone {
        /// Target zone.
        zone: Zone,
        /// Free-text style hint for background generation.
        style: Option<String>,
        /// Free-text integration hint for background generation.
        integration: Option<String>,
    },
}

impl Position {
    /// Mode this variant belongs to.
    pub fn mode(&self) -> PositioningMode {
        match self {
            Position::Pixel { .. } => PositioningMode::Pixel,
            Position::Zone { .. } => PositioningMode::Zone,
        }
    }

    /// Zone position without hints.
    pub fn zone(zone: Zone) -> Self {
        Position::Zone {
            zone,
            style: None,
            integration: None,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
struct PositionRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    integration: Option<String>,
}

impl TryFrom<PositionRepr> for Position {
    type Error = String;

    fn try_from(r: PositionRepr) -> Result<Self, Self::Error> {
        match (r.zone, r.x, r.y) {
            (Some(name), None, None) => {
                let zone = Zone::parse(&name).ok_or_else(|| format!("unknown zone '{name}'"))?;
                Ok(Position::Zone {
                    zone,
                    style: r.style,
                    integration: r.integration,
                })
            }
            (None, Some(x), Some(y)) => Ok(Position::Pixel { x, y }),
            (Some(_), _, _) => Err("position must not mix 'zone' with 'x'/'y'".to_string()),
            (None, _, _) => Err("position needs either 'zone' or both 'x' and 'y'".to_string()),
        }
    }
}

impl From<Position> for PositionRepr {
    fn from(p: Position) -> Self {
        match p {
            Position::Pixel { x, y } => PositionRepr {
                x: Some(x),
                y: Some(y),
                zone: None,
                style: None,
                integration: None,
            },
            Position::Zone {
                zone,
                style,
                integration,
            } => PositionRepr {
                x: None,
                y: None,
                zone: Some(zone.as_str().to_string()),
                style,
                integration,
            },
        }
    }
}

/// Optional rendering hints. Every field is consumed softly: unusable values fall back.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementStyle {
    /// Preferred font family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font size in pixels at nominal scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// Text color hint (text kinds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Button fill color hint (cta).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    /// Button label color hint (cta).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    /// Button corner radius in pixels (cta).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f32>,
    /// Opacity multiplier in `[0, 1]` (logo).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

/// A placeable brand element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Element {
    /// Identifier, unique within the template.
    pub id: String,
    /// Element kind.
    pub kind: ElementKind,
    /// Literal text, logo reference, or a `{{placeholder}}` token.
    #[serde(default)]
    pub content: String,
    /// Declared position.
    pub position: Position,
    /// Declared size in absolute pixels.
    pub size: Size,
    /// Rendering hints.
    #[serde(default)]
    pub style: ElementStyle,
}

/// Background look requested from the generator.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BackgroundStyle {
    /// Visual style, e.g. `modern`.
    #[serde(default = "default_style")]
    pub style: String,
    /// Color scheme name, see [`crate::ColorScheme`].
    #[serde(default = "default_color_scheme")]
    pub color_scheme: String,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            style: default_style(),
            color_scheme: default_color_scheme(),
        }
    }
}

fn default_style() -> String {
    "modern".to_string()
}

fn default_color_scheme() -> String {
    "Brand Colors".to_string()
}

/// JSON-facing, editable template definition.
///
/// Convert into a [`Template`] to validate it; only validated templates can be resolved or
/// rendered.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TemplateDef {
    /// Template display name.
    pub name: String,
    /// Nominal canvas the positions were authored against.
    pub canvas: Canvas,
    /// Positioning mode shared by all elements.
    #[serde(alias = "positioning_mode")]
    pub mode: PositioningMode,
    /// Elements in z-order, back to front.
    pub elements: Vec<Element>,
    /// Requested background look.
    #[serde(default)]
    pub background_style: BackgroundStyle,
    /// Free-form scene rules appended to generation prompts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub design_rules: Vec<String>,
    /// Template-specific background instruction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_prompt: Option<String>,
}

/// A validated template. Its mode is fixed and every element matches it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "TemplateDef", into = "TemplateDef")]
pub struct Template {
    def: TemplateDef,
}

impl Template {
    /// Validate a definition.
    #[tracing::instrument(skip(def), fields(name = %def.name))]
    pub fn from_def(def: TemplateDef) -> AdLayoutResult<Self> {
        validate_def(&def)?;
        Ok(Self { def })
    }

    /// Parse and validate a template from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> AdLayoutResult<Self> {
        let def: TemplateDef = serde_json::from_reader(r)
            .map_err(|e| AdLayoutError::serde(format!("parse template JSON: {e}")))?;
        Self::from_def(def)
    }

    /// Parse and validate a template from a JSON string.
    pub fn from_json_str(s: &str) -> AdLayoutResult<Self> {
        let def: TemplateDef = serde_json::from_str(s)
            .map_err(|e| AdLayoutError::serde(format!("parse template JSON: {e}")))?;
        Self::from_def(def)
    }

    /// Parse and validate a template from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> AdLayoutResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open template JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty JSON for persisting the template.
    pub fn to_json_pretty(&self) -> AdLayoutResult<String> {
        serde_json::to_string_pretty(&self.def)
            .map_err(|e| AdLayoutError::serde(format!("serialize template JSON: {e}")))
    }

    /// Template name.
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Nominal canvas.
    pub fn canvas(&self) -> Canvas {
        self.def.canvas
    }

    /// Positioning mode.
    pub fn mode(&self) -> PositioningMode {
        self.def.mode
    }

    /// Elements in z-order.
    pub fn elements(&self) -> &[Element] {
        &self.def.elements
    }

    /// Underlying definition.
    pub fn def(&self) -> &TemplateDef {
        &self.def
    }

    /// Give the definition back for editing; re-validate with [`Template::from_def`].
    pub fn into_def(self) -> TemplateDef {
        self.def
    }
}

impl TryFrom<TemplateDef> for Template {
    type Error = AdLayoutError;

    fn try_from(def: TemplateDef) -> Result<Self, Self::Error> {
        Self::from_def(def)
    }
}

impl From<Template> for TemplateDef {
    fn from(t: Template) -> Self {
        t.def
    }
}

fn validate_def(def: &TemplateDef) -> AdLayoutResult<()> {
    if def.name.trim().is_empty() {
        return Err(AdLayoutError::invalid_geometry(
            TEMPLATE_SCOPE,
            "template name must be non-empty",
        ));
    }
    def.canvas.validate()?;

    let mut seen = HashSet::<&str>::with_capacity(def.elements.len());
    for el in &def.elements {
        if el.id.trim().is_empty() {
            return Err(AdLayoutError::invalid_geometry(
                TEMPLATE_SCOPE,
                format!("{} element has an empty id", el.kind.as_str()),
            ));
        }
        if !seen.insert(el.id.as_str()) {
            return Err(AdLayoutError::invalid_geometry(
                &el.id,
                "duplicate element id",
            ));
        }
        validate_element(def.canvas, def.mode, el)?;
    }
    Ok(())
}

fn validate_element(canvas: Canvas, mode: PositioningMode, el: &Element) -> AdLayoutResult<()> {
    if el.size.width == 0 || el.size.height == 0 {
        return Err(AdLayoutError::invalid_geometry(
            &el.id,
            format!(
                "size must be non-empty, got {}x{}",
                el.size.width, el.size.height
            ),
        ));
    }

    if el.position.mode() != mode {
        return Err(AdLayoutError::invalid_geometry(
            &el.id,
            format!(
                "{} position in a {}-mode template",
                el.position.mode().as_str(),
                mode.as_str()
            ),
        ));
    }

    if let Position::Pixel { x, y } = el.position {
        check_pixel_bounds(&el.id, x, y, el.size, canvas)?;
    }
    Ok(())
}

fn check_pixel_bounds(
    id: &str,
    x: i64,
    y: i64,
    size: Size,
    canvas: Canvas,
) -> AdLayoutResult<()> {
    if x < 0 || y < 0 {
        return Err(AdLayoutError::invalid_geometry(
            id,
            format!("negative offset ({x}, {y})"),
        ));
    }
    let past = || {
        AdLayoutError::invalid_geometry(
            id,
            format!(
                "box ({x}, {y}) {}x{} extends past canvas {canvas}",
                size.width, size.height
            ),
        )
    };
    let right = x.checked_add(i64::from(size.width)).ok_or_else(past)?;
    let bottom = y.checked_add(i64::from(size.height)).ok_or_else(past)?;
    if right > i64::from(canvas.width) || bottom > i64::from(canvas.height) {
        return Err(past());
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/template/model.rs"]
mod tests;
