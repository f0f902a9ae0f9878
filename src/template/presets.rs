use crate::{
    foundation::{
        core::{Canvas, Size},
        error::AdLayoutResult,
    },
    template::{
        model::{
            BackgroundStyle, Element, ElementKind, ElementStyle, Position, PositioningMode,
            Template, TemplateDef, Zone,
        },
        vars,
    },
};

/// Built-in pixel layout.
#[derive(Clone, Copy, Debug)]
pub struct Preset {
    /// Stable identifier, e.g. `billboard_horizontal`.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Nominal canvas.
    pub canvas: Canvas,
    /// `[x, y, width, height]` areas for logo, title, tagline, content and cta.
    pub areas: [[u32; 4]; 5],
    /// Background instruction stored on the template.
    pub background_prompt: &'static str,
}

const AREA_KINDS: [ElementKind; 5] = [
    ElementKind::Logo,
    ElementKind::Title,
    ElementKind::Tagline,
    ElementKind::Content,
    ElementKind::Cta,
];

/// All built-in presets.
pub const PRESETS: [Preset; 3] = [
    Preset {
        id: "billboard_horizontal",
        name: "Billboard Horizontal",
        canvas: Canvas {
            width: 1920,
            height: 1080,
        },
        areas: [
            [50, 50, 300, 150],
            [400, 50, 1000, 200],
            [400, 250, 800, 80],
            [50, 350, 1200, 500],
            [1300, 750, 400, 150],
        ],
        background_prompt: "Create vibrant background design for outdoor billboard with high contrast and bold visual elements",
    },
    Preset {
        id: "social_media_square",
        name: "Social Media Square",
        canvas: Canvas {
            width: 1080,
            height: 1080,
        },
        areas: [
            [50, 50, 200, 100],
            [50, 180, 980, 160],
            [50, 360, 800, 70],
            [50, 450, 980, 350],
            [50, 820, 300, 100],
        ],
        background_prompt: "Create modern, mobile-friendly background design with engaging colors and clean layout",
    },
    Preset {
        id: "web_banner_wide",
        name: "Web Banner Wide",
        canvas: Canvas {
            width: 728,
            height: 300,
        },
        areas: [
            [20, 20, 150, 75],
            [200, 20, 400, 100],
            [200, 120, 350, 40],
            [20, 170, 500, 100],
            [550, 200, 150, 60],
        ],
        background_prompt: "Create clean web-optimized background design with professional appearance and clear visual hierarchy",
    },
];

/// Look up a preset by id.
pub fn preset(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id == id)
}

impl Preset {
    /// Build the validated pixel-mode template for this preset.
    pub fn template(&self) -> AdLayoutResult<Template> {
        let elements = AREA_KINDS
            .iter()
            .zip(self.areas)
            .map(|(&kind, [x, y, w, h])| {
                default_element(
                    kind,
                    Position::Pixel {
                        x: i64::from(x),
                        y: i64::from(y),
                    },
                    Size {
                        width: w,
                        height: h,
                    },
                )
            })
            .collect();

        Template::from_def(TemplateDef {
            name: self.name.to_string(),
            canvas: self.canvas,
            mode: PositioningMode::Pixel,
            elements,
            background_style: BackgroundStyle::default(),
            design_rules: Vec::new(),
            background_prompt: Some(self.background_prompt.to_string()),
        })
    }
}

/// Default five-element layout for a new template on `canvas`.
///
/// Zone mode places logo top-left, title top-center, tagline top-right, the main message
/// center-left and the cta bottom-center. Pixel mode uses the equivalent fixed offsets, pulled
/// back inside the canvas when it is small.
pub fn default_elements(canvas: Canvas, mode: PositioningMode) -> Vec<Element> {
    let (w, h) = (canvas.width, canvas.height);
    let sizes = [
        (300.min(w / 6), 150.min(h / 7)),
        (w / 2, h / 8),
        (w / 3, h / 15),
        ((f64::from(w) * 0.8) as u32, h / 4),
        (300, 100),
    ];
    let zones = [
        Zone::TopLeft,
        Zone::TopCenter,
        Zone::TopRight,
        Zone::CenterLeft,
        Zone::BottomCenter,
    ];
    let offsets = [
        (50, 50),
        (w / 4, 50),
        (w / 4, h / 5),
        (50, h / 2),
        (w.saturating_sub(350), h.saturating_sub(150)),
    ];

    AREA_KINDS
        .iter()
        .enumerate()
        .map(|(i, &kind)| {
            let (ew, eh) = sizes[i];
            let size = Size {
                width: ew.clamp(1, w),
                height: eh.clamp(1, h),
            };
            let position = match mode {
                PositioningMode::Zone => Position::zone(zones[i]),
                PositioningMode::Pixel => {
                    let (x, y) = offsets[i];
                    Position::Pixel {
                        x: i64::from(x.min(w - size.width)),
                        y: i64::from(y.min(h - size.height)),
                    }
                }
            };
            default_element(kind, position, size)
        })
        .collect()
}

impl Template {
    /// New validated template with the [`default_elements`] layout.
    pub fn new_default(
        name: impl Into<String>,
        canvas: Canvas,
        mode: PositioningMode,
    ) -> AdLayoutResult<Self> {
        canvas.validate()?;
        Self::from_def(TemplateDef {
            name: name.into(),
            canvas,
            mode,
            elements: default_elements(canvas, mode),
            background_style: BackgroundStyle::default(),
            design_rules: Vec::new(),
            background_prompt: None,
        })
    }
}

fn default_element(kind: ElementKind, position: Position, size: Size) -> Element {
    let (id, token, style) = match kind {
        ElementKind::Logo => ("logo_1", vars::LOGO, ElementStyle::default()),
        ElementKind::Title => ("title_1", vars::CLIENT_NAME, text_style(60.0, "#FFFFFF")),
        ElementKind::Tagline => ("tagline_1", vars::CLIENT_TAGLINE, text_style(30.0, "#CCCCCC")),
        ElementKind::Content => ("main_message_1", vars::MAIN_MESSAGE, text_style(48.0, "#FFFFFF")),
        ElementKind::Cta => (
            "cta_button_1",
            vars::CTA_TEXT,
            ElementStyle {
                bg_color: Some("#FF6600".to_string()),
                text_color: Some("#FFFFFF".to_string()),
                border_radius: Some(10.0),
                ..ElementStyle::default()
            },
        ),
    };
    Element {
        id: id.to_string(),
        kind,
        content: format!("{{{{{token}}}}}"),
        position,
        size,
        style,
    }
}

fn text_style(font_size: f32, color: &str) -> ElementStyle {
    ElementStyle {
        font_family: Some("Arial".to_string()),
        font_size: Some(font_size),
        color: Some(color.to_string()),
        ..ElementStyle::default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/presets.rs"]
mod tests;
