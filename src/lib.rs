//! adlayout lays out marketing templates and composites brand overlays onto generated imagery.
//!
//! The public API follows the life of one ad image:
//!
//! - Load and validate a [`Template`] (pixel- or zone-positioned)
//! - Resolve it for a target [`Canvas`] with [`resolve_layout`]
//! - Build background prompts with [`background_prompt`] / [`synthesize_zone_guidance`]
//! - Draw logo, text and CTA overlays with [`render_template`] or [`compose`]
//! - Send images through square-only editors with [`edit_via_square`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod layout;
pub(crate) mod prompt;
pub(crate) mod render;
pub(crate) mod roundtrip;
pub(crate) mod template;

pub use crate::foundation::color::{ColorScheme, Rgba8};
pub use crate::foundation::core::{Canvas, ResolvedBox, Size};
pub use crate::foundation::error::{AdLayoutError, AdLayoutResult, TEMPLATE_SCOPE};

pub use crate::assets::fonts::{FontBook, ResolvedFace};
pub use crate::assets::store::{BrandAssets, LogoSource, normalize_rel_path};
pub use crate::layout::resolver::{
    LayoutWarning, Placement, ResolvedLayout, resolve_element, resolve_layout, resolve_pixel,
    resolve_zone,
};
pub use crate::prompt::background::background_prompt;
pub use crate::prompt::zone::{
    CLAUSE_CONNECTIVE, CLOSING_INSTRUCTION, synthesize_zone_guidance, zone_clause,
};
pub use crate::render::compose::{ComposeOpts, compose, default_font_px, is_promotional};
pub use crate::render::pipeline::{
    BackgroundGenerator, RenderOutput, generate_and_render, render_template,
};
pub use crate::roundtrip::edit::{SquareEditor, edit_via_square};
pub use crate::roundtrip::square::{
    RoundTripContext, closest_supported_size, from_square, to_square, to_square_downscaled,
};
pub use crate::template::model::{
    BackgroundStyle, Element, ElementKind, ElementStyle, Position, PositioningMode, Template,
    TemplateDef, Zone,
};
pub use crate::template::presets::{PRESETS, Preset, default_elements, preset};
/// Placeholder names understood by [`ContentVars`].
pub mod vars {
    pub use crate::template::vars::{
        CLIENT_NAME, CLIENT_TAGLINE, CLIENT_WEBSITE, CTA_TEXT, LOGO, MAIN_MESSAGE,
    };
}
pub use crate::template::vars::ContentVars;
