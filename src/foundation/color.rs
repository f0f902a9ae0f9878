/// Straight-alpha RGBA8 color. Defaults to transparent black.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a color hint such as `#FF6600`, `#fff`, `#00000080` or `white`.
    pub fn parse(hint: &str) -> Option<Self> {
        let s = hint.trim();
        if let Some(named) = named_color(s) {
            return Some(named);
        }
        let hex = s.strip_prefix('#').unwrap_or(s);
        parse_hex(hex)
    }

    /// Parse `hint` or fall back to `default`, logging the fallback.
    pub fn from_hint_or(hint: Option<&str>, default: Self) -> Self {
        let Some(hint) = hint else {
            return default;
        };
        match Self::parse(hint) {
            Some(c) => c,
            None => {
                tracing::warn!(hint, "unparsable color hint, using default");
                default
            }
        }
    }
}

fn parse_hex(hex: &str) -> Option<Rgba8> {
    fn byte(pair: &str) -> Option<u8> {
        u8::from_str_radix(pair, 16).ok()
    }
    fn nibble(c: &str) -> Option<u8> {
        u8::from_str_radix(c, 16).ok().map(|v| v * 17)
    }
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        3 => Some(Rgba8::rgb(
            nibble(&hex[0..1])?,
            nibble(&hex[1..2])?,
            nibble(&hex[2..3])?,
        )),
        6 => Some(Rgba8::rgb(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
        )),
        8 => Some(Rgba8 {
            r: byte(&hex[0..2])?,
            g: byte(&hex[2..4])?,
            b: byte(&hex[4..6])?,
            a: byte(&hex[6..8])?,
        }),
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Rgba8> {
    let c = match name.to_ascii_lowercase().as_str() {
        "white" => Rgba8::WHITE,
        "black" => Rgba8::BLACK,
        "red" => Rgba8::rgb(255, 0, 0),
        "green" => Rgba8::rgb(0, 128, 0),
        "blue" => Rgba8::rgb(0, 0, 255),
        "yellow" => Rgba8::rgb(255, 255, 0),
        "orange" => Rgba8::rgb(255, 165, 0),
        "gray" | "grey" => Rgba8::rgb(128, 128, 128),
        "transparent" => Rgba8 {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        },
        _ => return None,
    };
    Some(c)
}

/// Named text/button palette applied when elements carry no explicit color hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorScheme {
    /// Scheme display name.
    pub name: &'static str,
    /// Main text color (titles, regular messages).
    pub primary: Rgba8,
    /// Supporting text color (taglines, websites).
    pub secondary: Rgba8,
    /// Highlight color for promotional messages.
    pub accent: Rgba8,
    /// Call-to-action button fill.
    pub cta_bg: Rgba8,
}

impl ColorScheme {
    /// Default palette.
    pub const BRAND: Self = Self {
        name: "Brand Colors",
        primary: Rgba8::WHITE,
        secondary: Rgba8::rgb(0xE0, 0xE0, 0xE0),
        accent: Rgba8::rgb(0xFF, 0xD7, 0x00),
        cta_bg: Rgba8::rgb(0xFF, 0x66, 0x00),
    };

    /// All built-in palettes.
    pub const ALL: [Self; 6] = [
        Self::BRAND,
        Self {
            name: "Warm Tones",
            primary: Rgba8::WHITE,
            secondary: Rgba8::rgb(0xFF, 0xF8, 0xDC),
            accent: Rgba8::rgb(0xFF, 0xD7, 0x00),
            cta_bg: Rgba8::rgb(0xFF, 0x45, 0x00),
        },
        Self {
            name: "Cool Tones",
            primary: Rgba8::WHITE,
            secondary: Rgba8::rgb(0xE6, 0xF3, 0xFF),
            accent: Rgba8::rgb(0x00, 0xBF, 0xFF),
            cta_bg: Rgba8::rgb(0x1E, 0x90, 0xFF),
        },
        Self {
            name: "Monochrome",
            primary: Rgba8::WHITE,
            secondary: Rgba8::rgb(0xCC, 0xCC, 0xCC),
            accent: Rgba8::rgb(0x88, 0x88, 0x88),
            cta_bg: Rgba8::rgb(0x33, 0x33, 0x33),
        },
        Self {
            name: "High Contrast",
            primary: Rgba8::WHITE,
            secondary: Rgba8::rgb(0xFF, 0xFF, 0x00),
            accent: Rgba8::rgb(0x00, 0xFF, 0x00),
            cta_bg: Rgba8::rgb(0xFF, 0x00, 0x00),
        },
        Self {
            name: "Pastel",
            primary: Rgba8::WHITE,
            secondary: Rgba8::rgb(0xF0, 0xF8, 0xFF),
            accent: Rgba8::rgb(0xDD, 0xA0, 0xDD),
            cta_bg: Rgba8::rgb(0x98, 0xFB, 0x98),
        },
    ];

    /// Look up a palette by name (case-insensitive); unknown names yield [`Self::BRAND`].
    pub fn named(name: &str) -> Self {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.name.eq_ignore_ascii_case(wanted))
            .unwrap_or(Self::BRAND)
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::BRAND
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
