use super::*;
use crate::{
    foundation::core::Size,
    template::model::{ElementKind, ElementStyle, Zone},
};

fn el(id: &str, kind: ElementKind, position: Position) -> Element {
    Element {
        id: id.to_string(),
        kind,
        content: String::new(),
        position,
        size: Size {
            width: 10,
            height: 10,
        },
        style: ElementStyle::default(),
    }
}

#[test]
fn clauses_follow_z_order_with_defaults() {
    let els = vec![
        el("logo_1", ElementKind::Logo, Position::zone(Zone::TopLeft)),
        el(
            "title_1",
            ElementKind::Title,
            Position::Zone {
                zone: Zone::TopCenter,
                style: Some("bold neon".to_string()),
                integration: Some("painted on the wall".to_string()),
            },
        ),
    ];
    let s = synthesize_zone_guidance(&els).unwrap();
    assert!(s.starts_with(
        "logo in top-left (style: default) (standard overlay); \
         title in top-center (style: bold neon) (painted on the wall). "
    ));
    assert!(s.ends_with(CLOSING_INSTRUCTION));
}

#[test]
fn deterministic_and_order_sensitive() {
    let a = el("a", ElementKind::Cta, Position::zone(Zone::BottomCenter));
    let b = el("b", ElementKind::Tagline, Position::zone(Zone::Center));
    let ab = vec![a.clone(), b.clone()];
    assert_eq!(
        synthesize_zone_guidance(&ab).unwrap(),
        synthesize_zone_guidance(&ab).unwrap()
    );
    assert_ne!(
        synthesize_zone_guidance(&ab).unwrap(),
        synthesize_zone_guidance(&[b, a]).unwrap()
    );
}

#[test]
fn empty_input_and_pixel_elements() {
    assert_eq!(synthesize_zone_guidance(&[]).unwrap(), "");

    let px = el("px", ElementKind::Title, Position::Pixel { x: 0, y: 0 });
    let err = synthesize_zone_guidance(&[px]).unwrap_err();
    assert_eq!(err.element(), Some("px"));
}

#[test]
fn blank_hints_use_defaults() {
    let e = el(
        "t",
        ElementKind::Content,
        Position::Zone {
            zone: Zone::CenterLeft,
            style: Some("  ".to_string()),
            integration: None,
        },
    );
    assert_eq!(
        zone_clause(&e).unwrap(),
        "content in center-left (style: default) (standard overlay)"
    );
}
