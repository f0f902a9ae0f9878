use super::*;

fn zone_el(id: &str, zone: Zone, w: u32, h: u32) -> Element {
    Element {
        id: id.to_string(),
        kind: ElementKind::Title,
        content: "Hello".to_string(),
        position: Position::zone(zone),
        size: Size {
            width: w,
            height: h,
        },
        style: ElementStyle::default(),
    }
}

fn pixel_el(id: &str, x: i64, y: i64, w: u32, h: u32) -> Element {
    Element {
        id: id.to_string(),
        kind: ElementKind::Cta,
        content: "Buy".to_string(),
        position: Position::Pixel { x, y },
        size: Size {
            width: w,
            height: h,
        },
        style: ElementStyle::default(),
    }
}

fn def(mode: PositioningMode, elements: Vec<Element>) -> TemplateDef {
    TemplateDef {
        name: "t".to_string(),
        canvas: Canvas {
            width: 1000,
            height: 800,
        },
        mode,
        elements,
        background_style: BackgroundStyle::default(),
        design_rules: Vec::new(),
        background_prompt: None,
    }
}

#[test]
fn mixed_mode_is_rejected_naming_the_element() {
    let d = def(
        PositioningMode::Zone,
        vec![
            zone_el("title_1", Zone::TopCenter, 200, 100),
            pixel_el("cta_1", 10, 10, 100, 50),
        ],
    );
    let err = Template::from_def(d).unwrap_err();
    assert!(matches!(err, AdLayoutError::InvalidGeometry { .. }));
    assert_eq!(err.element(), Some("cta_1"));
    assert!(err.to_string().contains("pixel position in a zone-mode template"));
}

#[test]
fn pixel_bounds_checked_against_nominal_canvas() {
    let d = def(
        PositioningMode::Pixel,
        vec![pixel_el("cta_1", 900, 10, 101, 50)],
    );
    let err = Template::from_def(d).unwrap_err();
    assert_eq!(err.element(), Some("cta_1"));

    let d = def(PositioningMode::Pixel, vec![pixel_el("cta_1", -1, 0, 10, 10)]);
    assert!(Template::from_def(d).unwrap_err().to_string().contains("negative"));

    let d = def(
        PositioningMode::Pixel,
        vec![pixel_el("cta_1", 900, 750, 100, 50)],
    );
    assert!(Template::from_def(d).is_ok());
}

#[test]
fn huge_pixel_offsets_are_invalid_geometry() {
    let json = r#"{
        "name": "Huge",
        "canvas": { "width": 100, "height": 100 },
        "mode": "pixel",
        "elements": [{
            "id": "cta_1",
            "kind": "cta",
            "position": { "x": 9223372036854775807, "y": 0 },
            "size": { "width": 10, "height": 10 }
        }]
    }"#;
    let err = Template::from_json_str(json).unwrap_err();
    assert!(matches!(err, AdLayoutError::InvalidGeometry { .. }));
    assert_eq!(err.element(), Some("cta_1"));

    let d = def(
        PositioningMode::Pixel,
        vec![pixel_el("cta_1", 0, i64::MAX, 10, 10)],
    );
    assert!(Template::from_def(d).is_err());
}

#[test]
fn duplicate_ids_and_empty_sizes_are_rejected() {
    let d = def(
        PositioningMode::Zone,
        vec![
            zone_el("a", Zone::TopLeft, 10, 10),
            zone_el("a", Zone::Center, 10, 10),
        ],
    );
    assert!(
        Template::from_def(d)
            .unwrap_err()
            .to_string()
            .contains("duplicate")
    );

    let d = def(PositioningMode::Zone, vec![zone_el("a", Zone::TopLeft, 0, 10)]);
    assert!(Template::from_def(d).is_err());
}

#[test]
fn oversized_zone_element_is_valid() {
    let d = def(
        PositioningMode::Zone,
        vec![zone_el("huge", Zone::Center, 5000, 5000)],
    );
    assert!(Template::from_def(d).is_ok());
}

#[test]
fn json_roundtrip_keeps_position_shapes() {
    let d = def(
        PositioningMode::Zone,
        vec![Element {
            position: Position::Zone {
                zone: Zone::BottomRight,
                style: Some("glow".to_string()),
                integration: None,
            },
            ..zone_el("a", Zone::TopLeft, 10, 10)
        }],
    );
    let t = Template::from_def(d).unwrap();
    let s = t.to_json_pretty().unwrap();
    assert!(s.contains("\"zone\": \"bottom-right\""));
    assert!(!s.contains("\"x\""));

    let back = Template::from_json_str(&s).unwrap();
    assert_eq!(back, t);
}

#[test]
fn position_json_errors_are_descriptive() {
    let bad_zone = r#"{"name":"t","canvas":{"width":10,"height":10},"mode":"zone",
        "elements":[{"id":"a","kind":"title","position":{"zone":"middle"},
        "size":{"width":1,"height":1}}]}"#;
    let err = Template::from_json_str(bad_zone).unwrap_err();
    assert!(matches!(err, AdLayoutError::Serde(_)));
    assert!(err.to_string().contains("unknown zone 'middle'"));

    let both = r#"{"name":"t","canvas":{"width":10,"height":10},"mode":"zone",
        "elements":[{"id":"a","kind":"title","position":{"zone":"center","x":1,"y":1},
        "size":{"width":1,"height":1}}]}"#;
    assert!(Template::from_json_str(both).is_err());
}

#[test]
fn legacy_field_names_are_accepted() {
    let s = r#"{"name":"t","canvas":{"width":10,"height":10},"positioning_mode":"zone",
        "elements":[{"id":"a","kind":"content-text","position":{"zone":"center"},
        "size":{"width":1,"height":1}}]}"#;
    let t = Template::from_json_str(s).unwrap();
    assert_eq!(t.mode(), PositioningMode::Zone);
    assert_eq!(t.elements()[0].kind, ElementKind::Content);
    assert_eq!(t.def().background_style.color_scheme, "Brand Colors");
}

#[test]
fn zone_names_parse_back() {
    for z in Zone::ALL {
        assert_eq!(Zone::parse(z.as_str()), Some(z));
    }
    assert_eq!(Zone::parse("nowhere"), None);
}

#[test]
fn missing_template_file_is_an_io_error() {
    let path = std::env::temp_dir().join(format!(
        "adlayout_missing_template_{}.json",
        std::process::id()
    ));
    let err = Template::from_path(&path).unwrap_err();
    assert!(matches!(err, AdLayoutError::Other(_)));
    assert!(err.to_string().contains("open template JSON"));
}
