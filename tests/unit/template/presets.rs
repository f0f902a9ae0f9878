use super::*;

#[test]
fn every_preset_builds_a_valid_pixel_template() {
    for p in &PRESETS {
        let t = p.template().unwrap();
        assert_eq!(t.mode(), PositioningMode::Pixel);
        assert_eq!(t.canvas(), p.canvas);
        assert_eq!(t.elements().len(), 5);
        assert!(t.def().background_prompt.is_some());
    }
    assert!(preset("web_banner_wide").is_some());
    assert!(preset("nope").is_none());
}

#[test]
fn billboard_cta_area_is_exact() {
    let t = preset("billboard_horizontal").unwrap().template().unwrap();
    let cta = &t.elements()[4];
    assert_eq!(cta.id, "cta_button_1");
    assert_eq!(cta.position, Position::Pixel { x: 1300, y: 750 });
    assert_eq!(
        cta.size,
        Size {
            width: 400,
            height: 150
        }
    );
    assert_eq!(cta.content, "{{cta_text}}");
}

#[test]
fn default_templates_validate_in_both_modes_even_when_small() {
    for (w, h) in [(1920, 1080), (728, 300), (120, 90), (1, 1)] {
        let canvas = Canvas {
            width: w,
            height: h,
        };
        for mode in [PositioningMode::Pixel, PositioningMode::Zone] {
            let t = Template::new_default("d", canvas, mode).unwrap();
            assert_eq!(t.mode(), mode);
            assert!(t.elements().iter().all(|e| e.position.mode() == mode));
        }
    }
}

#[test]
fn default_zone_layout_uses_expected_zones() {
    let els = default_elements(
        Canvas {
            width: 1200,
            height: 700,
        },
        PositioningMode::Zone,
    );
    assert_eq!(els[0].position, Position::zone(Zone::TopLeft));
    assert_eq!(els[4].position, Position::zone(Zone::BottomCenter));
    assert_eq!(
        els[0].size,
        Size {
            width: 200,
            height: 100
        }
    );
}
