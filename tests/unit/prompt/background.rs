use super::*;
use crate::{
    foundation::core::Canvas,
    template::{model::TemplateDef, presets::preset},
};

#[test]
fn pixel_prompt_lists_reserved_areas() {
    let t = preset("web_banner_wide").unwrap().template().unwrap();
    let p = background_prompt(&t, "summer coffee").unwrap();
    assert!(p.starts_with("summer coffee\n\nCreate clean web-optimized"));
    assert!(p.contains("- Dimensions: 728x300 pixels"));
    assert!(p.contains("- logo area: 150x75 pixels at (20, 20)"));
    assert!(p.contains("- cta area: 150x60 pixels at (550, 200)"));
    assert!(p.contains("Do not render any readable text"));
}

#[test]
fn zone_prompt_embeds_guidance_and_rules() {
    let t = Template::new_default(
        "z",
        Canvas {
            width: 1024,
            height: 1024,
        },
        PositioningMode::Zone,
    )
    .unwrap();
    let mut def: TemplateDef = t.into_def();
    def.design_rules = vec!["no people".to_string()];
    let t = Template::from_def(def).unwrap();

    let p = background_prompt(&t, "  ").unwrap();
    assert!(p.starts_with(DEFAULT_SCENE));
    assert!(p.contains("- Overlay placement: logo in top-left (style: default)"));
    assert!(p.contains("cta in bottom-center"));
    assert!(p.ends_with("- no people"));
    assert_eq!(p, background_prompt(&t, "").unwrap());

    let guidance = synthesize_zone_guidance(t.elements()).unwrap();
    assert!(p.contains(&format!("- Overlay placement: {guidance}\n")));
}
