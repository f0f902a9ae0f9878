use super::*;
use crate::assets::fonts::FontBook;

fn any_face() -> Option<ResolvedFace> {
    FontBook::system().resolve(None, &[])
}

#[test]
fn long_text_shrinks_but_not_below_minimum() {
    let Some(face) = any_face() else {
        return;
    };
    let mut engine = TextLayoutEngine::new();
    let text = "An unusually long promotional message that cannot possibly fit";
    let fitted = engine
        .fit(
            text,
            &face,
            FitBox {
                size_px: 60.0,
                min_px: 12.0,
                brush: Rgba8::WHITE,
                width: 120.0,
                height: 30.0,
            },
        )
        .unwrap();
    assert!(fitted.size_px < 60.0);
    assert!(fitted.size_px >= 12.0);
}

#[test]
fn short_text_keeps_requested_size() {
    let Some(face) = any_face() else {
        return;
    };
    let mut engine = TextLayoutEngine::new();
    let fitted = engine
        .fit(
            "Hi",
            &face,
            FitBox {
                size_px: 20.0,
                min_px: 12.0,
                brush: Rgba8::WHITE,
                width: 500.0,
                height: 200.0,
            },
        )
        .unwrap();
    assert_eq!(fitted.size_px, 20.0);
    assert!(fitted.layout.lines().count() >= 1);
}

#[test]
fn invalid_size_is_rejected() {
    let Some(face) = any_face() else {
        return;
    };
    let mut engine = TextLayoutEngine::new();
    assert!(
        engine
            .layout_plain("x", &face, f32::NAN, Rgba8::WHITE, 10.0)
            .is_err()
    );
}
