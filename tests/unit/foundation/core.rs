use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(1920, 1080).unwrap();
    assert_eq!(c.max_side(), 1920);
    assert_eq!(c.to_string(), "1920x1080");
}

#[test]
fn resolved_box_fits_boundaries() {
    let canvas = Canvas {
        width: 100,
        height: 50,
    };
    let flush = ResolvedBox {
        x: 60,
        y: 10,
        width: 40,
        height: 40,
    };
    assert!(flush.fits(canvas));

    let over = ResolvedBox { x: 61, ..flush };
    assert!(!over.fits(canvas));
}

#[test]
fn resolved_box_rect_uses_exclusive_edges() {
    let b = ResolvedBox {
        x: 10,
        y: 10,
        width: 5,
        height: 5,
    };
    assert_eq!((b.right(), b.bottom()), (15, 15));
    assert_eq!(b.to_rect(), Rect::new(10.0, 10.0, 15.0, 15.0));
}
