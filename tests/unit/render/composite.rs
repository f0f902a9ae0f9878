use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());

    let src = [0u8, 0, 255, 255, 0, 0, 0, 0];
    let mut dst = vec![255u8, 0, 0, 255, 255, 0, 0, 255];
    over_in_place(&mut dst, &src, 1.0).unwrap();
    assert_eq!(dst, vec![0, 0, 255, 255, 255, 0, 0, 255]);
}

#[test]
fn image_paint_checks_sizes() {
    assert!(image_paint_from_premul("logo", &[0u8; 16], 2, 2).is_ok());
    let err = image_paint_from_premul("logo", &[0u8; 12], 2, 2).unwrap_err();
    assert_eq!(err.element(), Some("logo"));
    assert!(image_paint_from_premul("logo", &[], 70_000, 0).is_err());
}
