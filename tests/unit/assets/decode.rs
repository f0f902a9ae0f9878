use std::io::Cursor;

use super::*;

const SQUARE_SVG: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2">
<rect width="4" height="2" fill="#ff0000"/></svg>"##;

#[test]
fn decode_png_keeps_straight_alpha() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50, 200, 128]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let decoded = decode_raster(&buf).unwrap();
    assert_eq!(decoded.dimensions(), (1, 1));
    assert_eq!(decoded.as_raw().as_slice(), &[100u8, 50, 200, 128]);

    assert!(decode_raster(b"not an image").is_err());
}

#[test]
fn svg_detection_by_extension_and_content() {
    assert!(looks_like_svg("brand/logo.SVG", b""));
    assert!(looks_like_svg("logo", SQUARE_SVG));
    assert!(looks_like_svg("logo", b"  <?xml version=\"1.0\"?><svg></svg>"));
    assert!(!looks_like_svg("logo.png", &[0x89, b'P', b'N', b'G']));
}

#[test]
fn svg_parses_and_rasterizes_at_requested_size() {
    let tree = parse_svg(SQUARE_SVG, None).unwrap();
    assert_eq!(svg_size_px(&tree), (4, 2));

    let px = rasterize_svg_to_premul_rgba8(&tree, 8, 4).unwrap();
    assert_eq!(px.len(), 8 * 4 * 4);
    let mid = (2 * 8 + 4) * 4;
    assert_eq!(&px[mid..mid + 4], &[255, 0, 0, 255]);

    assert!(parse_svg(b"<svg", None).is_err());
}

#[test]
fn resize_premultiplies() {
    let img = image::RgbaImage::from_raw(1, 1, vec![200u8, 100, 50, 0]).unwrap();
    assert_eq!(resize_to_premul_rgba8(&img, 1, 1), vec![0, 0, 0, 0]);

    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]));
    let out = resize_to_premul_rgba8(&img, 2, 2);
    assert_eq!(out.len(), 16);
}
