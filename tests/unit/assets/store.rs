use super::*;

#[test]
fn normalize_rel_path_rules() {
    assert_eq!(normalize_rel_path("a/./b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("C:/logo.png").is_err());
    assert!(normalize_rel_path("../up.png").is_err());
    assert!(normalize_rel_path("./").is_err());
    assert!(normalize_rel_path("").is_err());
}

#[test]
fn registered_logos_resolve_without_root() {
    let mut assets = BrandAssets::new();
    assets.insert_image("brand", image::RgbaImage::new(3, 2));
    assert!(assets.contains("brand"));
    let src = assets.logo("logo_1", "brand").unwrap();
    assert_eq!(src.size_px(), (3, 2));
}

#[test]
fn missing_logo_is_compositing_error() {
    let mut assets = BrandAssets::new();
    let err = assets.logo("logo_1", "nope.png").unwrap_err();
    assert!(matches!(err, AdLayoutError::Compositing { .. }));
    assert_eq!(err.element(), Some("logo_1"));

    let mut rooted = BrandAssets::with_root(std::env::temp_dir().join("adlayout_no_such_dir"));
    let err = rooted.logo("logo_1", "nope.png").unwrap_err();
    assert!(err.to_string().contains("missing logo"));

    let err = rooted.logo("logo_1", "../escape.png").unwrap_err();
    assert!(err.to_string().contains(".."));
}

#[test]
fn malformed_encoded_logo_is_rejected() {
    let mut assets = BrandAssets::new();
    let err = assets.insert_encoded("broken", b"\x89PNG garbage").unwrap_err();
    assert!(matches!(err, AdLayoutError::Compositing { .. }));
    assert!(!assets.contains("broken"));

    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="5"></svg>"#;
    assets.insert_encoded("vector.svg", svg).unwrap();
    assert_eq!(assets.logo("logo_1", "vector.svg").unwrap().size_px(), (10, 5));
}
