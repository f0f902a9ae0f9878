use std::cell::RefCell;

use super::*;
use crate::template::presets::preset;

fn solid(canvas: Canvas) -> RgbaImage {
    RgbaImage::from_pixel(canvas.width, canvas.height, image::Rgba([20, 20, 20, 255]))
}

#[test]
fn render_draws_cta_at_scaled_position() {
    let t = preset("web_banner_wide").unwrap().template().unwrap();
    let target = Canvas {
        width: 364,
        height: 150,
    };
    let out = render_template(
        &t,
        target,
        &solid(target),
        &ContentVars::new(),
        &mut BrandAssets::new(),
        &FontBook::empty(),
        &ComposeOpts::default(),
    )
    .unwrap();
    assert_eq!(out.image.dimensions(), (364, 150));
    assert!(out.warnings.is_empty());
    // cta (550, 200, 150, 60) at half scale covers (275, 100)-(350, 130); center is orange.
    assert_eq!(out.image.get_pixel(312, 115).0, [0xFF, 0x66, 0x00, 255]);
    assert_eq!(out.image.get_pixel(5, 145).0, [20, 20, 20, 255]);
}

#[test]
fn mismatched_background_is_resized() {
    let t = preset("social_media_square").unwrap().template().unwrap();
    let out = render_template(
        &t,
        t.canvas(),
        &solid(Canvas {
            width: 10,
            height: 10,
        }),
        &ContentVars::new(),
        &mut BrandAssets::new(),
        &FontBook::empty(),
        &ComposeOpts::default(),
    )
    .unwrap();
    assert_eq!(out.image.dimensions(), (1080, 1080));
}

#[test]
fn generator_receives_prompt_and_target() {
    let t = preset("web_banner_wide").unwrap().template().unwrap();
    let seen = RefCell::new(None::<(String, Canvas)>);
    let generator = |prompt: &str, canvas: Canvas| -> anyhow::Result<RgbaImage> {
        *seen.borrow_mut() = Some((prompt.to_string(), canvas));
        Ok(solid(canvas))
    };
    let out = generate_and_render(
        &t,
        t.canvas(),
        "coffee shop",
        &ContentVars::new(),
        &mut BrandAssets::new(),
        &FontBook::empty(),
        &ComposeOpts::default(),
        &generator,
    )
    .unwrap();
    assert_eq!(out.image.dimensions(), (728, 300));

    let (prompt, canvas) = seen.into_inner().unwrap();
    assert!(prompt.starts_with("coffee shop"));
    assert_eq!(canvas, t.canvas());
}

#[test]
fn generator_errors_pass_through() {
    let t = preset("web_banner_wide").unwrap().template().unwrap();
    let failing = |_: &str, _: Canvas| -> anyhow::Result<RgbaImage> {
        anyhow::bail!("upstream unavailable")
    };
    let err = generate_and_render(
        &t,
        t.canvas(),
        "",
        &ContentVars::new(),
        &mut BrandAssets::new(),
        &FontBook::empty(),
        &ComposeOpts::default(),
        &failing,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "upstream unavailable");
}

#[test]
fn logo_values_are_trimmed_and_placeholders_skipped() {
    let t = preset("web_banner_wide").unwrap().template().unwrap();
    let mut assets = BrandAssets::new();
    assets.insert_image(
        "brand.png",
        RgbaImage::from_pixel(150, 75, image::Rgba([0, 0, 255, 255])),
    );
    let vars = ContentVars::new().with(crate::template::vars::LOGO, "  brand.png  ");
    let out = render_template(
        &t,
        t.canvas(),
        &solid(t.canvas()),
        &vars,
        &mut assets,
        &FontBook::empty(),
        &ComposeOpts::default(),
    )
    .unwrap();
    // Logo box is (20, 20, 150, 75).
    assert_eq!(out.image.get_pixel(90, 55).0, [0, 0, 255, 255]);

    // A value that is itself a placeholder leaves the logo unresolved; nothing is looked up.
    let vars = ContentVars::new().with(crate::template::vars::LOGO, "{{brand_logo}}");
    let out = render_template(
        &t,
        t.canvas(),
        &solid(t.canvas()),
        &vars,
        &mut BrandAssets::new(),
        &FontBook::empty(),
        &ComposeOpts::default(),
    )
    .unwrap();
    assert_eq!(out.image.get_pixel(90, 55).0, [20, 20, 20, 255]);
}
