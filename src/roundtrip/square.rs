use image::{RgbaImage, imageops};

use crate::foundation::{
    core::Canvas,
    error::{AdLayoutError, AdLayoutResult},
};

/// Geometry needed to undo a [`to_square`] transform.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoundTripContext {
    /// Size of the image before squaring.
    pub original: Canvas,
    /// Side of the square canvas.
    pub square_size: u32,
    /// Left padding of the scaled image inside the square.
    pub pad_x: u32,
    /// Top padding of the scaled image inside the square.
    pub pad_y: u32,
    /// Size of the scaled image inside the square.
    pub scaled: Canvas,
    /// `square_size / max(original.width, original.height)`.
    pub scale: f64,
}

impl RoundTripContext {
    fn new(original: Canvas, square_size: u32) -> Self {
        let scale = f64::from(square_size) / f64::from(original.max_side());
        let fit = |v: u32| ((f64::from(v) * scale).round() as u32).clamp(1, square_size);
        let scaled = Canvas {
            width: fit(original.width),
            height: fit(original.height),
        };
        Self {
            original,
            square_size,
            pad_x: (square_size - scaled.width) / 2,
            pad_y: (square_size - scaled.height) / 2,
            scaled,
            scale,
        }
    }

    /// Scale applied by [`from_square`].
    pub fn inverse_scale(&self) -> f64 {
        1.0 / self.scale
    }

    /// Place an edit mask of the original size into the same square geometry.
    ///
    /// Padding is filled opaque, i.e. marked as preserved.
    pub fn mask_to_square(&self, mask: &RgbaImage) -> AdLayoutResult<RgbaImage> {
        if mask.dimensions() != (self.original.width, self.original.height) {
            return Err(AdLayoutError::dimension(format!(
                "mask is {}x{}, expected {}",
                mask.width(),
                mask.height(),
                self.original
            )));
        }
        let mut square = RgbaImage::from_pixel(
            self.square_size,
            self.square_size,
            image::Rgba([0, 0, 0, 255]),
        );
        let scaled = resize_exact(mask, self.scaled);
        imageops::replace(
            &mut square,
            &scaled,
            i64::from(self.pad_x),
            i64::from(self.pad_y),
        );
        Ok(square)
    }
}

fn check_source(image: &RgbaImage, target: u32) -> AdLayoutResult<Canvas> {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return Err(AdLayoutError::dimension(format!(
            "cannot square an empty {w}x{h} image"
        )));
    }
    if target == 0 {
        return Err(AdLayoutError::dimension("square size must be > 0"));
    }
    Ok(Canvas {
        width: w,
        height: h,
    })
}

fn resize_exact(img: &RgbaImage, size: Canvas) -> RgbaImage {
    if img.dimensions() == (size.width, size.height) {
        return img.clone();
    }
    imageops::resize(img, size.width, size.height, imageops::FilterType::Lanczos3)
}

fn square_with(image: &RgbaImage, ctx: RoundTripContext) -> (RgbaImage, RoundTripContext) {
    let scaled = resize_exact(image, ctx.scaled);
    let mut square = RgbaImage::new(ctx.square_size, ctx.square_size);
    imageops::replace(
        &mut square,
        &scaled,
        i64::from(ctx.pad_x),
        i64::from(ctx.pad_y),
    );
    tracing::debug!(
        original = %ctx.original,
        square = ctx.square_size,
        pad_x = ctx.pad_x,
        pad_y = ctx.pad_y,
        "squared image"
    );
    (square, ctx)
}

/// Fit `image` into a transparent `target`x`target` square, centered.
///
/// Fails with a dimension error when `target` is smaller than either side; use
/// [`to_square_downscaled`] to opt into shrinking.
#[tracing::instrument(skip(image), fields(w = image.width(), h = image.height()))]
pub fn to_square(image: &RgbaImage, target: u32) -> AdLayoutResult<(RgbaImage, RoundTripContext)> {
    let original = check_source(image, target)?;
    if target < original.max_side() {
        return Err(AdLayoutError::dimension(format!(
            "square size {target} is smaller than the {original} image; \
             request a downscale explicitly"
        )));
    }
    Ok(square_with(image, RoundTripContext::new(original, target)))
}

/// Like [`to_square`], but shrinks images larger than `target`.
#[tracing::instrument(skip(image), fields(w = image.width(), h = image.height()))]
pub fn to_square_downscaled(
    image: &RgbaImage,
    target: u32,
) -> AdLayoutResult<(RgbaImage, RoundTripContext)> {
    let original = check_source(image, target)?;
    Ok(square_with(image, RoundTripContext::new(original, target)))
}

/// Crop the padded region of an edited square and resize it back to the original size.
#[tracing::instrument(skip(edited, ctx), fields(square = ctx.square_size))]
pub fn from_square(edited: &RgbaImage, ctx: &RoundTripContext) -> AdLayoutResult<RgbaImage> {
    let s = ctx.square_size;
    if edited.dimensions() != (s, s) {
        return Err(AdLayoutError::dimension(format!(
            "edited image is {}x{}, expected {s}x{s}",
            edited.width(),
            edited.height()
        )));
    }
    if ctx.scaled.width == 0
        || ctx.scaled.height == 0
        || u64::from(ctx.pad_x) + u64::from(ctx.scaled.width) > u64::from(s)
        || u64::from(ctx.pad_y) + u64::from(ctx.scaled.height) > u64::from(s)
    {
        return Err(AdLayoutError::dimension(
            "round-trip context does not fit its square",
        ));
    }
    ctx.original.validate().map_err(|e| AdLayoutError::dimension(e.to_string()))?;

    let cropped =
        imageops::crop_imm(edited, ctx.pad_x, ctx.pad_y, ctx.scaled.width, ctx.scaled.height)
            .to_image();
    Ok(resize_exact(&cropped, ctx.original))
}

/// Endpoint size whose aspect ratio is closest to `canvas`. Ties keep the earlier entry.
pub fn closest_supported_size(canvas: Canvas, supported: &[Canvas]) -> Option<Canvas> {
    let target = canvas.aspect();
    supported
        .iter()
        .copied()
        .filter(|c| c.width > 0 && c.height > 0)
        .fold(None, |best: Option<(Canvas, f64)>, c| {
            let d = (c.aspect() - target).abs();
            match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((c, d)),
            }
        })
        .map(|(c, _)| c)
}

#[cfg(test)]
#[path = "../../tests/unit/roundtrip/square.rs"]
mod tests;
