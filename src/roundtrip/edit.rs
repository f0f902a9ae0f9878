use image::RgbaImage;

use crate::{
    foundation::error::{AdLayoutError, AdLayoutResult},
    roundtrip::square::{from_square, to_square, to_square_downscaled},
};

/// External image-edit endpoint that only accepts square images.
///
/// Implementations must return an image of the same square size they were given. Errors are
/// passed through unchanged.
pub trait SquareEditor {
    /// Apply `instruction` to `square`.
    fn edit(&self, square: &RgbaImage, instruction: &str) -> anyhow::Result<RgbaImage>;
}

impl<F> SquareEditor for F
where
    F: Fn(&RgbaImage, &str) -> anyhow::Result<RgbaImage>,
{
    fn edit(&self, square: &RgbaImage, instruction: &str) -> anyhow::Result<RgbaImage> {
        self(square, instruction)
    }
}

/// Square `image`, send it through `editor`, and restore the original geometry.
///
/// `allow_downscale` permits a `size` smaller than the image.
#[tracing::instrument(skip(image, editor), fields(w = image.width(), h = image.height()))]
pub fn edit_via_square(
    image: &RgbaImage,
    instruction: &str,
    size: u32,
    allow_downscale: bool,
    editor: &dyn SquareEditor,
) -> AdLayoutResult<RgbaImage> {
    let (square, ctx) = if allow_downscale {
        to_square_downscaled(image, size)?
    } else {
        to_square(image, size)?
    };

    let edited = editor.edit(&square, instruction)?;
    if edited.dimensions() != square.dimensions() {
        return Err(AdLayoutError::dimension(format!(
            "editor returned {}x{}, expected {size}x{size}",
            edited.width(),
            edited.height()
        )));
    }
    from_square(&edited, &ctx)
}

#[cfg(test)]
#[path = "../../tests/unit/roundtrip/edit.rs"]
mod tests;
