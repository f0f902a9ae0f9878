use std::sync::Arc;

use crate::foundation::{
    error::{AdLayoutError, AdLayoutResult, TEMPLATE_SCOPE},
    math::mul_div255_u8,
};

pub(crate) type PremulRgba8 = [u8; 4];

/// Premultiplied source-over with an extra opacity multiplier.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> AdLayoutResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(AdLayoutError::compositing(
            TEMPLATE_SCOPE,
            "overlay and background buffers differ in size",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Wrap premultiplied RGBA8 bytes as a `vello_cpu` image paint.
pub(crate) fn image_paint_from_premul(
    element: &str,
    bytes: &[u8],
    width: u32,
    height: u32,
) -> AdLayoutResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| AdLayoutError::compositing(element, "image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| AdLayoutError::compositing(element, "image height exceeds u16"))?;
    if bytes.len() != (width as usize) * (height as usize) * 4 {
        return Err(AdLayoutError::compositing(element, "image byte length mismatch"));
    }

    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
