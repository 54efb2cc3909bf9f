use crate::{
    assets::color::OverlayColor,
    foundation::{
        core::{BezPath, PixelImage},
        error::{FacetintError, FacetintResult},
        math::{mul_div255_u8, premultiply_rgba8, unpremultiply_rgba8_in_place},
    },
    overlay::geometry::OverlayLayer,
};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over of `src` onto `dst` with `src` scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
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

/// [`over`] applied pixel-wise across two equal-length premultiplied buffers.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> FacetintResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(FacetintError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Draw `layers` in order over a copy of `base`.
///
/// Each layer is filled opaque on its own transparent surface and then blended
/// onto the accumulated image at the layer's opacity. Layers with too few
/// points are skipped. The output always has the base's dimensions, and pixels
/// no fill covers are copied from `base` unchanged.
#[tracing::instrument(skip_all, fields(width = base.width(), height = base.height(), layers = layers.len()))]
pub fn composite_overlays(base: &PixelImage, layers: &[OverlayLayer]) -> FacetintResult<PixelImage> {
    let (width, height) = surface_dims(base)?;
    let mut canvas = premultiply_rgba8(base.as_rgba8());
    let mut covered = vec![false; canvas.len() / 4];

    let mut drawn = 0usize;
    for layer in layers {
        let Some(path) = layer.geometry.to_bezpath() else {
            tracing::debug!(
                points = layer.geometry.points().len(),
                "overlay skipped: not enough points"
            );
            continue;
        };
        let fill = rasterize_fill(&path, layer.color, width, height);
        let fill = fill.data_as_u8_slice();
        over_in_place(&mut canvas, fill, layer.opacity)?;
        for (hit, px) in covered.iter_mut().zip(fill.chunks_exact(4)) {
            *hit |= px[3] != 0;
        }
        drawn += 1;
    }

    if drawn == 0 {
        return Ok(base.clone());
    }

    let straight = base.as_rgba8();
    for ((out, src), &hit) in canvas
        .chunks_exact_mut(4)
        .zip(straight.chunks_exact(4))
        .zip(&covered)
    {
        if hit {
            unpremultiply_rgba8_in_place(out);
        } else {
            out.copy_from_slice(src);
        }
    }
    PixelImage::from_rgba8(base.width(), base.height(), canvas)
        .map_err(|e| FacetintError::render(e.to_string()))
}

fn surface_dims(base: &PixelImage) -> FacetintResult<(u16, u16)> {
    let width: u16 = base
        .width()
        .try_into()
        .map_err(|_| FacetintError::render("image width exceeds u16"))?;
    let height: u16 = base
        .height()
        .try_into()
        .map_err(|_| FacetintError::render("image height exceeds u16"))?;
    if width == 0 || height == 0 {
        return Err(FacetintError::render("cannot composite onto an empty image"));
    }
    Ok((width, height))
}

fn rasterize_fill(
    path: &BezPath,
    color: OverlayColor,
    width: u16,
    height: u16,
) -> vello_cpu::Pixmap {
    let mut ctx = vello_cpu::RenderContext::new(width, height);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, 255,
    ));
    ctx.fill_path(&bezpath_to_cpu(path));
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap);
    pixmap
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/composite.rs"]
mod tests;
