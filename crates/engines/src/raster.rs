//! CPU rasterization of generated shapes onto a [`Pixmap`].
//!
//! Geometry is mapped to pixel space through the [`Canvas`] before it is
//! handed to tiny-skia, so every draw call uses the identity transform.
//! Shapes are painted in order, later ones covering earlier ones, and are
//! clipped to the plot area so the background pad stays clean.

use artgen_core::canvas::Canvas;
use artgen_core::color::Srgb;
use artgen_core::error::EngineError;
use artgen_core::shape::{Geometry, Shape};
use glam::DVec2;
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Mask, Paint, Path, PathBuilder, Pixmap, Rect, Stroke,
    Transform,
};

/// Paints `shapes` over the canvas background and returns the pixmap.
///
/// Returns `EngineError::InvalidDimensions` if the canvas pixel size cannot
/// be allocated.
pub fn rasterize(canvas: &Canvas, shapes: &[Shape]) -> Result<Pixmap, EngineError> {
    let mut pixmap = Pixmap::new(canvas.width_px(), canvas.height_px())
        .ok_or(EngineError::InvalidDimensions)?;
    pixmap.fill(to_color(canvas.background(), 1.0));
    let clip = plot_mask(canvas)?;

    for shape in shapes {
        let Some(path) = build_path(canvas, shape.geometry()) else {
            continue;
        };
        if let Some(fill) = shape.fill() {
            let paint = paint(fill, shape.opacity());
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), Some(&clip));
        }
        if let Some(outline) = shape.stroke() {
            let paint = paint(outline.color, shape.opacity());
            let stroke = Stroke {
                width: canvas.points_to_px(outline.width) as f32,
                line_cap: LineCap::Square,
                line_join: LineJoin::Round,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), Some(&clip));
        }
    }
    Ok(pixmap)
}

/// Mask covering the plot area, i.e. the frame's data extents.
fn plot_mask(canvas: &Canvas) -> Result<Mask, EngineError> {
    let mut mask =
        Mask::new(canvas.width_px(), canvas.height_px()).ok_or(EngineError::InvalidDimensions)?;
    let top_left = canvas.to_pixel(DVec2::new(canvas.frame().x_min, canvas.frame().y_max));
    let bottom_right = canvas.to_pixel(DVec2::new(canvas.frame().x_max, canvas.frame().y_min));
    let plot = Rect::from_ltrb(
        top_left.x as f32,
        top_left.y as f32,
        bottom_right.x as f32,
        bottom_right.y as f32,
    )
    .ok_or(EngineError::InvalidDimensions)?;
    mask.fill_path(
        &PathBuilder::from_rect(plot),
        FillRule::Winding,
        false,
        Transform::identity(),
    );
    Ok(mask)
}

fn to_color(c: Srgb, opacity: f64) -> Color {
    let c = c.clamped();
    Color::from_rgba(
        c.r as f32,
        c.g as f32,
        c.b as f32,
        opacity.clamp(0.0, 1.0) as f32,
    )
    .unwrap_or(Color::BLACK)
}

fn paint(color: Srgb, opacity: f64) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_color(color, opacity));
    paint.anti_alias = true;
    paint
}

/// Builds a pixel-space path, or `None` for geometry with nothing to draw.
fn build_path(canvas: &Canvas, geometry: &Geometry) -> Option<Path> {
    if let Geometry::Circle { center, radius } = geometry {
        if *radius <= 0.0 {
            return None;
        }
        let c = canvas.to_pixel(*center);
        let rx = canvas.x_length_px(*radius);
        let ry = canvas.y_length_px(*radius);
        let oval = Rect::from_ltrb(
            (c.x - rx) as f32,
            (c.y - ry) as f32,
            (c.x + rx) as f32,
            (c.y + ry) as f32,
        )?;
        return PathBuilder::from_oval(oval);
    }

    let vertices = geometry.vertices();
    if vertices.len() < 2 {
        return None;
    }
    let mut pb = PathBuilder::new();
    for (i, v) in vertices.iter().enumerate() {
        let p = canvas.to_pixel(*v);
        if i == 0 {
            pb.move_to(p.x as f32, p.y as f32);
        } else {
            pb.line_to(p.x as f32, p.y as f32);
        }
    }
    if geometry.is_closed() {
        pb.close();
    }
    pb.finish()
}
