//! Shape generation for 2D primitives
//!
//! Everything is drawn as triangle lists in screen pixels (y down).

use glam::Vec2;

use super::vertex::Vertex;

/// Append a filled rectangle (two triangles) with a single color
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: [f32; 4]) {
    vertical_gradient(out, min, size, color, color);
}

/// Append a rectangle whose color blends from `top` to `bottom`
pub fn vertical_gradient(
    out: &mut Vec<Vertex>,
    min: Vec2,
    size: Vec2,
    top: [f32; 4],
    bottom: [f32; 4],
) {
    let max = min + size;

    out.push(Vertex::new(min.x, min.y, top));
    out.push(Vertex::new(max.x, min.y, top));
    out.push(Vertex::new(min.x, max.y, bottom));

    out.push(Vertex::new(min.x, max.y, bottom));
    out.push(Vertex::new(max.x, min.y, top));
    out.push(Vertex::new(max.x, max.y, bottom));
}

/// Append a rectangle with corners cut by `radius` (an octagon fan)
pub fn rounded_rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, radius: f32, color: [f32; 4]) {
    let r = radius.min(size.x * 0.5).min(size.y * 0.5).max(0.0);
    if r == 0.0 {
        rect(out, min, size, color);
        return;
    }

    let max = min + size;
    let center = min + size * 0.5;
    let outline = [
        Vec2::new(min.x + r, min.y),
        Vec2::new(max.x - r, min.y),
        Vec2::new(max.x, min.y + r),
        Vec2::new(max.x, max.y - r),
        Vec2::new(max.x - r, max.y),
        Vec2::new(min.x + r, max.y),
        Vec2::new(min.x, max.y - r),
        Vec2::new(min.x, min.y + r),
    ];

    for i in 0..outline.len() {
        let a = outline[i];
        let b = outline[(i + 1) % outline.len()];
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(a.x, a.y, color));
        out.push(Vertex::new(b.x, b.y, color));
    }
}

/// Fade a color's alpha by `alpha` in [0, 1]
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}
