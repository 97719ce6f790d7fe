//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in logical canvas coordinates.

use glam::Vec2;

use super::vertex::Vertex;
use super::vertex::colors::{Rgb, linear};
use crate::sim::Rect;

/// Append a filled rectangle (two triangles)
pub fn rect(out: &mut Vec<Vertex>, r: &Rect, color: Rgb) {
    let c = linear(color);
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());

    out.push(Vertex::new(l, t, c));
    out.push(Vertex::new(l, b, c));
    out.push(Vertex::new(rt, t, c));

    out.push(Vertex::new(rt, t, c));
    out.push(Vertex::new(l, b, c));
    out.push(Vertex::new(rt, b, c));
}

/// Append a filled rectangle with a border drawn around the inside edge
pub fn outlined_rect(out: &mut Vec<Vertex>, r: &Rect, fill: Rgb, border: Rgb, width: f32) {
    rect(out, r, border);
    let inner = r.inflate(-width);
    if inner.size.x > 0.0 && inner.size.y > 0.0 {
        rect(out, &inner, fill);
    }
}

/// Append a line segment of the given width as a quad
pub fn line(out: &mut Vec<Vertex>, from: Vec2, to: Vec2, width: f32, color: Rgb) {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    let c = linear(color);
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a = from + perp;
    let b = from - perp;
    let d = to + perp;
    let e = to - perp;

    out.push(Vertex::new(a.x, a.y, c));
    out.push(Vertex::new(b.x, b.y, c));
    out.push(Vertex::new(d.x, d.y, c));

    out.push(Vertex::new(d.x, d.y, c));
    out.push(Vertex::new(b.x, b.y, c));
    out.push(Vertex::new(e.x, e.y, c));
}
