//! Perspective divide and NDC-to-screen mapping.

use crate::math::vec4::Vec4;
use crate::vertex::Vertex;

/// Map a clip-space vertex to screen space.
///
/// Divides by w, then maps NDC x in `[-1, 1]` to `[0, width]` and NDC y
/// to `[0, height]` with y flipped (screen origin is top-left, clip +y
/// points up). `z` keeps its divided value and `w` becomes 1, retained
/// for later stages. Color and normal pass through unchanged.
pub fn to_screen(vertex: &Vertex, width: u32, height: u32) -> Vertex {
    let pos = vertex.position;
    let scale = 1.0 / pos.w;

    Vertex {
        position: Vec4::new(
            (pos.x * scale + 1.0) * width as f32 / 2.0,
            (-pos.y * scale + 1.0) * height as f32 / 2.0,
            pos.z * scale,
            pos.w * scale,
        ),
        color: vertex.color,
        normal: vertex.normal,
    }
}
