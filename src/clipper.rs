//! Near-plane clipping in homogeneous clip space.
//!
//! Clipping happens after projection, before the perspective divide. A
//! vertex is inside the near half-space iff `-w <= z`, which for `w > 0`
//! is the usual `z/w >= -1` test without the divide.
//!
//! Only the near plane is clipped. The other frustum planes are handled
//! implicitly: geometry off the sides of the screen rasterizes to spans
//! the per-pixel bounds check rejects. The near plane cannot be handled
//! that way because vertices behind the eye flip sign under the
//! perspective divide and would rasterize garbage.
//!
//! A triangle against one plane yields 0, 1, or 2 output triangles:
//!
//! ```text
//!  all in      1 in, 2 out        2 in, 1 out
//!   /\            /\             in1 ______ in2
//!  /  \       ___/__\___ plane      \      /
//! /____\     v4 /    \ v5         v4 \____/ v5   ___ plane
//!              /......\               \  /
//!            out1    out2              \/ out
//! ```
//!
//! The 2-in case returns the quad `(in1, in2, v5, v4)`, which the caller
//! fans into triangles `(0,1,2)` and `(0,2,3)`.

use crate::vertex::Vertex;

/// Outcome of clipping one triangle against the near plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClipResult {
    /// Every vertex failed the near test; nothing to draw.
    Outside,
    /// A single surviving triangle, either the unmodified input or one
    /// rebuilt from the inside vertex and two plane intersections.
    One([Vertex; 3]),
    /// Two triangles sharing the edge `(quad[0], quad[2])` of the quad
    /// `(in1, in2, v5, v4)`.
    Two([Vertex; 4]),
}

fn inside_near(v: &Vertex) -> bool {
    -v.position.w <= v.position.z
}

/// Clip a triangle against the near plane.
///
/// Pure function of its inputs. When all three vertices are inside, the
/// result carries them bit-identical, in order. New vertices are placed
/// on the plane `w = -near` where `near = (anchor.z - anchor.w) / 2` for
/// the anchor vertex of the case (the inside vertex when one survives,
/// the outside vertex when two survive).
///
/// Edges whose endpoints share the same `w` make the interpolation
/// denominator collapse to zero; the resulting non-finite coordinates
/// are passed through rather than guarded.
pub fn clip_triangle(v1: &Vertex, v2: &Vertex, v3: &Vertex) -> ClipResult {
    let inside1 = inside_near(v1);
    let inside2 = inside_near(v2);
    let inside3 = inside_near(v3);

    let inside_count = inside1 as u8 + inside2 as u8 + inside3 as u8;

    match inside_count {
        3 => ClipResult::One([*v1, *v2, *v3]),
        0 => ClipResult::Outside,
        1 => {
            // Selection keeps the winding of the input triangle.
            let vin = if inside1 {
                v1
            } else if inside2 {
                v2
            } else {
                v3
            };
            let out1 = if !inside1 { v1 } else { v2 };
            let out2 = if !inside3 { v3 } else { v2 };

            let near = (vin.position.z - vin.position.w) / 2.0;

            let alpha1 = -(vin.position.w + near) / (out1.position.w - vin.position.w);
            let alpha2 = -(vin.position.w + near) / (out2.position.w - vin.position.w);

            let v4 = vin.lerp(out1, alpha1);
            let v5 = vin.lerp(out2, alpha2);

            ClipResult::One([*vin, v4, v5])
        }
        _ => {
            let out = if !inside1 {
                v1
            } else if !inside2 {
                v2
            } else {
                v3
            };
            let in1 = if inside1 { v1 } else { v2 };
            let in2 = if inside3 { v3 } else { v2 };

            let near = (out.position.z - out.position.w) / 2.0;

            let alpha1 = -(in1.position.w + near) / (out.position.w - in1.position.w);
            let alpha2 = -(in2.position.w + near) / (out.position.w - in2.position.w);

            let v4 = in1.lerp(out, alpha1);
            let v5 = in2.lerp(out, alpha2);

            ClipResult::Two([*in1, *in2, v5, v4])
        }
    }
}
