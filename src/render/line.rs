//! Integer line drawing for wireframes and debug overlays.

use super::framebuffer::RenderTarget;

/// Draw a solid-color line using Bresenham's algorithm with a combined
/// error term.
///
/// The error term `err` tracks the distance between the ideal line and
/// the pixel grid for both axes at once; each step advances x, y, or
/// both depending on which side of the ideal line the accumulated error
/// falls. Only integer arithmetic is used, and the same pixel set is
/// produced no matter which endpoint comes first.
///
/// Every pixel is bounds-checked against the target before writing. No
/// shading, no interpolation.
pub(crate) fn draw_line(
    target: &mut dyn RenderTarget,
    x_begin: i32,
    y_begin: i32,
    x_end: i32,
    y_end: i32,
    color: u32,
) {
    let width = target.width() as i32;
    let height = target.height() as i32;

    let dx = (x_end - x_begin).abs();
    let sx = if x_begin < x_end { 1 } else { -1 };
    let dy = -(y_end - y_begin).abs();
    let sy = if y_begin < y_end { 1 } else { -1 };

    let mut err = dx + dy;
    let mut x = x_begin;
    let mut y = y_begin;

    loop {
        if x >= 0 && x < width && y >= 0 && y < height {
            target.set_pixel(x, y, color);
        }

        if x == x_end && y == y_end {
            break;
        }

        let e2 = 2 * err;
        if e2 > dy {
            err += dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}
