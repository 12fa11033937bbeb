//! Color packing for the 32-bit framebuffer pixel format.
//!
//! Pixels are stored as one `u32` per pixel with the red channel in the
//! lowest byte, so the in-memory byte order on little-endian machines is
//! `[R, G, B, A]`.

use crate::math::vec4::Vec4;

pub const WHITE: u32 = 0xFFFF_FFFF;
pub const BLACK: u32 = 0xFF00_0000;

/// Pack an RGBA color with channels in `[0, 1]` into a `u32` pixel.
///
/// Channels are scaled by 255, truncated, and masked to 8 bits. There is
/// no rounding and no clamp beyond the mask: out-of-range channel values
/// wrap. Shaders that want saturation must clamp before returning.
pub fn pack_color(color: Vec4) -> u32 {
    let c = 255.0 * color;

    let r = c.x as i32 & 0xFF;
    let g = c.y as i32 & 0xFF;
    let b = c.z as i32 & 0xFF;
    let a = c.w as i32 & 0xFF;

    (a << 24 | b << 16 | g << 8 | r) as u32
}

/// Unpack a `u32` pixel back into normalized RGBA.
pub fn unpack_color(pixel: u32) -> Vec4 {
    Vec4::new(
        (pixel & 0xFF) as f32 / 255.0,
        (pixel >> 8 & 0xFF) as f32 / 255.0,
        (pixel >> 16 & 0xFF) as f32 / 255.0,
        (pixel >> 24 & 0xFF) as f32 / 255.0,
    )
}
