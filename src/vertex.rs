//! The vertex attribute bundle flowing through the pipeline.
//!
//! A [`Vertex`] enters the rasterizer in homogeneous clip space and leaves
//! the viewport transform in screen space. Its arithmetic operators act
//! component-wise on all attributes at once, which is exactly what linear
//! interpolation needs: `lerp` is expressed purely in terms of `+` and
//! scalar multiplication, so every attribute interpolates the same way.

use std::ops::{Add, Mul, Neg, Sub};

use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// A vertex with position, color, and normal attributes.
///
/// `position` is a homogeneous coordinate: clip space on input to the
/// clipper, screen space (pixel x/y, z/w retained) after the viewport
/// transform. `color` is RGBA with channels nominally in `[0, 1]`, but
/// values are not clamped at storage time. `normal` rides along for
/// shading stages; the rasterizer itself never reads it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec4,
    pub color: Vec4,
    pub normal: Vec3,
}

impl Vertex {
    pub const fn new(position: Vec4, color: Vec4, normal: Vec3) -> Self {
        Self {
            position,
            color,
            normal,
        }
    }

    /// Linear interpolation from `self` toward `other`.
    ///
    /// Returns `(1 - t) * self + t * other`; at `t = 0` the result is
    /// `self`, at `t = 1` it is `other`. All attributes interpolate.
    pub fn lerp(&self, other: &Vertex, t: f32) -> Vertex {
        (1.0 - t) * *self + t * *other
    }
}

impl Add<Vertex> for Vertex {
    type Output = Vertex;

    fn add(self, rhs: Vertex) -> Self::Output {
        Self {
            position: self.position + rhs.position,
            color: self.color + rhs.color,
            normal: self.normal + rhs.normal,
        }
    }
}

impl Sub<Vertex> for Vertex {
    type Output = Vertex;

    fn sub(self, rhs: Vertex) -> Self::Output {
        Self {
            position: self.position - rhs.position,
            color: self.color - rhs.color,
            normal: self.normal - rhs.normal,
        }
    }
}

impl Neg for Vertex {
    type Output = Vertex;

    fn neg(self) -> Self::Output {
        Self {
            position: -self.position,
            color: -self.color,
            normal: -self.normal,
        }
    }
}

/// Scalar multiplication with the scalar on the left, applied to every
/// attribute.
impl Mul<Vertex> for f32 {
    type Output = Vertex;

    fn mul(self, rhs: Vertex) -> Self::Output {
        Vertex {
            position: self * rhs.position,
            color: self * rhs.color,
            normal: self * rhs.normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> (Vertex, Vertex) {
        let a = Vertex::new(
            Vec4::new(1.0, 2.0, 3.0, 1.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let b = Vertex::new(
            Vec4::new(3.0, 6.0, -1.0, 2.0),
            Vec4::new(0.0, 1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
        );
        (a, b)
    }

    #[test]
    fn arithmetic_covers_all_attributes() {
        let (a, b) = sample();
        let sum = a + b;
        assert_eq!(sum.position, Vec4::new(4.0, 8.0, 2.0, 3.0));
        assert_eq!(sum.color, Vec4::new(1.0, 1.0, 0.0, 2.0));
        assert_eq!(sum.normal, Vec3::new(1.0, 1.0, 0.0));

        let neg = -a;
        assert_eq!(neg.position, Vec4::new(-1.0, -2.0, -3.0, -1.0));

        let scaled = 2.0 * b;
        assert_eq!(scaled.normal, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn arithmetic_leaves_operands_untouched() {
        let (a, b) = sample();
        let _ = a + b;
        let _ = a - b;
        let _ = 3.0 * a;
        assert_eq!(a, sample().0);
        assert_eq!(b, sample().1);
    }

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        let (a, b) = sample();
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);

        let mid = a.lerp(&b, 0.5);
        assert_relative_eq!(mid.position.x, 2.0);
        assert_relative_eq!(mid.position.w, 1.5);
        assert_relative_eq!(mid.color.x, 0.5);
        assert_relative_eq!(mid.normal.x, 0.5);
    }
}
