//! Fragment shaders invoked once per covered pixel.
//!
//! The rasterizer owns scan conversion and attribute interpolation; the
//! bound [`FragmentShader`] decides the final color. For each covered
//! pixel the rasterizer builds a [`FragmentInput`] from the interpolated
//! vertex attributes, calls [`FragmentShader::run`], packs the returned
//! color, and then calls [`FragmentShader::reset`] so any transient
//! per-invocation state is cleared before the next pixel.

use crate::math::vec4::Vec4;

/// Interpolated per-pixel inputs handed to a fragment shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FragmentInput {
    /// Interpolated screen-space position (x/y in pixels, z/w retained).
    pub position: Vec4,
    /// Interpolated RGBA vertex color.
    pub color: Vec4,
}

/// Per-pixel shading contract.
///
/// Implementations may carry mutable per-draw state; the renderer holds
/// them behind a non-owning handle and duplicating one across pipeline
/// stages goes through [`clone_box`](FragmentShader::clone_box) so the
/// copies never alias.
pub trait FragmentShader {
    /// Compute the output color for one pixel.
    fn run(&mut self, input: &FragmentInput) -> Vec4;

    /// Clear transient state accumulated during a single invocation.
    /// Called by the rasterizer after every pixel.
    fn reset(&mut self) {}

    /// Deep-copy this shader into an independent boxed instance.
    fn clone_box(&self) -> Box<dyn FragmentShader>;
}

/// Forwards the interpolated vertex color unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorShader;

impl FragmentShader for ColorShader {
    fn run(&mut self, input: &FragmentInput) -> Vec4 {
        input.color
    }

    fn clone_box(&self) -> Box<dyn FragmentShader> {
        Box::new(*self)
    }
}

/// Ignores interpolated attributes and outputs a fixed color.
#[derive(Clone, Copy, Debug)]
pub struct FlatColorShader {
    color: Vec4,
}

impl FlatColorShader {
    pub fn new(color: Vec4) -> Self {
        Self { color }
    }
}

impl FragmentShader for FlatColorShader {
    fn run(&mut self, _input: &FragmentInput) -> Vec4 {
        self.color
    }

    fn clone_box(&self) -> Box<dyn FragmentShader> {
        Box::new(*self)
    }
}
