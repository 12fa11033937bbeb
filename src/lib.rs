//! A CPU-based triangle rasterization engine.
//!
//! Given clip-space vertices (already through vertex/geometry
//! transforms), this crate clips them against the near plane, projects
//! them to screen space, scan-converts the resulting triangles, and
//! invokes a user-supplied fragment shader for every covered pixel.
//! SDL2 is used only by the optional [`window`] surface for display;
//! all rendering happens on the CPU.
//!
//! # Quick Start
//!
//! ```ignore
//! use softrast::prelude::*;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let buffer: Rc<RefCell<dyn RenderTarget>> =
//!     Rc::new(RefCell::new(PixelBuffer::new(800, 600)));
//! let shader: Rc<RefCell<dyn FragmentShader>> =
//!     Rc::new(RefCell::new(ColorShader));
//!
//! let mut renderer = Renderer::new();
//! renderer.set_render_surface(Rc::downgrade(&buffer));
//! renderer.bind_fragment_shader(Rc::downgrade(&shader));
//! renderer.render_indexed(RenderMode::Triangle, &vertices, &indices);
//! ```

// Public API - exposed to library consumers
pub mod clipper;
pub mod colors;
pub mod math;
pub mod model;
pub mod render;
pub mod shader;
pub mod vertex;
pub mod viewport;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use render::{PixelBuffer, Point2, RenderMode, RenderTarget, Renderer};
pub use shader::{ColorShader, FlatColorShader, FragmentInput, FragmentShader};
pub use vertex::Vertex;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softrast::prelude::*;
/// ```
pub mod prelude {
    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Pipeline
    pub use crate::clipper::{clip_triangle, ClipResult};
    pub use crate::vertex::Vertex;
    pub use crate::viewport::to_screen;

    // Rendering
    pub use crate::render::{PixelBuffer, Point2, RenderMode, RenderTarget, Renderer};
    pub use crate::shader::{ColorShader, FlatColorShader, FragmentInput, FragmentShader};

    // Model & Window
    pub use crate::model::Model;
    pub use crate::window::{FrameLimiter, Key, Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::fill_triangle;
}
