//! Draw-call entry points tying the pipeline stages together.
//!
//! A [`Renderer`] owns neither the framebuffer it draws into nor the
//! fragment shader it invokes; both are held as weak handles whose
//! owners live elsewhere. Every entry point upgrades the handles first
//! and silently does nothing when they have expired — malformed or
//! unbound state degrades to an empty draw, never an error. There is no
//! return code and no diagnostic channel by design.
//!
//! Per indexed triangle the flow is: surface normal → optional backface
//! reject → near-plane clip (0, 1, or 2 triangles) → viewport transform
//! → scanline fill (or wireframe lines). One call completes fully,
//! including all shader invocations, before returning; the renderer is
//! the sole writer to the pixel buffer while it runs.

use std::cell::RefCell;
use std::rc::Weak;

use crate::clipper::{self, ClipResult};
use crate::colors;
use crate::math::vec3::Vec3;
use crate::shader::FragmentShader;
use crate::vertex::Vertex;
use crate::viewport;

use super::framebuffer::RenderTarget;
use super::{draw_line, fill_triangle, Point2};

/// How [`Renderer::render_indexed`] interprets each index triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Filled triangles through the fragment shader.
    #[default]
    Triangle,
    /// Edge-only triangles in solid white, bypassing the shader.
    TriangleWireframe,
}

pub struct Renderer {
    frame_buffer: Option<Weak<RefCell<dyn RenderTarget>>>,
    fragment_shader: Option<Weak<RefCell<dyn FragmentShader>>>,
    backface_culling: bool,
}

impl Renderer {
    /// Creates a renderer with no surface or shader bound and backface
    /// culling disabled.
    pub fn new() -> Self {
        Self {
            frame_buffer: None,
            fragment_shader: None,
            backface_culling: false,
        }
    }

    /// Bind the surface to draw into. The renderer keeps only a weak
    /// handle; dropping the owning reference unbinds it implicitly.
    pub fn set_render_surface(&mut self, surface: Weak<RefCell<dyn RenderTarget>>) {
        self.frame_buffer = Some(surface);
    }

    /// Bind the fragment shader used by filled triangles. Weak, like
    /// the surface.
    pub fn bind_fragment_shader(&mut self, shader: Weak<RefCell<dyn FragmentShader>>) {
        self.fragment_shader = Some(shader);
    }

    pub fn enable_backface_culling(&mut self) {
        self.backface_culling = true;
    }

    pub fn disable_backface_culling(&mut self) {
        self.backface_culling = false;
    }

    pub fn backface_culling_enabled(&self) -> bool {
        self.backface_culling
    }

    /// Draw every triangle described by `indices` (triples into
    /// `vertices`, which hold clip-space positions).
    ///
    /// Each triangle is backface-tested (when culling is on), clipped
    /// against the near plane, and the 0, 1, or 2 surviving triangles
    /// are filled or outlined according to `mode`.
    pub fn render_indexed(&self, mode: RenderMode, vertices: &[Vertex], indices: &[[usize; 3]]) {
        let Some(fb) = self.surface() else { return };
        let mut fb = fb.borrow_mut();

        for triple in indices {
            let v1 = &vertices[triple[0]];
            let v2 = &vertices[triple[1]];
            let v3 = &vertices[triple[2]];

            if self.backface_culling && Self::is_backfacing(v1, v2, v3) {
                continue;
            }

            match clipper::clip_triangle(v1, v2, v3) {
                ClipResult::Outside => continue,
                ClipResult::One(tri) => match mode {
                    RenderMode::Triangle => {
                        self.rasterize_triangle(&mut *fb, &tri[0], &tri[1], &tri[2]);
                    }
                    RenderMode::TriangleWireframe => {
                        self.rasterize_wireframe(&mut *fb, &tri[0], &tri[1], &tri[2]);
                    }
                },
                ClipResult::Two(quad) => match mode {
                    RenderMode::Triangle => {
                        self.rasterize_triangle(&mut *fb, &quad[0], &quad[1], &quad[2]);
                        self.rasterize_triangle(&mut *fb, &quad[0], &quad[2], &quad[3]);
                    }
                    RenderMode::TriangleWireframe => {
                        self.rasterize_wireframe(&mut *fb, &quad[0], &quad[1], &quad[2]);
                        self.rasterize_wireframe(&mut *fb, &quad[0], &quad[2], &quad[3]);
                    }
                },
            }
        }
    }

    /// Fill a single clip-space triangle, bypassing indexing, culling,
    /// and clipping.
    pub fn render_triangle(&self, v1: &Vertex, v2: &Vertex, v3: &Vertex) {
        let Some(fb) = self.surface() else { return };
        let mut fb = fb.borrow_mut();
        self.rasterize_triangle(&mut *fb, v1, v2, v3);
    }

    /// Outline a single clip-space triangle in solid white.
    pub fn render_triangle_wireframe(&self, v1: &Vertex, v2: &Vertex, v3: &Vertex) {
        let Some(fb) = self.surface() else { return };
        let mut fb = fb.borrow_mut();
        self.rasterize_wireframe(&mut *fb, v1, v2, v3);
    }

    /// Draw a raw screen-space line with an explicit packed color,
    /// bypassing the shader pipeline entirely.
    pub fn render_line(&self, begin: Point2, end: Point2, color: u32) {
        let Some(fb) = self.surface() else { return };
        let mut fb = fb.borrow_mut();
        draw_line(&mut *fb, begin.x, begin.y, end.x, end.y, color);
    }

    /// Viewport-transform and scanline-fill one triangle. Skipped
    /// silently when the shader handle has expired: nothing is shaded
    /// or written, and the caller cannot observe the difference.
    fn rasterize_triangle(&self, fb: &mut dyn RenderTarget, v1: &Vertex, v2: &Vertex, v3: &Vertex) {
        let Some(shader) = self.shader() else { return };
        let mut shader = shader.borrow_mut();

        let width = fb.width();
        let height = fb.height();

        let tv1 = viewport::to_screen(v1, width, height);
        let tv2 = viewport::to_screen(v2, width, height);
        let tv3 = viewport::to_screen(v3, width, height);

        fill_triangle(fb, &mut *shader, &tv1, &tv2, &tv3);
    }

    fn rasterize_wireframe(&self, fb: &mut dyn RenderTarget, v1: &Vertex, v2: &Vertex, v3: &Vertex) {
        let width = fb.width();
        let height = fb.height();

        let p1 = viewport::to_screen(v1, width, height).position;
        let p2 = viewport::to_screen(v2, width, height).position;
        let p3 = viewport::to_screen(v3, width, height).position;

        let color = colors::WHITE;
        draw_line(fb, p1.x as i32, p1.y as i32, p2.x as i32, p2.y as i32, color);
        draw_line(fb, p2.x as i32, p2.y as i32, p3.x as i32, p3.y as i32, color);
        draw_line(fb, p3.x as i32, p3.y as i32, p1.x as i32, p1.y as i32, color);
    }

    /// Cross product of two edges, oriented by the input winding.
    fn surface_normal(v1: &Vertex, v2: &Vertex, v3: &Vertex) -> Vec3 {
        (v2.position - v1.position)
            .to_vec3()
            .cross((v3.position - v1.position).to_vec3())
    }

    /// True when the triangle's visible side faces away from the eye.
    ///
    /// The test runs in clip space before the perspective divide, using
    /// (x, y, w) of the second vertex as the eye-relative position.
    fn is_backfacing(v1: &Vertex, v2: &Vertex, v3: &Vertex) -> bool {
        let normal = -Self::surface_normal(v1, v2, v3);
        let eye = Vec3::new(v2.position.x, v2.position.y, v2.position.w);
        normal.dot(-eye) > 0.0
    }

    fn surface(&self) -> Option<std::rc::Rc<RefCell<dyn RenderTarget>>> {
        self.frame_buffer.as_ref().and_then(Weak::upgrade)
    }

    fn shader(&self) -> Option<std::rc::Rc<RefCell<dyn FragmentShader>>> {
        self.fragment_shader.as_ref().and_then(Weak::upgrade)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec4::Vec4;
    use crate::render::framebuffer::PixelBuffer;
    use crate::shader::ColorShader;
    use std::rc::Rc;

    fn vert(x: f32, y: f32, z: f32, w: f32) -> Vertex {
        Vertex::new(Vec4::new(x, y, z, w), Vec4::ONE, Vec3::ZERO)
    }

    struct Fixture {
        buffer: Rc<RefCell<PixelBuffer>>,
        // Keep the coerced handles alive so the weak bindings stay valid.
        target: Rc<RefCell<dyn RenderTarget>>,
        shader: Rc<RefCell<dyn FragmentShader>>,
        renderer: Renderer,
    }

    impl Fixture {
        fn new(width: u32, height: u32) -> Self {
            let buffer = Rc::new(RefCell::new(PixelBuffer::new(width, height)));
            let target: Rc<RefCell<dyn RenderTarget>> = buffer.clone();
            let shader: Rc<RefCell<dyn FragmentShader>> = Rc::new(RefCell::new(ColorShader));

            let mut renderer = Renderer::new();
            renderer.set_render_surface(Rc::downgrade(&target));
            renderer.bind_fragment_shader(Rc::downgrade(&shader));

            Self {
                buffer,
                target,
                shader,
                renderer,
            }
        }

        fn filled_pixels(&self) -> usize {
            self.buffer
                .borrow()
                .pixels()
                .iter()
                .filter(|&&p| p != 0)
                .count()
        }
    }

    /// Front-facing triangle near the center of the view, fully inside
    /// the near plane.
    fn front_facing() -> [Vertex; 3] {
        [
            vert(-0.5, -0.5, 0.0, 1.0),
            vert(0.0, 0.5, 0.0, 1.0),
            vert(0.5, -0.5, 0.0, 1.0),
        ]
    }

    /// Same triangle with the winding reversed.
    fn back_facing() -> [Vertex; 3] {
        [
            vert(-0.5, -0.5, 0.0, 1.0),
            vert(0.5, -0.5, 0.0, 1.0),
            vert(0.0, 0.5, 0.0, 1.0),
        ]
    }

    #[test]
    fn culling_disabled_draws_both_windings() {
        for tri in [front_facing(), back_facing()] {
            let fixture = Fixture::new(100, 100);
            fixture
                .renderer
                .render_indexed(RenderMode::Triangle, &tri, &[[0, 1, 2]]);
            assert!(fixture.filled_pixels() > 0);
        }
    }

    #[test]
    fn culling_enabled_rejects_back_faces_only() {
        let mut fixture = Fixture::new(100, 100);
        fixture.renderer.enable_backface_culling();

        fixture
            .renderer
            .render_indexed(RenderMode::Triangle, &back_facing(), &[[0, 1, 2]]);
        assert_eq!(fixture.filled_pixels(), 0);

        fixture
            .renderer
            .render_indexed(RenderMode::Triangle, &front_facing(), &[[0, 1, 2]]);
        assert!(fixture.filled_pixels() > 0);
    }

    #[test]
    fn culling_defaults_to_disabled() {
        assert!(!Renderer::new().backface_culling_enabled());
    }

    #[test]
    fn triangle_behind_the_eye_is_rejected() {
        let fixture = Fixture::new(100, 100);
        // z < -w for all vertices: fully outside the near half-space.
        let tri = [
            vert(-0.5, -0.5, -3.0, 1.0),
            vert(0.0, 0.5, -2.0, 1.0),
            vert(0.5, -0.5, -4.0, 1.0),
        ];
        fixture
            .renderer
            .render_indexed(RenderMode::Triangle, &tri, &[[0, 1, 2]]);
        assert_eq!(fixture.filled_pixels(), 0);
    }

    #[test]
    fn straddling_triangle_still_draws() {
        let fixture = Fixture::new(100, 100);
        // One vertex behind the near plane; the clipper emits a quad.
        let tri = [
            vert(-0.5, -0.5, 0.0, 2.0),
            vert(0.5, -0.5, 0.5, 2.5),
            vert(0.0, 0.5, -2.0, 0.25),
        ];
        fixture
            .renderer
            .render_indexed(RenderMode::Triangle, &tri, &[[0, 1, 2]]);
        assert!(fixture.filled_pixels() > 0);
    }

    #[test]
    fn dropped_surface_makes_draws_a_no_op() {
        let mut renderer = Renderer::new();
        let shader: Rc<RefCell<dyn FragmentShader>> = Rc::new(RefCell::new(ColorShader));
        renderer.bind_fragment_shader(Rc::downgrade(&shader));

        {
            let buffer: Rc<RefCell<dyn RenderTarget>> =
                Rc::new(RefCell::new(PixelBuffer::new(10, 10)));
            renderer.set_render_surface(Rc::downgrade(&buffer));
        }

        let tri = front_facing();
        renderer.render_indexed(RenderMode::Triangle, &tri, &[[0, 1, 2]]);
        renderer.render_triangle(&tri[0], &tri[1], &tri[2]);
        renderer.render_line(Point2::new(0, 0), Point2::new(5, 5), colors::WHITE);
    }

    #[test]
    fn dropped_shader_skips_fill_but_not_wireframe() {
        let mut fixture = Fixture::new(100, 100);
        fixture.renderer.bind_fragment_shader(
            Rc::downgrade(&(Rc::new(RefCell::new(ColorShader)) as Rc<RefCell<dyn FragmentShader>>)),
        );

        let tri = front_facing();
        fixture
            .renderer
            .render_indexed(RenderMode::Triangle, &tri, &[[0, 1, 2]]);
        assert_eq!(fixture.filled_pixels(), 0);

        fixture
            .renderer
            .render_indexed(RenderMode::TriangleWireframe, &tri, &[[0, 1, 2]]);
        assert!(fixture.filled_pixels() > 0);
    }

    #[test]
    fn render_line_matches_raw_draw() {
        let fixture = Fixture::new(20, 20);
        fixture
            .renderer
            .render_line(Point2::new(1, 1), Point2::new(10, 4), 0xFF00_FF00);

        let buffer = fixture.buffer.borrow();
        assert_eq!(buffer.get_pixel(1, 1), Some(0xFF00_FF00));
        assert_eq!(buffer.get_pixel(10, 4), Some(0xFF00_FF00));
    }

    #[test]
    fn wireframe_draws_white_edges() {
        let fixture = Fixture::new(100, 100);
        let tri = front_facing();
        fixture
            .renderer
            .render_triangle_wireframe(&tri[0], &tri[1], &tri[2]);

        let buffer = fixture.buffer.borrow();
        assert!(buffer.pixels().iter().any(|&p| p == colors::WHITE));
        assert!(buffer.pixels().iter().all(|&p| p == 0 || p == colors::WHITE));
    }

    #[test]
    fn shader_stays_usable_by_its_owner_after_draws() {
        let fixture = Fixture::new(50, 50);
        let tri = front_facing();
        fixture
            .renderer
            .render_indexed(RenderMode::Triangle, &tri, &[[0, 1, 2]]);

        // Owner retains full access once the draw call returns.
        let mut shader = fixture.shader.borrow_mut();
        let _ = shader.run(&crate::shader::FragmentInput {
            position: Vec4::ZERO,
            color: Vec4::ONE,
        });
        drop(shader);
        let _ = &fixture.target;
    }
}
