//! Demo: a spinning cube (or a wireframe OBJ model) rendered on the
//! CPU and presented through SDL2.
//!
//! Usage:
//! ```text
//! softrast [--snapshot out.png] [model.obj]
//! ```
//!
//! With `--snapshot` a single frame is rendered headless and written as
//! a PNG instead of opening a window. Keys in windowed mode: `B`
//! toggles backface culling, `W` toggles wireframe, `Escape` quits.

use std::cell::RefCell;
use std::env;
use std::rc::Rc;

use softrast::colors;
use softrast::math::mat4::Mat4;
use softrast::math::vec3::Vec3;
use softrast::math::vec4::Vec4;
use softrast::model::Model;
use softrast::render::{PixelBuffer, RenderMode, RenderTarget, Renderer};
use softrast::shader::{ColorShader, FragmentShader};
use softrast::vertex::Vertex;
use softrast::window::{FrameLimiter, Key, Window, WindowEvent, FPS};

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;
const NEAR: f32 = 0.1;

fn main() -> Result<(), String> {
    let mut snapshot = None;
    let mut model_path = None;

    let args: Vec<String> = env::args().skip(1).collect();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--snapshot" => {
                snapshot = Some(
                    iter.next()
                        .ok_or("--snapshot needs an output path")?
                        .clone(),
                );
            }
            _ => model_path = Some(arg.clone()),
        }
    }

    let (vertices, faces, mode) = match &model_path {
        Some(path) => {
            let model = Model::from_obj(path).map_err(|e| e.to_string())?;
            (
                model.vertices().to_vec(),
                model.faces().to_vec(),
                RenderMode::TriangleWireframe,
            )
        }
        None => {
            let (vertices, faces) = cube();
            (vertices, faces, RenderMode::Triangle)
        }
    };

    match snapshot {
        Some(path) => snapshot_frame(&vertices, &faces, mode, &path),
        None => run_windowed(&vertices, &faces, mode),
    }
}

/// A unit cube with a distinct color per corner and outward-facing
/// winding.
fn cube() -> (Vec<Vertex>, Vec<[usize; 3]>) {
    let corners = [
        (-1.0, -1.0, -1.0),
        (-1.0, 1.0, -1.0),
        (1.0, 1.0, -1.0),
        (1.0, -1.0, -1.0),
        (1.0, 1.0, 1.0),
        (1.0, -1.0, 1.0),
        (-1.0, 1.0, 1.0),
        (-1.0, -1.0, 1.0),
    ];

    let palette = [
        Vec4::new(1.0, 0.0, 0.0, 1.0),
        Vec4::new(0.0, 1.0, 0.0, 1.0),
        Vec4::new(0.0, 0.0, 1.0, 1.0),
        Vec4::new(1.0, 1.0, 0.0, 1.0),
        Vec4::new(1.0, 0.0, 1.0, 1.0),
        Vec4::new(0.0, 1.0, 1.0, 1.0),
        Vec4::new(1.0, 1.0, 1.0, 1.0),
        Vec4::new(1.0, 0.5, 0.0, 1.0),
    ];

    let vertices = corners
        .iter()
        .zip(palette)
        .map(|(&(x, y, z), color)| Vertex::new(Vec4::point(x, y, z), color, Vec3::ZERO))
        .collect();

    let faces = vec![
        [0, 2, 1],
        [0, 3, 2],
        [3, 4, 2],
        [3, 5, 4],
        [5, 6, 4],
        [5, 7, 6],
        [7, 1, 6],
        [7, 0, 1],
        [1, 4, 6],
        [1, 2, 4],
        [5, 0, 7],
        [5, 3, 0],
    ];

    (vertices, faces)
}

/// The demo's vertex stage: rotate the object, push it in front of the
/// camera, and project into clip space for the renderer.
fn transform_vertices(vertices: &[Vertex], angle: f32, width: u32, height: u32) -> Vec<Vertex> {
    let projection = Mat4::perspective_near(NEAR, width, height);
    let model_view =
        Mat4::translation(0.0, 0.0, -4.0) * Mat4::rotation_y(angle) * Mat4::rotation_x(angle * 0.4);
    let matrix = projection * model_view;

    vertices
        .iter()
        .map(|v| Vertex::new(matrix * v.position, v.color, v.normal))
        .collect()
}

fn make_renderer(
    target: &Rc<RefCell<dyn RenderTarget>>,
    shader: &Rc<RefCell<dyn FragmentShader>>,
) -> Renderer {
    let mut renderer = Renderer::new();
    renderer.set_render_surface(Rc::downgrade(target));
    renderer.bind_fragment_shader(Rc::downgrade(shader));
    renderer.enable_backface_culling();
    renderer
}

fn run_windowed(vertices: &[Vertex], faces: &[[usize; 3]], mode: RenderMode) -> Result<(), String> {
    let mut window = Window::new("softrast", WINDOW_WIDTH, WINDOW_HEIGHT)?;

    let buffer = Rc::new(RefCell::new(PixelBuffer::new(WINDOW_WIDTH, WINDOW_HEIGHT)));
    let target: Rc<RefCell<dyn RenderTarget>> = buffer.clone();
    let shader: Rc<RefCell<dyn FragmentShader>> = Rc::new(RefCell::new(ColorShader));
    let mut renderer = make_renderer(&target, &shader);

    let mut limiter = FrameLimiter::new(FPS);
    let mut mode = mode;
    let mut angle = 0.0f32;
    let mut running = true;

    while running {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit | WindowEvent::KeyDown(Key::Escape) => running = false,
                WindowEvent::KeyDown(Key::B) => {
                    if renderer.backface_culling_enabled() {
                        renderer.disable_backface_culling();
                    } else {
                        renderer.enable_backface_culling();
                    }
                }
                WindowEvent::KeyDown(Key::W) => {
                    mode = match mode {
                        RenderMode::Triangle => RenderMode::TriangleWireframe,
                        RenderMode::TriangleWireframe => RenderMode::Triangle,
                    };
                }
            }
        }

        let delta = limiter.wait_and_get_delta();
        angle += delta * 0.8;

        let clip_vertices = transform_vertices(vertices, angle, window.width(), window.height());

        buffer.borrow_mut().clear(colors::BLACK);
        renderer.render_indexed(mode, &clip_vertices, faces);
        window.present(&buffer.borrow())?;
    }

    Ok(())
}

/// Render one frame without a window and save it as a PNG.
fn snapshot_frame(
    vertices: &[Vertex],
    faces: &[[usize; 3]],
    mode: RenderMode,
    path: &str,
) -> Result<(), String> {
    let buffer = Rc::new(RefCell::new(PixelBuffer::new(WINDOW_WIDTH, WINDOW_HEIGHT)));
    let target: Rc<RefCell<dyn RenderTarget>> = buffer.clone();
    let shader: Rc<RefCell<dyn FragmentShader>> = Rc::new(RefCell::new(ColorShader));
    let renderer = make_renderer(&target, &shader);

    buffer.borrow_mut().clear(colors::BLACK);
    let clip_vertices = transform_vertices(vertices, 0.6, WINDOW_WIDTH, WINDOW_HEIGHT);
    renderer.render_indexed(mode, &clip_vertices, faces);

    let frame = buffer.borrow();
    let img = image::RgbaImage::from_raw(WINDOW_WIDTH, WINDOW_HEIGHT, frame.as_bytes().to_vec())
        .ok_or("frame buffer size mismatch")?;
    img.save(path).map_err(|e| e.to_string())?;

    println!("wrote {path}");
    Ok(())
}
