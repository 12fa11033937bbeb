use criterion::{black_box, criterion_group, criterion_main, Criterion};

use softrast::bench::fill_triangle;
use softrast::math::vec3::Vec3;
use softrast::math::vec4::Vec4;
use softrast::render::PixelBuffer;
use softrast::shader::{ColorShader, FlatColorShader};
use softrast::vertex::Vertex;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn vert(x: f32, y: f32, color: Vec4) -> Vertex {
    Vertex::new(Vec4::new(x, y, 0.0, 1.0), color, Vec3::ZERO)
}

fn small_triangle() -> [Vertex; 3] {
    [
        vert(100.0, 100.0, Vec4::new(1.0, 0.0, 0.0, 1.0)),
        vert(120.0, 100.0, Vec4::new(0.0, 1.0, 0.0, 1.0)),
        vert(110.0, 120.0, Vec4::new(0.0, 0.0, 1.0, 1.0)),
    ]
}

fn medium_triangle() -> [Vertex; 3] {
    [
        vert(100.0, 100.0, Vec4::new(1.0, 0.0, 0.0, 1.0)),
        vert(300.0, 100.0, Vec4::new(0.0, 1.0, 0.0, 1.0)),
        vert(200.0, 300.0, Vec4::new(0.0, 0.0, 1.0, 1.0)),
    ]
}

fn large_triangle() -> [Vertex; 3] {
    [
        vert(50.0, 50.0, Vec4::new(1.0, 0.0, 0.0, 1.0)),
        vert(750.0, 100.0, Vec4::new(0.0, 1.0, 0.0, 1.0)),
        vert(400.0, 550.0, Vec4::new(0.0, 0.0, 1.0, 1.0)),
    ]
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_function(name, |b| {
            let mut buffer = PixelBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            let mut shader = ColorShader;
            b.iter(|| {
                fill_triangle(
                    black_box(&mut buffer),
                    &mut shader,
                    &triangle[0],
                    &triangle[1],
                    &triangle[2],
                );
            });
        });
    }

    group.finish();
}

fn benchmark_shader_cost(c: &mut Criterion) {
    let mut group = c.benchmark_group("shader_cost");
    let triangle = medium_triangle();

    group.bench_function("interpolated_color", |b| {
        let mut buffer = PixelBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        let mut shader = ColorShader;
        b.iter(|| {
            fill_triangle(
                black_box(&mut buffer),
                &mut shader,
                &triangle[0],
                &triangle[1],
                &triangle[2],
            );
        });
    });

    group.bench_function("flat_color", |b| {
        let mut buffer = PixelBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        let mut shader = FlatColorShader::new(Vec4::new(1.0, 0.0, 0.0, 1.0));
        b.iter(|| {
            fill_triangle(
                black_box(&mut buffer),
                &mut shader,
                &triangle[0],
                &triangle[1],
                &triangle[2],
            );
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_shader_cost);
criterion_main!(benches);
