use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gs_ascii::renderer::Renderer;
use gs_core::charset::Palette;
use gs_core::frame::DecodedImage;
use gs_core::grid::GridSpec;

fn gradient(width: u32, height: u32) -> DecodedImage {
    let mut img = DecodedImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            img.set_pixel(
                x,
                y,
                ((x * 255 / width) as u8, (y * 255 / height) as u8, 128, 255),
            );
        }
    }
    img
}

fn bench_render(c: &mut Criterion) {
    let renderer = Renderer::new(Palette::default());
    let img = gradient(1920, 1080);

    let mut group = c.benchmark_group("render");
    for &(cols, rows) in &[(80u16, 24u16), (200, 60)] {
        let grid = GridSpec::for_image((cols, rows), img.width, img.height);
        group.bench_function(format!("1080p_{cols}x{rows}"), |b| {
            b.iter(|| renderer.render(black_box(&img), black_box(&grid)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
