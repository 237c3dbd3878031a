use criterion::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use ravs2::api::*;

criterion_group!(
    mc,
    bench_mc_l_cached,
    bench_mc_l_on_the_fly,
    bench_mc_c,
    bench_interpolate_lcu_row,
);

fn new_frame(ra: &mut ChaChaRng, width: usize, height: usize) -> RefFrame {
    let mut f = RefFrame::new(width, height, &InterpolationConfig::default()).unwrap();
    for p in f.planes.iter_mut() {
        for y in 0..p.cfg.height as isize {
            for v in p.row_mut(y) {
                *v = ra.gen::<u8>() as pel;
            }
        }
    }
    f
}

fn interpolated_frame(width: usize, height: usize) -> RefFrame {
    let mut ra = ChaChaRng::from_seed([0; 32]);
    let mut f = new_frame(&mut ra, width, height);
    let kernels = init(CpuFeatureLevel::default());
    Interpolator::new(kernels, InterpolationConfig::default())
        .unwrap()
        .interpolate_frame(&mut f)
        .unwrap();
    f
}

fn bench_mc_l_cached(c: &mut Criterion) {
    let f = interpolated_frame(640, 480);
    let kernels = init(CpuFeatureLevel::default());
    let (cuw, cuh) = (16, 16);
    let mut pred = vec![0 as pel; cuw * cuh];

    c.bench_function("mc_l_cached", |b| {
        b.iter(|| mc_luma(kernels, &mut pred, cuw, 4 * 100 + 1, 4 * 60 + 3, cuw, cuh, &f))
    });
}

fn bench_mc_l_on_the_fly(c: &mut Criterion) {
    let mut f = interpolated_frame(640, 480);
    f.invalidate_subpel();
    let kernels = init(CpuFeatureLevel::default());
    let (cuw, cuh) = (16, 16);
    let mut pred = vec![0 as pel; cuw * cuh];

    c.bench_function("mc_l_on_the_fly", |b| {
        b.iter(|| mc_luma(kernels, &mut pred, cuw, 4 * 100 + 1, 4 * 60 + 3, cuw, cuh, &f))
    });
}

fn bench_mc_c(c: &mut Criterion) {
    let f = interpolated_frame(640, 480);
    let kernels = init(CpuFeatureLevel::default());
    let (cuw, cuh) = (8, 8);
    let mut pred_u = vec![0 as pel; cuw * cuh];
    let mut pred_v = vec![0 as pel; cuw * cuh];

    c.bench_function("mc_c", |b| {
        b.iter(|| {
            mc_chroma(
                kernels,
                &mut pred_u,
                &mut pred_v,
                cuw,
                4 * 100 + 3,
                4 * 60 + 5,
                cuw,
                cuh,
                &f,
            )
        })
    });
}

fn bench_interpolate_lcu_row(c: &mut Criterion) {
    let mut f = interpolated_frame(1920, 1088);
    let kernels = init(CpuFeatureLevel::default());
    let ip = Interpolator::new(kernels, InterpolationConfig::default()).unwrap();

    c.bench_function("interpolate_lcu_row_1080p", |b| {
        b.iter(|| ip.interpolate_lcu_row(&mut f, 5).unwrap())
    });
}
