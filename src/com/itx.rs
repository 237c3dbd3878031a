use super::tbl::*;
use super::util::*;
use super::wavelet::*;
use super::*;
use crate::api::frame::Aligned;
use crate::dsp::Kernels;

/* inverse shift after the 1st and 2nd IT stage and bits of the final clip */
fn itx_shift(bit_depth: u32) -> (u32, u32, u32) {
    (ITX_SHIFT1, ITX_SHIFT2_BASE - bit_depth, bit_depth + 1)
}

/* 32x32 of the 64x64 low band, same shifts with one more bit kept by the
 * final clip */
fn itx_shift_wide(bit_depth: u32) -> (u32, u32, u32) {
    let (shift1, shift2, clip_bits) = itx_shift(bit_depth);
    (shift1, shift2, clip_bits + 1)
}

/* unscaled N-point inverse butterfly, x[n] = sum T_N[k][n] * c[k] */
fn inv_partial_butterfly(log2_n: usize, c: &[i32], x: &mut [i32]) {
    if log2_n == 0 {
        x[0] = 32 * c[0];
        return;
    }

    let n = 1 << log2_n;
    let half = n >> 1;
    let mut ce = [0i32; MAX_TX_SIZE / 2];
    let mut e = [0i32; MAX_TX_SIZE / 2];

    for k in 0..half {
        ce[k] = c[2 * k];
    }
    inv_partial_butterfly(log2_n - 1, &ce[..half], &mut e[..half]);

    for i in 0..half {
        let o: i32 = (0..half)
            .map(|k| avs2_tm(log2_n, 2 * k + 1, i) * c[2 * k + 1])
            .sum();
        x[i] = e[i] + o;
        x[n - 1 - i] = e[i] - o;
    }
}

pub(crate) fn inv_pass(
    log2_n: usize,
    src: &[coeff],
    dst: &mut [coeff],
    shift: u32,
    lines: usize,
    clip_bits: u32,
) {
    let n = 1 << log2_n;
    debug_assert!(src.len() >= n * lines && dst.len() >= n * lines);

    let mut c = [0i32; MAX_TX_SIZE];
    let mut x = [0i32; MAX_TX_SIZE];
    for j in 0..lines {
        for k in 0..n {
            c[k] = src[k * lines + j];
        }
        inv_partial_butterfly(log2_n, &c[..n], &mut x[..n]);
        for i in 0..n {
            dst[j * n + i] = clip_signed(round_shift(x[i], shift), clip_bits);
        }
    }
}

/* column pass then row pass, residual written with stride i_dst */
fn idct_nxm<K: Kernels + ?Sized>(
    k: &K,
    log2_w: usize,
    log2_h: usize,
    src: &[coeff],
    dst: &mut [coeff],
    i_dst: usize,
    shift: (u32, u32, u32),
) {
    let (w, h) = (1 << log2_w, 1 << log2_h);
    let area = w * h;
    let (shift1, shift2, clip_bits) = shift;
    let mut mid: Aligned<[coeff; MAX_TX_SIZE * MAX_TX_SIZE]> =
        Aligned::new([0; MAX_TX_SIZE * MAX_TX_SIZE]);
    let mut blk: Aligned<[coeff; MAX_TX_SIZE * MAX_TX_SIZE]> =
        Aligned::new([0; MAX_TX_SIZE * MAX_TX_SIZE]);

    k.inv_pass(log2_h, &src[..area], &mut mid.data[..area], shift1, w, LIMIT_BIT);
    k.inv_pass(log2_w, &mid.data[..area], &mut blk.data[..area], shift2, h, clip_bits);

    for y in 0..h {
        dst[y * i_dst..y * i_dst + w].copy_from_slice(&blk.data[y * w..(y + 1) * w]);
    }
}

fn idct_64x64<K: Kernels + ?Sized>(
    k: &K,
    src: &[coeff],
    dst: &mut [coeff],
    i_dst: usize,
    bit_depth: u32,
) {
    /* detail bands stay zero */
    let mut blk: Aligned<[coeff; WAVELET_SIZE * WAVELET_SIZE]> =
        Aligned::new([0; WAVELET_SIZE * WAVELET_SIZE]);

    idct_nxm(
        k,
        MAX_TX_LOG2,
        MAX_TX_LOG2,
        src,
        &mut blk.data,
        WAVELET_SIZE,
        itx_shift_wide(bit_depth),
    );
    inv_wavelet_64x64(&mut blk.data);

    for y in 0..WAVELET_SIZE {
        dst[y * i_dst..y * i_dst + WAVELET_SIZE]
            .copy_from_slice(&blk.data[y * WAVELET_SIZE..(y + 1) * WAVELET_SIZE]);
    }
}

pub(crate) fn idct_2d<K: Kernels + ?Sized>(
    k: &K,
    size: TxSize,
    src: &[coeff],
    dst: &mut [coeff],
    i_dst: usize,
    bit_depth: u32,
) {
    debug_assert!(src.len() >= size.coeff_area());
    debug_assert!(i_dst >= size.width());

    if size == TxSize::TX_64X64 {
        idct_64x64(k, src, dst, i_dst, bit_depth);
    } else {
        idct_nxm(
            k,
            size.width_log2(),
            size.height_log2(),
            src,
            dst,
            i_dst,
            itx_shift(bit_depth),
        );
    }
}

/// Inverse 2-D transform of `size.coeff_area()` raster-order coefficients
/// into a residual block written with stride `i_dst`.
pub fn inverse_transform(
    kernels: &dyn Kernels,
    size: TxSize,
    src: &[coeff],
    dst: &mut [coeff],
    i_dst: usize,
    bit_depth: u32,
) {
    debug_assert!(bit_depth >= MIN_BIT_DEPTH && bit_depth <= MAX_BIT_DEPTH);
    kernels.idct(size, src, dst, i_dst, bit_depth);
}

pub fn inverse_transform_2nd(
    kernels: &dyn Kernels,
    coef: &mut [coeff],
    i_coef: usize,
    mode: i32,
    top_avail: bool,
    left_avail: bool,
) {
    kernels.inv_transform_2nd(coef, i_coef, mode, top_avail, left_avail);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dsp::SCALAR_KERNELS;
    use crate::enc::tx::forward_transform;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    fn round_trip_error(size: TxSize, src: &[coeff], bit_depth: u32) -> i32 {
        let mut coef = vec![0; size.coeff_area()];
        let mut rec = vec![0; size.area()];
        forward_transform(&SCALAR_KERNELS, size, src, size.width(), &mut coef, bit_depth);
        inverse_transform(&SCALAR_KERNELS, size, &coef, &mut rec, size.width(), bit_depth);
        src.iter()
            .zip(rec.iter())
            .map(|(a, b)| (a - b).abs())
            .max()
            .unwrap_or(0)
    }

    fn check_random_round_trip(bit_depth: u32) {
        let mut ra = ChaChaRng::from_seed([0; 32]);
        let max = (1 << bit_depth) - 1;
        for &size in TxSize::ALL.iter().filter(|&&t| t != TxSize::TX_64X64) {
            let tolerance = 1 << (size.in_bit() + bit_depth - 8);
            for _ in 0..8 {
                let src: Vec<coeff> = (0..size.area()).map(|_| ra.gen_range(-max, max + 1)).collect();
                let err = round_trip_error(size, &src, bit_depth);
                assert!(err <= tolerance, "{:?} error {} > {}", size, err, tolerance);
            }
        }
    }

    #[test]
    fn round_trip_8bit() {
        check_random_round_trip(8);
    }

    #[cfg(feature = "high_bit_depth")]
    #[test]
    fn round_trip_10bit() {
        check_random_round_trip(10);
    }

    #[test]
    fn dc_round_trip_is_exact() {
        for &size in TxSize::ALL.iter() {
            for &v in [-255, -1, 0, 1, 37, 255].iter() {
                let src = vec![v; size.area()];
                assert_eq!(round_trip_error(size, &src, 8), 0, "{:?} dc {}", size, v);
            }
        }
    }

    #[test]
    fn smooth_64x64_round_trip() {
        let size = TxSize::TX_64X64;
        let bit_depth = MAX_BIT_DEPTH;
        let scale = 1 << (bit_depth - 8);
        let src: Vec<coeff> = (0..64 * 64)
            .map(|i| ((i % 64 + i / 64) as coeff - 63) * scale)
            .collect();
        let tolerance = 1 << (bit_depth - 8 + 2);
        let err = round_trip_error(size, &src, bit_depth);
        assert!(err <= tolerance, "error {} > {}", err, tolerance);
    }

    fn idct_64x64_dc(dc: coeff, bit_depth: u32) -> Vec<coeff> {
        let size = TxSize::TX_64X64;
        let mut coef = vec![0; size.coeff_area()];
        coef[0] = dc;
        let mut rec = vec![0; size.area()];
        inverse_transform(&SCALAR_KERNELS, size, &coef, &mut rec, 64, bit_depth);
        rec
    }

    #[test]
    fn idct_64x64_dc_levels() {
        assert_eq!(itx_shift_wide(8), (5, 12, 10));
        /* the DC survives stage 1 unrounded, (32 * dc + 2048) >> 12 */
        for &(dc, level) in [(4096, 32), (-4096, -32), (63, 0), (64, 1), (-65, -1)].iter() {
            let rec = idct_64x64_dc(dc, 8);
            assert!(rec.iter().all(|&r| r == level), "dc {} -> {}", dc, rec[0]);
        }
        /* (32 * 32767 + 2048) >> 12 = 256 passes the bit_depth + 2 clip */
        assert!(idct_64x64_dc(32767, 8).iter().all(|&r| r == 256));
        assert!(idct_64x64_dc(-32768, 8).iter().all(|&r| r == -256));
    }

    #[test]
    fn final_clip() {
        /* a lone saturated coefficient overshoots the residual range */
        let size = TxSize::TX_4X4;
        let mut coef = vec![0; 16];
        coef[0] = 32767;
        let mut rec = vec![0; 16];
        inverse_transform(&SCALAR_KERNELS, size, &coef, &mut rec, 4, 8);
        assert!(rec.iter().all(|&r| r == 255));
    }

    #[test]
    fn writes_with_stride() {
        let size = TxSize::TX_4X16;
        let mut coef = vec![0; size.area()];
        coef[0] = 128 * 9;
        let mut rec = vec![-1; 8 * 16];
        inverse_transform(&SCALAR_KERNELS, size, &coef, &mut rec, 8, 8);
        for y in 0..16 {
            assert_eq!(&rec[y * 8..y * 8 + 4], &[9, 9, 9, 9]);
            assert_eq!(&rec[y * 8 + 4..y * 8 + 8], &[-1, -1, -1, -1]);
        }
    }
}
