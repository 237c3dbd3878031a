use crate::api::frame::Aligned;
use crate::com::tbl::*;
use crate::com::util::*;
use crate::com::wavelet::*;
use crate::com::*;
use crate::dsp::Kernels;

/* forward shift after the 1st and 2nd TX stage of a W x H block */
fn tx_shift(size: TxSize, bit_depth: u32) -> (u32, u32) {
    let in_bit = size.in_bit();
    let shift1 = in_bit + FACTO_BIT + bit_depth + 1 - LIMIT_BIT;
    let shift2 = in_bit + FACTO_BIT;
    (shift1, shift2)
}

/* 32x32 of the 64x64 low band moves one bit of scaling into the 1st stage */
fn tx_shift_wide(bit_depth: u32) -> (u32, u32) {
    let (shift1, shift2) = tx_shift(TxSize::TX_32X32, bit_depth);
    (shift1 + 1, shift2 - 1)
}

/* unscaled N-point forward butterfly, y[k] = sum T_N[k][n] * x[n] */
fn partial_butterfly(log2_n: usize, x: &[i32], y: &mut [i32]) {
    if log2_n == 0 {
        y[0] = 32 * x[0];
        return;
    }

    let n = 1 << log2_n;
    let half = n >> 1;
    let mut e = [0i32; MAX_TX_SIZE / 2];
    let mut o = [0i32; MAX_TX_SIZE / 2];
    let mut ee = [0i32; MAX_TX_SIZE / 2];

    /* E and O */
    for i in 0..half {
        e[i] = x[i] + x[n - 1 - i];
        o[i] = x[i] - x[n - 1 - i];
    }

    partial_butterfly(log2_n - 1, &e[..half], &mut ee[..half]);
    for k in 0..half {
        y[2 * k] = ee[k];
    }

    for k in 0..half {
        y[2 * k + 1] = (0..half)
            .map(|i| avs2_tm(log2_n, 2 * k + 1, i) * o[i])
            .sum();
    }
}

pub(crate) fn fwd_pass(
    log2_n: usize,
    src: &[coeff],
    dst: &mut [coeff],
    shift: u32,
    lines: usize,
) {
    let n = 1 << log2_n;
    debug_assert!(src.len() >= n * lines && dst.len() >= n * lines);

    let mut y = [0i32; MAX_TX_SIZE];
    for j in 0..lines {
        partial_butterfly(log2_n, &src[j * n..(j + 1) * n], &mut y[..n]);
        for k in 0..n {
            dst[k * lines + j] = round_shift(y[k], shift);
        }
    }
}

/* row pass then column pass on a contiguous W x H block */
fn dct_nxm<K: Kernels + ?Sized>(
    k: &K,
    log2_w: usize,
    log2_h: usize,
    src: &[coeff],
    i_src: usize,
    dst: &mut [coeff],
    shift1: u32,
    shift2: u32,
) {
    let (w, h) = (1 << log2_w, 1 << log2_h);
    let area = w * h;
    let mut blk: Aligned<[coeff; MAX_TX_SIZE * MAX_TX_SIZE]> =
        Aligned::new([0; MAX_TX_SIZE * MAX_TX_SIZE]);
    let mut mid: Aligned<[coeff; MAX_TX_SIZE * MAX_TX_SIZE]> =
        Aligned::new([0; MAX_TX_SIZE * MAX_TX_SIZE]);

    for y in 0..h {
        blk.data[y * w..(y + 1) * w].copy_from_slice(&src[y * i_src..y * i_src + w]);
    }

    k.fwd_pass(log2_w, &blk.data[..area], &mut mid.data[..area], shift1, h);
    k.fwd_pass(log2_h, &mid.data[..area], &mut dst[..area], shift2, w);
}

fn dct_64x64<K: Kernels + ?Sized>(
    k: &K,
    src: &[coeff],
    i_src: usize,
    dst: &mut [coeff],
    bit_depth: u32,
) {
    let mut blk: Aligned<[coeff; WAVELET_SIZE * WAVELET_SIZE]> =
        Aligned::new([0; WAVELET_SIZE * WAVELET_SIZE]);

    for y in 0..WAVELET_SIZE {
        blk.data[y * WAVELET_SIZE..(y + 1) * WAVELET_SIZE]
            .copy_from_slice(&src[y * i_src..y * i_src + WAVELET_SIZE]);
    }
    wavelet_64x64(&mut blk.data);

    /* low band sits in the top-left 32x32 */
    let (shift1, shift2) = tx_shift_wide(bit_depth);
    dct_nxm(
        k,
        MAX_TX_LOG2,
        MAX_TX_LOG2,
        &blk.data,
        WAVELET_SIZE,
        dst,
        shift1,
        shift2,
    );
}

pub(crate) fn dct_2d<K: Kernels + ?Sized>(
    k: &K,
    size: TxSize,
    src: &[coeff],
    i_src: usize,
    dst: &mut [coeff],
    bit_depth: u32,
) {
    debug_assert!(i_src >= size.width());
    debug_assert!(dst.len() >= size.coeff_area());

    if size == TxSize::TX_64X64 {
        dct_64x64(k, src, i_src, dst, bit_depth);
    } else {
        let (shift1, shift2) = tx_shift(size, bit_depth);
        dct_nxm(
            k,
            size.width_log2(),
            size.height_log2(),
            src,
            i_src,
            dst,
            shift1,
            shift2,
        );
    }
}

/// Forward 2-D transform of a residual block read with stride `i_src`.
///
/// Coefficients are written contiguously in raster order, `size.width()`
/// per row. A 64x64 block yields its 32x32 low band only.
pub fn forward_transform(
    kernels: &dyn Kernels,
    size: TxSize,
    src: &[coeff],
    i_src: usize,
    dst: &mut [coeff],
    bit_depth: u32,
) {
    debug_assert!(bit_depth >= MIN_BIT_DEPTH && bit_depth <= MAX_BIT_DEPTH);
    kernels.dct(size, src, i_src, dst, bit_depth);
}

/// Secondary transform on the top-left 4x4 of an intra coefficient block.
pub fn transform_2nd(
    kernels: &dyn Kernels,
    coef: &mut [coeff],
    i_coef: usize,
    mode: i32,
    top_avail: bool,
    left_avail: bool,
) {
    kernels.transform_2nd(coef, i_coef, mode, top_avail, left_avail);
}
