use super::avs2_tbl_tm_t;
use crate::com::tbl::avs2_tbl_tm32;
use crate::com::util::*;
use crate::com::*;
use crate::cpu_features::CpuFeatureLevel;
use crate::dsp::Kernels;
use crate::{com, enc};

use std::arch::x86_64::*;

/// SSE4.1 kernel set. Works on 4 lanes of 32-bit intermediates.
#[derive(Debug)]
pub(crate) struct Sse4Kernels {
    pub(super) _private: (),
}

impl Kernels for Sse4Kernels {
    fn cpu(&self) -> CpuFeatureLevel {
        CpuFeatureLevel::SSE4_1
    }

    fn pixel_add(
        &self,
        rec: &mut [pel],
        i_rec: usize,
        pred: &[pel],
        i_pred: usize,
        res: &[coeff],
        i_res: usize,
        width: usize,
        height: usize,
        bit_depth: u32,
    ) {
        unsafe { pixel_add_sse4(rec, i_rec, pred, i_pred, res, i_res, width, height, bit_depth) }
    }

    fn fwd_pass(&self, log2_n: usize, src: &[coeff], dst: &mut [coeff], shift: u32, lines: usize) {
        unsafe { fwd_pass_sse4(log2_n, src, dst, shift, lines) }
    }

    fn inv_pass(
        &self,
        log2_n: usize,
        src: &[coeff],
        dst: &mut [coeff],
        shift: u32,
        lines: usize,
        clip_bits: u32,
    ) {
        unsafe { inv_pass_sse4(log2_n, src, dst, shift, lines, clip_bits) }
    }

    fn intpl_hor(
        &self,
        dst: &mut [pel],
        i_dst: usize,
        src: &[pel],
        i_src: usize,
        width: usize,
        height: usize,
        taps: &[i16],
        bit_depth: u32,
    ) {
        unsafe { intpl_hor_sse4(dst, i_dst, src, i_src, width, height, taps, bit_depth) }
    }

    fn intpl_ver(
        &self,
        dst: &mut [pel],
        i_dst: usize,
        src: &[pel],
        i_src: usize,
        width: usize,
        height: usize,
        taps: &[i16],
        bit_depth: u32,
    ) {
        unsafe { intpl_ver_sse4(dst, i_dst, src, i_src, width, height, taps, bit_depth) }
    }

    fn intpl_hor_mct(
        &self,
        dst: &mut [mct],
        i_dst: usize,
        src: &[pel],
        i_src: usize,
        width: usize,
        height: usize,
        taps: &[i16],
        bit_depth: u32,
    ) {
        unsafe { intpl_hor_mct_sse4(dst, i_dst, src, i_src, width, height, taps, bit_depth) }
    }

    fn intpl_ext(
        &self,
        dst: &mut [pel],
        i_dst: usize,
        src: &[mct],
        i_src: usize,
        width: usize,
        height: usize,
        taps: &[i16],
        bit_depth: u32,
    ) {
        unsafe { intpl_ext_sse4(dst, i_dst, src, i_src, width, height, taps, bit_depth) }
    }
}

/*****************************************************************************
 * lane helpers, slices are bounds checked before every raw load or store
 *****************************************************************************/
#[cfg(not(feature = "high_bit_depth"))]
#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn load_pel4(s: &[pel]) -> __m128i {
    let s = &s[..4];
    _mm_cvtepu8_epi32(_mm_cvtsi32_si128(i32::from_le_bytes([s[0], s[1], s[2], s[3]])))
}

#[cfg(feature = "high_bit_depth")]
#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn load_pel4(s: &[pel]) -> __m128i {
    let s = &s[..4];
    _mm_cvtepu16_epi32(_mm_loadl_epi64(s.as_ptr() as *const __m128i))
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn load_mct4(s: &[mct]) -> __m128i {
    let s = &s[..4];
    _mm_cvtepi16_epi32(_mm_loadl_epi64(s.as_ptr() as *const __m128i))
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn load_i32x4(s: &[i32]) -> __m128i {
    let s = &s[..4];
    _mm_loadu_si128(s.as_ptr() as *const __m128i)
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn store_i32x4(d: &mut [i32], v: __m128i) {
    let d = &mut d[..4];
    _mm_storeu_si128(d.as_mut_ptr() as *mut __m128i, v)
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn lanes(v: __m128i) -> [i32; 4] {
    let mut a = [0i32; 4];
    _mm_storeu_si128(a.as_mut_ptr() as *mut __m128i, v);
    a
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn store_pel4(d: &mut [pel], v: __m128i) {
    for (o, &x) in d[..4].iter_mut().zip(lanes(v).iter()) {
        *o = x as pel;
    }
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn store_mct4(d: &mut [mct], v: __m128i) {
    for (o, &x) in d[..4].iter_mut().zip(lanes(v).iter()) {
        *o = x as mct;
    }
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn round_shift4(v: __m128i, shift: u32) -> __m128i {
    let v = _mm_add_epi32(v, _mm_set1_epi32(round_add(shift)));
    _mm_sra_epi32(v, _mm_cvtsi32_si128(shift as i32))
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn clip4(v: __m128i, lo: i32, hi: i32) -> __m128i {
    _mm_min_epi32(_mm_max_epi32(v, _mm_set1_epi32(lo)), _mm_set1_epi32(hi))
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn splat_taps(taps: &[i16]) -> [__m128i; NTAPS_LUMA] {
    debug_assert!(taps.len() <= NTAPS_LUMA);
    let mut c = [_mm_setzero_si128(); NTAPS_LUMA];
    for (cv, &t) in c.iter_mut().zip(taps.iter()) {
        *cv = _mm_set1_epi32(t as i32);
    }
    c
}

/*****************************************************************************
 * reconstruction
 *****************************************************************************/
#[target_feature(enable = "sse4.1")]
pub(super) unsafe fn pixel_add_sse4(
    rec: &mut [pel],
    i_rec: usize,
    pred: &[pel],
    i_pred: usize,
    res: &[coeff],
    i_res: usize,
    width: usize,
    height: usize,
    bit_depth: u32,
) {
    let w4 = width & !3;
    let max = max_pel(bit_depth);
    for y in 0..height {
        for x in (0..w4).step_by(4) {
            let p = load_pel4(&pred[y * i_pred + x..]);
            let r = load_i32x4(&res[y * i_res + x..]);
            store_pel4(&mut rec[y * i_rec + x..], clip4(_mm_add_epi32(p, r), 0, max));
        }
    }
    if w4 < width {
        com::recon::pixel_add(
            &mut rec[w4..],
            i_rec,
            &pred[w4..],
            i_pred,
            &res[w4..],
            i_res,
            width - w4,
            height,
            bit_depth,
        );
    }
}

/*****************************************************************************
 * transform passes as direct matrix products
 *****************************************************************************/
#[target_feature(enable = "sse4.1")]
pub(super) unsafe fn fwd_pass_sse4(
    log2_n: usize,
    src: &[coeff],
    dst: &mut [coeff],
    shift: u32,
    lines: usize,
) {
    if log2_n < 2 {
        return enc::tx::fwd_pass(log2_n, src, dst, shift, lines);
    }

    let n = 1 << log2_n;
    let tm: &[i32] = &avs2_tbl_tm_t[log2_n];
    for j in 0..lines {
        let x = &src[j * n..(j + 1) * n];
        for k0 in (0..n).step_by(4) {
            let mut acc = _mm_setzero_si128();
            for (i, &v) in x.iter().enumerate() {
                let t = load_i32x4(&tm[i * n + k0..]);
                acc = _mm_add_epi32(acc, _mm_mullo_epi32(_mm_set1_epi32(v), t));
            }
            for (kk, &v) in lanes(round_shift4(acc, shift)).iter().enumerate() {
                dst[(k0 + kk) * lines + j] = v;
            }
        }
    }
}

#[target_feature(enable = "sse4.1")]
pub(super) unsafe fn inv_pass_sse4(
    log2_n: usize,
    src: &[coeff],
    dst: &mut [coeff],
    shift: u32,
    lines: usize,
    clip_bits: u32,
) {
    if log2_n < 2 {
        return com::itx::inv_pass(log2_n, src, dst, shift, lines, clip_bits);
    }

    let n = 1 << log2_n;
    let row_shift = MAX_TX_LOG2 - log2_n;
    let tm: &[[i32; MAX_TX_SIZE]; MAX_TX_SIZE] = &avs2_tbl_tm32;
    let (lo, hi) = (-(1 << (clip_bits - 1)), (1 << (clip_bits - 1)) - 1);
    for j in 0..lines {
        let d = &mut dst[j * n..(j + 1) * n];
        for i0 in (0..n).step_by(4) {
            let mut acc = _mm_setzero_si128();
            for k in 0..n {
                let t = load_i32x4(&tm[k << row_shift][i0..]);
                let c = _mm_set1_epi32(src[k * lines + j]);
                acc = _mm_add_epi32(acc, _mm_mullo_epi32(c, t));
            }
            store_i32x4(&mut d[i0..], clip4(round_shift4(acc, shift), lo, hi));
        }
    }
}

/*****************************************************************************
 * interpolation, 4 output samples per step and a scalar tail
 *****************************************************************************/
#[target_feature(enable = "sse4.1")]
pub(super) unsafe fn intpl_hor_sse4(
    dst: &mut [pel],
    i_dst: usize,
    src: &[pel],
    i_src: usize,
    width: usize,
    height: usize,
    taps: &[i16],
    bit_depth: u32,
) {
    let w4 = width & !3;
    let coef = splat_taps(taps);
    let coef = &coef[..taps.len()];
    let max = max_pel(bit_depth);
    for y in 0..height {
        let s = &src[y * i_src..];
        for x in (0..w4).step_by(4) {
            let mut acc = _mm_setzero_si128();
            for (t, c) in coef.iter().enumerate() {
                acc = _mm_add_epi32(acc, _mm_mullo_epi32(load_pel4(&s[x + t..]), *c));
            }
            let v = clip4(round_shift4(acc, IF_FILTER_PREC), 0, max);
            store_pel4(&mut dst[y * i_dst + x..], v);
        }
    }
    if w4 < width {
        com::mc::intpl_hor(
            &mut dst[w4..],
            i_dst,
            &src[w4..],
            i_src,
            width - w4,
            height,
            taps,
            bit_depth,
        );
    }
}

#[target_feature(enable = "sse4.1")]
pub(super) unsafe fn intpl_ver_sse4(
    dst: &mut [pel],
    i_dst: usize,
    src: &[pel],
    i_src: usize,
    width: usize,
    height: usize,
    taps: &[i16],
    bit_depth: u32,
) {
    let w4 = width & !3;
    let coef = splat_taps(taps);
    let coef = &coef[..taps.len()];
    let max = max_pel(bit_depth);
    for y in 0..height {
        for x in (0..w4).step_by(4) {
            let mut acc = _mm_setzero_si128();
            for (t, c) in coef.iter().enumerate() {
                let s = load_pel4(&src[(y + t) * i_src + x..]);
                acc = _mm_add_epi32(acc, _mm_mullo_epi32(s, *c));
            }
            let v = clip4(round_shift4(acc, IF_FILTER_PREC), 0, max);
            store_pel4(&mut dst[y * i_dst + x..], v);
        }
    }
    if w4 < width {
        com::mc::intpl_ver(
            &mut dst[w4..],
            i_dst,
            &src[w4..],
            i_src,
            width - w4,
            height,
            taps,
            bit_depth,
        );
    }
}

#[target_feature(enable = "sse4.1")]
pub(super) unsafe fn intpl_hor_mct_sse4(
    dst: &mut [mct],
    i_dst: usize,
    src: &[pel],
    i_src: usize,
    width: usize,
    height: usize,
    taps: &[i16],
    bit_depth: u32,
) {
    let w4 = width & !3;
    let coef = splat_taps(taps);
    let coef = &coef[..taps.len()];
    let shift = bit_depth - 8;
    for y in 0..height {
        let s = &src[y * i_src..];
        for x in (0..w4).step_by(4) {
            let mut acc = _mm_setzero_si128();
            for (t, c) in coef.iter().enumerate() {
                acc = _mm_add_epi32(acc, _mm_mullo_epi32(load_pel4(&s[x + t..]), *c));
            }
            store_mct4(&mut dst[y * i_dst + x..], round_shift4(acc, shift));
        }
    }
    if w4 < width {
        com::mc::intpl_hor_mct(
            &mut dst[w4..],
            i_dst,
            &src[w4..],
            i_src,
            width - w4,
            height,
            taps,
            bit_depth,
        );
    }
}

#[target_feature(enable = "sse4.1")]
pub(super) unsafe fn intpl_ext_sse4(
    dst: &mut [pel],
    i_dst: usize,
    src: &[mct],
    i_src: usize,
    width: usize,
    height: usize,
    taps: &[i16],
    bit_depth: u32,
) {
    let w4 = width & !3;
    let coef = splat_taps(taps);
    let coef = &coef[..taps.len()];
    let shift = 20 - bit_depth;
    let max = max_pel(bit_depth);
    for y in 0..height {
        for x in (0..w4).step_by(4) {
            let mut acc = _mm_setzero_si128();
            for (t, c) in coef.iter().enumerate() {
                let s = load_mct4(&src[(y + t) * i_src + x..]);
                acc = _mm_add_epi32(acc, _mm_mullo_epi32(s, *c));
            }
            store_pel4(&mut dst[y * i_dst + x..], clip4(round_shift4(acc, shift), 0, max));
        }
    }
    if w4 < width {
        com::mc::intpl_ext(
            &mut dst[w4..],
            i_dst,
            &src[w4..],
            i_src,
            width - w4,
            height,
            taps,
            bit_depth,
        );
    }
}
