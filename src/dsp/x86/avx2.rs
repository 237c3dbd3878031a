use super::avs2_tbl_tm_t;
use super::sse4::*;
use crate::com::tbl::avs2_tbl_tm32;
use crate::com::util::*;
use crate::com::*;
use crate::cpu_features::CpuFeatureLevel;
use crate::dsp::Kernels;

use std::arch::x86_64::*;

/// AVX2 kernel set. 8 lanes of 32-bit intermediates, narrower work falls
/// through to the SSE4.1 kernels.
#[derive(Debug)]
pub(crate) struct Avx2Kernels {
    pub(super) _private: (),
}

impl Kernels for Avx2Kernels {
    fn cpu(&self) -> CpuFeatureLevel {
        CpuFeatureLevel::AVX2
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
        unsafe { fwd_pass_avx2(log2_n, src, dst, shift, lines) }
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
        unsafe { inv_pass_avx2(log2_n, src, dst, shift, lines, clip_bits) }
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
        unsafe { intpl_hor_avx2(dst, i_dst, src, i_src, width, height, taps, bit_depth) }
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
        unsafe { intpl_ver_avx2(dst, i_dst, src, i_src, width, height, taps, bit_depth) }
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
        unsafe { intpl_ext_avx2(dst, i_dst, src, i_src, width, height, taps, bit_depth) }
    }
}

#[cfg(not(feature = "high_bit_depth"))]
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn load_pel8(s: &[pel]) -> __m256i {
    let s = &s[..8];
    _mm256_cvtepu8_epi32(_mm_loadl_epi64(s.as_ptr() as *const __m128i))
}

#[cfg(feature = "high_bit_depth")]
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn load_pel8(s: &[pel]) -> __m256i {
    let s = &s[..8];
    _mm256_cvtepu16_epi32(_mm_loadu_si128(s.as_ptr() as *const __m128i))
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn load_mct8(s: &[mct]) -> __m256i {
    let s = &s[..8];
    _mm256_cvtepi16_epi32(_mm_loadu_si128(s.as_ptr() as *const __m128i))
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn load_i32x8(s: &[i32]) -> __m256i {
    let s = &s[..8];
    _mm256_loadu_si256(s.as_ptr() as *const __m256i)
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn store_i32x8(d: &mut [i32], v: __m256i) {
    let d = &mut d[..8];
    _mm256_storeu_si256(d.as_mut_ptr() as *mut __m256i, v)
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn lanes8(v: __m256i) -> [i32; 8] {
    let mut a = [0i32; 8];
    _mm256_storeu_si256(a.as_mut_ptr() as *mut __m256i, v);
    a
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn store_pel8(d: &mut [pel], v: __m256i) {
    for (o, &x) in d[..8].iter_mut().zip(lanes8(v).iter()) {
        *o = x as pel;
    }
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn round_shift8(v: __m256i, shift: u32) -> __m256i {
    let v = _mm256_add_epi32(v, _mm256_set1_epi32(round_add(shift)));
    _mm256_sra_epi32(v, _mm_cvtsi32_si128(shift as i32))
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn clip8(v: __m256i, lo: i32, hi: i32) -> __m256i {
    _mm256_min_epi32(_mm256_max_epi32(v, _mm256_set1_epi32(lo)), _mm256_set1_epi32(hi))
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn splat_taps8(taps: &[i16]) -> [__m256i; NTAPS_LUMA] {
    debug_assert!(taps.len() <= NTAPS_LUMA);
    let mut c = [_mm256_setzero_si256(); NTAPS_LUMA];
    for (cv, &t) in c.iter_mut().zip(taps.iter()) {
        *cv = _mm256_set1_epi32(t as i32);
    }
    c
}

/*****************************************************************************
 * transform passes
 *****************************************************************************/
#[target_feature(enable = "avx2")]
unsafe fn fwd_pass_avx2(log2_n: usize, src: &[coeff], dst: &mut [coeff], shift: u32, lines: usize) {
    if log2_n < 3 {
        return fwd_pass_sse4(log2_n, src, dst, shift, lines);
    }

    let n = 1 << log2_n;
    let tm: &[i32] = &avs2_tbl_tm_t[log2_n];
    for j in 0..lines {
        let x = &src[j * n..(j + 1) * n];
        for k0 in (0..n).step_by(8) {
            let mut acc = _mm256_setzero_si256();
            for (i, &v) in x.iter().enumerate() {
                let t = load_i32x8(&tm[i * n + k0..]);
                acc = _mm256_add_epi32(acc, _mm256_mullo_epi32(_mm256_set1_epi32(v), t));
            }
            for (kk, &v) in lanes8(round_shift8(acc, shift)).iter().enumerate() {
                dst[(k0 + kk) * lines + j] = v;
            }
        }
    }
}

#[target_feature(enable = "avx2")]
unsafe fn inv_pass_avx2(
    log2_n: usize,
    src: &[coeff],
    dst: &mut [coeff],
    shift: u32,
    lines: usize,
    clip_bits: u32,
) {
    if log2_n < 3 {
        return inv_pass_sse4(log2_n, src, dst, shift, lines, clip_bits);
    }

    let n = 1 << log2_n;
    let row_shift = MAX_TX_LOG2 - log2_n;
    let tm: &[[i32; MAX_TX_SIZE]; MAX_TX_SIZE] = &avs2_tbl_tm32;
    let (lo, hi) = (-(1 << (clip_bits - 1)), (1 << (clip_bits - 1)) - 1);
    for j in 0..lines {
        let d = &mut dst[j * n..(j + 1) * n];
        for i0 in (0..n).step_by(8) {
            let mut acc = _mm256_setzero_si256();
            for k in 0..n {
                let t = load_i32x8(&tm[k << row_shift][i0..]);
                let c = _mm256_set1_epi32(src[k * lines + j]);
                acc = _mm256_add_epi32(acc, _mm256_mullo_epi32(c, t));
            }
            store_i32x8(&mut d[i0..], clip8(round_shift8(acc, shift), lo, hi));
        }
    }
}

/*****************************************************************************
 * interpolation, 8 output samples per step, the rest through SSE4.1
 *****************************************************************************/
#[target_feature(enable = "avx2")]
unsafe fn intpl_hor_avx2(
    dst: &mut [pel],
    i_dst: usize,
    src: &[pel],
    i_src: usize,
    width: usize,
    height: usize,
    taps: &[i16],
    bit_depth: u32,
) {
    let w8 = width & !7;
    let coef = splat_taps8(taps);
    let coef = &coef[..taps.len()];
    let max = max_pel(bit_depth);
    for y in 0..height {
        let s = &src[y * i_src..];
        for x in (0..w8).step_by(8) {
            let mut acc = _mm256_setzero_si256();
            for (t, c) in coef.iter().enumerate() {
                acc = _mm256_add_epi32(acc, _mm256_mullo_epi32(load_pel8(&s[x + t..]), *c));
            }
            let v = clip8(round_shift8(acc, IF_FILTER_PREC), 0, max);
            store_pel8(&mut dst[y * i_dst + x..], v);
        }
    }
    if w8 < width {
        intpl_hor_sse4(
            &mut dst[w8..],
            i_dst,
            &src[w8..],
            i_src,
            width - w8,
            height,
            taps,
            bit_depth,
        );
    }
}

#[target_feature(enable = "avx2")]
unsafe fn intpl_ver_avx2(
    dst: &mut [pel],
    i_dst: usize,
    src: &[pel],
    i_src: usize,
    width: usize,
    height: usize,
    taps: &[i16],
    bit_depth: u32,
) {
    let w8 = width & !7;
    let coef = splat_taps8(taps);
    let coef = &coef[..taps.len()];
    let max = max_pel(bit_depth);
    for y in 0..height {
        for x in (0..w8).step_by(8) {
            let mut acc = _mm256_setzero_si256();
            for (t, c) in coef.iter().enumerate() {
                let s = load_pel8(&src[(y + t) * i_src + x..]);
                acc = _mm256_add_epi32(acc, _mm256_mullo_epi32(s, *c));
            }
            let v = clip8(round_shift8(acc, IF_FILTER_PREC), 0, max);
            store_pel8(&mut dst[y * i_dst + x..], v);
        }
    }
    if w8 < width {
        intpl_ver_sse4(
            &mut dst[w8..],
            i_dst,
            &src[w8..],
            i_src,
            width - w8,
            height,
            taps,
            bit_depth,
        );
    }
}

#[target_feature(enable = "avx2")]
unsafe fn intpl_ext_avx2(
    dst: &mut [pel],
    i_dst: usize,
    src: &[mct],
    i_src: usize,
    width: usize,
    height: usize,
    taps: &[i16],
    bit_depth: u32,
) {
    let w8 = width & !7;
    let coef = splat_taps8(taps);
    let coef = &coef[..taps.len()];
    let shift = 20 - bit_depth;
    let max = max_pel(bit_depth);
    for y in 0..height {
        for x in (0..w8).step_by(8) {
            let mut acc = _mm256_setzero_si256();
            for (t, c) in coef.iter().enumerate() {
                let s = load_mct8(&src[(y + t) * i_src + x..]);
                acc = _mm256_add_epi32(acc, _mm256_mullo_epi32(s, *c));
            }
            store_pel8(&mut dst[y * i_dst + x..], clip8(round_shift8(acc, shift), 0, max));
        }
    }
    if w8 < width {
        intpl_ext_sse4(
            &mut dst[w8..],
            i_dst,
            &src[w8..],
            i_src,
            width - w8,
            height,
            taps,
            bit_depth,
        );
    }
}
