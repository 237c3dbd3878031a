use super::frame::*;
use super::plane::Plane;
use super::tbl::*;
use super::util::*;
use super::*;
use crate::api::frame::Aligned;
use crate::dsp::Kernels;

const MC_TMP_SIZE: usize = MAX_CU_SIZE * (MAX_CU_SIZE + NTAPS_LUMA - 1);

/*****************************************************************************
 * separable filters, `src` starts at the first tap
 *****************************************************************************/
pub(crate) fn intpl_hor(
    dst: &mut [pel],
    i_dst: usize,
    src: &[pel],
    i_src: usize,
    width: usize,
    height: usize,
    taps: &[i16],
    bit_depth: u32,
) {
    for y in 0..height {
        let s = &src[y * i_src..];
        let d = &mut dst[y * i_dst..y * i_dst + width];
        for x in 0..width {
            let sum: i32 = taps
                .iter()
                .enumerate()
                .map(|(t, &c)| c as i32 * s[x + t] as i32)
                .sum();
            d[x] = clip_pel(round_shift(sum, IF_FILTER_PREC), bit_depth) as pel;
        }
    }
}

pub(crate) fn intpl_ver(
    dst: &mut [pel],
    i_dst: usize,
    src: &[pel],
    i_src: usize,
    width: usize,
    height: usize,
    taps: &[i16],
    bit_depth: u32,
) {
    for y in 0..height {
        let d = &mut dst[y * i_dst..y * i_dst + width];
        for x in 0..width {
            let sum: i32 = taps
                .iter()
                .enumerate()
                .map(|(t, &c)| c as i32 * src[(y + t) * i_src + x] as i32)
                .sum();
            d[x] = clip_pel(round_shift(sum, IF_FILTER_PREC), bit_depth) as pel;
        }
    }
}

pub(crate) fn intpl_hor_mct(
    dst: &mut [mct],
    i_dst: usize,
    src: &[pel],
    i_src: usize,
    width: usize,
    height: usize,
    taps: &[i16],
    bit_depth: u32,
) {
    let shift = bit_depth - 8;
    for y in 0..height {
        let s = &src[y * i_src..];
        let d = &mut dst[y * i_dst..y * i_dst + width];
        for x in 0..width {
            let sum: i32 = taps
                .iter()
                .enumerate()
                .map(|(t, &c)| c as i32 * s[x + t] as i32)
                .sum();
            d[x] = round_shift(sum, shift) as mct;
        }
    }
}

pub(crate) fn intpl_ext(
    dst: &mut [pel],
    i_dst: usize,
    src: &[mct],
    i_src: usize,
    width: usize,
    height: usize,
    taps: &[i16],
    bit_depth: u32,
) {
    let shift = 20 - bit_depth;
    for y in 0..height {
        let d = &mut dst[y * i_dst..y * i_dst + width];
        for x in 0..width {
            let sum: i32 = taps
                .iter()
                .enumerate()
                .map(|(t, &c)| c as i32 * src[(y + t) * i_src + x] as i32)
                .sum();
            d[x] = clip_pel(round_shift(sum, shift), bit_depth) as pel;
        }
    }
}

/*****************************************************************************
 * block motion compensation
 *****************************************************************************/
/* 2-D filter through the intermediate, `src` starts at the first tap of both */
fn intpl_2d(
    k: &dyn Kernels,
    dst: &mut [pel],
    i_dst: usize,
    src: &[pel],
    i_src: usize,
    width: usize,
    height: usize,
    coef_x: &[i16],
    coef_y: &[i16],
    bit_depth: u32,
) {
    let ext_h = height + coef_y.len() - 1;
    debug_assert!(width * ext_h <= MC_TMP_SIZE);
    let mut tmp: Aligned<[mct; MC_TMP_SIZE]> = Aligned::new([0; MC_TMP_SIZE]);

    k.intpl_hor_mct(&mut tmp.data, width, src, i_src, width, ext_h, coef_x, bit_depth);
    k.intpl_ext(dst, i_dst, &tmp.data, width, width, height, coef_y, bit_depth);
}

/// Luma prediction of a `w` x `h` block at quarter-pel position
/// `(pos_x, pos_y)`.
///
/// Uses the cached phase plane when its rows are final, otherwise filters
/// the padded full-pel plane. The block and its filter support must lie
/// inside the padding.
pub fn mc_luma(
    kernels: &dyn Kernels,
    pred: &mut [pel],
    i_pred: usize,
    pos_x: i32,
    pos_y: i32,
    w: usize,
    h: usize,
    frame: &RefFrame,
) {
    let phase = SubpelPhase::of(pos_x, pos_y);
    let x = (pos_x >> 2) as isize;
    let y = (pos_y >> 2) as isize;
    let bit_depth = frame.bit_depth();
    let plane = &frame.planes[Y_C];
    let i_src = plane.cfg.stride;

    if phase.is_full() {
        kernels.block_copy(pred, i_pred, plane.slice(x, y), i_src, w, h);
        return;
    }

    if frame.is_cached(phase, y, h) {
        if let Some(filtered) = frame.phase_plane(phase) {
            log::trace!("mc_luma ({}, {}) {:?} cached", x, y, phase);
            kernels.block_copy(pred, i_pred, filtered.slice(x, y), i_src, w, h);
            return;
        }
    }

    log::trace!("mc_luma ({}, {}) {:?} on the fly", x, y, phase);
    let halo = LUMA_HALO_BEFORE as isize;
    let coef_x = &avs2_tbl_mc_l_coeff[phase.dx as usize];
    let coef_y = &avs2_tbl_mc_l_coeff[phase.dy as usize];
    if phase.dy == 0 {
        let src = plane.slice(x - halo, y);
        kernels.intpl_hor(pred, i_pred, src, i_src, w, h, coef_x, bit_depth);
    } else if phase.dx == 0 {
        let src = plane.slice(x, y - halo);
        kernels.intpl_ver(pred, i_pred, src, i_src, w, h, coef_y, bit_depth);
    } else {
        let src = plane.slice(x - halo, y - halo);
        intpl_2d(kernels, pred, i_pred, src, i_src, w, h, coef_x, coef_y, bit_depth);
    }
}

fn mc_chroma_plane(
    kernels: &dyn Kernels,
    pred: &mut [pel],
    i_pred: usize,
    dx: usize,
    dy: usize,
    x: isize,
    y: isize,
    w: usize,
    h: usize,
    plane: &Plane<pel>,
    bit_depth: u32,
) {
    let i_src = plane.cfg.stride;
    let halo = CHROMA_HALO_BEFORE as isize;
    let coef_x = &avs2_tbl_mc_c_coeff[dx];
    let coef_y = &avs2_tbl_mc_c_coeff[dy];

    if dx == 0 && dy == 0 {
        let src = plane.slice(x, y);
        if w == 2 || w == 6 || h == 2 || h == 6 {
            kernels.plane_copy(pred, i_pred, src, i_src, w, h);
        } else {
            kernels.block_copy(pred, i_pred, src, i_src, w, h);
        }
    } else if dy == 0 {
        let src = plane.slice(x - halo, y);
        kernels.intpl_hor(pred, i_pred, src, i_src, w, h, coef_x, bit_depth);
    } else if dx == 0 {
        let src = plane.slice(x, y - halo);
        kernels.intpl_ver(pred, i_pred, src, i_src, w, h, coef_y, bit_depth);
    } else {
        let src = plane.slice(x - halo, y - halo);
        intpl_2d(kernels, pred, i_pred, src, i_src, w, h, coef_x, coef_y, bit_depth);
    }
}

/// Chroma prediction of both 4:2:0 chroma blocks, `w` x `h` chroma samples
/// at eighth-pel chroma position `(pos_x, pos_y)`, i.e. the quarter-pel
/// position of the co-located luma block.
pub fn mc_chroma(
    kernels: &dyn Kernels,
    pred_u: &mut [pel],
    pred_v: &mut [pel],
    i_pred: usize,
    pos_x: i32,
    pos_y: i32,
    w: usize,
    h: usize,
    frame: &RefFrame,
) {
    let dx = (pos_x & 7) as usize;
    let dy = (pos_y & 7) as usize;
    let x = (pos_x >> 3) as isize;
    let y = (pos_y >> 3) as isize;
    let bit_depth = frame.bit_depth();

    log::trace!("mc_chroma ({}, {}) phase ({}, {})", x, y, dx, dy);
    mc_chroma_plane(
        kernels,
        pred_u,
        i_pred,
        dx,
        dy,
        x,
        y,
        w,
        h,
        &frame.planes[U_C],
        bit_depth,
    );
    mc_chroma_plane(
        kernels,
        pred_v,
        i_pred,
        dx,
        dy,
        x,
        y,
        w,
        h,
        &frame.planes[V_C],
        bit_depth,
    );
}
