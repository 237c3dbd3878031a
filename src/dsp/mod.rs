//! Kernel dispatch.
//!
//! Every block operation of the transform and interpolation engines goes
//! through a [`Kernels`] object. The default methods are the portable
//! implementations; accelerated kernel sets override a subset of them and
//! must produce bit-identical output for every valid input.

#[cfg(target_arch = "x86_64")]
pub(crate) mod x86;

use crate::com::*;
use crate::cpu_features::CpuFeatureLevel;
use crate::{com, enc};

pub trait Kernels: Send + Sync {
    /// Level of the instruction set this kernel set is built on.
    fn cpu(&self) -> CpuFeatureLevel;

    /*****************************************************************************
     * data movement
     *****************************************************************************/
    fn plane_copy(
        &self,
        dst: &mut [pel],
        i_dst: usize,
        src: &[pel],
        i_src: usize,
        width: usize,
        height: usize,
    ) {
        com::recon::plane_copy(dst, i_dst, src, i_src, width, height)
    }

    /// Copy of a block whose sides are multiples of 4.
    fn block_copy(
        &self,
        dst: &mut [pel],
        i_dst: usize,
        src: &[pel],
        i_src: usize,
        width: usize,
        height: usize,
    ) {
        com::recon::block_copy(dst, i_dst, src, i_src, width, height)
    }

    /// Splits `width` interleaved UV pairs per row into two planes.
    fn plane_copy_deinterleave(
        &self,
        dst_u: &mut [pel],
        i_dst_u: usize,
        dst_v: &mut [pel],
        i_dst_v: usize,
        src: &[pel],
        i_src: usize,
        width: usize,
        height: usize,
    ) {
        com::recon::plane_copy_deinterleave(
            dst_u, i_dst_u, dst_v, i_dst_v, src, i_src, width, height,
        )
    }

    fn fill_coeff(&self, dst: &mut [coeff], val: coeff) {
        com::recon::fill_coeff(dst, val)
    }

    fn fill_pel(&self, dst: &mut [pel], i_dst: usize, width: usize, height: usize, val: pel) {
        com::recon::fill_pel(dst, i_dst, width, height, val)
    }

    /// `res = org - pred`
    fn pixel_sub(
        &self,
        res: &mut [coeff],
        i_res: usize,
        org: &[pel],
        i_org: usize,
        pred: &[pel],
        i_pred: usize,
        width: usize,
        height: usize,
    ) {
        com::recon::pixel_sub(res, i_res, org, i_org, pred, i_pred, width, height)
    }

    /// `rec = clip(pred + res)`
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
        com::recon::pixel_add(
            rec, i_rec, pred, i_pred, res, i_res, width, height, bit_depth,
        )
    }

    /*****************************************************************************
     * transform
     *****************************************************************************/
    /// One forward 1-D pass over `lines` contiguous lines of `1 << log2_n`
    /// samples, output transposed (`dst[k * lines + j]`).
    fn fwd_pass(&self, log2_n: usize, src: &[coeff], dst: &mut [coeff], shift: u32, lines: usize) {
        enc::tx::fwd_pass(log2_n, src, dst, shift, lines)
    }

    /// One inverse 1-D pass reading transposed input (`src[k * lines + j]`),
    /// output clipped to `clip_bits` signed bits.
    fn inv_pass(
        &self,
        log2_n: usize,
        src: &[coeff],
        dst: &mut [coeff],
        shift: u32,
        lines: usize,
        clip_bits: u32,
    ) {
        com::itx::inv_pass(log2_n, src, dst, shift, lines, clip_bits)
    }

    fn dct(&self, size: TxSize, src: &[coeff], i_src: usize, dst: &mut [coeff], bit_depth: u32) {
        enc::tx::dct_2d(self, size, src, i_src, dst, bit_depth)
    }

    fn idct(&self, size: TxSize, src: &[coeff], dst: &mut [coeff], i_dst: usize, bit_depth: u32) {
        com::itx::idct_2d(self, size, src, dst, i_dst, bit_depth)
    }

    fn transform_2nd(
        &self,
        coef: &mut [coeff],
        i_coef: usize,
        mode: i32,
        top_avail: bool,
        left_avail: bool,
    ) {
        com::sec_tx::transform_2nd(coef, i_coef, mode, top_avail, left_avail)
    }

    fn inv_transform_2nd(
        &self,
        coef: &mut [coeff],
        i_coef: usize,
        mode: i32,
        top_avail: bool,
        left_avail: bool,
    ) {
        com::sec_tx::inv_transform_2nd(coef, i_coef, mode, top_avail, left_avail)
    }

    /*****************************************************************************
     * interpolation
     *****************************************************************************/
    /// Horizontal filter, `src` starts at the first tap column.
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
        com::mc::intpl_hor(dst, i_dst, src, i_src, width, height, taps, bit_depth)
    }

    /// Vertical filter, `src` starts at the first tap row.
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
        com::mc::intpl_ver(dst, i_dst, src, i_src, width, height, taps, bit_depth)
    }

    /// First stage of the 2-D filter, unclipped and shifted by `bit_depth - 8`.
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
        com::mc::intpl_hor_mct(dst, i_dst, src, i_src, width, height, taps, bit_depth)
    }

    /// Second stage of the 2-D filter, vertical over the intermediate.
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
        com::mc::intpl_ext(dst, i_dst, src, i_src, width, height, taps, bit_depth)
    }
}

/// Portable kernel set, always available.
#[derive(Debug)]
pub struct ScalarKernels {
    _private: (),
}

impl Kernels for ScalarKernels {
    fn cpu(&self) -> CpuFeatureLevel {
        CpuFeatureLevel::RUST
    }
}

pub(crate) static SCALAR_KERNELS: ScalarKernels = ScalarKernels { _private: () };

/// Selects the kernel set for `cpu`. Levels the running CPU does not
/// support fall back to the highest one it does.
pub fn init(cpu: CpuFeatureLevel) -> &'static dyn Kernels {
    let level = cpu.min(CpuFeatureLevel::detected());
    let kernels = KERNEL_SETS[level.as_index()];
    log::info!("kernel set: {}", kernels.cpu());
    kernels
}

cfg_if::cfg_if! {
    if #[cfg(target_arch = "x86_64")] {
        static KERNEL_SETS: [&dyn Kernels; CpuFeatureLevel::len()] =
            [&SCALAR_KERNELS, &x86::SSE4_KERNELS, &x86::AVX2_KERNELS];
    } else {
        static KERNEL_SETS: [&dyn Kernels; CpuFeatureLevel::len()] = [&SCALAR_KERNELS];
    }
}
