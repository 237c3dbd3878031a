//! Sub-pel reference pre-pass.
//!
//! Fills the cached quarter-pel planes of a reconstructed frame one LCU row
//! band at a time, so motion compensation can copy instead of filter.

use crate::api::{Error, InterpolationConfig};
use crate::com::frame::*;
use crate::com::plane::Plane;
use crate::com::tbl::*;
use crate::com::*;
use crate::dsp::Kernels;

use std::cmp;

/* samples of context a luma filter needs after the output position */
const LUMA_HALO_AFTER: usize = NTAPS_LUMA - 1 - LUMA_HALO_BEFORE;

/// Fills the cached sub-pel planes of a [`RefFrame`] band by band.
///
/// Every band takes the frame as `&mut RefFrame`, so motion compensation
/// cannot read rows already marked ready while a later band of the same
/// frame is being interpolated. Callers that overlap the two need their
/// own synchronization around the frame, e.g. an `RwLock<RefFrame>` taken
/// for writing per band.
pub struct Interpolator {
    kernels: &'static dyn Kernels,
    cfg: InterpolationConfig,
}

/* full-pel luma rows r0 - 3 .. r1 + 4 and columns -7 .. width + 8, read
 * with clamping so nothing outside the picture is touched */
struct Window {
    data: Vec<pel>,
    stride: usize,
    rows: usize,
}

impl Window {
    fn new(plane: &Plane<pel>, r0: isize, rows: usize) -> Self {
        let w = plane.cfg.width;
        let h = plane.cfg.height as isize;
        let left = INTPL_EXT + LUMA_HALO_BEFORE;
        let stride = left + w + INTPL_EXT + LUMA_HALO_AFTER;
        let mut data = vec![0 as pel; stride * rows];

        for (i, line) in data.chunks_exact_mut(stride).enumerate() {
            let sy = cmp::min(cmp::max(r0 + i as isize, 0), h - 1);
            let row = plane.row(sy);
            line[left..left + w].copy_from_slice(row);
            let (l, r) = (row[0], row[w - 1]);
            for v in &mut line[..left] {
                *v = l;
            }
            for v in &mut line[left + w..] {
                *v = r;
            }
        }

        Window { data, stride, rows }
    }
}

impl Interpolator {
    pub fn new(kernels: &'static dyn Kernels, cfg: InterpolationConfig) -> Result<Self, Error> {
        cfg.validate()?;
        Ok(Interpolator { kernels, cfg })
    }

    pub fn config(&self) -> &InterpolationConfig {
        &self.cfg
    }

    /// Interpolates the band of LCU row `lcu_row`.
    ///
    /// The band ends `LCU_ROW_DELAY` rows above the bottom of the LCU row,
    /// those rows still change when the next row is filtered; the next
    /// band starts there.
    pub fn interpolate_lcu_row(&self, frame: &mut RefFrame, lcu_row: usize) -> Result<(), Error> {
        let height = frame.height();
        let rows = self.cfg.lcu_rows(height);
        if lcu_row >= rows {
            return Err(Error::LcuRowOutOfRange { row: lcu_row, rows });
        }

        let lcu = self.cfg.lcu_size();
        let is_first = lcu_row == 0;
        let is_last = lcu_row + 1 == rows;
        let start = if is_first { 0 } else { lcu_row * lcu - LCU_ROW_DELAY };
        let end = if is_last {
            height
        } else {
            (lcu_row + 1) * lcu - LCU_ROW_DELAY
        };

        self.interpolate_sample_rows(frame, start, end - start, is_first, is_last)
    }

    /// Interpolates every LCU row band of `frame`, top to bottom.
    pub fn interpolate_frame(&self, frame: &mut RefFrame) -> Result<(), Error> {
        for lcu_row in 0..self.cfg.lcu_rows(frame.height()) {
            self.interpolate_lcu_row(frame, lcu_row)?;
        }
        Ok(())
    }

    /// Interpolates luma rows `start_y .. start_y + height` into every cached
    /// phase plane and pads the full-pel planes of the band, plus the four
    /// rows below it that filtering of the band's last rows reads.
    ///
    /// Four extra rows or columns are computed past each true picture
    /// boundary and then replicated over the padding. Full-pel rows are read
    /// from `max(start_y - 3, 0)` to `start_y + height + 3`.
    pub fn interpolate_sample_rows(
        &self,
        frame: &mut RefFrame,
        start_y: usize,
        height: usize,
        is_first: bool,
        is_last: bool,
    ) -> Result<(), Error> {
        let (pic_w, pic_h) = (frame.width(), frame.height());
        if height == 0 || start_y + height > pic_h {
            return Err(Error::InvalidBand { start_y, height });
        }

        let bit_depth = frame.bit_depth();
        let k = self.kernels;
        let start = start_y as isize;
        let end = (start_y + height) as isize;
        let ext = INTPL_EXT as isize;
        let r0 = if is_first { start - ext } else { start };
        let r1 = if is_last { end + ext } else { end };
        let ow = pic_w + 2 * INTPL_EXT;
        let oh = (r1 - r0) as usize;

        let win = Window::new(
            &frame.planes[Y_C],
            r0 - LUMA_HALO_BEFORE as isize,
            oh + NTAPS_LUMA - 1,
        );
        let win_hor = &win.data[LUMA_HALO_BEFORE * win.stride..];
        let win_ver = &win.data[LUMA_HALO_BEFORE..];

        let steps: &[usize] = if self.cfg.fast_subpel { &[2] } else { &[1, 2, 3] };
        let mut computed = Vec::with_capacity(SubpelPhase::COUNT - 1);

        /* horizontal planes and their intermediates */
        let mut tmp: Vec<Vec<mct>> = Vec::new();
        for &dx in steps {
            let phase = SubpelPhase::new(dx as u8, 0);
            let coef = &avs2_tbl_mc_l_coeff[dx];
            if let Some(p) = frame.phase_plane_mut(phase) {
                let i_dst = p.cfg.stride;
                let dst = p.slice_mut(-ext, r0);
                k.intpl_hor(dst, i_dst, win_hor, win.stride, ow, oh, coef, bit_depth);
                computed.push(phase);
            }
            if !self.cfg.fast_subpel {
                let mut t = vec![0 as mct; ow * win.rows];
                k.intpl_hor_mct(&mut t, ow, &win.data, win.stride, ow, win.rows, coef, bit_depth);
                tmp.push(t);
            }
        }

        /* vertical planes */
        for &dy in steps {
            let phase = SubpelPhase::new(0, dy as u8);
            let coef = &avs2_tbl_mc_l_coeff[dy];
            if let Some(p) = frame.phase_plane_mut(phase) {
                let i_dst = p.cfg.stride;
                let dst = p.slice_mut(-ext, r0);
                k.intpl_ver(dst, i_dst, win_ver, win.stride, ow, oh, coef, bit_depth);
                computed.push(phase);
            }
        }

        /* diagonal planes from the horizontal intermediates */
        for (t, &dx) in tmp.iter().zip(steps.iter()) {
            for &dy in steps {
                let phase = SubpelPhase::new(dx as u8, dy as u8);
                let coef = &avs2_tbl_mc_l_coeff[dy];
                if let Some(p) = frame.phase_plane_mut(phase) {
                    let i_dst = p.cfg.stride;
                    let dst = p.slice_mut(-ext, r0);
                    k.intpl_ext(dst, i_dst, t, ow, ow, oh, coef, bit_depth);
                    computed.push(phase);
                }
            }
        }

        /* border expansion */
        for &phase in computed.iter() {
            if let Some(p) = frame.phase_plane_mut(phase) {
                let ypad = p.cfg.ypad as isize;
                p.pad_cols(-ext, pic_w as isize + ext, r0, r1);
                if is_first {
                    p.replicate_row(r0, -ypad, r0);
                }
                if is_last {
                    p.replicate_row(r1 - 1, r1, pic_h as isize + ypad);
                }
            }
        }

        /* on-the-fly filters of ready rows tap full-pel rows past the band */
        let pad_end = if is_last {
            end
        } else {
            cmp::min(end + LUMA_HALO_AFTER as isize, pic_h as isize)
        };
        frame.planes[Y_C].pad_rows(start, pad_end, is_first, is_last);
        let c_end = if is_last {
            frame.planes[U_C].cfg.height as isize
        } else {
            cmp::min((pad_end + 1) >> 1, frame.planes[U_C].cfg.height as isize)
        };
        for c in [U_C, V_C].iter() {
            frame.planes[*c].pad_rows(start >> 1, c_end, is_first, is_last);
        }

        frame.mark_subpel_rows(start, end, is_first, is_last);
        log::debug!(
            "interpolated rows {}..{}, {} phase planes",
            start_y,
            start_y + height,
            computed.len()
        );

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::com::frame::test_frame;
    use crate::com::mc::{mc_chroma, mc_luma};
    use crate::dsp::SCALAR_KERNELS;
    use pretty_assertions::assert_eq;

    fn interpolator(cfg: InterpolationConfig) -> Interpolator {
        Interpolator::new(&SCALAR_KERNELS, cfg).unwrap()
    }

    fn padded_plane(p: &Plane<pel>, y0: isize, y1: isize) -> Vec<pel> {
        let xpad = p.cfg.xpad as isize;
        let mut out = Vec::new();
        for y in y0..y1 {
            for x in -xpad..p.cfg.width as isize + xpad {
                out.push(p.p(x, y));
            }
        }
        out
    }

    #[test]
    fn lcu_row_bands() {
        let cfg = InterpolationConfig::default();
        let ip = interpolator(cfg);
        let mut f = test_frame(1, 96, 136, &cfg, 255);

        assert_eq!(
            ip.interpolate_lcu_row(&mut f, 3),
            Err(Error::LcuRowOutOfRange { row: 3, rows: 3 })
        );
        ip.interpolate_lcu_row(&mut f, 0).unwrap();
        assert_eq!(f.subpel_rows(), 56);
        ip.interpolate_lcu_row(&mut f, 1).unwrap();
        assert_eq!(f.subpel_rows(), 120);
        ip.interpolate_lcu_row(&mut f, 2).unwrap();
        assert_eq!(f.subpel_rows(), 136 + PIC_PAD_SIZE_L as isize);
    }

    #[test]
    fn first_band_reads_inside_picture_only() {
        let cfg = InterpolationConfig {
            log2_lcu_size: 5,
            ..Default::default()
        };
        let ip = interpolator(cfg);
        let (w, h) = (48, 96);
        let band_end = 32 - LCU_ROW_DELAY as isize;

        let run = |sentinel: pel| {
            let mut f = test_frame(2, w, h, &cfg, 100);
            let luma = &mut f.planes[Y_C];
            let xpad = luma.cfg.xpad as isize;
            for y in -(luma.cfg.ypad as isize)..h as isize + luma.cfg.ypad as isize {
                for x in -xpad..w as isize + xpad {
                    let outside = x < 0 || x >= w as isize || y < 0 || y >= band_end + 4;
                    if outside {
                        let off = luma.offset(x, y);
                        luma.data[off] = sentinel;
                    }
                }
            }
            ip.interpolate_lcu_row(&mut f, 0).unwrap();
            f
        };

        let a = run(255);
        let b = run(0);
        for phase in SubpelPhase::fractional() {
            let pa = a.phase_plane(phase).unwrap();
            let pb = b.phase_plane(phase).unwrap();
            let ya = padded_plane(pa, -(pa.cfg.ypad as isize), band_end);
            let yb = padded_plane(pb, -(pb.cfg.ypad as isize), band_end);
            assert_eq!(ya, yb, "{:?}", phase);
            assert!(ya.iter().all(|&v| v <= 200), "{:?}", phase);
        }
    }

    #[test]
    fn rerun_is_idempotent() {
        let cfg = InterpolationConfig::default();
        let ip = interpolator(cfg);
        let mut f = test_frame(3, 80, 72, &cfg, 255);
        ip.interpolate_frame(&mut f).unwrap();
        let first = f.clone();
        ip.interpolate_sample_rows(&mut f, 0, 56, true, false).unwrap();
        ip.interpolate_frame(&mut f).unwrap();

        for phase in SubpelPhase::fractional() {
            let p0 = first.phase_plane(phase).unwrap();
            let p1 = f.phase_plane(phase).unwrap();
            assert_eq!(&p0.data[..], &p1.data[..], "{:?}", phase);
        }
        assert_eq!(&first.planes[Y_C].data[..], &f.planes[Y_C].data[..]);
    }

    #[test]
    fn pads_full_pel_planes() {
        let cfg = InterpolationConfig::default();
        let ip = interpolator(cfg);
        let mut f = test_frame(4, 64, 64, &cfg, 255);
        ip.interpolate_frame(&mut f).unwrap();

        let l = &f.planes[Y_C];
        assert_eq!(l.p(-80, -80), l.p(0, 0));
        assert_eq!(l.p(143, 143), l.p(63, 63));
        assert_eq!(l.p(-5, 30), l.p(0, 30));
        let u = &f.planes[U_C];
        assert_eq!(u.p(-40, 39 + 31), u.p(0, 31));
        assert_eq!(u.p(31 + 40, -40), u.p(31, 0));
    }

    #[test]
    fn rejects_empty_or_overrunning_band() {
        let cfg = InterpolationConfig::default();
        let ip = interpolator(cfg);
        let mut f = test_frame(7, 64, 64, &cfg, 255);

        assert_eq!(
            ip.interpolate_sample_rows(&mut f, 16, 0, false, false),
            Err(Error::InvalidBand {
                start_y: 16,
                height: 0
            })
        );
        assert_eq!(
            ip.interpolate_sample_rows(&mut f, 56, 16, false, true),
            Err(Error::InvalidBand {
                start_y: 56,
                height: 16
            })
        );
        assert_eq!(f.subpel_rows(), -(PIC_PAD_SIZE_L as isize));
    }

    /* a band's ready rows must predict the same before and after the
     * following bands run, on the fly included */
    #[test]
    fn ready_rows_are_final_at_picture_edges() {
        let cfg = InterpolationConfig {
            fast_subpel: true,
            ..Default::default()
        };
        let ip = interpolator(cfg);
        let (pw, ph) = (96, 136);
        let mut early = test_frame(8, pw, ph, &cfg, 255);
        ip.interpolate_lcu_row(&mut early, 0).unwrap();
        assert_eq!(early.subpel_rows(), 56);
        let mut late = early.clone();
        ip.interpolate_frame(&mut late).unwrap();

        let (w, h) = (8, 8);
        let positions = [(-8, 48), (pw as i32 - 4, 48), (-8, 40), (pw as i32 - 4, 0)];
        for phase in SubpelPhase::fractional() {
            for &(x, y) in positions.iter() {
                let pos_x = 4 * x + phase.dx as i32;
                let pos_y = 4 * y + phase.dy as i32;
                let mut a = vec![0 as pel; w * h];
                let mut b = vec![0 as pel; w * h];
                mc_luma(&SCALAR_KERNELS, &mut a, w, pos_x, pos_y, w, h, &early);
                mc_luma(&SCALAR_KERNELS, &mut b, w, pos_x, pos_y, w, h, &late);
                assert_eq!(a, b, "{:?} at ({}, {})", phase, x, y);
            }
        }

        /* chroma rows under the ready luma rows */
        for &(x, y) in [(-4, 24), (pw as i32 / 2 - 2, 24)].iter() {
            let mut ea = vec![0 as pel; 16];
            let mut eb = vec![0 as pel; 16];
            let mut la = vec![0 as pel; 16];
            let mut lb = vec![0 as pel; 16];
            mc_chroma(&SCALAR_KERNELS, &mut ea, &mut eb, 4, 8 * x + 3, 8 * y + 5, 4, 4, &early);
            mc_chroma(&SCALAR_KERNELS, &mut la, &mut lb, 4, 8 * x + 3, 8 * y + 5, 4, 4, &late);
            assert_eq!((ea, eb), (la, lb), "chroma at ({}, {})", x, y);
        }
    }

    fn check_cached_equals_on_the_fly(cfg: InterpolationConfig) {
        let ip = interpolator(cfg);
        let mut cached = test_frame(5, 96, 80, &cfg, 255);
        ip.interpolate_frame(&mut cached).unwrap();
        let mut fly = cached.clone();
        fly.invalidate_subpel();

        let (w, h) = (16, 8);
        let positions = [(0, 0), (-60, -60), (40, 30), (88, 76), (100, 90), (-20, 70)];
        for phase in SubpelPhase::fractional() {
            for &(x, y) in positions.iter() {
                let pos_x = 4 * x + phase.dx as i32;
                let pos_y = 4 * y + phase.dy as i32;
                let mut a = vec![0 as pel; w * h];
                let mut b = vec![0 as pel; w * h];
                mc_luma(&SCALAR_KERNELS, &mut a, w, pos_x, pos_y, w, h, &cached);
                mc_luma(&SCALAR_KERNELS, &mut b, w, pos_x, pos_y, w, h, &fly);
                assert_eq!(a, b, "{:?} at ({}, {})", phase, x, y);
            }
        }
    }

    #[test]
    fn cached_equals_on_the_fly() {
        check_cached_equals_on_the_fly(InterpolationConfig::default());
    }

    #[test]
    fn fast_mode_caches_half_pel_only() {
        let cfg = InterpolationConfig {
            fast_subpel: true,
            ..Default::default()
        };
        check_cached_equals_on_the_fly(cfg);

        let f = test_frame(6, 32, 32, &cfg, 255);
        assert!(f.phase_plane(SubpelPhase::new(1, 1)).is_none());
        assert!(!f.is_cached(SubpelPhase::new(1, 1), 0, 8));
    }
}
