use super::plane::*;
use super::*;
use crate::api::*;

/// A reconstructed picture used as motion-compensation reference.
///
/// Holds the padded full-pel planes and the cached quarter-pel luma planes
/// the interpolation pre-pass fills in, one LCU row band at a time.
#[derive(Debug, Clone)]
pub struct RefFrame {
    pub planes: [Plane<pel>; N_C],
    /* indexed by SubpelPhase::index(), slot 0 is planes[Y_C] */
    filtered: [Option<Plane<pel>>; SubpelPhase::COUNT],
    bit_depth: u32,
    /* rows above this one are final in every cached phase plane */
    subpel_rows: isize,
}

impl RefFrame {
    /// Allocates a 4:2:0 frame with phase planes for the phases `cfg`
    /// computes.
    pub fn new(width: usize, height: usize, cfg: &InterpolationConfig) -> Result<Self, Error> {
        cfg.validate()?;
        if width < 8 || height < 8 || width & 1 != 0 || height & 1 != 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let luma = || Plane::new(width, height, 0, 0, PIC_PAD_SIZE_L, PIC_PAD_SIZE_L);
        let chroma = || {
            Plane::new(
                width >> 1,
                height >> 1,
                1,
                1,
                PIC_PAD_SIZE_C,
                PIC_PAD_SIZE_C,
            )
        };

        let mut filtered: [Option<Plane<pel>>; SubpelPhase::COUNT] = Default::default();
        for phase in cached_phases(cfg.fast_subpel) {
            filtered[phase.index()] = Some(luma());
        }

        Ok(RefFrame {
            planes: [luma(), chroma(), chroma()],
            filtered,
            bit_depth: cfg.bit_depth,
            subpel_rows: -(PIC_PAD_SIZE_L as isize),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.planes[Y_C].cfg.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.planes[Y_C].cfg.height
    }

    #[inline]
    pub fn bit_depth(&self) -> u32 {
        self.bit_depth
    }

    /// Cached plane of a fractional phase, `None` when the phase is not
    /// cached.
    pub fn phase_plane(&self, phase: SubpelPhase) -> Option<&Plane<pel>> {
        if phase.is_full() {
            Some(&self.planes[Y_C])
        } else {
            self.filtered[phase.index()].as_ref()
        }
    }

    pub(crate) fn phase_plane_mut(&mut self, phase: SubpelPhase) -> Option<&mut Plane<pel>> {
        if phase.is_full() {
            Some(&mut self.planes[Y_C])
        } else {
            self.filtered[phase.index()].as_mut()
        }
    }

    /// Whether rows `y..y + height` of `phase` can be read from its cache.
    pub fn is_cached(&self, phase: SubpelPhase, y: isize, height: usize) -> bool {
        !phase.is_full()
            && self.filtered[phase.index()].is_some()
            && y + height as isize <= self.subpel_rows
    }

    /// Number of luma rows, counted from the top padding, whose phase
    /// samples are final.
    pub fn subpel_rows(&self) -> isize {
        self.subpel_rows
    }

    /// Called after a band of the pre-pass. Bands finished out of order do
    /// not advance the ready mark.
    pub(crate) fn mark_subpel_rows(&mut self, start: isize, end: isize, is_first: bool, is_last: bool) {
        if is_first || start <= self.subpel_rows {
            let end = if is_last {
                self.height() as isize + PIC_PAD_SIZE_L as isize
            } else {
                end
            };
            self.subpel_rows = self.subpel_rows.max(end);
        }
    }

    /// Forgets the cached phase samples, e.g. when the frame buffer is reused
    /// for a new reconstruction.
    pub fn invalidate_subpel(&mut self) {
        self.subpel_rows = -(PIC_PAD_SIZE_L as isize);
    }
}

/// Phases the pre-pass fills in.
pub(crate) fn cached_phases(fast_subpel: bool) -> Vec<SubpelPhase> {
    if fast_subpel {
        vec![SubpelPhase::new(2, 0), SubpelPhase::new(0, 2)]
    } else {
        SubpelPhase::fractional().collect()
    }
}

/* frame with random visible samples in `0..=max`, padding left at zero */
#[cfg(test)]
pub(crate) fn test_frame(
    seed: u8,
    width: usize,
    height: usize,
    cfg: &InterpolationConfig,
    max: u32,
) -> RefFrame {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    let mut ra = ChaChaRng::from_seed([seed; 32]);
    let mut f = RefFrame::new(width, height, cfg).unwrap();
    for p in f.planes.iter_mut() {
        for y in 0..p.cfg.height as isize {
            for v in p.row_mut(y) {
                *v = ra.gen_range(0, max + 1) as pel;
            }
        }
    }
    f
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn allocates_cached_phases() {
        let cfg = InterpolationConfig::default();
        let f = RefFrame::new(64, 32, &cfg).unwrap();
        assert!(SubpelPhase::fractional().all(|p| f.phase_plane(p).is_some()));
        assert_eq!(f.planes[U_C].cfg.width, 32);
        assert_eq!(f.planes[V_C].cfg.height, 16);

        let fast = InterpolationConfig {
            fast_subpel: true,
            ..cfg
        };
        let f = RefFrame::new(64, 32, &fast).unwrap();
        let cached: Vec<SubpelPhase> = SubpelPhase::fractional()
            .filter(|&p| f.phase_plane(p).is_some())
            .collect();
        assert_eq!(cached, vec![SubpelPhase::new(2, 0), SubpelPhase::new(0, 2)]);
    }

    #[test]
    fn rejects_bad_dimensions() {
        let cfg = InterpolationConfig::default();
        assert_eq!(
            RefFrame::new(63, 32, &cfg).err(),
            Some(Error::InvalidDimensions {
                width: 63,
                height: 32
            })
        );
        assert!(RefFrame::new(64, 4, &cfg).is_err());
    }

    #[test]
    fn ready_mark_is_contiguous() {
        let cfg = InterpolationConfig::default();
        let mut f = RefFrame::new(64, 192, &cfg).unwrap();
        let half = SubpelPhase::new(2, 2);
        assert!(!f.is_cached(half, 0, 8));

        /* second band first */
        f.mark_subpel_rows(56, 120, false, false);
        assert!(!f.is_cached(half, 60, 8));

        f.mark_subpel_rows(0, 56, true, false);
        assert!(f.is_cached(half, -80, 8));
        assert!(f.is_cached(half, 40, 16));
        assert!(!f.is_cached(half, 40, 17));

        f.mark_subpel_rows(56, 120, false, false);
        f.mark_subpel_rows(120, 192, false, true);
        assert!(f.is_cached(half, 192 + 72, 8));
        assert!(!f.is_cached(SubpelPhase::FULL, 0, 8));

        f.invalidate_subpel();
        assert!(!f.is_cached(half, 0, 8));
    }
}
