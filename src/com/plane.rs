use crate::api::frame::*;

/// Geometry of a padded plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneConfig {
    /// Data stride.
    pub stride: usize,
    /// Allocated height in pixels.
    pub alloc_height: usize,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Decimator along the X axis, 1 for 4:2:0 chroma.
    pub xdec: usize,
    /// Decimator along the Y axis, 1 for 4:2:0 chroma.
    pub ydec: usize,
    /// Number of padding pixels on each side.
    pub xpad: usize,
    /// Number of padding rows above and below.
    pub ypad: usize,
    /// X where the data starts.
    pub xorigin: usize,
    /// Y where the data starts.
    pub yorigin: usize,
}

impl PlaneConfig {
    /* stride in samples, rows start on 32 byte boundaries */
    const STRIDE_ALIGNMENT_LOG2: usize = 5;

    pub fn new(
        width: usize,
        height: usize,
        xdec: usize,
        ydec: usize,
        xpad: usize,
        ypad: usize,
        type_size: usize,
    ) -> Self {
        let align = (1 << Self::STRIDE_ALIGNMENT_LOG2) / type_size.max(1);
        let xorigin = (xpad + align - 1) / align * align;
        let stride = (xorigin + width + xpad + align - 1) / align * align;
        let yorigin = ypad;
        let alloc_height = yorigin + height + ypad;

        PlaneConfig {
            stride,
            alloc_height,
            width,
            height,
            xdec,
            ydec,
            xpad,
            ypad,
            xorigin,
            yorigin,
        }
    }
}

/// A stride-based sample buffer addressed by signed picture coordinates,
/// `(0, 0)` being the top-left sample inside the padding.
#[derive(Clone, Debug)]
pub struct Plane<T: Pixel> {
    pub data: AlignedBoxedSlice<T>,
    pub cfg: PlaneConfig,
}

impl<T: Pixel> Plane<T> {
    pub fn new(
        width: usize,
        height: usize,
        xdec: usize,
        ydec: usize,
        xpad: usize,
        ypad: usize,
    ) -> Self {
        let cfg = PlaneConfig::new(
            width,
            height,
            xdec,
            ydec,
            xpad,
            ypad,
            std::mem::size_of::<T>(),
        );
        let data = AlignedBoxedSlice::new(cfg.stride * cfg.alloc_height, T::zero());

        Plane { data, cfg }
    }

    /// Index of sample `(x, y)`, which may lie in the padding.
    #[inline]
    pub fn offset(&self, x: isize, y: isize) -> usize {
        let ox = self.cfg.xorigin as isize + x;
        let oy = self.cfg.yorigin as isize + y;
        debug_assert!(ox >= 0 && (ox as usize) < self.cfg.stride);
        debug_assert!(oy >= 0 && (oy as usize) < self.cfg.alloc_height);
        oy as usize * self.cfg.stride + ox as usize
    }

    /// Samples from `(x, y)` to the end of the buffer, to be walked with
    /// `cfg.stride`.
    #[inline]
    pub fn slice(&self, x: isize, y: isize) -> &[T] {
        &self.data[self.offset(x, y)..]
    }

    #[inline]
    pub fn slice_mut(&mut self, x: isize, y: isize) -> &mut [T] {
        let off = self.offset(x, y);
        &mut self.data[off..]
    }

    #[inline]
    pub fn p(&self, x: isize, y: isize) -> T {
        self.data[self.offset(x, y)]
    }

    /// Row `y` of the visible area.
    pub fn row(&self, y: isize) -> &[T] {
        let off = self.offset(0, y);
        &self.data[off..off + self.cfg.width]
    }

    pub fn row_mut(&mut self, y: isize) -> &mut [T] {
        let off = self.offset(0, y);
        let width = self.cfg.width;
        &mut self.data[off..off + width]
    }

    /// Replicates column `x0` leftwards and column `x1 - 1` rightwards over
    /// the whole horizontal padding, for rows `y0..y1`.
    pub fn pad_cols(&mut self, x0: isize, x1: isize, y0: isize, y1: isize) {
        let left = self.cfg.xpad as isize;
        let right = self.cfg.width as isize + self.cfg.xpad as isize;
        for y in y0..y1 {
            let base = self.offset(-left, y);
            let row = &mut self.data[base..base + (left + right) as usize];
            let l = row[(x0 + left) as usize];
            let r = row[(x1 - 1 + left) as usize];
            for v in &mut row[..(x0 + left) as usize] {
                *v = l;
            }
            for v in &mut row[(x1 + left) as usize..] {
                *v = r;
            }
        }
    }

    /// Copies full padded row `src_y` over rows `y0..y1`.
    pub fn replicate_row(&mut self, src_y: isize, y0: isize, y1: isize) {
        let left = self.cfg.xpad as isize;
        let len = self.cfg.width + 2 * self.cfg.xpad;
        let src = self.offset(-left, src_y);
        for y in y0..y1 {
            let dst = self.offset(-left, y);
            self.data.copy_within(src..src + len, dst);
        }
    }

    /// Edge-replicates rows `y0..y1` of the visible area into the side
    /// padding, plus the top padding when `top` and the bottom padding when
    /// `bottom`.
    pub fn pad_rows(&mut self, y0: isize, y1: isize, top: bool, bottom: bool) {
        let w = self.cfg.width as isize;
        let h = self.cfg.height as isize;
        let ypad = self.cfg.ypad as isize;

        self.pad_cols(0, w, y0, y1);
        if top {
            self.replicate_row(0, -ypad, 0);
        }
        if bottom {
            self.replicate_row(h - 1, h, h + ypad);
        }
    }

    /// Pads the whole plane.
    pub fn pad(&mut self) {
        let h = self.cfg.height as isize;
        self.pad_rows(0, h, true, true);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn geometry() {
        let p: Plane<u8> = Plane::new(100, 20, 0, 0, 80, 80);
        assert_eq!(p.cfg.xorigin, 96);
        assert_eq!(p.cfg.stride % 32, 0);
        assert!(p.cfg.stride >= 96 + 100 + 80);
        assert_eq!(p.cfg.alloc_height, 180);
        assert_eq!(p.offset(0, 0), 80 * p.cfg.stride + 96);
        assert_eq!(p.offset(-80, -80), 16);
    }

    #[test]
    fn pad_replicates_edges() {
        let mut p: Plane<u16> = Plane::new(4, 3, 0, 0, 8, 8);
        for y in 0..3 {
            for (x, v) in p.row_mut(y).iter_mut().enumerate() {
                *v = (y * 10 + x as isize) as u16;
            }
        }
        p.pad();

        assert_eq!(p.p(-8, -8), 0);
        assert_eq!(p.p(-1, 1), 10);
        assert_eq!(p.p(11, 1), 13);
        assert_eq!(p.p(11, 10), 23);
        assert_eq!(p.p(2, -5), 2);
        assert_eq!(p.p(2, 9), 22);
        assert_eq!(p.row(1), &[10, 11, 12, 13]);
    }

    #[test]
    fn pad_cols_from_inner_span() {
        let mut p: Plane<u8> = Plane::new(4, 1, 0, 0, 4, 0);
        for (x, v) in p.row_mut(0).iter_mut().enumerate() {
            *v = x as u8 + 1;
        }
        p.pad_cols(1, 3, 0, 1);
        let row: Vec<u8> = (-4..8).map(|x| p.p(x, 0)).collect();
        assert_eq!(row, vec![2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3]);
    }
}
