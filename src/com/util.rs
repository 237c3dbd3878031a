use super::*;

use std::cmp::*;

/* clipping within min and max */
#[inline(always)]
pub(crate) fn AVS2_CLIP3<T: Ord>(min_x: T, max_x: T, value: T) -> T {
    max(min_x, min(max_x, value))
}

/* clip to [0, 2^bit_depth - 1] */
#[inline(always)]
pub(crate) fn clip_pel(v: i32, bit_depth: u32) -> i32 {
    AVS2_CLIP3(0, (1 << bit_depth) - 1, v)
}

/* clip to a signed range of `bits` bits */
#[inline(always)]
pub(crate) fn clip_signed(v: i32, bits: u32) -> i32 {
    AVS2_CLIP3(-(1 << (bits - 1)), (1 << (bits - 1)) - 1, v)
}

/* rounding offset, no bias for a zero shift */
#[inline(always)]
pub(crate) const fn round_add(shift: u32) -> i32 {
    if shift == 0 {
        0
    } else {
        1 << (shift - 1)
    }
}

#[inline(always)]
pub(crate) fn round_shift(value: i32, shift: u32) -> i32 {
    (value + round_add(shift)) >> shift
}

#[inline(always)]
pub(crate) fn max_pel(bit_depth: u32) -> i32 {
    (1 << bit_depth) - 1
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_shift_has_no_bias() {
        assert_eq!(round_shift(5, 0), 5);
        assert_eq!(round_shift(-5, 0), -5);
        assert_eq!(round_shift(5, 1), 3);
        assert_eq!(round_shift(-5, 1), -2);
        assert_eq!(round_shift(31, 6), 0);
        assert_eq!(round_shift(32, 6), 1);
    }

    #[test]
    fn clips() {
        assert_eq!(clip_pel(-3, 8), 0);
        assert_eq!(clip_pel(300, 8), 255);
        assert_eq!(clip_pel(1100, 10), 1023);
        assert_eq!(clip_signed(40000, 16), 32767);
        assert_eq!(clip_signed(-40000, 16), -32768);
        assert_eq!(clip_signed(-600, 9), -256);
    }
}
