//! One level of the integer 5/3 lifting used to fold a 64x64 block into the
//! 32x32 low band the 32-point transform works on.

use super::*;

pub(crate) const WAVELET_SIZE: usize = 2 * MAX_TX_SIZE;
const HALF: usize = MAX_TX_SIZE;

/* split line into [low | high], symmetric extension on both ends */
fn lift_fwd(line: &mut [coeff; WAVELET_SIZE]) {
    let mut lo = [0 as coeff; HALF];
    let mut hi = [0 as coeff; HALF];

    /* predict */
    for i in 0..HALF {
        let left = line[2 * i];
        let right = if i + 1 < HALF { line[2 * i + 2] } else { line[2 * i] };
        hi[i] = line[2 * i + 1] - ((left + right) >> 1);
    }
    /* update */
    for i in 0..HALF {
        let dl = if i > 0 { hi[i - 1] } else { hi[0] };
        lo[i] = line[2 * i] + ((dl + hi[i] + 2) >> 2);
    }

    line[..HALF].copy_from_slice(&lo);
    line[HALF..].copy_from_slice(&hi);
}

fn lift_inv(line: &mut [coeff; WAVELET_SIZE]) {
    let mut even = [0 as coeff; HALF];
    let (lo, hi) = line.split_at(HALF);

    for i in 0..HALF {
        let dl = if i > 0 { hi[i - 1] } else { hi[0] };
        even[i] = lo[i] - ((dl + hi[i] + 2) >> 2);
    }

    let mut out = [0 as coeff; WAVELET_SIZE];
    for i in 0..HALF {
        let right = if i + 1 < HALF { even[i + 1] } else { even[i] };
        out[2 * i] = even[i];
        out[2 * i + 1] = hi[i] + ((even[i] + right) >> 1);
    }
    line.copy_from_slice(&out);
}

fn for_each_row(blk: &mut [coeff], f: fn(&mut [coeff; WAVELET_SIZE])) {
    let mut line = [0 as coeff; WAVELET_SIZE];
    for row in blk.chunks_exact_mut(WAVELET_SIZE) {
        line.copy_from_slice(row);
        f(&mut line);
        row.copy_from_slice(&line);
    }
}

fn for_each_col(blk: &mut [coeff], f: fn(&mut [coeff; WAVELET_SIZE])) {
    let mut line = [0 as coeff; WAVELET_SIZE];
    for x in 0..WAVELET_SIZE {
        for y in 0..WAVELET_SIZE {
            line[y] = blk[y * WAVELET_SIZE + x];
        }
        f(&mut line);
        for y in 0..WAVELET_SIZE {
            blk[y * WAVELET_SIZE + x] = line[y];
        }
    }
}

/// In-place 2-D lifting of a contiguous 64x64 block, rows then columns.
/// The low band ends up in the top-left 32x32 quadrant.
pub fn wavelet_64x64(blk: &mut [coeff]) {
    debug_assert!(blk.len() >= WAVELET_SIZE * WAVELET_SIZE);
    let blk = &mut blk[..WAVELET_SIZE * WAVELET_SIZE];
    for_each_row(blk, lift_fwd);
    for_each_col(blk, lift_fwd);
}

/// Exact inverse of [`wavelet_64x64`].
pub fn inv_wavelet_64x64(blk: &mut [coeff]) {
    debug_assert!(blk.len() >= WAVELET_SIZE * WAVELET_SIZE);
    let blk = &mut blk[..WAVELET_SIZE * WAVELET_SIZE];
    for_each_col(blk, lift_inv);
    for_each_row(blk, lift_inv);
}
