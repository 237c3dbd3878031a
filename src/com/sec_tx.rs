use super::tbl::*;
use super::util::*;
use super::*;

/* intra angular modes whose residual is predicted along the vertical */
#[inline]
fn use_vertical(mode: i32) -> bool {
    (0..=23).contains(&mode)
}

#[inline]
fn use_horizontal(mode: i32) -> bool {
    (13..=32).contains(&mode) || (0..=2).contains(&mode)
}

#[inline]
fn sec_round(v: i32) -> coeff {
    clip_signed(round_shift(v, SEC_TR_SHIFT), LIMIT_BIT)
}

/* out[j][k] = sum_i T[k][i] * c[j][i] */
fn xform_rows(coef: &mut [coeff], i_coef: usize, inverse: bool) {
    for j in 0..SEC_TR_SIZE {
        let row = &mut coef[j * i_coef..j * i_coef + SEC_TR_SIZE];
        let mut out = [0 as coeff; SEC_TR_SIZE];
        for (k, o) in out.iter_mut().enumerate() {
            let s: i32 = (0..SEC_TR_SIZE)
                .map(|i| {
                    let t = if inverse {
                        avs2_tbl_2nd[i][k]
                    } else {
                        avs2_tbl_2nd[k][i]
                    };
                    t * row[i]
                })
                .sum();
            *o = sec_round(s);
        }
        row.copy_from_slice(&out);
    }
}

/* out[k][j] = sum_i T[k][i] * c[i][j] */
fn xform_cols(coef: &mut [coeff], i_coef: usize, inverse: bool) {
    for j in 0..SEC_TR_SIZE {
        let mut out = [0 as coeff; SEC_TR_SIZE];
        for (k, o) in out.iter_mut().enumerate() {
            let s: i32 = (0..SEC_TR_SIZE)
                .map(|i| {
                    let t = if inverse {
                        avs2_tbl_2nd[i][k]
                    } else {
                        avs2_tbl_2nd[k][i]
                    };
                    t * coef[i * i_coef + j]
                })
                .sum();
            *o = sec_round(s);
        }
        for (k, &o) in out.iter().enumerate() {
            coef[k * i_coef + j] = o;
        }
    }
}

/// Forward secondary transform of the top-left 4x4 coefficients. A
/// direction is skipped when the mode does not use it or when the neighbour
/// it predicts from is missing.
pub(crate) fn transform_2nd(
    coef: &mut [coeff],
    i_coef: usize,
    mode: i32,
    top_avail: bool,
    left_avail: bool,
) {
    debug_assert!(i_coef >= SEC_TR_SIZE);
    if use_horizontal(mode) && left_avail {
        xform_rows(coef, i_coef, false);
    }
    if use_vertical(mode) && top_avail {
        xform_cols(coef, i_coef, false);
    }
}

pub(crate) fn inv_transform_2nd(
    coef: &mut [coeff],
    i_coef: usize,
    mode: i32,
    top_avail: bool,
    left_avail: bool,
) {
    debug_assert!(i_coef >= SEC_TR_SIZE);
    if use_vertical(mode) && top_avail {
        xform_cols(coef, i_coef, true);
    }
    if use_horizontal(mode) && left_avail {
        xform_rows(coef, i_coef, true);
    }
}
