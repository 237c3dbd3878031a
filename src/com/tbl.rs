use super::*;

/*****************************************************************************
 * transform basis
 *****************************************************************************/
/* unique magnitudes of the AVS2 integer cosines, 32 * sqrt(2) * cos(a * pi / 64) */
const COS_ODD: [i32; 16] = [45, 45, 44, 43, 41, 39, 36, 34, 30, 27, 23, 19, 15, 11, 7, 2];
const COS_2: [i32; 8] = [45, 43, 40, 35, 29, 21, 13, 4];
const COS_4: [i32; 4] = [44, 38, 25, 9];
const COS_8: [i32; 2] = [42, 17];
const COS_16: i32 = 32;

/* magnitude of the basis at angle a in (0, 32) */
fn cos_mag(a: usize) -> i32 {
    debug_assert!(a > 0 && a < 32);
    if a & 1 != 0 {
        COS_ODD[a >> 1]
    } else if a & 3 != 0 {
        COS_2[a >> 2]
    } else if a & 7 != 0 {
        COS_4[a >> 3]
    } else if a & 15 != 0 {
        COS_8[a >> 4]
    } else {
        COS_16
    }
}

fn basis(k: usize, n: usize) -> i32 {
    if k == 0 {
        return 32;
    }
    let mut a = ((2 * n + 1) * k) & 127;
    if a > 64 {
        a = 128 - a;
    }
    /* (2n + 1) * k is never a multiple of 64 for 0 < k < 32 */
    if a > 32 {
        -cos_mag(64 - a)
    } else {
        cos_mag(a)
    }
}

lazy_static! {
    /* 32-point AVS2 DCT, rows are basis vectors */
    pub(crate) static ref avs2_tbl_tm32: [[i32; MAX_TX_SIZE]; MAX_TX_SIZE] = {
        let mut tm = [[0i32; MAX_TX_SIZE]; MAX_TX_SIZE];
        for (k, row) in tm.iter_mut().enumerate() {
            for (n, v) in row.iter_mut().enumerate() {
                *v = basis(k, n);
            }
        }
        tm
    };
}

/// Basis coefficient `T_N[k][n]` of the N-point transform.
#[inline(always)]
pub(crate) fn avs2_tm(log2_n: usize, k: usize, n: usize) -> i32 {
    avs2_tbl_tm32[k << (MAX_TX_LOG2 - log2_n)][n]
}

/*****************************************************************************
 * secondary transform
 *****************************************************************************/
pub(crate) const avs2_tbl_2nd: [[i32; SEC_TR_SIZE]; SEC_TR_SIZE] = [
    [123, -35, -8, -3],
    [-32, -120, 30, 10],
    [14, 25, 123, -22],
    [8, 13, 19, 126],
];

/*****************************************************************************
 * interpolation filter
 *****************************************************************************/
pub(crate) static avs2_tbl_mc_l_coeff: [[i16; NTAPS_LUMA]; 4] = [
    [0, 0, 0, 64, 0, 0, 0, 0],
    [-1, 4, -10, 57, 19, -7, 3, -1],
    [-1, 4, -11, 40, 40, -11, 4, -1],
    [-1, 3, -7, 19, 57, -10, 4, -1],
];

pub(crate) static avs2_tbl_mc_c_coeff: [[i16; NTAPS_CHROMA]; 8] = [
    [0, 64, 0, 0],
    [-4, 62, 6, 0],
    [-6, 56, 15, -1],
    [-5, 47, 25, -3],
    [-4, 36, 36, -4],
    [-3, 25, 47, -5],
    [-1, 15, 56, -6],
    [0, 6, 62, -4],
];

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tm4_matches_avs2() {
        let tm4: Vec<Vec<i32>> = (0..4)
            .map(|k| (0..4).map(|n| avs2_tm(2, k, n)).collect())
            .collect();
        assert_eq!(
            tm4,
            vec![
                vec![32, 32, 32, 32],
                vec![42, 17, -17, -42],
                vec![32, -32, -32, 32],
                vec![17, -42, 42, -17],
            ]
        );
    }

    #[test]
    fn tm8_first_odd_row() {
        let row: Vec<i32> = (0..8).map(|n| avs2_tm(3, 1, n)).collect();
        assert_eq!(row, vec![44, 38, 25, 9, -9, -25, -38, -44]);
    }

    #[test]
    fn tm32_symmetry() {
        for k in 0..MAX_TX_SIZE {
            let sign = if k & 1 == 0 { 1 } else { -1 };
            for n in 0..MAX_TX_SIZE / 2 {
                assert_eq!(
                    avs2_tbl_tm32[k][MAX_TX_SIZE - 1 - n],
                    sign * avs2_tbl_tm32[k][n]
                );
            }
        }
        assert_eq!(avs2_tbl_tm32[1][0], 45);
        assert_eq!(avs2_tbl_tm32[31][0], 2);
        assert_eq!(avs2_tbl_tm32[16][0], 32);
    }

    #[test]
    fn filter_gain() {
        for f in avs2_tbl_mc_l_coeff.iter() {
            assert_eq!(f.iter().map(|&c| c as i32).sum::<i32>(), 64);
        }
        for f in avs2_tbl_mc_c_coeff.iter() {
            assert_eq!(f.iter().map(|&c| c as i32).sum::<i32>(), 64);
        }
    }
}
