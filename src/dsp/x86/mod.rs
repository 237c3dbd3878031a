//! x86_64 kernel sets.
//!
//! Both sets are only handed out by [`init`](super::init) on CPUs that
//! support their instruction set, which is what makes the `unsafe` calls
//! into `#[target_feature]` functions sound.

mod avx2;
mod sse4;

use crate::com::tbl::avs2_tm;
use crate::com::*;

use self::avx2::Avx2Kernels;
use self::sse4::Sse4Kernels;

pub(crate) static SSE4_KERNELS: Sse4Kernels = Sse4Kernels { _private: () };
pub(crate) static AVX2_KERNELS: Avx2Kernels = Avx2Kernels { _private: () };

lazy_static! {
    /* transposed bases, avs2_tbl_tm_t[log2_n][n * N + k] = T_N[k][n] */
    static ref avs2_tbl_tm_t: Vec<Vec<i32>> = (0..=MAX_TX_LOG2)
        .map(|log2_n| {
            let n = 1 << log2_n;
            let mut t = vec![0; n * n];
            for k in 0..n {
                for i in 0..n {
                    t[i * n + k] = avs2_tm(log2_n, k, i);
                }
            }
            t
        })
        .collect();
}
