pub mod config;
pub mod frame;

use crate::com::{MAX_BIT_DEPTH, MIN_BIT_DEPTH};
use thiserror::Error;

pub use self::config::*;
pub use crate::com::frame::RefFrame;
pub use crate::com::itx::{inverse_transform, inverse_transform_2nd};
pub use crate::com::mc::{mc_chroma, mc_luma};
pub use crate::com::plane::{Plane, PlaneConfig};
pub use crate::com::wavelet::{inv_wavelet_64x64, wavelet_64x64};
pub use crate::com::{coeff, mct, pel, SubpelPhase, TxSize};
pub use crate::cpu_features::CpuFeatureLevel;
pub use crate::dsp::{init, Kernels};
pub use crate::enc::interpolate::Interpolator;
pub use crate::enc::tx::{forward_transform, transform_2nd};

/*****************************************************************************
 * return values and error code
 *****************************************************************************/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unsupported bit depth {0} (expected {} ..= {})", MIN_BIT_DEPTH, MAX_BIT_DEPTH)]
    UnsupportedBitDepth(u32),
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid log2 lcu size {0} (expected 4 ..= 6)")]
    InvalidLcuSize(u32),
    #[error("empty or out of picture band of {height} rows at row {start_y}")]
    InvalidBand { start_y: usize, height: usize },
    #[error("lcu row {row} out of range (picture has {rows} rows)")]
    LcuRowOutOfRange { row: usize, rows: usize },
    #[error("unknown cpu feature level {0:?}")]
    UnknownCpuLevel(String),
}

pub(crate) fn check_bit_depth(bit_depth: u32) -> Result<(), Error> {
    if bit_depth < MIN_BIT_DEPTH || bit_depth > MAX_BIT_DEPTH || bit_depth & 1 != 0 {
        Err(Error::UnsupportedBitDepth(bit_depth))
    } else {
        Ok(())
    }
}
