pub(crate) mod frame;
pub(crate) mod itx;
pub(crate) mod mc;
pub(crate) mod plane;
pub(crate) mod recon;
pub(crate) mod sec_tx;
pub(crate) mod tbl;
pub(crate) mod util;
pub(crate) mod wavelet;

/*****************************************************************************
 * types
 *****************************************************************************/
cfg_if::cfg_if! {
    if #[cfg(feature = "high_bit_depth")] {
        #[allow(non_camel_case_types)]
        pub type pel = u16;
        pub const MAX_BIT_DEPTH: u32 = 10;
    } else {
        #[allow(non_camel_case_types)]
        pub type pel = u8;
        pub const MAX_BIT_DEPTH: u32 = 8;
    }
}

/* residual and transform coefficient */
#[allow(non_camel_case_types)]
pub type coeff = i32;
/* intermediate sample of the separable 2-D interpolation */
#[allow(non_camel_case_types)]
pub type mct = i16;

pub const MIN_BIT_DEPTH: u32 = 8;

pub(crate) const Y_C: usize = 0; /* Y luma */
pub(crate) const U_C: usize = 1; /* Cb Chroma */
pub(crate) const V_C: usize = 2; /* Cr Chroma */
pub(crate) const N_C: usize = 3; /* number of color component */

pub(crate) const MAX_CU_LOG2: usize = 6;
pub(crate) const MAX_CU_SIZE: usize = 1 << MAX_CU_LOG2;

pub(crate) const PIC_PAD_SIZE_L: usize = MAX_CU_SIZE + 16;
pub(crate) const PIC_PAD_SIZE_C: usize = PIC_PAD_SIZE_L >> 1;

/* rows at the bottom of an LCU row still modified by the loop filter of the next one */
pub(crate) const LCU_ROW_DELAY: usize = 8;
/* samples computed outside a true picture boundary before edge replication */
pub(crate) const INTPL_EXT: usize = 4;

/*****************************************************************************
 * transform
 *****************************************************************************/
pub(crate) const FACTO_BIT: u32 = 5;
pub(crate) const LIMIT_BIT: u32 = 16;
pub(crate) const ITX_SHIFT1: u32 = 5; /* shift after 1st IT stage */
pub(crate) const ITX_SHIFT2_BASE: u32 = 20; /* 2nd IT stage shifts by 20 - bit_depth */

pub(crate) const MAX_TX_LOG2: usize = 5; /* 32-point kernel */
pub(crate) const MAX_TX_SIZE: usize = 1 << MAX_TX_LOG2;

pub(crate) const SEC_TR_SIZE: usize = 4;
pub(crate) const SEC_TR_SHIFT: u32 = 7;

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxSize {
    TX_4X4,
    TX_8X8,
    TX_16X16,
    TX_32X32,
    TX_64X64,
    TX_16X4,
    TX_4X16,
    TX_32X8,
    TX_8X32,
}

impl TxSize {
    pub const ALL: [TxSize; 9] = [
        TxSize::TX_4X4,
        TxSize::TX_8X8,
        TxSize::TX_16X16,
        TxSize::TX_32X32,
        TxSize::TX_64X64,
        TxSize::TX_16X4,
        TxSize::TX_4X16,
        TxSize::TX_32X8,
        TxSize::TX_8X32,
    ];

    pub fn width_log2(self) -> usize {
        use TxSize::*;
        match self {
            TX_4X4 | TX_4X16 => 2,
            TX_8X8 | TX_8X32 => 3,
            TX_16X16 | TX_16X4 => 4,
            TX_32X32 | TX_32X8 => 5,
            TX_64X64 => 6,
        }
    }

    pub fn height_log2(self) -> usize {
        use TxSize::*;
        match self {
            TX_4X4 | TX_16X4 => 2,
            TX_8X8 | TX_32X8 => 3,
            TX_16X16 | TX_4X16 => 4,
            TX_32X32 | TX_8X32 => 5,
            TX_64X64 => 6,
        }
    }

    #[inline]
    pub fn width(self) -> usize {
        1 << self.width_log2()
    }

    #[inline]
    pub fn height(self) -> usize {
        1 << self.height_log2()
    }

    #[inline]
    pub fn area(self) -> usize {
        self.width() * self.height()
    }

    /// Number of coefficients the transform produces. A 64x64 block only
    /// keeps its 32x32 low band.
    #[inline]
    pub fn coeff_area(self) -> usize {
        if self == TxSize::TX_64X64 {
            MAX_TX_SIZE * MAX_TX_SIZE
        } else {
            self.area()
        }
    }

    /// log2 of the geometric mean of the block dimensions
    /// (`B4X4_IN_BIT` .. `B64X64_IN_BIT`).
    #[inline]
    pub(crate) fn in_bit(self) -> u32 {
        ((self.width_log2() + self.height_log2()) >> 1) as u32
    }

    pub fn from_dims(width: usize, height: usize) -> Option<TxSize> {
        TxSize::ALL
            .iter()
            .copied()
            .find(|t| t.width() == width && t.height() == height)
    }
}

/*****************************************************************************
 * interpolation
 *****************************************************************************/
pub(crate) const IF_FILTER_PREC: u32 = 6;
pub(crate) const NTAPS_LUMA: usize = 8;
pub(crate) const NTAPS_CHROMA: usize = 4;
/* samples a filter reaches before the output position */
pub(crate) const LUMA_HALO_BEFORE: usize = NTAPS_LUMA / 2 - 1;
pub(crate) const CHROMA_HALO_BEFORE: usize = NTAPS_CHROMA / 2 - 1;

/// A quarter-pel luma phase. `(0, 0)` is the full-pel sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SubpelPhase {
    pub dx: u8,
    pub dy: u8,
}

impl SubpelPhase {
    pub const FULL: SubpelPhase = SubpelPhase { dx: 0, dy: 0 };
    pub const COUNT: usize = 16;

    pub fn new(dx: u8, dy: u8) -> SubpelPhase {
        debug_assert!(dx < 4 && dy < 4);
        SubpelPhase { dx, dy }
    }

    /// Phase of a quarter-pel position.
    #[inline]
    pub fn of(pos_x: i32, pos_y: i32) -> SubpelPhase {
        SubpelPhase {
            dx: (pos_x & 3) as u8,
            dy: (pos_y & 3) as u8,
        }
    }

    #[inline]
    pub fn is_full(self) -> bool {
        self == SubpelPhase::FULL
    }

    /// Storage slot, `(dy << 2) + dx`.
    #[inline]
    pub(crate) fn index(self) -> usize {
        ((self.dy as usize) << 2) + self.dx as usize
    }

    /// The 15 fractional phases in storage order.
    pub fn fractional() -> impl Iterator<Item = SubpelPhase> {
        (1..SubpelPhase::COUNT).map(|i| SubpelPhase {
            dx: (i & 3) as u8,
            dy: (i >> 2) as u8,
        })
    }
}
