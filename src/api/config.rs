use super::*;

pub const MIN_LOG2_LCU_SIZE: u32 = 4;
pub const MAX_LOG2_LCU_SIZE: u32 = 6;

/// Settings of the sub-pel reference pre-pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterpolationConfig {
    // Bit depth of the reconstructed samples.
    pub bit_depth: u32,
    // log2 of the LCU size, the pre-pass runs one LCU row at a time.
    pub log2_lcu_size: u32,
    // Only the two half-pel planes (2, 0) and (0, 2) are cached.
    pub fast_subpel: bool,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        InterpolationConfig {
            bit_depth: 8,
            log2_lcu_size: MAX_LOG2_LCU_SIZE,
            fast_subpel: false,
        }
    }
}

impl InterpolationConfig {
    pub fn validate(&self) -> Result<(), Error> {
        check_bit_depth(self.bit_depth)?;
        if self.log2_lcu_size < MIN_LOG2_LCU_SIZE || self.log2_lcu_size > MAX_LOG2_LCU_SIZE {
            return Err(Error::InvalidLcuSize(self.log2_lcu_size));
        }
        Ok(())
    }

    #[inline]
    pub fn lcu_size(&self) -> usize {
        1 << self.log2_lcu_size
    }

    /// Number of LCU rows covering `height` luma rows.
    #[inline]
    pub fn lcu_rows(&self, height: usize) -> usize {
        (height + self.lcu_size() - 1) >> self.log2_lcu_size
    }
}
