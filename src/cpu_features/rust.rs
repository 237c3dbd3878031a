#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CpuFeatureLevel {
    RUST,
}

impl CpuFeatureLevel {
    pub const fn all() -> &'static [Self] {
        &[CpuFeatureLevel::RUST]
    }

    pub const fn len() -> usize {
        1
    }

    #[inline(always)]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    pub(crate) fn name(self) -> &'static str {
        "rust"
    }

    pub(crate) fn aliases(self) -> &'static [&'static str] {
        &["rust"]
    }

    pub fn detected() -> CpuFeatureLevel {
        CpuFeatureLevel::RUST
    }
}

impl Default for CpuFeatureLevel {
    fn default() -> CpuFeatureLevel {
        super::from_env(CpuFeatureLevel::detected())
    }
}
