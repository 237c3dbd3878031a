#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CpuFeatureLevel {
    RUST,
    SSE4_1,
    AVX2,
}

impl CpuFeatureLevel {
    pub const fn all() -> &'static [Self] {
        use CpuFeatureLevel::*;
        &[RUST, SSE4_1, AVX2]
    }

    pub const fn len() -> usize {
        CpuFeatureLevel::AVX2 as usize + 1
    }

    #[inline(always)]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            CpuFeatureLevel::RUST => "rust",
            CpuFeatureLevel::SSE4_1 => "sse4_1",
            CpuFeatureLevel::AVX2 => "avx2",
        }
    }

    pub(crate) fn aliases(self) -> &'static [&'static str] {
        match self {
            CpuFeatureLevel::RUST => &["rust"],
            CpuFeatureLevel::SSE4_1 => &["sse4_1", "sse4.1"],
            CpuFeatureLevel::AVX2 => &["avx2"],
        }
    }

    /// Highest level the running CPU supports, ignoring any override.
    pub fn detected() -> CpuFeatureLevel {
        if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("sse4.1") {
            CpuFeatureLevel::AVX2
        } else if is_x86_feature_detected!("sse4.1") {
            CpuFeatureLevel::SSE4_1
        } else {
            CpuFeatureLevel::RUST
        }
    }
}

impl Default for CpuFeatureLevel {
    fn default() -> CpuFeatureLevel {
        super::from_env(CpuFeatureLevel::detected())
    }
}
