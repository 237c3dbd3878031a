cfg_if::cfg_if! {
    if #[cfg(target_arch = "x86_64")] {
        mod x86;
        pub use x86::*;
    } else {
        mod rust;
        pub use rust::*;
    }
}

use crate::api::Error;
use std::fmt;

impl fmt::Display for CpuFeatureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for CpuFeatureLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        CpuFeatureLevel::all()
            .iter()
            .copied()
            .find(|l| l.aliases().iter().any(|a| *a == lower))
            .ok_or_else(|| Error::UnknownCpuLevel(s.to_owned()))
    }
}

/* an override can only lower the detected level */
pub(crate) fn clamp_to_detected(
    manual: Option<CpuFeatureLevel>,
    detected: CpuFeatureLevel,
) -> CpuFeatureLevel {
    match manual {
        Some(m) if m < detected => m,
        _ => detected,
    }
}

pub(crate) const CPU_TARGET_ENV: &str = "RAVS2_CPU_TARGET";

pub(crate) fn from_env(detected: CpuFeatureLevel) -> CpuFeatureLevel {
    let manual = match std::env::var(CPU_TARGET_ENV) {
        Ok(feature) => match feature.parse::<CpuFeatureLevel>() {
            Ok(level) => Some(level),
            Err(e) => {
                log::warn!("{}: {}, using {}", CPU_TARGET_ENV, e, detected);
                None
            }
        },
        Err(_) => None,
    };
    clamp_to_detected(manual, detected)
}
