pub(crate) mod interpolate;
pub(crate) mod tx;
