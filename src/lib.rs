//! AVS2 (IEEE 1857.4) transform and motion compensation kernels.
//!
//! [`api`] carries the public surface: the forward and inverse transforms,
//! block motion compensation over [`api::RefFrame`], the sub-pel
//! interpolation pre-pass and the kernel set selected by [`api::init`].

#![allow(non_upper_case_globals, non_camel_case_types, non_snake_case)]
#![allow(clippy::too_many_arguments)]

#[macro_use]
extern crate lazy_static;

pub mod api;
mod com;
pub mod cpu_features;
pub mod dsp;
mod enc;
