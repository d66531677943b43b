#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::just_underscores_and_digits, clippy::len_without_is_empty)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub(crate) type Kbn<T> = compensated_summation::KahanBabuskaNeumaier<T>;

mod error;
pub use error::{Result, RollingError};

mod utils;
pub use utils::{Window, helper};

mod traits;
pub use traits::Windowed;

mod rolling;
pub use rolling::{
    RollingDelta, RollingKurt, RollingMax, RollingMean, RollingMin, RollingPctChange,
    RollingQuantile, RollingSkew, RollingStdDev, RollingSum,
};

mod indicators;
pub use indicators::Wma;

mod tracker;
pub use tracker::{Tracker, TrackerKind};
