//! DFT module - re-exports from submodules

mod basis;
mod core;
mod fourier;
#[cfg(feature = "python")]
mod ffi;

pub use self::basis::*;
pub use self::core::*;
pub use self::fourier::*;
#[cfg(feature = "python")]
pub use self::ffi::dft_py;
