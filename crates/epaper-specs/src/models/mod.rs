//! Pre-configured panel descriptors
//!
//! One submodule per panel family, re-exported flat for convenience.

mod spectra;

pub use spectra::{SEEED_RETERMINAL_E1002, SPECTRA_E6_800X480, SPECTRA_E6_INIT};
