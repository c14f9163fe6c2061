//! Panel family implementations.

mod spectra6;

pub use spectra6::{Spectra6, Spectra6Code};
