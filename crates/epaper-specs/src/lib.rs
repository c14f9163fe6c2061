//! E-Paper Panel Descriptors
//!
//! Immutable per-model configuration for SPI e-paper panels: dimensions,
//! display type, the vendor initialisation bytecode, and reset-pulse timing.
//! A descriptor is built once as a `const` table and handed to the driver at
//! construction; nothing in it is ever mutated.
//!
//! # Features
//!
//! - **no_std compatible** - Works on embedded systems
//! - **Model templates** - Pre-configured descriptors under [`models`]
//! - **Serde support** - Optional serialization for host-side tooling
//!
//! # Example
//!
//! ```
//! use epaper_specs::models::SEEED_RETERMINAL_E1002;
//!
//! let spec = SEEED_RETERMINAL_E1002;
//! assert_eq!((spec.width, spec.height), (800, 480));
//! assert_eq!(spec.reset_cycles, 2);
//! ```
//!
//! # Custom descriptors
//!
//! ```
//! use epaper_specs::{DisplayType, PanelSpec};
//!
//! const MY_PANEL: PanelSpec = PanelSpec {
//!     name: "custom-bw",
//!     width: 296,
//!     height: 128,
//!     display_type: DisplayType::Binary,
//!     init_sequence: &[0x12, 0x00],
//!     reset_duration_ms: 200,
//!     reset_cycles: 1,
//! };
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod panel_spec;
pub mod models;

pub use panel_spec::{DisplayType, PanelSpec};

/// Reserved second byte in an init sequence marking a delay record.
///
/// When the byte after a command byte equals this marker, the command byte is
/// reinterpreted as a delay in milliseconds. Part of the bit-exact bytecode
/// format consumed by the driver's interpreter.
pub const DELAY_FLAG: u8 = 0xFF;
