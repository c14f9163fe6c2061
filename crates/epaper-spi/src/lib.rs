//! Cooperative SPI driver for bistable e-paper panels
//!
//! E-paper refreshes are slow (tens to hundreds of milliseconds) and gated by
//! an external BUSY line plus fixed reset-pulse timing, yet a firmware main
//! loop must never stall on the panel. This crate keeps the whole
//! power-up → transfer → refresh → power-down → sleep cycle non-blocking:
//! a resumable state machine does one bounded unit of work per call and
//! yields, to be polled again by the host scheduler.
//!
//! # Architecture
//!
//! ```text
//! Application (scheduler, frame producer)
//!         ↓ begin_cycle() / advance()
//! Epaper state machine (driver module)
//!         ↓ PanelVariant (per-model phases, pixel packing)
//!         ↓ DisplayInterface (command/data framing)
//! embedded-hal SpiDevice + GPIO pins
//! ```
//!
//! Per-model configuration (geometry, vendor init bytecode, reset timing)
//! lives in the `epaper-specs` crate and is injected at construction.
//!
//! # Example
//!
//! ```ignore
//! use epaper_spi::{models::Spectra6, Epaper, SpiInterface};
//! use epaper_specs::models::SEEED_RETERMINAL_E1002;
//!
//! let interface = SpiInterface::new(spi, dc_pin);
//! let mut panel: Epaper<_, _, _, _, _, Spectra6> = Epaper::new(
//!     interface,
//!     Some(reset_pin),
//!     Some(busy_pin),
//!     clock,
//!     delay,
//!     &SEEED_RETERMINAL_E1002,
//! )?;
//!
//! panel.begin_cycle();
//! loop {
//!     // One bounded step per scheduler tick; draw runs once, during UPDATE.
//!     if panel.advance(|frame| draw_ui(frame))? == epaper_spi::CycleStatus::Idle {
//!         break;
//!     }
//!     scheduler_yield();
//! }
//! ```
//!
//! # Features
//!
//! - `std` - host support ([`StdClock`], `std::error::Error` impls)
//! - `defmt` - `defmt::Format` derives on public types

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod buffer;
mod clock;
mod driver;
mod error;
mod frame;
mod init;
mod interface;
mod state;
mod variant;

pub mod models;

pub use buffer::FrameBuffer;
pub use clock::{deadline_passed, MonotonicClock};
pub use driver::{CycleStatus, Epaper, MAX_TRANSFER_SLICE_MS, TRANSFER_CHUNK};
pub use error::DriverError;
pub use frame::Frame;
pub use init::run_init_sequence;
pub use interface::{DisplayInterface, SpiInterface};
pub use state::EpaperState;
pub use variant::PanelVariant;

#[cfg(feature = "std")]
pub use clock::StdClock;

// Re-export the descriptor types so applications need only one import.
pub use epaper_specs::{DisplayType, PanelSpec, DELAY_FLAG};
