//! Cooperative refresh state machine
//!
//! [`Epaper`] drives a full panel update as a sequence of short steps. Each
//! call to [`advance`](Epaper::advance) performs at most one phase (or one
//! bounded slice of the data transfer), arms any required settle delay, and
//! returns. The caller polls from its main loop; nothing here blocks on the
//! panel, which can take tens of seconds to complete an ink refresh.

use core::marker::PhantomData;

use embedded_graphics::prelude::*;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use epaper_specs::PanelSpec;

use crate::buffer::FrameBuffer;
use crate::clock::{deadline_passed, MonotonicClock};
use crate::error::DriverError;
use crate::frame::Frame;
use crate::init::run_init_sequence;
use crate::interface::DisplayInterface;
use crate::state::EpaperState;
use crate::variant::PanelVariant;

/// Longest time one `advance` call may spend streaming frame data.
pub const MAX_TRANSFER_SLICE_MS: u32 = 10;

/// Bytes staged per SPI write during the frame transfer.
pub const TRANSFER_CHUNK: usize = 128;

/// Minimum spacing between "still waiting for busy" log lines.
const BUSY_LOG_INTERVAL_MS: u32 = 1000;

/// What a call to [`Epaper::advance`] left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleStatus {
    /// No refresh cycle is running.
    Idle,
    /// A refresh cycle is underway; keep polling.
    InProgress,
}

/// Polled e-paper panel driver.
///
/// Generic over the command transport, the optional reset and busy pins, the
/// time source, the blocking delay used inside init sequences, and the panel
/// family.
pub struct Epaper<DI, RST, BUSY, CLK, DLY, V> {
    interface: DI,
    reset_pin: Option<RST>,
    busy_pin: Option<BUSY>,
    clock: CLK,
    delay: DLY,
    spec: &'static PanelSpec,
    buffer: FrameBuffer,
    state: EpaperState,
    delay_until: Option<u32>,
    waiting_for_idle: bool,
    waiting_since: u32,
    last_busy_log: u32,
    expect_reset_low: bool,
    current_reset_cycle: u8,
    reset_cycles: u8,
    cursor: usize,
    _variant: PhantomData<V>,
}

impl<DI, RST, BUSY, CLK, DLY, V> Epaper<DI, RST, BUSY, CLK, DLY, V>
where
    DI: DisplayInterface,
    RST: OutputPin,
    BUSY: InputPin,
    CLK: MonotonicClock,
    DLY: DelayNs,
    V: PanelVariant,
{
    /// Build a driver for `spec`, allocating the frame buffer.
    ///
    /// Panels without a controllable reset pin pass `None` and rely on
    /// power-on reset; panels without a readable busy pin pass `None` and
    /// the driver assumes the controller is always ready.
    pub fn new(
        interface: DI,
        reset_pin: Option<RST>,
        busy_pin: Option<BUSY>,
        clock: CLK,
        delay: DLY,
        spec: &'static PanelSpec,
    ) -> Result<Self, DriverError> {
        let mut buffer = FrameBuffer::try_new(V::buffer_len(spec))?;
        buffer.fill(V::blank_byte());
        Ok(Self {
            interface,
            reset_pin,
            busy_pin,
            clock,
            delay,
            spec,
            buffer,
            state: EpaperState::Idle,
            delay_until: None,
            waiting_for_idle: false,
            waiting_since: 0,
            last_busy_log: 0,
            expect_reset_low: true,
            current_reset_cycle: 0,
            // A panel that resets at all needs at least one pulse.
            reset_cycles: spec.reset_cycles.max(1),
            cursor: 0,
            _variant: PhantomData,
        })
    }

    /// Start a refresh cycle.
    ///
    /// Returns `false` and leaves the driver untouched if a cycle is already
    /// running, or if an earlier cycle failed. Failure is permanent; commands
    /// already sent to the panel cannot be un-sent, so there is no recovery
    /// short of rebuilding the driver.
    pub fn begin_cycle(&mut self) -> bool {
        if self.state != EpaperState::Idle {
            log::warn!(
                "refresh request ignored (state {})",
                self.state.as_str()
            );
            return false;
        }
        self.expect_reset_low = true;
        self.current_reset_cycle = 0;
        self.cursor = 0;
        self.delay_until = None;
        self.waiting_for_idle = false;
        self.set_state(EpaperState::Reset, 0);
        true
    }

    /// Perform at most one step of the running cycle.
    ///
    /// `draw` renders the frame; it is invoked exactly once per cycle, during
    /// the update phase. Settle delays and a busy panel make this return
    /// [`CycleStatus::InProgress`] without doing work. A hardware or
    /// descriptor error moves the driver to [`EpaperState::Failed`] and is
    /// returned; from then on both `advance` and
    /// [`begin_cycle`](Self::begin_cycle) are inert.
    pub fn advance<F>(&mut self, draw: F) -> Result<CycleStatus, DriverError>
    where
        F: FnOnce(&mut Frame<'_, V>),
    {
        if matches!(self.state, EpaperState::Idle | EpaperState::Failed) {
            return Ok(CycleStatus::Idle);
        }

        let now = self.clock.now_ms();
        if let Some(deadline) = self.delay_until {
            if !deadline_passed(now, deadline) {
                return Ok(CycleStatus::InProgress);
            }
            self.delay_until = None;
        }

        if self.waiting_for_idle {
            if !self.panel_idle()? {
                if deadline_passed(now, self.last_busy_log.wrapping_add(BUSY_LOG_INTERVAL_MS)) {
                    log::debug!(
                        "waiting for panel idle in state {} ({} ms)",
                        self.state.as_str(),
                        now.wrapping_sub(self.waiting_since)
                    );
                    self.last_busy_log = now;
                }
                return Ok(CycleStatus::InProgress);
            }
            self.waiting_for_idle = false;
        }

        match self.process_state(draw) {
            Err(err) => {
                self.mark_failed(err);
                Err(err)
            }
            Ok(()) => Ok(if self.state == EpaperState::Idle {
                CycleStatus::Idle
            } else {
                CycleStatus::InProgress
            }),
        }
    }

    fn process_state<F>(&mut self, draw: F) -> Result<(), DriverError>
    where
        F: FnOnce(&mut Frame<'_, V>),
    {
        match self.state {
            EpaperState::Idle | EpaperState::Failed => {}
            EpaperState::Reset => {
                if self.reset_step()? {
                    self.set_state(EpaperState::Update, 0);
                } else {
                    self.set_state(EpaperState::ResetEnd, self.spec.reset_duration_ms);
                }
            }
            EpaperState::ResetEnd => {
                if self.reset_step()? {
                    self.set_state(EpaperState::Update, 0);
                } else {
                    self.set_state(EpaperState::Reset, self.spec.reset_duration_ms);
                }
            }
            EpaperState::Update => {
                let mut frame = Frame::new(&mut self.buffer, self.spec);
                draw(&mut frame);
                self.set_state(EpaperState::Initialise, 0);
            }
            EpaperState::Initialise => {
                run_init_sequence(&mut self.interface, &mut self.delay, self.spec.init_sequence)?;
                self.set_state(EpaperState::TransferData, 0);
            }
            EpaperState::TransferData => {
                if self.transfer_step()? {
                    self.set_state(EpaperState::PowerOn, 0);
                }
            }
            EpaperState::PowerOn => {
                V::power_on(&mut self.interface)?;
                self.set_state(EpaperState::PostPowerOn, 0);
            }
            EpaperState::PostPowerOn => {
                V::post_power_on(&mut self.interface)?;
                self.set_state(EpaperState::RefreshScreen, 0);
            }
            EpaperState::RefreshScreen => {
                V::refresh_screen(&mut self.interface)?;
                self.set_state(EpaperState::PowerOff, 0);
            }
            EpaperState::PowerOff => {
                V::power_off(&mut self.interface)?;
                self.set_state(EpaperState::DeepSleep, 0);
            }
            EpaperState::DeepSleep => {
                V::deep_sleep(&mut self.interface)?;
                log::info!("refresh cycle complete on {}", self.spec.name);
                self.set_state(EpaperState::Idle, 0);
            }
        }
        Ok(())
    }

    /// Drive one edge of the reset pulse train.
    ///
    /// Falling edges happen in `Reset`, rising edges in `ResetEnd`; the two
    /// states alternate with the hold delay between edges. Returns `Ok(true)`
    /// once the configured number of pulses has completed (immediately if no
    /// reset pin is wired).
    fn reset_step(&mut self) -> Result<bool, DriverError> {
        let Some(pin) = self.reset_pin.as_mut() else {
            return Ok(true);
        };
        if self.expect_reset_low {
            pin.set_low().map_err(|_| DriverError::Gpio)?;
            self.expect_reset_low = false;
            Ok(false)
        } else {
            pin.set_high().map_err(|_| DriverError::Gpio)?;
            self.expect_reset_low = true;
            self.current_reset_cycle += 1;
            Ok(self.current_reset_cycle >= self.reset_cycles)
        }
    }

    /// Stream frame bytes until done or the time slice is spent.
    ///
    /// Returns `Ok(true)` once the whole buffer has been sent. The cursor
    /// survives across calls so an interrupted transfer resumes where it
    /// stopped.
    fn transfer_step(&mut self) -> Result<bool, DriverError> {
        if self.cursor == 0 {
            V::begin_transfer(&mut self.interface)?;
        }
        let budget = self.clock.now_ms().wrapping_add(MAX_TRANSFER_SLICE_MS);
        let len = self.buffer.len();
        while self.cursor < len {
            let end = (self.cursor + TRANSFER_CHUNK).min(len);
            self.interface
                .send_data(&self.buffer.as_bytes()[self.cursor..end])?;
            self.cursor = end;
            if deadline_passed(self.clock.now_ms(), budget) {
                break;
            }
        }
        if self.cursor < len {
            log::trace!("transfer yielded at {}/{} bytes", self.cursor, len);
            return Ok(false);
        }
        self.cursor = 0;
        Ok(true)
    }

    fn set_state(&mut self, next: EpaperState, delay_ms: u32) {
        let now = self.clock.now_ms();
        log::trace!("{} -> {}", self.state.as_str(), next.as_str());
        self.state = next;
        self.delay_until = (delay_ms != 0).then(|| now.wrapping_add(delay_ms));
        self.waiting_for_idle = next.requires_idle();
        if self.waiting_for_idle {
            self.waiting_since = now;
            self.last_busy_log = now;
        }
    }

    fn mark_failed(&mut self, err: DriverError) {
        log::error!(
            "refresh cycle aborted in state {}: {}",
            self.state.as_str(),
            err
        );
        self.state = EpaperState::Failed;
        self.delay_until = None;
        self.waiting_for_idle = false;
        self.cursor = 0;
    }

    /// Whether the controller reports ready. Panels without a busy pin are
    /// always considered ready.
    fn panel_idle(&mut self) -> Result<bool, DriverError> {
        match self.busy_pin.as_mut() {
            None => Ok(true),
            Some(pin) => pin
                .is_high()
                .map(|busy| !busy)
                .map_err(|_| DriverError::Gpio),
        }
    }

    /// Issue the deep sleep command immediately.
    ///
    /// For shutdown paths that cannot wait for a cycle to finish; the panel
    /// keeps whatever image it currently shows. A failed driver stays
    /// failed.
    pub fn shutdown(&mut self) -> Result<(), DriverError> {
        V::deep_sleep(&mut self.interface)?;
        self.delay_until = None;
        self.waiting_for_idle = false;
        self.cursor = 0;
        if self.state != EpaperState::Failed {
            self.state = EpaperState::Idle;
        }
        Ok(())
    }

    /// Fill the frame buffer with one color. Takes effect on the next cycle.
    pub fn fill_color(&mut self, color: V::Color) {
        V::fill(&mut self.buffer, color);
    }

    /// Reset the frame buffer to the family's blank pattern.
    pub fn clear(&mut self) {
        self.buffer.fill(V::blank_byte());
    }

    /// Log the panel configuration at info level.
    pub fn log_config(&self) {
        log::info!(
            "panel {}: {}x{} {:?}, reset {} ms x{}, buffer {} bytes",
            self.spec.name,
            self.spec.width,
            self.spec.height,
            self.spec.display_type,
            self.spec.reset_duration_ms,
            self.reset_cycles,
            self.buffer.len()
        );
    }

    /// Current cycle state.
    pub fn state(&self) -> EpaperState {
        self.state
    }

    /// Whether the last cycle aborted on an error.
    pub fn is_failed(&self) -> bool {
        self.state == EpaperState::Failed
    }

    /// Descriptor this driver was built for.
    pub fn spec(&self) -> &'static PanelSpec {
        self.spec
    }

    /// Tear down the driver, returning the transport and pins.
    pub fn release(self) -> (DI, Option<RST>, Option<BUSY>) {
        (self.interface, self.reset_pin, self.busy_pin)
    }
}

impl<DI, RST, BUSY, CLK, DLY, V> OriginDimensions for Epaper<DI, RST, BUSY, CLK, DLY, V>
where
    V: PanelVariant,
{
    fn size(&self) -> Size {
        Size::new(u32::from(self.spec.width), u32::from(self.spec.height))
    }
}

impl<DI, RST, BUSY, CLK, DLY, V> DrawTarget for Epaper<DI, RST, BUSY, CLK, DLY, V>
where
    V: PanelVariant,
{
    type Color = V::Color;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            V::set_pixel(
                &mut self.buffer,
                self.spec,
                point.x as u32,
                point.y as u32,
                color,
            );
        }
        Ok(())
    }
}
