//! End-to-end refresh cycle over mocked SPI and GPIO.

#![allow(clippy::unwrap_used)]

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_hal::delay::DelayNs;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use epaper_spi::models::Spectra6;
use epaper_spi::{CycleStatus, DisplayType, Epaper, MonotonicClock, PanelSpec, SpiInterface};

struct TickClock {
    now: u32,
}

impl MonotonicClock for TickClock {
    fn now_ms(&mut self) -> u32 {
        // Jump far enough per read that every settle delay has expired by
        // the next poll.
        let now = self.now;
        self.now = self.now.wrapping_add(25);
        now
    }
}

struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

static TINY_PANEL: PanelSpec = PanelSpec {
    name: "mock 4x2",
    width: 4,
    height: 2,
    display_type: DisplayType::Color,
    init_sequence: &[0x50, 0x01, 0x3F],
    reset_duration_ms: 20,
    reset_cycles: 1,
};

fn cmd(byte: u8) -> [SpiTransaction<u8>; 3] {
    [
        SpiTransaction::transaction_start(),
        SpiTransaction::write(byte),
        SpiTransaction::transaction_end(),
    ]
}

fn data(bytes: &[u8]) -> [SpiTransaction<u8>; 3] {
    [
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(bytes.to_vec()),
        SpiTransaction::transaction_end(),
    ]
}

#[test]
fn full_refresh_cycle_over_mock_spi() {
    let mut spi_expectations = Vec::new();
    // Init sequence.
    spi_expectations.extend(cmd(0x50));
    spi_expectations.extend(data(&[0x3F]));
    // Frame RAM write: one red pixel at the origin, rest blank white.
    spi_expectations.extend(cmd(0x10));
    spi_expectations.extend(data(&[0x31, 0x11, 0x11, 0x11]));
    // Power on, booster soft start, refresh, power off, deep sleep.
    spi_expectations.extend(cmd(0x04));
    spi_expectations.extend(cmd(0x06));
    spi_expectations.extend(data(&[0x6F, 0x1F, 0x17, 0x27]));
    spi_expectations.extend(cmd(0x12));
    spi_expectations.extend(data(&[0x00]));
    spi_expectations.extend(cmd(0x02));
    spi_expectations.extend(data(&[0x00]));
    spi_expectations.extend(cmd(0x07));
    spi_expectations.extend(data(&[0xA5]));

    let dc_expectations = [
        PinTransaction::set(PinState::Low),  // init command
        PinTransaction::set(PinState::High), // init data
        PinTransaction::set(PinState::Low),  // begin transfer
        PinTransaction::set(PinState::High), // frame data
        PinTransaction::set(PinState::Low),  // power on
        PinTransaction::set(PinState::Low),  // booster command
        PinTransaction::set(PinState::High), // booster data
        PinTransaction::set(PinState::Low),  // refresh command
        PinTransaction::set(PinState::High), // refresh data
        PinTransaction::set(PinState::Low),  // power off command
        PinTransaction::set(PinState::High), // power off data
        PinTransaction::set(PinState::Low),  // deep sleep command
        PinTransaction::set(PinState::High), // deep sleep data
    ];
    let reset_expectations = [
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ];

    let mut spi = SpiMock::new(&spi_expectations);
    let mut dc = PinMock::new(&dc_expectations);
    let mut reset = PinMock::new(&reset_expectations);

    let interface = SpiInterface::new(spi.clone(), dc.clone());
    let mut driver: Epaper<_, _, PinMock, _, _, Spectra6> = Epaper::new(
        interface,
        Some(reset.clone()),
        None,
        TickClock { now: 0 },
        NoopDelay,
        &TINY_PANEL,
    )
    .unwrap();

    assert!(driver.begin_cycle());
    // A second request while the cycle runs is refused.
    assert!(!driver.begin_cycle());

    let mut polls = 0;
    loop {
        polls += 1;
        assert!(polls < 100, "cycle did not complete");
        let status = driver
            .advance(|frame| {
                frame
                    .draw_iter([Pixel(Point::zero(), Rgb888::new(255, 0, 0))])
                    .unwrap();
            })
            .unwrap();
        if status == CycleStatus::Idle {
            break;
        }
    }

    assert!(!driver.is_failed());
    spi.done();
    dc.done();
    reset.done();
}
