//! Init sequence interpreter
//!
//! Panel bring-up is encoded as a compact bytecode so each model carries its
//! controller programming as data instead of code. Records are
//! `[cmd, n, data x (n & 0x7F)]`; a second byte of [`DELAY_FLAG`] means
//! "pause `cmd` milliseconds" instead. Delays here are short (single-digit
//! milliseconds in practice) and are the only blocking waits in the driver.

use embedded_hal::delay::DelayNs;
use epaper_specs::DELAY_FLAG;

use crate::error::DriverError;
use crate::interface::DisplayInterface;

/// Run a panel init bytecode sequence against the controller.
///
/// A truncated record or a data count that overruns the sequence yields
/// [`DriverError::MalformedInitSequence`]; the descriptor is wrong and
/// retrying cannot help.
pub fn run_init_sequence<DI, D>(
    interface: &mut DI,
    delay: &mut D,
    sequence: &[u8],
) -> Result<(), DriverError>
where
    DI: DisplayInterface + ?Sized,
    D: DelayNs,
{
    let mut index = 0;
    while index < sequence.len() {
        if sequence.len() - index < 2 {
            log::error!("init sequence truncated at offset {}", index);
            return Err(DriverError::MalformedInitSequence);
        }
        let cmd = sequence[index];
        let marker = sequence[index + 1];
        if marker == DELAY_FLAG {
            delay.delay_ms(u32::from(cmd));
            index += 2;
            continue;
        }
        let count = usize::from(marker & 0x7F);
        if sequence.len() - index - 2 < count {
            log::error!(
                "init sequence record at offset {} declares {} data bytes, {} remain",
                index,
                count,
                sequence.len() - index - 2
            );
            return Err(DriverError::MalformedInitSequence);
        }
        interface.cmd_data(cmd, &sequence[index + 2..index + 2 + count])?;
        index += 2 + count;
    }
    Ok(())
}
