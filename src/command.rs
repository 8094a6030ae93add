use bit_field::BitField;

use crate::channel::Channel;
use crate::power::PowerMode;

/// A single conversion request.
///
/// The ADS7828 has no registers: every transaction starts with one command
/// byte that selects the input configuration and the power-down mode at the
/// same time. Bits 7:4 carry the channel pattern, bits 3:2 the PD1/PD0 mode
/// bits, and bits 1:0 are unused and transmitted as zero.
#[derive(Clone, Copy)]
pub(crate) struct Command {
    channel: Channel,
    mode: PowerMode,
}

impl Command {
    pub(crate) fn new(channel: Channel, mode: PowerMode) -> Self {
        Self { channel, mode }
    }

    /// The byte written to the device.
    pub(crate) fn byte(self) -> u8 {
        let mut byte = 0u8;
        byte.set_bits(4..=7, self.channel as u8);
        byte.set_bits(2..=3, self.mode as u8);
        byte
    }
}
