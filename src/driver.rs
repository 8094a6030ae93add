use embedded_hal::i2c::I2c;

use crate::averaging::{Buffer, SampleBuffer};
use crate::channel::Channel;
use crate::command::Command;
use crate::error::Error;
use crate::power::PowerMode;

/// Default 7-bit bus address, with both address pins tied low.
pub const DEFAULT_ADDRESS: u8 = 0x48;

/// Voltage of the internal reference in volts.
const INTERNAL_REFERENCE: f32 = 2.5;

/// Largest conversion result of the 12-bit converter.
const FULL_SCALE: f32 = 4095.0;

/// Compute the 7-bit bus address from the AD1/AD0 pin strapping.
///
/// A high pin contributes a one in the corresponding address bit, so the
/// four strappings cover addresses `0x48..=0x4B`.
pub const fn address_for_pins(ad1: bool, ad0: bool) -> u8 {
    DEFAULT_ADDRESS | ((ad1 as u8) << 1) | ad0 as u8
}

/// Driver for the ADS7828.
///
/// All device state lives in this struct; the device itself is stateless
/// apart from the mode bits latched by the last command byte it received.
/// Every bus-touching method blocks until the underlying transfer completes
/// and surfaces transfer failures unchanged, leaving the driver state as it
/// was before the call.
///
/// The driver is not safe to share between threads without external
/// locking, which the `&mut self` receivers make structural: wrap the
/// driver (or the bus) in a mutex and hold it for each whole operation.
pub struct Ads7828<I2C> {
    i2c: I2C,
    address: u8,
    mode: PowerMode,
    reference_voltage: f32,
    scaling: [f32; 16],
    buffers: [Buffer; 16],
}

/// # Construction and device state
impl<I2C> Ads7828<I2C> {
    /// Create a driver using the internal 2.5 V reference.
    ///
    /// `address` is the 7-bit bus address set by the AD1/AD0 pins; see
    /// [`DEFAULT_ADDRESS`] and [`address_for_pins`]. Nothing is written to
    /// the device until the first measurement or mode change.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            mode: PowerMode::ReferenceOnConverterOn,
            reference_voltage: INTERNAL_REFERENCE,
            scaling: [1.0; 16],
            buffers: core::array::from_fn(|_| Buffer::new()),
        }
    }

    /// The power-down mode sent with conversion requests.
    pub fn power_mode(&self) -> PowerMode {
        self.mode
    }

    /// The reference voltage in volts used to convert digits to volts.
    pub fn reference_voltage(&self) -> f32 {
        self.reference_voltage
    }

    /// The device's 7-bit bus address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Destroy the driver and hand back the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

/// # Measurements
impl<I2C: I2c> Ads7828<I2C> {
    /// Create a driver for a device whose REF pin is driven externally.
    ///
    /// Equivalent to [`Ads7828::new`] followed by
    /// [`set_reference_external`](Ads7828::set_reference_external), so this
    /// issues one throwaway conversion to disable the internal reference.
    ///
    /// # Errors
    ///
    /// An error is returned if that transfer fails, in which case the bus
    /// is dropped along with the driver.
    pub fn with_external_reference(
        i2c: I2C,
        address: u8,
        volts: f32,
    ) -> Result<Self, Error<I2C::Error>> {
        let mut adc = Self::new(i2c, address);
        adc.set_reference_external(volts)?;
        Ok(adc)
    }

    /// Read the raw 12-bit conversion result for a channel.
    ///
    /// One command byte is written and the two-byte big-endian result is
    /// read back. The device only ever sets the low twelve bits, so the
    /// result is in `0..=4095`.
    ///
    /// If [averaging](Ads7828::enable_averaging) is enabled for `channel`,
    /// the sample is stored in the channel's ring buffer and the buffer's
    /// mean is returned instead of the sample itself. Slots not yet written
    /// count as zero, so the first reads after enabling sit below the true
    /// level until the buffer has filled.
    ///
    /// # Errors
    ///
    /// A failed transfer is surfaced unchanged and does not touch the
    /// averaging buffer.
    pub fn read_digit(&mut self, channel: Channel) -> Result<u16, Error<I2C::Error>> {
        let digit = self.transfer(Command::new(channel, self.mode))?;
        let buffer = &mut self.buffers[channel.index()];
        if !buffer.is_enabled() {
            return Ok(digit);
        }
        buffer.append(digit);
        Ok(buffer.mean())
    }

    /// Read a channel and convert the result to volts.
    ///
    /// The digit is taken with [`read_digit`](Ads7828::read_digit)
    /// (averaging included) and converted as
    /// `digit / 4095 * reference voltage * scaling factor`.
    ///
    /// # Errors
    ///
    /// A failed transfer is surfaced unchanged.
    pub fn read_voltage(&mut self, channel: Channel) -> Result<f32, Error<I2C::Error>> {
        let digit = self.read_digit(channel)?;
        Ok(f32::from(digit) / FULL_SCALE * self.reference_voltage * self.scaling[channel.index()])
    }

    /// Write the command byte and read back the two-byte result.
    fn transfer(&mut self, command: Command) -> Result<u16, Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[command.byte()])
            .map_err(Error::I2c)?;
        let mut data = [0u8; 2];
        self.i2c.read(self.address, &mut data).map_err(Error::I2c)?;
        Ok(u16::from_be_bytes(data))
    }
}

/// # Reference voltage and power mode
///
/// The mode bits ride along with every conversion request; there is no
/// standalone "set mode" command. A mode change therefore either issues a
/// throwaway conversion straight away, or waits to take effect with the
/// next read. The driver commits a new mode or reference voltage only once
/// any such transfer has succeeded.
impl<I2C: I2c> Ads7828<I2C> {
    /// Use an externally supplied reference voltage.
    ///
    /// The internal reference is switched off by moving to
    /// [`PowerMode::ReferenceOff`], pushed to the device with a throwaway
    /// conversion. If the driver is already in that mode only the stored
    /// voltage changes and nothing is transferred.
    ///
    /// The device needs roughly a millisecond to settle after a change
    /// between the internal and external reference; samples taken sooner
    /// may be inaccurate. Any delay is left to the caller.
    ///
    /// # Errors
    ///
    /// An error is returned if the throwaway conversion fails; the mode and
    /// reference voltage then keep their previous values.
    pub fn set_reference_external(&mut self, volts: f32) -> Result<(), Error<I2C::Error>> {
        if self.mode != PowerMode::ReferenceOff {
            self.push_mode(PowerMode::ReferenceOff)?;
            self.mode = PowerMode::ReferenceOff;
        }
        self.reference_voltage = volts;
        Ok(())
    }

    /// Switch back to the internal 2.5 V reference.
    ///
    /// Moves to [`PowerMode::ReferenceOnConverterOn`] and pushes the change
    /// with a throwaway conversion. The settling-time caveat of
    /// [`set_reference_external`](Ads7828::set_reference_external) applies
    /// here too.
    ///
    /// # Errors
    ///
    /// An error is returned if the throwaway conversion fails; the mode and
    /// reference voltage then keep their previous values.
    pub fn set_reference_internal(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_power_mode(PowerMode::ReferenceOnConverterOn, true)
    }

    /// Select the power-down behaviour between conversions.
    ///
    /// The two `ReferenceOn*` modes imply the internal reference, so they
    /// also restore the stored reference voltage to 2.5 V. Switching to
    /// [`PowerMode::ReferenceOff`] keeps the stored voltage: use
    /// [`set_reference_external`](Ads7828::set_reference_external) to
    /// supply the external value.
    ///
    /// With `update_now` the new mode is transmitted immediately via a
    /// throwaway conversion on channel 0; otherwise it is latched by the
    /// device with the next read.
    ///
    /// # Errors
    ///
    /// An error is returned if the throwaway conversion fails; the mode and
    /// reference voltage then keep their previous values. Without
    /// `update_now` nothing is transferred and the call cannot fail.
    pub fn set_power_mode(
        &mut self,
        mode: PowerMode,
        update_now: bool,
    ) -> Result<(), Error<I2C::Error>> {
        if update_now {
            self.push_mode(mode)?;
        }
        self.mode = mode;
        if matches!(
            mode,
            PowerMode::ReferenceOnConverterOff | PowerMode::ReferenceOnConverterOn
        ) {
            self.reference_voltage = INTERNAL_REFERENCE;
        }
        Ok(())
    }

    /// Transmit `mode` by issuing a throwaway conversion on channel 0.
    ///
    /// The returned sample is discarded without touching channel 0's
    /// averaging buffer.
    fn push_mode(&mut self, mode: PowerMode) -> Result<(), Error<I2C::Error>> {
        self.transfer(Command::new(Channel::Single0, mode))?;
        Ok(())
    }
}

/// # Scaling
///
/// Each of the sixteen input configurations carries a multiplier that is
/// applied to voltage readings only, never to raw digits. This calibrates
/// out external circuitry such as a voltage divider in front of a channel.
/// The two orderings of a differential pair are separate configurations
/// with separate factors.
impl<I2C> Ads7828<I2C> {
    /// Set the voltage multiplier for a channel.
    pub fn set_scaling(&mut self, channel: Channel, factor: f32) {
        self.scaling[channel.index()] = factor;
    }

    /// The current voltage multiplier for a channel.
    pub fn scaling(&self, channel: Channel) -> f32 {
        self.scaling[channel.index()]
    }

    /// Reset a channel's voltage multiplier to 1.
    pub fn reset_scaling(&mut self, channel: Channel) {
        self.set_scaling(channel, 1.0);
    }

    /// Reset the voltage multipliers of all sixteen channels to 1.
    pub fn reset_all_scaling(&mut self) {
        self.scaling = [1.0; 16];
    }
}

/// # Averaging
///
/// Reads of a channel with averaging enabled return the mean of that
/// channel's last `depth` samples; see the [`averaging`](crate::averaging)
/// module for the two storage strategies and the zero-fill behaviour of a
/// freshly enabled buffer.
impl<I2C> Ads7828<I2C> {
    /// Average the last `depth` samples of a channel.
    ///
    /// Any previously stored samples are discarded. Requests for a depth of
    /// 0 or 1 are ignored, and with the default fixed-capacity storage the
    /// depth is clamped to [`MAX_DEPTH`](crate::averaging::MAX_DEPTH).
    pub fn enable_averaging(&mut self, channel: Channel, depth: usize) {
        self.buffers[channel.index()].enable(depth);
    }

    /// Discard a channel's stored samples, keeping averaging enabled.
    pub fn clear_averaging(&mut self, channel: Channel) {
        self.buffers[channel.index()].clear();
    }

    /// Return a channel to raw, unaveraged reads.
    ///
    /// No-op if averaging is not enabled for the channel.
    pub fn disable_averaging(&mut self, channel: Channel) {
        self.buffers[channel.index()].disable();
    }
}
