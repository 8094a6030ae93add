/// Power-down behaviour between conversions.
///
/// Each variant's value is the 2-bit PD1/PD0 field transmitted in bits 3:2
/// of the command byte, as listed in Table 1 of the datasheet. The mode is
/// coupled to the reference-voltage selection: the two `ReferenceOn*` modes
/// imply the internal 2.5 V reference, while an external reference requires
/// [`ReferenceOff`](PowerMode::ReferenceOff). See
/// [`Ads7828::set_power_mode`](crate::Ads7828::set_power_mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PowerMode {
    /// Power down between conversions.
    PowerDown = 0b00,
    /// Internal reference off, converter on.
    ///
    /// This is the required mode when an external reference voltage is
    /// connected to the REF pin.
    ReferenceOff = 0b01,
    /// Internal reference on, converter off.
    ReferenceOnConverterOff = 0b10,
    /// Internal reference on, converter on (power-up default).
    ReferenceOnConverterOn = 0b11,
}
