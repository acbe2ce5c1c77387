// Calibration knobs for the remote nodes. Deployed values live in the
// firmware's config module; nothing here picks them.

/// Maps an input level to "asserted".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    ActiveLow,
    ActiveHigh,
}

impl Polarity {
    pub fn is_asserted(self, pin_is_high: bool) -> bool {
        match self {
            Polarity::ActiveLow => !pin_is_high,
            Polarity::ActiveHigh => pin_is_high,
        }
    }
}

/// Raw ADC counts to volts: `raw * reference_volts / full_scale * divider_ratio`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VoltageScale {
    /// ADC reference voltage.
    pub reference_volts: f32,
    /// Count reported at the reference voltage (1023 for 10 bit, 4095 for 12 bit).
    pub full_scale: u16,
    /// Input divider ratio in front of the ADC pin.
    pub divider_ratio: f32,
}

impl VoltageScale {
    pub fn volts(&self, raw: u16) -> f32 {
        raw as f32 * (self.reference_volts / self.full_scale as f32) * self.divider_ratio
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlameConfig {
    pub polarity: Polarity,
    pub voltage_scale: VoltageScale,
}
