use fieldlink_core::drivers::nrf24::{DataRate, PowerLevel, RadioConfig};
use fieldlink_core::{FlameConfig, Polarity, VoltageScale};

// Centralize all configuration constants
pub const SAMPLE_PERIOD_MS: u64 = 2_000;
pub const RX_POLL_PERIOD_MS: u64 = 5;
pub const LINK_STATS_PERIOD_S: u64 = 60;
pub const TELEMETRY_BAUDRATE: u32 = 9_600;
pub const RADIO_SPI_FREQUENCY_HZ: u32 = 4_000_000;

pub const RADIO_CONFIG: RadioConfig = RadioConfig {
    channel: 76,
    power: PowerLevel::Low,
    data_rate: DataRate::Mbps1,
    retransmit_delay_us: 1500,
    retransmit_count: 15,
};

// Flame node calibration. Both values are placeholders: measure the divider
// and check the detector module's output polarity on the deployed hardware.
pub const FLAME_CONFIG: FlameConfig = FlameConfig {
    polarity: Polarity::ActiveLow,
    voltage_scale: VoltageScale {
        reference_volts: 3.3,
        full_scale: 4095, // 12-bit ADC
        divider_ratio: 40.0,
    },
};

// Channel sizes
pub const READINGS_CHANNEL_SIZE: usize = 8;
