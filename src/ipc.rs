use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex as RawMutex, channel::Channel};
use fieldlink_core::{FireVoltSample, Reading, ReadingSink, SoilSample};
use portable_atomic::{AtomicU32, Ordering};

use crate::config::READINGS_CHANNEL_SIZE;

/*  decoded readings, receive task -> telemetry task */
pub static READINGS_CH: Channel<RawMutex, Reading, READINGS_CHANNEL_SIZE> = Channel::new();

/// Readings decoded but lost because the telemetry side fell behind.
pub static DROPPED_READINGS: AtomicU32 = AtomicU32::new(0);

/// Hands every decoded reading to the telemetry task without blocking the
/// receive loop.
pub struct ChannelSink;

impl ChannelSink {
    fn forward(reading: Reading) {
        if READINGS_CH.try_send(reading).is_err() {
            DROPPED_READINGS.fetch_add(1, Ordering::Relaxed);
        }
    }
}

impl ReadingSink for ChannelSink {
    fn on_soil(&mut self, sample: SoilSample) {
        Self::forward(Reading::Soil(sample));
    }

    fn on_fire_volt(&mut self, sample: FireVoltSample) {
        Self::forward(Reading::FireVolt(sample));
    }
}
