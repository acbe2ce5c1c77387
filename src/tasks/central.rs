use defmt::*;
use embassy_executor::task;
use embassy_time::{Duration, Instant, Timer};
use fieldlink_core::{Aggregator, PollError};
use portable_atomic::Ordering;

use crate::board::Radio;
use crate::config::{LINK_STATS_PERIOD_S, RX_POLL_PERIOD_MS};
use crate::ipc::{ChannelSink, DROPPED_READINGS};

pub type Central = Aggregator<Radio, ChannelSink>;

#[task]
pub async fn receive_task(mut central: Central) {
    info!(
        "Receive task started - polling every {}ms",
        RX_POLL_PERIOD_MS
    );
    let mut last_report = Instant::now();

    loop {
        match central.poll().await {
            // Drain back-to-back packets before sleeping again.
            Ok(Some(reading)) => debug!("RX {}", reading),
            Ok(None) => Timer::after_millis(RX_POLL_PERIOD_MS).await,
            Err(PollError::Radio(e)) => {
                warn!("Radio read error: {:?}", e);
                Timer::after_millis(RX_POLL_PERIOD_MS).await;
            }
            Err(e) => warn!("Frame dropped: {:?}", e),
        }

        if last_report.elapsed() >= Duration::from_secs(LINK_STATS_PERIOD_S) {
            let stats = central.stats();
            info!(
                "Link: soil={} fire_volt={} malformed={} unknown_pipe={} sink_overflow={}",
                stats.soil,
                stats.fire_volt,
                stats.malformed,
                stats.unknown_pipe,
                DROPPED_READINGS.load(Ordering::Relaxed)
            );
            last_report = Instant::now();
        }
    }
}
