use defmt::*;
use embassy_executor::task;
use embassy_time::{Duration, Ticker};
use fieldlink_core::SoilNode;

use crate::board::Radio;
use crate::config::SAMPLE_PERIOD_MS;
use crate::drivers::BoardAdc;

pub type Soil = SoilNode<BoardAdc, Radio>;

#[task]
pub async fn soil_task(mut node: Soil) {
    info!(
        "Soil task started - sampling at {}ms intervals",
        SAMPLE_PERIOD_MS
    );
    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_PERIOD_MS));
    let mut error_count = 0u32;
    let mut consecutive_errors = 0u32;

    loop {
        match node.cycle().await {
            Ok(sample) => {
                debug!(
                    "Soil sent: top={} deep={}",
                    sample.soil_top, sample.soil_deep
                );
                if consecutive_errors > 0 {
                    info!(
                        "Soil link recovered after {} lost packets",
                        consecutive_errors
                    );
                    consecutive_errors = 0;
                }
            }
            // The sample is gone; the next tick sends a fresh one.
            Err(e) => {
                error_count += 1;
                consecutive_errors += 1;
                if consecutive_errors % 10 == 1 {
                    warn!("Soil send failed #{}: {:?}", error_count, e);
                }
            }
        }

        ticker.next().await;
    }
}
