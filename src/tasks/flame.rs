use defmt::*;
use embassy_executor::task;
use embassy_stm32::gpio::{Input, Output};
use embassy_time::{Duration, Ticker};
use fieldlink_core::{FlameNode, NodeError};

use crate::board::Radio;
use crate::config::SAMPLE_PERIOD_MS;
use crate::drivers::BoardAdc;

pub type Flame = FlameNode<Input<'static>, Output<'static>, BoardAdc, Radio>;

#[task]
pub async fn flame_task(mut node: Flame) {
    info!(
        "Flame task started - sampling at {}ms intervals",
        SAMPLE_PERIOD_MS
    );
    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_PERIOD_MS));
    let mut error_count = 0u32;
    let mut consecutive_errors = 0u32;
    let mut flame_was_detected = false;

    loop {
        match node.cycle().await {
            Ok(sample) => {
                debug!(
                    "Flame sent: flame={} voltage={}V",
                    sample.flame_detected, sample.voltage
                );
                if sample.flame_detected != flame_was_detected {
                    if sample.flame_detected {
                        warn!("Flame detected - actuator on");
                    } else {
                        info!("Flame cleared - actuator off");
                    }
                    flame_was_detected = sample.flame_detected;
                }
                if consecutive_errors > 0 {
                    info!(
                        "Flame link recovered after {} lost packets",
                        consecutive_errors
                    );
                    consecutive_errors = 0;
                }
            }
            Err(NodeError::Radio(e)) => {
                error_count += 1;
                consecutive_errors += 1;
                if consecutive_errors % 10 == 1 {
                    warn!("Flame send failed #{}: {:?}", error_count, e);
                }
            }
            Err(NodeError::Pin(kind)) => error!("Flame GPIO error: {:?}", kind),
        }

        ticker.next().await;
    }
}
