use defmt::*;
use embassy_executor::task;
use embassy_stm32::mode::Async;
use embassy_stm32::usart::UartTx;
use embedded_io_async::Write;

use crate::ipc::READINGS_CH;

/// One text line per reading on the serial console.
#[task]
pub async fn telemetry_task(mut uart: UartTx<'static, Async>) {
    info!("Telemetry task started");

    loop {
        let reading = READINGS_CH.receive().await;
        let line = reading.to_line();
        info!("{}", line.as_str());

        if let Err(e) = uart.write_all(line.as_bytes()).await {
            warn!("Telemetry write failed: {:?}", e);
            continue;
        }
        if let Err(e) = uart.write_all(b"\r\n").await {
            warn!("Telemetry write failed: {:?}", e);
        }
    }
}
