use core::convert::Infallible;

use embassy_stm32::spi;
use embedded_hal_bus::spi::DeviceError;
use fieldlink_core::drivers::nrf24::Error;
use fieldlink_core::Channel;

use crate::board::Radio;
use crate::config::RADIO_CONFIG;

pub type RadioError = Error<DeviceError<spi::Error, Infallible>, Infallible>;

/// Bring a remote node's transceiver up as a transmitter on `channel`.
pub async fn bring_up_transmitter(radio: &mut Radio, channel: Channel) -> Result<(), RadioError> {
    radio.init(&RADIO_CONFIG).await?;
    radio.open_writing_pipe(&channel.address()).await?;
    radio.stop_listening().await
}

/// Bring the central node's transceiver up listening on every channel.
pub async fn bring_up_receiver(radio: &mut Radio) -> Result<(), RadioError> {
    radio.init(&RADIO_CONFIG).await?;
    // Pipe 1 first: pipes 2..5 borrow its address prefix.
    for channel in Channel::ALL {
        radio
            .open_reading_pipe(channel.pipe(), &channel.address())
            .await?;
    }
    radio.start_listening().await
}
