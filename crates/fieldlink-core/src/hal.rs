//! Seams between the node logic and the hardware.
//!
//! Digital pins use the `embedded-hal` traits directly. Analog sampling and
//! the radio get small traits of their own since `embedded-hal` 1.0 has
//! neither.

use core::future::Future;

/// Largest payload the transceiver carries in one packet.
pub const MAX_PAYLOAD_LEN: usize = 32;

/// A multiplexed ADC. Reads are treated as fixed latency and infallible.
pub trait AnalogSampler {
    type Channel;

    /// One raw conversion of `channel`, in ADC counts.
    fn sample(&mut self, channel: &mut Self::Channel) -> u16;
}

/// Write side of a radio already pointed at its destination address.
pub trait Transmitter {
    type Error;

    fn transmit(&mut self, payload: &[u8]) -> impl Future<Output = Result<(), Self::Error>>;
}

/// Location of one received packet inside the caller's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Receive pipe the packet matched.
    pub pipe: u8,
    /// Payload length as reported by the radio.
    pub len: usize,
}

/// Read side of a radio listening on one or more pipes.
pub trait Receiver {
    type Error;

    /// Non-blocking: `Ok(None)` when no packet is waiting.
    fn receive(
        &mut self,
        buf: &mut [u8; MAX_PAYLOAD_LEN],
    ) -> impl Future<Output = Result<Option<Frame>, Self::Error>>;
}
