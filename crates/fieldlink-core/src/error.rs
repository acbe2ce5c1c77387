use embedded_hal::digital::ErrorKind as PinErrorKind;

use crate::channel::Channel;

/// A payload that cannot be interpreted as the record bound to its channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Payload length differs from the fixed record size.
    Length { expected: usize, actual: usize },
    /// Boolean field holding something other than 0 or 1.
    InvalidFlag(u8),
}

/// Failure of one remote node sampling cycle.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodeError<E> {
    Radio(E),
    Pin(PinErrorKind),
}

impl<E> NodeError<E> {
    pub(crate) fn pin<P: embedded_hal::digital::Error>(e: P) -> Self {
        NodeError::Pin(e.kind())
    }
}

/// Failure of one central node poll. Nothing is emitted when this is returned.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollError<E> {
    Radio(E),
    /// Data arrived on a pipe that has no record layout bound to it.
    UnknownPipe(u8),
    Decode { channel: Channel, error: DecodeError },
}
