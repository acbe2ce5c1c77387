//! Hardware-independent core of the fieldlink sensor network
//!
//! Everything that does not touch an STM32 peripheral lives here: the fixed
//! wire records, the channel-to-layout binding, the remote node sampling
//! cycles, the central node's poll/dispatch loop and the nRF24L01 driver.
//! The crate is `#![no_std]` so the firmware links it directly, and it
//! builds on the host so the logic can be tested with fakes.

#![cfg_attr(not(test), no_std)]

pub mod central;
pub mod channel;
pub mod config;
pub mod drivers;
pub mod error;
pub mod hal;
pub mod node;
pub mod record;

pub use central::{Aggregator, LinkStats, ReadingSink};
pub use channel::{Channel, PipeAddress, NODE1, NODE2};
pub use config::{FlameConfig, Polarity, VoltageScale};
pub use error::{DecodeError, NodeError, PollError};
pub use hal::{AnalogSampler, Frame, Receiver, Transmitter, MAX_PAYLOAD_LEN};
pub use node::{FlameNode, SoilNode};
pub use record::{FireVoltSample, Reading, SoilSample};
