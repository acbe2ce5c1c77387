//! Logical radio channels and their binding to record layouts.

use crate::error::DecodeError;
use crate::record::{FireVoltSample, Reading, SoilSample};

/// Width of every pipe address used by the network.
pub const ADDRESS_WIDTH: usize = 5;

/// A 5-byte pipe identifier, stored in the order it is written by humans.
///
/// The last byte is the one the transceiver treats as least significant, so
/// addresses sharing their first four bytes can be served by pipes 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PipeAddress(pub [u8; ADDRESS_WIDTH]);

impl PipeAddress {
    pub const fn new(bytes: &[u8; ADDRESS_WIDTH]) -> Self {
        Self(*bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_WIDTH] {
        &self.0
    }

    /// Least-significant byte on the air.
    pub fn lsb(&self) -> u8 {
        self.0[ADDRESS_WIDTH - 1]
    }

    /// Whether both addresses can be open on pipe 1 and pipes 2..=5 at once.
    pub fn shares_prefix(&self, other: &PipeAddress) -> bool {
        self.0[..ADDRESS_WIDTH - 1] == other.0[..ADDRESS_WIDTH - 1]
    }
}

pub const NODE1: PipeAddress = PipeAddress::new(b"NODE1");
pub const NODE2: PipeAddress = PipeAddress::new(b"NODE2");

/// One-way data path from a remote node to the central node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Soil,
    FireVolt,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Soil, Channel::FireVolt];

    /// Receive pipe the central node opens for this channel.
    pub const fn pipe(self) -> u8 {
        match self {
            Channel::Soil => 1,
            Channel::FireVolt => 2,
        }
    }

    pub const fn address(self) -> PipeAddress {
        match self {
            Channel::Soil => NODE1,
            Channel::FireVolt => NODE2,
        }
    }

    pub fn from_pipe(pipe: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.pipe() == pipe)
    }

    /// Decode `bytes` strictly with this channel's record layout.
    pub fn decode(self, bytes: &[u8]) -> Result<Reading, DecodeError> {
        match self {
            Channel::Soil => SoilSample::decode(bytes).map(Reading::Soil),
            Channel::FireVolt => FireVoltSample::decode(bytes).map(Reading::FireVolt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipes_map_back_to_channels() {
        assert_eq!(Channel::from_pipe(1), Some(Channel::Soil));
        assert_eq!(Channel::from_pipe(2), Some(Channel::FireVolt));
        for pipe in [0, 3, 4, 5, 6, 7] {
            assert_eq!(Channel::from_pipe(pipe), None);
        }
    }

    #[test]
    fn node_addresses_differ_only_in_lsb() {
        assert!(NODE1.shares_prefix(&NODE2));
        assert_eq!(NODE1.lsb(), b'1');
        assert_eq!(NODE2.lsb(), b'2');
        assert!(!NODE1.shares_prefix(&PipeAddress::new(b"XODE2")));
    }

    #[test]
    fn soil_payload_never_decodes_as_fire_volt() {
        let soil = SoilSample {
            soil_top: 1,
            soil_deep: 0,
        }
        .to_bytes();
        assert!(matches!(
            Channel::FireVolt.decode(&soil),
            Err(DecodeError::Length { .. })
        ));
        assert!(matches!(Channel::Soil.decode(&soil), Ok(Reading::Soil(_))));
    }

    #[test]
    fn fire_volt_payload_never_decodes_as_soil() {
        let fire = FireVoltSample {
            flame_detected: true,
            voltage: 3.3,
        }
        .to_bytes();
        assert!(matches!(
            Channel::Soil.decode(&fire),
            Err(DecodeError::Length { .. })
        ));
        assert!(matches!(
            Channel::FireVolt.decode(&fire),
            Ok(Reading::FireVolt(_))
        ));
    }
}
