//! Fixed-layout sensor records and their wire encoding.
//!
//! Each record goes over the air as its raw little-endian field bytes with no
//! header, checksum or length prefix. The layout matches the packed struct of
//! the legacy 8-bit nodes (16-bit `int`, 1-byte `bool`, no padding).

use core::fmt;

use bytemuck::{Pod, Zeroable};

use crate::error::DecodeError;

pub const SOIL_SAMPLE_LEN: usize = core::mem::size_of::<SoilWire>();
pub const FIRE_VOLT_SAMPLE_LEN: usize = core::mem::size_of::<FireVoltWire>();

/// Longest rendered line, see [`Reading::to_line`].
pub const LINE_CAPACITY: usize = 64;

/* ───── Wire images ─────────────────────────────────────────────────── */

/// Wire-format image of a [`SoilSample`]: exactly what goes into the TX FIFO.
#[repr(C)]
#[derive(Clone, Copy, Default, Zeroable, Pod)]
struct SoilWire {
    soil_top: [u8; 2],
    soil_deep: [u8; 2],
}

/// Wire-format image of a [`FireVoltSample`].
#[repr(C)]
#[derive(Clone, Copy, Default, Zeroable, Pod)]
struct FireVoltWire {
    flame: u8,
    voltage: [u8; 4],
}

/// Reinterpret a payload as a wire image, rejecting anything not exactly
/// `size_of::<T>()` bytes long.
fn cast<T: Pod>(bytes: &[u8]) -> Result<&T, DecodeError> {
    bytemuck::try_from_bytes(bytes).map_err(|_| DecodeError::Length {
        expected: core::mem::size_of::<T>(),
        actual: bytes.len(),
    })
}

/* ───── Records ─────────────────────────────────────────────────────── */

/// Two raw soil moisture readings, in ADC counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SoilSample {
    pub soil_top: u16,
    pub soil_deep: u16,
}

impl SoilSample {
    pub fn to_bytes(&self) -> [u8; SOIL_SAMPLE_LEN] {
        let wire = SoilWire {
            soil_top: self.soil_top.to_le_bytes(),
            soil_deep: self.soil_deep.to_le_bytes(),
        };
        let mut out = [0u8; SOIL_SAMPLE_LEN];
        out.copy_from_slice(bytemuck::bytes_of(&wire));
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let wire: &SoilWire = cast(bytes)?;
        Ok(Self {
            soil_top: u16::from_le_bytes(wire.soil_top),
            soil_deep: u16::from_le_bytes(wire.soil_deep),
        })
    }
}

/// Flame detector state plus the scaled supply voltage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FireVoltSample {
    pub flame_detected: bool,
    /// Volts, after the divider calibration has been applied.
    pub voltage: f32,
}

impl FireVoltSample {
    pub fn to_bytes(&self) -> [u8; FIRE_VOLT_SAMPLE_LEN] {
        let wire = FireVoltWire {
            flame: self.flame_detected as u8,
            voltage: self.voltage.to_le_bytes(),
        };
        let mut out = [0u8; FIRE_VOLT_SAMPLE_LEN];
        out.copy_from_slice(bytemuck::bytes_of(&wire));
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let wire: &FireVoltWire = cast(bytes)?;
        let flame_detected = match wire.flame {
            0 => false,
            1 => true,
            other => return Err(DecodeError::InvalidFlag(other)),
        };
        Ok(Self {
            flame_detected,
            voltage: f32::from_le_bytes(wire.voltage),
        })
    }
}

/// A decoded record tagged with the layout it was decoded as.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    Soil(SoilSample),
    FireVolt(FireVoltSample),
}

impl Reading {
    /// Render the reading as one text line, without the line terminator.
    pub fn to_line(&self) -> heapless::String<LINE_CAPACITY> {
        use core::fmt::Write;

        let mut line = heapless::String::new();
        // Both renderings are well below LINE_CAPACITY.
        let _ = write!(line, "{}", self);
        line
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Soil(s) => write!(f, "Soil Top: {} Soil Deep: {}", s.soil_top, s.soil_deep),
            Reading::FireVolt(s) => write!(
                f,
                "Flame: {} Voltage: {:.2}",
                s.flame_detected as u8, s.voltage
            ),
        }
    }
}

impl From<SoilSample> for Reading {
    fn from(s: SoilSample) -> Self {
        Reading::Soil(s)
    }
}

impl From<FireVoltSample> for Reading {
    fn from(s: FireVoltSample) -> Self {
        Reading::FireVolt(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_sizes_match_legacy_layout() {
        assert_eq!(SOIL_SAMPLE_LEN, 4);
        assert_eq!(FIRE_VOLT_SAMPLE_LEN, 5);
    }

    #[test]
    fn soil_bytes_are_little_endian() {
        let s = SoilSample {
            soil_top: 0x0201,
            soil_deep: 1023,
        };
        assert_eq!(s.to_bytes(), [0x01, 0x02, 0xFF, 0x03]);
        assert_eq!(SoilSample::decode(&s.to_bytes()), Ok(s));
    }

    #[test]
    fn fire_volt_round_trip_is_bit_exact() {
        let s = FireVoltSample {
            flame_detected: true,
            voltage: 100.097_75,
        };
        let bytes = s.to_bytes();
        assert_eq!(bytes[0], 1);
        let back = FireVoltSample::decode(&bytes).unwrap();
        assert!(back.flame_detected);
        assert_eq!(back.voltage.to_bits(), s.voltage.to_bits());
    }

    #[test]
    fn short_and_long_payloads_are_rejected() {
        assert_eq!(
            SoilSample::decode(&[1, 2, 3]),
            Err(DecodeError::Length {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            FireVoltSample::decode(&[0; 32]),
            Err(DecodeError::Length {
                expected: 5,
                actual: 32
            })
        );
        assert_eq!(
            SoilSample::decode(&[]),
            Err(DecodeError::Length {
                expected: 4,
                actual: 0
            })
        );
    }

    #[test]
    fn flag_byte_must_be_zero_or_one() {
        let mut bytes = FireVoltSample::default().to_bytes();
        bytes[0] = 0x7F;
        assert_eq!(
            FireVoltSample::decode(&bytes),
            Err(DecodeError::InvalidFlag(0x7F))
        );
    }

    #[test]
    fn zero_reading_is_a_valid_reading() {
        assert_eq!(
            SoilSample::decode(&[0, 0, 0, 0]),
            Ok(SoilSample {
                soil_top: 0,
                soil_deep: 0
            })
        );
    }

    #[test]
    fn lines_match_serial_output() {
        let soil = Reading::Soil(SoilSample {
            soil_top: 512,
            soil_deep: 300,
        });
        assert_eq!(soil.to_line().as_str(), "Soil Top: 512 Soil Deep: 300");

        let fire = Reading::FireVolt(FireVoltSample {
            flame_detected: false,
            voltage: 12.5,
        });
        assert_eq!(fire.to_line().as_str(), "Flame: 0 Voltage: 12.50");
    }
}
