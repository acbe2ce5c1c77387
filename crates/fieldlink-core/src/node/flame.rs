use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::FlameConfig;
use crate::error::NodeError;
use crate::hal::{AnalogSampler, Transmitter};
use crate::record::FireVoltSample;

/// Remote node B: flame detector, voltage divider and an actuator that
/// follows the flame state.
pub struct FlameNode<I, O, A: AnalogSampler, T> {
    flame: I,
    actuator: O,
    adc: A,
    voltage: A::Channel,
    radio: T,
    config: FlameConfig,
}

impl<I, O, A, T> FlameNode<I, O, A, T>
where
    I: InputPin,
    O: OutputPin,
    A: AnalogSampler,
    T: Transmitter,
{
    /// Drives the actuator low before returning. `radio` must already be
    /// write-only on the fire/volt channel address.
    pub fn new(
        flame: I,
        mut actuator: O,
        adc: A,
        voltage: A::Channel,
        radio: T,
        config: FlameConfig,
    ) -> Result<Self, NodeError<T::Error>> {
        actuator.set_low().map_err(NodeError::pin)?;
        Ok(Self {
            flame,
            actuator,
            adc,
            voltage,
            radio,
            config,
        })
    }

    pub fn sample(&mut self) -> Result<FireVoltSample, NodeError<T::Error>> {
        let level = self.flame.is_high().map_err(NodeError::pin)?;
        let raw = self.adc.sample(&mut self.voltage);
        Ok(FireVoltSample {
            flame_detected: self.config.polarity.is_asserted(level),
            voltage: self.config.voltage_scale.volts(raw),
        })
    }

    /// One sampling cycle. The actuator is driven before transmitting, so it
    /// tracks the flame state even when the packet is lost.
    pub async fn cycle(&mut self) -> Result<FireVoltSample, NodeError<T::Error>> {
        let sample = self.sample()?;
        if sample.flame_detected {
            self.actuator.set_high().map_err(NodeError::pin)?;
        } else {
            self.actuator.set_low().map_err(NodeError::pin)?;
        }
        self.radio
            .transmit(&sample.to_bytes())
            .await
            .map_err(NodeError::Radio)?;
        Ok(sample)
    }
}
