use crate::hal::{AnalogSampler, Transmitter};
use crate::record::SoilSample;

/// Remote node A: two soil moisture probes on one ADC.
pub struct SoilNode<A: AnalogSampler, T> {
    adc: A,
    top: A::Channel,
    deep: A::Channel,
    radio: T,
}

impl<A: AnalogSampler, T: Transmitter> SoilNode<A, T> {
    /// `radio` must already be write-only on the soil channel address.
    pub fn new(adc: A, top: A::Channel, deep: A::Channel, radio: T) -> Self {
        Self {
            adc,
            top,
            deep,
            radio,
        }
    }

    /// Raw readings go out unmodified.
    pub fn sample(&mut self) -> SoilSample {
        SoilSample {
            soil_top: self.adc.sample(&mut self.top),
            soil_deep: self.adc.sample(&mut self.deep),
        }
    }

    /// One sampling cycle. On a transmit failure the sample is lost; the
    /// error is only handed back for logging.
    pub async fn cycle(&mut self) -> Result<SoilSample, T::Error> {
        let sample = self.sample();
        self.radio.transmit(&sample.to_bytes()).await?;
        Ok(sample)
    }
}
