use embassy_stm32::adc::{Adc, AnyAdcChannel};
use embassy_stm32::peripherals::ADC1;
use fieldlink_core::AnalogSampler;

/// ADC1 in blocking single-conversion mode, shared by every analog input on a node.
pub struct BoardAdc(Adc<'static, ADC1>);

impl BoardAdc {
    pub fn new(adc: Adc<'static, ADC1>) -> Self {
        Self(adc)
    }
}

impl AnalogSampler for BoardAdc {
    type Channel = AnyAdcChannel<ADC1>;

    fn sample(&mut self, channel: &mut Self::Channel) -> u16 {
        self.0.blocking_read(channel)
    }
}
