pub mod adc;
pub mod radio;

pub use adc::BoardAdc;
pub use radio::{bring_up_receiver, bring_up_transmitter, RadioError};
